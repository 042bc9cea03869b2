//! Datatypes with semantics.
//!
//! Each component wraps exactly one [`crate::datatypes`] type and serializes exactly like it,
//! see [`re_batch_core::WrapperComponent`].

mod color_ext;
mod radius_ext;
mod vec2d_ext;

use crate::datatypes::{Float32, Float64, Rgba32, UInt16, Utf8, Vec2D};

macro_rules! declare_component {
    ($(#[$meta:meta])* $name:ident($datatype:ty) = $type_name:literal $(, $extra:ident)*) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq $(, $extra)*)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(pub $datatype);

        impl ::re_batch_core::WrapperComponent for $name {
            type Datatype = $datatype;

            #[inline]
            fn name() -> ::re_batch_core::ComponentType {
                $type_name.into()
            }

            #[inline]
            fn into_inner(self) -> $datatype {
                self.0
            }
        }

        impl From<$datatype> for $name {
            #[inline]
            fn from(value: $datatype) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $datatype {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $datatype;

            #[inline]
            fn deref(&self) -> &$datatype {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut $datatype {
                &mut self.0
            }
        }

        ::re_batch_core::macros::impl_into_cow!($name);
    };
}

declare_component!(
    /// A position in 2D space.
    Position2D(Vec2D) = "rerun.components.Position2D", Copy
);

declare_component!(
    /// Half-size (radius) of a 2D box.
    ///
    /// Measured in its local coordinate system.
    /// The box extends both in negative and positive direction along each axis.
    HalfSize2D(Vec2D) = "rerun.components.HalfSize2D", Copy
);

declare_component!(
    /// A vector in 2D space.
    Vector2D(Vec2D) = "rerun.components.Vector2D", Copy
);

declare_component!(
    /// An RGBA color with unmultiplied/separate alpha, in sRGB gamma space with linear alpha.
    Color(Rgba32) = "rerun.components.Color", Copy, Eq, Hash
);

declare_component!(
    /// The radius of something, e.g. a point.
    ///
    /// Internally, positive values indicate scene units, whereas negative values are interpreted
    /// as UI points.
    Radius(Float32) = "rerun.components.Radius", Copy
);

declare_component!(
    /// Draw order of 2D elements. Higher values are drawn on top of lower values.
    DrawOrder(Float32) = "rerun.components.DrawOrder", Copy
);

declare_component!(
    /// A string of text, e.g. for labels and text documents.
    Text(Utf8) = "rerun.components.Text", Eq, Hash
);

declare_component!(
    /// A 16-bit ID representing a type of semantic class.
    ClassId(UInt16) = "rerun.components.ClassId", Copy
);

declare_component!(
    /// A double-precision scalar, e.g. for plotting time series.
    Scalar(Float64) = "rerun.components.Scalar", Copy
);

impl From<f32> for DrawOrder {
    #[inline]
    fn from(value: f32) -> Self {
        Self(Float32(value))
    }
}

impl From<&str> for Text {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Text {
    #[inline]
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Display for Text {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u16> for ClassId {
    #[inline]
    fn from(value: u16) -> Self {
        Self(UInt16(value))
    }
}

impl From<f64> for Scalar {
    #[inline]
    fn from(value: f64) -> Self {
        Self(Float64(value))
    }
}

#[cfg(test)]
mod tests {
    use re_batch_core::{Component, Loggable};

    use super::*;

    #[test]
    fn names() {
        assert_eq!(
            <Position2D as Component>::name().as_str(),
            "rerun.components.Position2D"
        );
        assert_eq!(<Text as Component>::name().short_name(), "Text");
    }

    #[test]
    fn serializes_like_datatype() {
        assert_eq!(Position2D::arrow_datatype(), Vec2D::arrow_datatype());
        assert_eq!(Scalar::arrow_datatype(), Float64::arrow_datatype());

        let texts = [Text::from("a"), Text::from("b")];
        let array = Text::to_arrow(&texts).unwrap();
        assert_eq!(Utf8::from_arrow(array.as_ref()).unwrap(), vec![
            Utf8::from("a"),
            Utf8::from("b")
        ]);
        assert_eq!(Text::from_arrow(array.as_ref()).unwrap(), texts);
    }
}
