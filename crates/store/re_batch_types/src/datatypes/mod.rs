//! Plain data, without semantics.
//!
//! Every datatype is [`re_batch_core::Loggable`], and maps to exactly one Arrow datatype.

mod rgba32;
mod utf8;
mod vec2d;

pub use self::{rgba32::Rgba32, utf8::Utf8, vec2d::Vec2D};

/// Declares a single-field datatype that serializes exactly like its primitive field.
macro_rules! delegate_to_primitive {
    ($(#[$meta:meta])* $name:ident($primitive:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, bytemuck::Pod, bytemuck::Zeroable)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(pub $primitive);

        impl From<$primitive> for $name {
            #[inline]
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $primitive {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $primitive;

            #[inline]
            fn deref(&self) -> &$primitive {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut $primitive {
                &mut self.0
            }
        }

        ::re_batch_core::macros::impl_into_cow!($name);

        impl ::re_batch_core::Loggable for $name {
            #[inline]
            fn arrow_datatype() -> arrow::datatypes::DataType {
                <$primitive as ::re_batch_core::Loggable>::arrow_datatype()
            }

            fn to_arrow_opt<'a>(
                data: impl IntoIterator<Item = Option<impl Into<std::borrow::Cow<'a, Self>>>>,
            ) -> ::re_batch_core::SerializationResult<arrow::array::ArrayRef>
            where
                Self: 'a,
            {
                <$primitive as ::re_batch_core::Loggable>::to_arrow_opt(data.into_iter().map(
                    |datum| {
                        datum.map(|datum| {
                            std::borrow::Cow::<'a, $primitive>::Owned(
                                Into::<std::borrow::Cow<'a, Self>>::into(datum).0,
                            )
                        })
                    },
                ))
            }

            fn from_arrow_opt(
                data: &dyn arrow::array::Array,
            ) -> ::re_batch_core::DeserializationResult<Vec<Option<Self>>> {
                <$primitive as ::re_batch_core::Loggable>::from_arrow_opt(data)
                    .map(|values| values.into_iter().map(|v| v.map(Self)).collect())
            }
        }
    };
}

delegate_to_primitive!(
    /// A single-precision 32-bit IEEE 754 floating point number.
    Float32(f32)
);

delegate_to_primitive!(
    /// A double-precision 64-bit IEEE 754 floating point number.
    Float64(f64)
);

delegate_to_primitive!(
    /// A 16bit unsigned integer.
    UInt16(u16)
);

/// Number of decimals shown when displaying floats.
pub const DEFAULT_DISPLAY_DECIMALS: usize = 3;

impl std::fmt::Display for Float32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prec = f.precision().unwrap_or(DEFAULT_DISPLAY_DECIMALS);
        write!(f, "{:.prec$}", self.0)
    }
}

impl std::fmt::Display for Float64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prec = f.precision().unwrap_or(DEFAULT_DISPLAY_DECIMALS);
        write!(f, "{:.prec$}", self.0)
    }
}

impl std::fmt::Display for UInt16 {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::DataType;
    use re_batch_core::Loggable;

    use super::*;

    #[test]
    fn primitives_roundtrip() {
        let floats = [Float32(1.0), Float32(-2.5)];
        let array = Float32::to_arrow(&floats).unwrap();
        assert_eq!(array.data_type(), &DataType::Float32);
        assert_eq!(Float32::from_arrow(array.as_ref()).unwrap(), floats);

        let ids = [UInt16(3), UInt16(u16::MAX)];
        let array = UInt16::to_arrow(ids).unwrap();
        assert_eq!(array.data_type(), &DataType::UInt16);
        assert_eq!(UInt16::from_arrow(array.as_ref()).unwrap(), ids);

        let array = Float64::to_arrow_opt([Some(Float64(1.0)), None]).unwrap();
        assert_eq!(array.null_count(), 1);
        assert_eq!(
            Float64::from_arrow_opt(array.as_ref()).unwrap(),
            vec![Some(Float64(1.0)), None]
        );
    }

    #[test]
    fn display() {
        assert_eq!(Float32(1.0).to_string(), "1.000");
        assert_eq!(format!("{:.1}", Float64(2.0)), "2.0");
        assert_eq!(UInt16(7).to_string(), "7");
    }
}
