use crate::datatypes::Vec2D;

use super::{HalfSize2D, Position2D, Vector2D};

macro_rules! impl_vec2d_ext {
    ($name:ident) => {
        impl $name {
            pub const ZERO: Self = Self(Vec2D::ZERO);

            #[inline]
            pub const fn new(x: f32, y: f32) -> Self {
                Self(Vec2D::new(x, y))
            }

            #[inline]
            pub fn x(&self) -> f32 {
                self.0.x()
            }

            #[inline]
            pub fn y(&self) -> f32 {
                self.0.y()
            }
        }

        impl From<[f32; 2]> for $name {
            #[inline]
            fn from(xy: [f32; 2]) -> Self {
                Self(Vec2D(xy))
            }
        }

        impl From<(f32, f32)> for $name {
            #[inline]
            fn from((x, y): (f32, f32)) -> Self {
                Self::new(x, y)
            }
        }

        impl std::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl_vec2d_ext!(Position2D);
impl_vec2d_ext!(HalfSize2D);
impl_vec2d_ext!(Vector2D);

impl HalfSize2D {
    /// Half-sizes from full sizes.
    #[inline]
    pub fn from_size(size: impl Into<Vec2D>) -> Self {
        let size = size.into();
        Self::new(size.x() / 2.0, size.y() / 2.0)
    }

    /// Full size, i.e. twice the half-size.
    #[inline]
    pub fn size(&self) -> Vec2D {
        Vec2D::new(self.x() * 2.0, self.y() * 2.0)
    }
}
