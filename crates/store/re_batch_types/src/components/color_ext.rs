use crate::datatypes::Rgba32;

use super::Color;

impl Color {
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba32::from_rgb(r, g, b))
    }

    #[inline]
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Rgba32::from_unmultiplied_rgba(r, g, b, a))
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(rgba: u32) -> Self {
        Self(Rgba32(rgba))
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb.into())
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba.into())
    }
}

impl std::fmt::Display for Color {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
