use std::borrow::Cow;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use re_batch_core::{DeserializationResult, Loggable, SerializationResult};

/// An RGBA color with unmultiplied/separate alpha, in sRGB gamma space with linear alpha.
///
/// The color is stored as a 32-bit integer, where the most significant byte is `R` and the
/// least significant byte is `A`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Rgba32(pub u32);

impl Rgba32 {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::from_unmultiplied_rgba(0, 0, 0, 0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    /// Most significant byte is `r`, least significant byte is `a`.
    #[inline]
    pub const fn to_unmultiplied_rgba(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for Rgba32 {
    #[inline]
    fn from(rgba: u32) -> Self {
        Self(rgba)
    }
}

impl From<Rgba32> for u32 {
    #[inline]
    fn from(rgba: Rgba32) -> Self {
        rgba.0
    }
}

impl From<[u8; 3]> for Rgba32 {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Rgba32 {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, a)
    }
}

impl std::fmt::Display for Rgba32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.to_unmultiplied_rgba();
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

re_batch_core::macros::impl_into_cow!(Rgba32);

impl Loggable for Rgba32 {
    #[inline]
    fn arrow_datatype() -> DataType {
        u32::arrow_datatype()
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        u32::to_arrow_opt(data.into_iter().map(|datum| {
            datum.map(|datum| Cow::<'a, u32>::Owned(Into::<Cow<'a, Self>>::into(datum).0))
        }))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        u32::from_arrow_opt(data).map(|values| values.into_iter().map(|v| v.map(Self)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order() {
        let color = Rgba32::from_unmultiplied_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.0, 0x1122_3344);
        assert_eq!(color.to_unmultiplied_rgba(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Rgba32::from([255, 0, 0]), Rgba32(0xFF00_00FF));
        assert_eq!(color.to_string(), "#11223344");
    }

    #[test]
    fn serializes_as_u32() {
        let colors = [Rgba32::WHITE, Rgba32::TRANSPARENT];
        let array = Rgba32::to_arrow(&colors).unwrap();
        assert_eq!(array.data_type(), &DataType::UInt32);
        assert_eq!(Rgba32::from_arrow(array.as_ref()).unwrap(), colors);
    }
}
