use std::borrow::Cow;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, FixedSizeListArray, Float32Array};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field};
use re_batch_core::{
    DeserializationError, DeserializationResult, Loggable, SerializationResult,
};

/// A vector in 2D space.
///
/// Serialized as a `FixedSizeList<Float32, 2>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Vec2D(pub [f32; 2]);

impl Vec2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self([x, y])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }
}

impl From<[f32; 2]> for Vec2D {
    #[inline]
    fn from(xy: [f32; 2]) -> Self {
        Self(xy)
    }
}

impl From<(f32, f32)> for Vec2D {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vec2D> for [f32; 2] {
    #[inline]
    fn from(v: Vec2D) -> Self {
        v.0
    }
}

impl std::fmt::Display for Vec2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prec = f.precision().unwrap_or(super::DEFAULT_DISPLAY_DECIMALS);
        write!(f, "[{:.prec$}, {:.prec$}]", self.x(), self.y())
    }
}

re_batch_core::macros::impl_into_cow!(Vec2D);

impl Vec2D {
    const NUM_COMPONENTS: i32 = 2;

    fn item_field() -> Arc<Field> {
        Arc::new(Field::new_list_field(DataType::Float32, false))
    }
}

impl Loggable for Vec2D {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::FixedSizeList(Self::item_field(), Self::NUM_COMPONENTS)
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        re_tracing::profile_function!();

        let data = data.into_iter();
        let mut values = Vec::with_capacity(2 * data.size_hint().0);
        let mut validity = Vec::with_capacity(data.size_hint().0);

        for datum in data {
            match datum {
                Some(datum) => {
                    values.extend_from_slice(&Into::<Cow<'a, Self>>::into(datum).0);
                    validity.push(true);
                }
                None => {
                    values.extend_from_slice(&Self::ZERO.0);
                    validity.push(false);
                }
            }
        }

        let nulls = validity
            .contains(&false)
            .then(|| NullBuffer::from(validity));

        Ok(Arc::new(FixedSizeListArray::try_new(
            Self::item_field(),
            Self::NUM_COMPONENTS,
            Arc::new(Float32Array::from(values)),
            nulls,
        )?))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        re_tracing::profile_function!();

        let mismatch =
            || DeserializationError::datatype_mismatch(Self::arrow_datatype(), data.data_type().clone());

        let array = data
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .ok_or_else(mismatch)?;

        if array.value_length() != Self::NUM_COMPONENTS {
            return Err(DeserializationError::MismatchedLength {
                expected: Self::NUM_COMPONENTS as usize,
                actual: array.value_length().max(0) as usize,
            });
        }

        let values = array
            .values()
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(mismatch)?;
        let values = values.values();

        Ok((0..array.len())
            .map(|i| {
                if array.is_null(i) {
                    return None;
                }
                let start = array.value_offset(i) as usize;
                Some(Self([values[start], values[start + 1]]))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_nulls() {
        let array =
            Vec2D::to_arrow_opt([Some(Vec2D::new(1.0, 2.0)), None, Some(Vec2D::new(3.0, 4.0))])
                .unwrap();

        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);
        assert_eq!(array.data_type(), &Vec2D::arrow_datatype());
        assert_eq!(
            Vec2D::from_arrow_opt(array.as_ref()).unwrap(),
            vec![Some(Vec2D::new(1.0, 2.0)), None, Some(Vec2D::new(3.0, 4.0))]
        );
    }

    #[test]
    fn sliced_array() {
        let array = Vec2D::to_arrow([Vec2D::new(1.0, 2.0), Vec2D::new(3.0, 4.0)]).unwrap();
        let sliced = array.slice(1, 1);
        assert_eq!(
            Vec2D::from_arrow(sliced.as_ref()).unwrap(),
            vec![Vec2D::new(3.0, 4.0)]
        );
    }

    #[test]
    fn wrong_width() {
        let values = Arc::new(Float32Array::from(vec![1.0, 2.0, 3.0]));
        let array = FixedSizeListArray::try_new(
            Arc::new(Field::new_list_field(DataType::Float32, false)),
            3,
            values,
            None,
        )
        .unwrap();

        assert!(matches!(
            Vec2D::from_arrow(&array),
            Err(DeserializationError::MismatchedLength {
                expected: 2,
                actual: 3
            })
        ));
    }
}
