use std::sync::Arc;

use arrow::array::{Array, ArrayRef, ListArray, NullArray};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, FieldRef};
use arrow::error::ArrowError;

// ---------------------------------------------------------------------------------

/// Downcast an arrow array to another array, without having to go via `Any`.
pub trait ArrowArrayDowncastRef<'a>: 'a {
    /// Downcast an arrow array to another array, without having to go via `Any`.
    fn downcast_array_ref<T: Array + 'static>(self) -> Option<&'a T>;

    /// Similar to `downcast_array_ref`, but returns an error in case the downcast
    /// returns `None`.
    fn try_downcast_array_ref<T: Array + 'static>(self) -> Result<&'a T, ArrowError>;
}

impl<'a> ArrowArrayDowncastRef<'a> for &'a dyn Array {
    fn downcast_array_ref<T: Array + 'static>(self) -> Option<&'a T> {
        self.as_any().downcast_ref()
    }

    fn try_downcast_array_ref<T: Array + 'static>(self) -> Result<&'a T, ArrowError> {
        self.downcast_array_ref::<T>().ok_or_else(|| {
            ArrowError::CastError(format!(
                "Failed to downcast array of type {} to {}",
                self.data_type(),
                std::any::type_name::<T>(),
            ))
        })
    }
}

impl<'a> ArrowArrayDowncastRef<'a> for &'a ArrayRef {
    fn downcast_array_ref<T: Array + 'static>(self) -> Option<&'a T> {
        self.as_ref().downcast_array_ref()
    }

    fn try_downcast_array_ref<T: Array + 'static>(self) -> Result<&'a T, ArrowError> {
        self.as_ref().try_downcast_array_ref()
    }
}

// ---------------------------------------------------------------------------------

#[inline]
pub fn into_arrow_ref(array: impl Array + 'static) -> ArrayRef {
    Arc::new(array)
}

/// The field used for the items of a list whose items are of `item_datatype`.
///
/// Items are always nullable, matching what [`Field::new_list_field`] does elsewhere in arrow.
#[inline]
pub fn list_item_field(item_datatype: DataType) -> FieldRef {
    let nullable = true;
    Arc::new(Field::new_list_field(item_datatype, nullable))
}

/// `List<item_datatype>`
#[inline]
pub fn list_datatype_of(item_datatype: DataType) -> DataType {
    DataType::List(list_item_field(item_datatype))
}

/// Wrap a flat `values` array into a [`ListArray`] whose i-th entry is `values[offsets[i]..offsets[i+1]]`.
///
/// `list_datatype` must be a [`DataType::List`] whose item type is `values.data_type()`,
/// otherwise an [`ArrowError::InvalidArgumentError`] is returned.
/// No entry is null.
pub fn wrap_in_list_array(
    list_datatype: &DataType,
    offsets: OffsetBuffer<i32>,
    values: ArrayRef,
) -> Result<ListArray, ArrowError> {
    re_tracing::profile_function!();

    let DataType::List(item_field) = list_datatype else {
        return Err(ArrowError::InvalidArgumentError(format!(
            "expected a list datatype, got {list_datatype}"
        )));
    };

    ListArray::try_new(item_field.clone(), offsets, values, None)
}

/// An array of `len` nulls that carries no payload buffers at all.
#[inline]
pub fn new_null_array_ref(len: usize) -> ArrayRef {
    into_arrow_ref(NullArray::new(len))
}

#[cfg(test)]
mod tests {
    use arrow::array::{Int32Array, StringArray};

    use super::*;

    #[test]
    fn downcast() {
        let array = into_arrow_ref(Int32Array::from(vec![1, 2, 3]));

        assert!((&array).downcast_array_ref::<Int32Array>().is_some());
        assert!((&array).downcast_array_ref::<StringArray>().is_none());

        let err = (&array)
            .try_downcast_array_ref::<StringArray>()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to downcast"));
    }

    #[test]
    fn wrap_values() {
        let values = into_arrow_ref(Int32Array::from(vec![1, 2, 3]));
        let offsets = OffsetBuffer::new(vec![0, 1, 3].into());

        let list = wrap_in_list_array(&list_datatype_of(DataType::Int32), offsets, values).unwrap();

        assert_eq!(list.len(), 2);
        similar_asserts::assert_eq!(list.value_offsets(), &[0, 1, 3]);
        assert_eq!(list.value(1).len(), 2);
    }

    #[test]
    fn wrap_values_wrong_item_type() {
        let values = into_arrow_ref(Int32Array::from(vec![1, 2, 3]));
        let offsets = OffsetBuffer::new(vec![0, 3].into());

        assert!(wrap_in_list_array(&list_datatype_of(DataType::Utf8), offsets.clone(), values.clone()).is_err());
        assert!(wrap_in_list_array(&DataType::Int32, offsets, values).is_err());
    }

    #[test]
    fn nulls_have_no_payload() {
        let array = new_null_array_ref(5);
        assert_eq!(array.len(), 5);
        assert_eq!(array.data_type(), &DataType::Null);
        assert_eq!(array.to_data().buffers().len(), 0);
    }
}
