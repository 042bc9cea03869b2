use std::any::TypeId;
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use arrow::array::{
    Array, ArrayRef, ArrowPrimitiveType, BooleanArray, PrimitiveArray, StringArray,
};
use arrow::datatypes::DataType;
use parking_lot::RwLock;

use re_arrow_util::ArrowArrayDowncastRef as _;

use crate::{DeserializationError, DeserializationResult, SerializationResult};

// ---

/// A type whose values can be serialized into, and read back from, Arrow arrays.
///
/// Arrow only deals with arrays of data, and so do we: "N values of `T`" always becomes one
/// typed Arrow array of length N. We refer to individual entries in these arrays as instances.
///
/// A [`Loggable`] is nameless data. Naming it is what [`Component`] adds on top.
///
/// Using a type that isn't [`Loggable`] where a [`crate::Collection`] is serialized is a compile-time
/// error, never a runtime one.
pub trait Loggable: 'static + Send + Sync + Clone + Sized {
    /// The Arrow datatype every serialized array of `Self` has.
    fn arrow_datatype() -> DataType;

    /// A zero-length array of [`Self::arrow_datatype`].
    #[inline]
    fn arrow_empty() -> ArrayRef {
        arrow::array::new_empty_array(&Self::arrow_datatype())
    }

    /// Serializes borrowed or owned values, all present.
    ///
    /// Serializing zero values yields an empty array of [`Self::arrow_datatype`].
    #[inline]
    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        Self::to_arrow_opt(data.into_iter().map(|v| Some(v)))
    }

    /// Serializes borrowed or owned values, where `None` becomes a null entry.
    ///
    /// Fails only when the values do not fit into a single Arrow array.
    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a;

    /// Reads values back, failing on any null entry.
    #[inline]
    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        Self::from_arrow_opt(data)?
            .into_iter()
            .map(|opt| opt.ok_or_else(DeserializationError::missing_data))
            .collect::<DeserializationResult<Vec<_>>>()
    }

    /// Reads values back, nulls included.
    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>>;

    /// Checks that `data` reads back as values of `Self`, discarding them.
    fn verify_arrow_array(data: &dyn Array) -> DeserializationResult<()> {
        Self::from_arrow(data).map(|_| ())
    }
}

/// A [`Component`] describes semantic data that can be used by any number of [`crate::Archetype`]s.
pub trait Component: Loggable {
    /// The fully-qualified type name of this component, e.g. `rerun.components.Position2D`.
    fn name() -> ComponentType;
}

// ---

crate::declare_interned_name!(
    /// The fully-qualified type name of a [`Component`], e.g. `rerun.components.Position2D`.
    pub struct ComponentType;
);

impl ComponentType {
    /// The last segment of the name, e.g. `Position2D`.
    ///
    /// ```
    /// # use re_batch_core::ComponentType;
    /// assert_eq!(ComponentType::new("rerun.components.Position2D").short_name(), "Position2D");
    /// ```
    #[inline]
    pub fn short_name(&self) -> &'static str {
        crate::names::short_name(self.as_str())
    }

    /// Whether this names an archetype indicator (`…Indicator`).
    #[inline]
    pub fn is_indicator_component(&self) -> bool {
        self.ends_with("Indicator")
    }
}

// ---

static LIST_DATATYPES: LazyLock<RwLock<ahash::HashMap<TypeId, DataType>>> =
    LazyLock::new(Default::default);

/// `List<T::arrow_datatype()>`, computed once per `T` for the whole process.
///
/// This is the datatype of the list arrays that [`crate::ComponentColumn`] wraps batches of `T` into.
pub fn list_arrow_datatype<T: Loggable>() -> DataType {
    let type_id = TypeId::of::<T>();

    if let Some(datatype) = LIST_DATATYPES.read().get(&type_id) {
        return datatype.clone();
    }

    LIST_DATATYPES
        .write()
        .entry(type_id)
        .or_insert_with(|| re_arrow_util::list_datatype_of(T::arrow_datatype()))
        .clone()
}

// --- Primitives ---

fn downcast_or_mismatch<'a, A: Array + 'static>(
    data: &'a dyn Array,
    expected: DataType,
) -> DeserializationResult<&'a A> {
    data.downcast_array_ref::<A>()
        .ok_or_else(|| DeserializationError::datatype_mismatch(expected, data.data_type().clone()))
}

macro_rules! impl_loggable_for_primitive {
    ($native:ty, $arrow_type:ty) => {
        impl Loggable for $native {
            #[inline]
            fn arrow_datatype() -> DataType {
                <$arrow_type as ArrowPrimitiveType>::DATA_TYPE
            }

            fn to_arrow_opt<'a>(
                data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
            ) -> SerializationResult<ArrayRef>
            where
                Self: 'a,
            {
                let array: PrimitiveArray<$arrow_type> = data
                    .into_iter()
                    .map(|datum| datum.map(|datum| *Into::<Cow<'a, Self>>::into(datum)))
                    .collect();
                Ok(Arc::new(array))
            }

            fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
                let array =
                    downcast_or_mismatch::<PrimitiveArray<$arrow_type>>(data, Self::arrow_datatype())?;
                Ok(array.iter().collect())
            }
        }
    };
}

impl_loggable_for_primitive!(u8, arrow::datatypes::UInt8Type);
impl_loggable_for_primitive!(u16, arrow::datatypes::UInt16Type);
impl_loggable_for_primitive!(u32, arrow::datatypes::UInt32Type);
impl_loggable_for_primitive!(u64, arrow::datatypes::UInt64Type);
impl_loggable_for_primitive!(i8, arrow::datatypes::Int8Type);
impl_loggable_for_primitive!(i16, arrow::datatypes::Int16Type);
impl_loggable_for_primitive!(i32, arrow::datatypes::Int32Type);
impl_loggable_for_primitive!(i64, arrow::datatypes::Int64Type);
impl_loggable_for_primitive!(f32, arrow::datatypes::Float32Type);
impl_loggable_for_primitive!(f64, arrow::datatypes::Float64Type);

impl Loggable for bool {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Boolean
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        let array: BooleanArray = data
            .into_iter()
            .map(|datum| datum.map(|datum| *Into::<Cow<'a, Self>>::into(datum)))
            .collect();
        Ok(Arc::new(array))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        let array = downcast_or_mismatch::<BooleanArray>(data, Self::arrow_datatype())?;
        Ok(array.iter().collect())
    }
}

impl Loggable for String {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Utf8
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        let data: Vec<Option<Cow<'a, Self>>> =
            data.into_iter().map(|datum| datum.map(Into::into)).collect();

        let offsets_fit = data
            .iter()
            .flatten()
            .map(|s| s.len())
            .sum::<usize>()
            <= i32::MAX as usize;
        if !offsets_fit {
            return Err(arrow::error::ArrowError::ComputeError(
                "total string length overflows i32 offsets".to_owned(),
            )
            .into());
        }

        let array: StringArray = data
            .iter()
            .map(|datum| datum.as_deref().map(String::as_str))
            .collect();
        Ok(Arc::new(array))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        let array = downcast_or_mismatch::<StringArray>(data, Self::arrow_datatype())?;
        Ok(array.iter().map(|s| s.map(ToOwned::to_owned)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Loggable + PartialEq + std::fmt::Debug>(values: Vec<T>) {
        let array = T::to_arrow(values.iter().map(Cow::Borrowed)).unwrap();
        assert_eq!(array.len(), values.len());
        assert_eq!(array.data_type(), &T::arrow_datatype());
        similar_asserts::assert_eq!(T::from_arrow(array.as_ref()).unwrap(), values);
    }

    #[test]
    fn primitives_roundtrip() {
        roundtrip::<u8>(vec![0, 1, 255]);
        roundtrip::<u16>(vec![]);
        roundtrip::<u32>(vec![42]);
        roundtrip::<u64>(vec![u64::MAX, 0]);
        roundtrip::<i8>(vec![-1, 1]);
        roundtrip::<i16>(vec![i16::MIN]);
        roundtrip::<i32>(vec![1, 2, 3]);
        roundtrip::<i64>(vec![-5; 7]);
        roundtrip::<f32>(vec![0.5, -1.25]);
        roundtrip::<f64>(vec![1e300]);
        roundtrip::<bool>(vec![true, false, true]);
        roundtrip::<String>(vec!["hello".to_owned(), String::new(), "wörld".to_owned()]);
        roundtrip::<String>(vec![]);
    }

    #[test]
    fn empty_is_typed() {
        let empty = i32::to_arrow(std::iter::empty::<Cow<'_, i32>>()).unwrap();
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.data_type(), &DataType::Int32);
        assert_eq!(f64::arrow_empty().data_type(), &DataType::Float64);
    }

    #[test]
    fn nulls() {
        let array = u16::to_arrow_opt([Some(Cow::Owned(1_u16)), None]).unwrap();
        assert_eq!(array.null_count(), 1);
        assert_eq!(u16::from_arrow_opt(array.as_ref()).unwrap(), vec![Some(1), None]);
        assert!(matches!(
            u16::from_arrow(array.as_ref()),
            Err(DeserializationError::MissingData)
        ));
    }

    #[test]
    fn datatype_mismatch() {
        let array = i32::to_arrow([Cow::Owned(1_i32)]).unwrap();
        let err = String::from_arrow(array.as_ref()).unwrap_err();
        assert!(matches!(err, DeserializationError::DatatypeMismatch { .. }));
        assert!(String::verify_arrow_array(array.as_ref()).is_err());
        assert!(i32::verify_arrow_array(array.as_ref()).is_ok());
    }

    #[test]
    fn list_datatype_is_memoized() {
        let a = list_arrow_datatype::<f32>();
        let b = list_arrow_datatype::<f32>();
        assert_eq!(a, b);
        assert_eq!(a, re_arrow_util::list_datatype_of(DataType::Float32));
        assert_ne!(a, list_arrow_datatype::<f64>());
    }
}
