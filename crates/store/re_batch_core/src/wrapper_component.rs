use std::borrow::Cow;

use arrow::array::{Array, ArrayRef};

use crate::{Component, ComponentType, DeserializationResult, Loggable, SerializationResult};

/// Implementation helper for [`Component`]s that wrap a single [`Loggable`] datatype.
///
/// Serialization goes through the wrapped field: borrowed values are borrowed through
/// [`std::ops::Deref`], owned values are unwrapped with [`Self::into_inner`].
/// Nothing is ever reinterpreted in memory.
pub trait WrapperComponent:
    'static
    + Send
    + Sync
    + Clone
    + Sized
    + From<Self::Datatype>
    + std::ops::Deref<Target = Self::Datatype>
{
    /// The underlying [`Loggable`] datatype for this component.
    type Datatype: Loggable;

    /// The fully-qualified type of this component, e.g. `rerun.components.Position2D`.
    fn name() -> ComponentType;

    /// Unwraps the component into its underlying datatype.
    fn into_inner(self) -> Self::Datatype;
}

impl<T: WrapperComponent> Component for T {
    #[inline]
    fn name() -> ComponentType {
        <Self as WrapperComponent>::name()
    }
}

impl<T: WrapperComponent> Loggable for T {
    #[inline]
    fn arrow_datatype() -> arrow::datatypes::DataType {
        T::Datatype::arrow_datatype()
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        T::Datatype::to_arrow_opt(data.into_iter().map(|datum| {
            datum.map(|datum| match datum.into() {
                Cow::Borrowed(datum) => Cow::Borrowed(&**datum),
                Cow::Owned(datum) => Cow::Owned(datum.into_inner()),
            })
        }))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        T::Datatype::from_arrow_opt(data)
            .map(|values| values.into_iter().map(|v| v.map(Self::from)).collect())
    }

    #[inline]
    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        T::Datatype::from_arrow(data).map(|values| values.into_iter().map(Self::from).collect())
    }
}
