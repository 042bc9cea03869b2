use std::borrow::Cow;

use arrow::array::ArrayRef;

use crate::{Loggable, SerializationError, SerializationResult};

/// A contiguous run of `T`s that is either borrowed from the caller or owned.
///
/// This is what gets handed to serialization: callers that keep their data around lend it
/// with [`Collection::borrow`], callers that don't hand it over with
/// [`Collection::take_ownership`]. Either way the length is known in O(1).
///
/// There is no `Clone` impl: duplicating data is always explicit, see
/// [`Collection::to_owned_collection`].
#[derive(Debug)]
pub enum Collection<'a, T> {
    /// Borrowed from the caller, who must outlive the collection.
    Borrowed(&'a [T]),

    /// Owned, dropped together with the collection.
    Owned(Vec<T>),
}

impl<T> Default for Collection<'_, T> {
    /// An empty, owned collection.
    #[inline]
    fn default() -> Self {
        Self::Owned(Vec::new())
    }
}

impl<'a, T> Collection<'a, T> {
    /// Borrow a slice without copying it.
    #[inline]
    pub fn borrow(data: &'a [T]) -> Self {
        Self::Borrowed(data)
    }

    /// Borrow a single value as a collection of length one.
    #[inline]
    pub fn borrow_single(value: &'a T) -> Self {
        Self::Borrowed(std::slice::from_ref(value))
    }

    /// Borrow a buffer of `U`s as a collection of `T`s without copying it.
    ///
    /// `U` and `T` must have the same size, which is checked at compile time.
    /// Alignment is checked at runtime and reported as
    /// [`SerializationError::IncompatibleBuffer`].
    pub fn borrow_pod_cast<U>(data: &'a [U]) -> SerializationResult<Self>
    where
        U: bytemuck::NoUninit,
        T: bytemuck::AnyBitPattern,
    {
        const {
            assert!(
                std::mem::size_of::<U>() == std::mem::size_of::<T>(),
                "borrow_pod_cast requires both element types to have the same size",
            );
        };

        bytemuck::try_cast_slice(data)
            .map(Self::Borrowed)
            .map_err(SerializationError::IncompatibleBuffer)
    }

    /// Borrow `num_instances` values starting at `data`.
    ///
    /// A null `data` is accepted iff `num_instances` is zero, and yields an empty collection.
    ///
    /// # Safety
    ///
    /// If `data` is not null, it must be valid for reads of `num_instances` consecutive,
    /// properly aligned and initialized `T`s, and that memory must not be mutated for `'a`.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw_parts(data: *const T, num_instances: usize) -> SerializationResult<Self> {
        if data.is_null() {
            return if num_instances == 0 {
                Ok(Self::default())
            } else {
                Err(SerializationError::unexpected_null("data"))
            };
        }

        // SAFETY: upheld by the caller, see above.
        Ok(Self::Borrowed(unsafe {
            std::slice::from_raw_parts(data, num_instances)
        }))
    }

    /// Take ownership of the data.
    #[inline]
    pub fn take_ownership(data: Vec<T>) -> Self {
        Self::Owned(data)
    }

    /// Take ownership of a single value, as a collection of length one.
    #[inline]
    pub fn take_ownership_single(value: T) -> Self {
        Self::Owned(vec![value])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Borrowed(data) => data,
            Self::Owned(data) => data,
        }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Exchange contents, and ownership modes, with `other`.
    ///
    /// Works for all four combinations of borrowed and owned. Nothing is copied and nothing is
    /// dropped.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<T: Clone + 'static> Collection<'_, T> {
    /// Copy the data into a new owned collection, leaving `self` untouched.
    pub fn to_owned_collection(&self) -> Collection<'static, T> {
        Collection::Owned(self.as_slice().to_vec())
    }

    /// Convert into an owned collection, copying only if the data was borrowed.
    pub fn into_owned(self) -> Collection<'static, T> {
        Collection::Owned(self.into_vec())
    }

    /// Extract the data, copying only if it was borrowed.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Borrowed(data) => data.to_vec(),
            Self::Owned(data) => data,
        }
    }
}

impl<T: Loggable> Collection<'_, T> {
    /// Serializes the values into an arrow array of [`Loggable::arrow_datatype`].
    #[inline]
    pub fn to_arrow(&self) -> SerializationResult<ArrayRef> {
        re_tracing::profile_function!();
        T::to_arrow(self.iter().map(Cow::Borrowed))
    }

    /// Like [`Self::to_arrow`], also returning the number of instances that went in.
    #[inline]
    pub fn serialize(&self) -> SerializationResult<(usize, ArrayRef)> {
        Ok((self.len(), self.to_arrow()?))
    }
}

impl<'a, T> IntoIterator for &'a Collection<'_, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Collection<'_, T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Owned(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for Collection<'_, T> {
    #[inline]
    fn from(data: Vec<T>) -> Self {
        Self::Owned(data)
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<'_, T> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::Owned(data.into())
    }
}

/// `None` is an empty collection, which serializes to a zero-length array.
impl<T> From<Option<T>> for Collection<'_, T> {
    #[inline]
    fn from(data: Option<T>) -> Self {
        Self::Owned(data.into_iter().collect())
    }
}

impl<'a, T> From<&'a [T]> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Self::Borrowed(data)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a [T; N]) -> Self {
        Self::Borrowed(data.as_slice())
    }
}

impl<'a, T> From<&'a Vec<T>> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a Vec<T>) -> Self {
        Self::Borrowed(data.as_slice())
    }
}
