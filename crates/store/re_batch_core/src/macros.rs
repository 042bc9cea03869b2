/// Implements `From<T>` and `From<&T>` for `Cow<T>`, so that `T` can be handed directly to
/// [`crate::Loggable::to_arrow`].
#[macro_export]
macro_rules! impl_into_cow {
    ($typ:ty) => {
        impl<'a> From<$typ> for ::std::borrow::Cow<'a, $typ> {
            #[inline]
            fn from(value: $typ) -> Self {
                std::borrow::Cow::Owned(value)
            }
        }

        impl<'a> From<&'a $typ> for ::std::borrow::Cow<'a, $typ> {
            #[inline]
            fn from(value: &'a $typ) -> Self {
                std::borrow::Cow::Borrowed(value)
            }
        }
    };
}
