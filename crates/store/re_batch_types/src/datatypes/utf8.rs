use std::borrow::Cow;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use re_batch_core::{DeserializationResult, Loggable, SerializationResult};

/// A string of text, encoded as UTF-8.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Utf8(pub String);

impl Utf8 {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Utf8 {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Utf8 {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Utf8> for String {
    #[inline]
    fn from(value: Utf8) -> Self {
        value.0
    }
}

impl std::ops::Deref for Utf8 {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for Utf8 {
    #[inline]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Utf8 {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

re_batch_core::macros::impl_into_cow!(Utf8);

impl Loggable for Utf8 {
    #[inline]
    fn arrow_datatype() -> DataType {
        String::arrow_datatype()
    }

    fn to_arrow_opt<'a>(
        data: impl IntoIterator<Item = Option<impl Into<Cow<'a, Self>>>>,
    ) -> SerializationResult<ArrayRef>
    where
        Self: 'a,
    {
        // Borrowed strings stay borrowed all the way into the string array.
        String::to_arrow_opt(data.into_iter().map(|datum| {
            datum.map(|datum| match Into::<Cow<'a, Self>>::into(datum) {
                Cow::Borrowed(text) => Cow::Borrowed(&text.0),
                Cow::Owned(text) => Cow::Owned(text.0),
            })
        }))
    }

    fn from_arrow_opt(data: &dyn Array) -> DeserializationResult<Vec<Option<Self>>> {
        String::from_arrow_opt(data)
            .map(|values| values.into_iter().map(|v| v.map(Self)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let labels = vec![Utf8::from("hello"), Utf8::from(String::new())];
        let array = Utf8::to_arrow(&labels).unwrap();
        assert_eq!(array.data_type(), &DataType::Utf8);
        assert_eq!(Utf8::from_arrow(array.as_ref()).unwrap(), labels);
        assert_eq!(&*labels[0], "hello");
    }
}
