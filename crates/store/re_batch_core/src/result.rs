use std::sync::Arc;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;

// ---

#[derive(thiserror::Error, Debug, Clone)]
pub enum SerializationError {
    #[error("Failed to serialize {location}")]
    Context {
        location: String,
        source: Box<SerializationError>,
    },

    #[error("Unexpected null argument `{argument_name}`")]
    UnexpectedNullArgument { argument_name: &'static str },

    #[error("Partitioning failed: lengths sum up to {actual}, but the batch has {expected} instances")]
    PartitionLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid offsets: {reason}")]
    InvalidOffsets { reason: String },

    #[error("Buffer cannot be reinterpreted as the target element type: {0:?}")]
    IncompatibleBuffer(bytemuck::PodCastError),

    #[error(
        "Component {descriptor} was registered with datatype {registered}, but is now used with {requested}"
    )]
    ComponentTypeMismatch {
        descriptor: String,
        registered: Box<DataType>,
        requested: Box<DataType>,
    },

    #[error("Component type registration failed: {reason}")]
    Registration { reason: String },

    /// E.g. too many values (overflows i32).
    #[error(transparent)]
    ArrowError(#[from] Arc<ArrowError>),
}

const _: () = assert!(
    std::mem::size_of::<SerializationError>() <= 56,
    "Error type is too large. Try to reduce its size by boxing some of its variants.",
);

impl From<ArrowError> for SerializationError {
    #[inline]
    fn from(err: ArrowError) -> Self {
        Self::ArrowError(Arc::new(err))
    }
}

impl From<re_arrow_util::OffsetsError> for SerializationError {
    #[inline]
    fn from(err: re_arrow_util::OffsetsError) -> Self {
        Self::InvalidOffsets {
            reason: err.to_string(),
        }
    }
}

impl SerializationError {
    /// Returns the _actual_ error, skipping any layer of context.
    #[inline]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            _ => self,
        }
    }

    #[inline]
    pub fn unexpected_null(argument_name: &'static str) -> Self {
        Self::UnexpectedNullArgument { argument_name }
    }
}

pub type SerializationResult<T> = ::std::result::Result<T, SerializationError>;

// ---

#[derive(thiserror::Error, Debug, Clone)]
pub enum DeserializationError {
    #[error("Failed to deserialize {location}")]
    Context {
        location: String,
        source: Box<DeserializationError>,
    },

    #[error("Missing data: a non-nullable value was null")]
    MissingData,

    #[error("Expected {expected}, got {actual}")]
    DatatypeMismatch {
        expected: Box<DataType>,
        actual: Box<DataType>,
    },

    #[error("Expected {expected} values per entry, got {actual}")]
    MismatchedLength { expected: usize, actual: usize },

    #[error(transparent)]
    ArrowError(#[from] Arc<ArrowError>),
}

impl From<ArrowError> for DeserializationError {
    #[inline]
    fn from(err: ArrowError) -> Self {
        Self::ArrowError(Arc::new(err))
    }
}

impl DeserializationError {
    #[inline]
    pub fn missing_data() -> Self {
        Self::MissingData
    }

    #[inline]
    pub fn datatype_mismatch(expected: DataType, actual: DataType) -> Self {
        Self::DatatypeMismatch {
            expected: Box::new(expected),
            actual: Box::new(actual),
        }
    }

    /// Returns the _actual_ error, skipping any layer of context.
    #[inline]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            _ => self,
        }
    }
}

pub type DeserializationResult<T> = ::std::result::Result<T, DeserializationError>;

// ---

pub trait ResultExt<T> {
    /// Wrap the error, if any, with the location it relates to, e.g. a component descriptor.
    fn with_context(self, location: impl AsRef<str>) -> Self;
}

impl<T> ResultExt<T> for SerializationResult<T> {
    #[inline]
    fn with_context(self, location: impl AsRef<str>) -> Self {
        self.map_err(|err| SerializationError::Context {
            location: location.as_ref().into(),
            source: Box::new(err),
        })
    }
}

impl<T> ResultExt<T> for DeserializationResult<T> {
    #[inline]
    fn with_context(self, location: impl AsRef<str>) -> Self {
        self.map_err(|err| DeserializationError::Context {
            location: location.as_ref().into(),
            source: Box::new(err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_layers() {
        let res: SerializationResult<()> = Err(SerializationError::PartitionLengthMismatch {
            expected: 3,
            actual: 2,
        });
        let err = res
            .with_context("Boxes2D:half_sizes")
            .with_context("Boxes2D")
            .unwrap_err();

        assert!(matches!(
            err.root(),
            SerializationError::PartitionLengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(
            re_error::format_ref(&err),
            "Failed to serialize Boxes2D: Failed to serialize Boxes2D:half_sizes: \
             Partitioning failed: lengths sum up to 2, but the batch has 3 instances"
        );
    }

    #[test]
    fn arrow_errors_convert() {
        let err: DeserializationError = ArrowError::CastError("nope".to_owned()).into();
        assert!(matches!(err, DeserializationError::ArrowError(_)));

        let err: SerializationError = re_arrow_util::OffsetsError::Empty.into();
        assert!(matches!(err, SerializationError::InvalidOffsets { .. }));
    }
}
