//! Building and validating the `i32` offsets that partition a flat array into runs.

use arrow::buffer::{OffsetBuffer, ScalarBuffer};

/// Why a sequence of offsets cannot partition an array.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetsError {
    #[error("offsets must contain at least one entry")]
    Empty,

    #[error("first offset must be 0, got {0}")]
    NonZeroStart(i32),

    #[error("offsets must be non-decreasing, but offsets[{index}] = {value} < {previous}")]
    Decreasing {
        index: usize,
        previous: i32,
        value: i32,
    },

    #[error("partitioned length {0} does not fit in an i32 offset")]
    Overflow(usize),
}

/// Prefix sums of `lengths`, starting at 0.
///
/// Returns the offsets together with their total, which is also the last offset.
pub fn offsets_from_lengths(
    lengths: impl IntoIterator<Item = u32>,
) -> Result<(OffsetBuffer<i32>, usize), OffsetsError> {
    let lengths = lengths.into_iter();

    let mut offsets = Vec::with_capacity(lengths.size_hint().0 + 1);
    offsets.push(0_i32);

    let mut total = 0_usize;
    for length in lengths {
        total += length as usize;
        let offset = i32::try_from(total).map_err(|_err| OffsetsError::Overflow(total))?;
        offsets.push(offset);
    }

    // Prefix sums of unsigned lengths are valid offsets by construction.
    Ok((OffsetBuffer::new(ScalarBuffer::from(offsets)), total))
}

/// Checks that `offsets` is non-empty, starts at 0, and never decreases.
///
/// A partition covers its array from the first element on: nothing is skipped.
///
/// Does not look at the last offset: that is for the caller to compare with the array's length.
pub fn validate_offsets(offsets: &[i32]) -> Result<(), OffsetsError> {
    let Some(&first) = offsets.first() else {
        return Err(OffsetsError::Empty);
    };
    if first != 0 {
        return Err(OffsetsError::NonZeroStart(first));
    }

    if let Some(index) = offsets.windows(2).position(|w| w[1] < w[0]) {
        return Err(OffsetsError::Decreasing {
            index: index + 1,
            previous: offsets[index],
            value: offsets[index + 1],
        });
    }

    Ok(())
}

/// Validates `offsets` and turns them into an [`OffsetBuffer`].
pub fn checked_offset_buffer(offsets: &[i32]) -> Result<OffsetBuffer<i32>, OffsetsError> {
    validate_offsets(offsets)?;
    Ok(OffsetBuffer::new(ScalarBuffer::from(offsets.to_vec())))
}

/// The length of each run delimited by `offsets`.
pub fn run_lengths(offsets: &OffsetBuffer<i32>) -> impl Iterator<Item = usize> + '_ {
    offsets.lengths()
}
