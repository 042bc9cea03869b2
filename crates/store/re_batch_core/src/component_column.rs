use arrow::array::{Array as _, ListArray};
use arrow::datatypes::DataType;

use crate::{
    Collection, ComponentBatch, ComponentDescriptor, ComponentTypeHandle, Loggable,
    ResultExt as _, SerializationError, SerializationResult,
};

/// A [`ComponentBatch`] partitioned into runs, ready to be sent as a column.
///
/// The i-th entry of the list array is the i-th run, e.g. the data for the i-th time point.
/// The runs cover the whole flat batch, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentColumn {
    list_array: ListArray,
    component_type: ComponentTypeHandle,
    descriptor: ComponentDescriptor,
}

impl ComponentColumn {
    /// Serialize `data` and partition it into runs of the given `lengths`.
    pub fn from_loggable_with_lengths<'a, T: Loggable>(
        data: impl Into<Collection<'a, T>>,
        lengths: impl IntoIterator<Item = u32>,
        descriptor: ComponentDescriptor,
    ) -> SerializationResult<Self> {
        let batch = ComponentBatch::from_loggable(data, descriptor)?;
        Self::from_batch_with_lengths(batch, lengths, &Self::list_array_type_for::<T>())
    }

    /// Partition `batch` into runs of the given `lengths`.
    ///
    /// The lengths must sum up to the length of the batch.
    /// `list_array_type` must be a list of the batch's datatype, see [`Self::list_array_type_for`].
    pub fn from_batch_with_lengths(
        batch: ComponentBatch,
        lengths: impl IntoIterator<Item = u32>,
        list_array_type: &DataType,
    ) -> SerializationResult<Self> {
        re_tracing::profile_function!();

        let (offsets, total) = re_arrow_util::offsets_from_lengths(lengths)
            .map_err(SerializationError::from)
            .with_context(batch.descriptor().full_name())?;

        if total != batch.len() {
            return Err(SerializationError::PartitionLengthMismatch {
                expected: batch.len(),
                actual: total,
            })
            .with_context(batch.descriptor().full_name());
        }

        Self::wrap(batch, offsets, list_array_type)
    }

    /// Partition `batch` along explicit `offsets`.
    ///
    /// The offsets must be non-empty, start at 0, never decrease, and end at the length of the
    /// batch, so that the runs cover every instance.
    pub fn from_batch_with_offsets(
        batch: ComponentBatch,
        offsets: &[i32],
        list_array_type: &DataType,
    ) -> SerializationResult<Self> {
        re_tracing::profile_function!();

        let offsets = re_arrow_util::checked_offset_buffer(offsets)
            .map_err(SerializationError::from)
            .with_context(batch.descriptor().full_name())?;

        let last = offsets.last().copied().unwrap_or_default();
        let last = usize::try_from(last).unwrap_or_default();
        if last != batch.len() {
            return Err(SerializationError::PartitionLengthMismatch {
                expected: batch.len(),
                actual: last,
            })
            .with_context(batch.descriptor().full_name());
        }

        Self::wrap(batch, offsets, list_array_type)
    }

    /// Every instance of `batch` becomes its own run.
    pub fn from_unit_batch(batch: ComponentBatch) -> SerializationResult<Self> {
        let num_instances = u32::try_from(batch.len()).map_err(|_err| {
            SerializationError::InvalidOffsets {
                reason: format!("{} instances do not fit in i32 offsets", batch.len()),
            }
        })?;
        batch.partitioned(std::iter::repeat_n(1, num_instances as usize))
    }

    /// `List<T>`, the list datatype for columns of `T`.
    ///
    /// Computed once per `T`.
    #[inline]
    pub fn list_array_type_for<T: Loggable>() -> DataType {
        crate::list_arrow_datatype::<T>()
    }

    fn wrap(
        batch: ComponentBatch,
        offsets: arrow::buffer::OffsetBuffer<i32>,
        list_array_type: &DataType,
    ) -> SerializationResult<Self> {
        let component_type = batch.component_type();
        let descriptor = *batch.descriptor();

        let list_array =
            re_arrow_util::wrap_in_list_array(list_array_type, offsets, batch.into_array())
                .map_err(SerializationError::from)
                .with_context(descriptor.full_name())?;

        Ok(Self {
            list_array,
            component_type,
            descriptor,
        })
    }

    /// Number of runs, i.e. rows of the column.
    #[inline]
    pub fn num_runs(&self) -> usize {
        self.list_array.len()
    }

    /// The `num_runs() + 1` offsets delimiting the runs.
    #[inline]
    pub fn offsets(&self) -> &[i32] {
        self.list_array.value_offsets()
    }

    /// The length of each run.
    #[inline]
    pub fn run_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        re_arrow_util::run_lengths(self.list_array.offsets())
    }

    #[inline]
    pub fn list_array(&self) -> &ListArray {
        &self.list_array
    }

    #[inline]
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn component_type(&self) -> ComponentTypeHandle {
        self.component_type
    }

    #[inline]
    pub fn into_list_array(self) -> ListArray {
        self.list_array
    }
}
