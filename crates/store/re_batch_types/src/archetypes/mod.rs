//! Bundles of components that are logged together.

mod arrows2d;
mod boxes2d;
mod boxes2d_ext;
mod scalars;

pub use self::{arrows2d::Arrows2D, boxes2d::Boxes2D, scalars::Scalars};

use re_batch_core::{
    Component, ComponentBatch, ComponentDescriptor, SerializationError, SerializationResult,
};

/// Serializes the given instances eagerly.
#[inline]
fn try_serialize_field<C: Component>(
    descriptor: ComponentDescriptor,
    instances: impl IntoIterator<Item = impl Into<C>>,
) -> SerializationResult<ComponentBatch> {
    let instances: Vec<C> = instances.into_iter().map(Into::into).collect();
    ComponentBatch::from_loggable(instances, descriptor)
}

/// The first builder call of an archetype that failed to serialize.
///
/// Serializing the archetype, as batches or as columns, then fails with that error.
#[derive(Clone, Debug, Default)]
struct DeferredError(Option<SerializationError>);

impl DeferredError {
    /// The batch, or `None` after remembering the error. An earlier error is never replaced.
    fn keep(&mut self, result: SerializationResult<ComponentBatch>) -> Option<ComponentBatch> {
        match result {
            Ok(batch) => Some(batch),
            Err(err) => {
                re_log::debug!("Archetype field failed to serialize: {err}");
                self.0.get_or_insert(err);
                None
            }
        }
    }

    #[inline]
    fn check(&self) -> SerializationResult<()> {
        self.0.clone().map_or(Ok(()), Err)
    }

    /// `fields`, preceded by the kept error if any, for [`re_batch_core::archetype_batches`].
    fn then_fields(
        &self,
        fields: impl IntoIterator<Item = Option<ComponentBatch>>,
    ) -> impl Iterator<Item = SerializationResult<Option<ComponentBatch>>> {
        std::iter::once(self.check().map(|()| None)).chain(fields.into_iter().map(Ok))
    }
}

impl PartialEq for DeferredError {
    fn eq(&self, other: &Self) -> bool {
        // Errors only compare by message.
        self.0.as_ref().map(ToString::to_string) == other.0.as_ref().map(ToString::to_string)
    }
}

/// The largest number of instances among the set fields.
#[inline]
fn max_num_instances<'a>(fields: impl IntoIterator<Item = &'a Option<ComponentBatch>>) -> usize {
    fields
        .into_iter()
        .flatten()
        .map(ComponentBatch::len)
        .max()
        .unwrap_or(0)
}
