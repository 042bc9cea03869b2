use std::borrow::Cow;

use re_batch_core::{
    Archetype, ArchetypeName, AsComponents, Component as _, ComponentBatch, ComponentColumn,
    ComponentDescriptor, ResultExt as _, SerializationResult,
};

use super::{DeferredError, try_serialize_field};
use crate::components::Scalar;

/// **Archetype**: One or more double-precision scalar values, e.g. for plotting time series.
///
/// Mostly logged as columns: one run of scalars per time point.
///
/// ## Example
///
/// ```
/// use re_batch_types::archetypes::Scalars;
///
/// let columns = Scalars::new((0..64).map(|step| (step as f64 / 10.0).sin()))
///     .columns_of_unit_batches()
///     .unwrap();
///
/// // scalars and the indicator.
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns[0].num_runs(), 64);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scalars {
    /// The scalar values to log.
    pub scalars: Option<ComponentBatch>,

    error: DeferredError,
}

impl Scalars {
    #[inline]
    pub fn descriptor_scalars() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "scalars", Scalar::name())
    }

    /// Create a new `Scalars`.
    #[inline]
    pub fn new(scalars: impl IntoIterator<Item = impl Into<Scalar>>) -> Self {
        Self::default().with_scalars(scalars)
    }

    /// A single scalar.
    #[inline]
    pub fn one(value: impl Into<Scalar>) -> Self {
        Self::new([value.into()])
    }

    #[inline]
    pub fn num_instances(&self) -> usize {
        self.scalars.as_ref().map_or(0, ComponentBatch::len)
    }

    /// Partitions the scalars into runs of the given `lengths`, see [`ComponentColumn`].
    #[inline]
    pub fn columns(
        self,
        lengths: impl IntoIterator<Item = u32> + Clone,
    ) -> SerializationResult<Vec<ComponentColumn>> {
        self.error.check().with_context(Self::name())?;
        re_batch_core::archetype_columns::<Self>([self.scalars], lengths)
    }

    /// One scalar per run.
    #[inline]
    pub fn columns_of_unit_batches(self) -> SerializationResult<Vec<ComponentColumn>> {
        self.error.check().with_context(Self::name())?;
        re_batch_core::archetype_columns_of_unit_batches::<Self>([self.scalars])
    }

    #[inline]
    pub fn with_scalars(mut self, scalars: impl IntoIterator<Item = impl Into<Scalar>>) -> Self {
        let batch = try_serialize_field::<Scalar>(Self::descriptor_scalars(), scalars);
        self.scalars = self.error.keep(batch);
        self
    }
}

impl Archetype for Scalars {
    #[inline]
    fn name() -> ArchetypeName {
        "rerun.archetypes.Scalars".into()
    }

    #[inline]
    fn display_name() -> &'static str {
        "Scalars"
    }

    #[inline]
    fn required_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![Self::descriptor_scalars()])
    }
}

impl AsComponents for Scalars {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        re_batch_core::archetype_batches::<Self>(
            self.error.then_fields([self.scalars.clone()]),
            self.num_instances(),
        )
    }
}
