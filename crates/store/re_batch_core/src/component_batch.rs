use arrow::array::{Array as _, ArrayRef};
use arrow::ffi::{FFI_ArrowArray, FFI_ArrowSchema};

use crate::{
    Archetype, Collection, ComponentColumn, ComponentDescriptor, ComponentTypeHandle,
    ComponentTypeRegistry, Loggable, ResultExt as _, SerializationError, SerializationResult,
};

/// A serialized, registered run of one component's values.
///
/// This is what gets logged:
/// * See [`ComponentBatch::from_loggable`] to serialize component data.
/// * See [`crate::AsComponents`] for logging whole archetypes.
/// * See [`ComponentBatch::partitioned`] to log many time points at once.
#[derive(Debug, Clone)]
pub struct ComponentBatch {
    array: ArrayRef,
    component_type: ComponentTypeHandle,
    descriptor: ComponentDescriptor,
}

impl PartialEq for ComponentBatch {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let Self {
            array,
            component_type,
            descriptor,
        } = self;

        // Descriptor first!
        *descriptor == other.descriptor
            && *component_type == other.component_type
            && **array == *other.array
    }
}

impl ComponentBatch {
    /// Serialize `data` and register it under `descriptor` with the global registry.
    ///
    /// An empty collection, e.g. from `None`, yields a zero-length array.
    #[inline]
    pub fn from_loggable<'a, T: Loggable>(
        data: impl Into<Collection<'a, T>>,
        descriptor: ComponentDescriptor,
    ) -> SerializationResult<Self> {
        Self::from_loggable_with_registry(data, descriptor, ComponentTypeRegistry::global())
    }

    /// Like [`Self::from_loggable`], against a specific registry.
    pub fn from_loggable_with_registry<'a, T: Loggable>(
        data: impl Into<Collection<'a, T>>,
        descriptor: ComponentDescriptor,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        re_tracing::profile_function!();

        let array = data.into().to_arrow().with_context(descriptor.full_name())?;
        Self::from_array_with_registry(array, descriptor, registry)
    }

    /// Wrap an already serialized array, registering its datatype under `descriptor`.
    pub fn from_array_with_registry(
        array: ArrayRef,
        descriptor: ComponentDescriptor,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        let component_type = registry
            .get_or_register(&descriptor, array.data_type())
            .with_context(descriptor.full_name())?;

        Ok(Self {
            array,
            component_type,
            descriptor,
        })
    }

    /// A zero-length batch of `T`.
    #[inline]
    pub fn empty<T: Loggable>(descriptor: ComponentDescriptor) -> SerializationResult<Self> {
        Self::empty_with_registry::<T>(descriptor, ComponentTypeRegistry::global())
    }

    /// Like [`Self::empty`], against a specific registry.
    #[inline]
    pub fn empty_with_registry<T: Loggable>(
        descriptor: ComponentDescriptor,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        Self::from_array_with_registry(T::arrow_empty(), descriptor, registry)
    }

    /// The indicator batch of archetype `A`: `num_instances` nulls, without any payload.
    #[inline]
    pub fn from_indicator<A: Archetype>(num_instances: usize) -> SerializationResult<Self> {
        Self::from_indicator_with_registry::<A>(num_instances, ComponentTypeRegistry::global())
    }

    /// Like [`Self::from_indicator`], against a specific registry.
    pub fn from_indicator_with_registry<A: Archetype>(
        num_instances: usize,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        Self::from_array_with_registry(
            re_arrow_util::new_null_array_ref(num_instances),
            A::indicator(),
            registry,
        )
    }

    /// Number of instances in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    #[inline]
    pub fn array(&self) -> &ArrayRef {
        &self.array
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
    pub fn into_array(self) -> ArrayRef {
        self.array
    }

    /// Re-register the same data under another descriptor, with the global registry.
    ///
    /// Batches built against another registry must use
    /// [`Self::with_descriptor_override_with_registry`] so that the handle stays in that registry.
    #[inline]
    pub fn with_descriptor_override(
        self,
        descriptor: ComponentDescriptor,
    ) -> SerializationResult<Self> {
        self.with_descriptor_override_with_registry(descriptor, ComponentTypeRegistry::global())
    }

    /// Like [`Self::with_descriptor_override`], against a specific registry.
    pub fn with_descriptor_override_with_registry(
        self,
        descriptor: ComponentDescriptor,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        if descriptor == self.descriptor {
            return Ok(self);
        }
        Self::from_array_with_registry(self.array, descriptor, registry)
    }

    /// Sets the archetype of the descriptor iff it's not already set, re-registering with the
    /// global registry if needed.
    #[inline]
    pub fn or_with_archetype(
        self,
        archetype: impl FnOnce() -> crate::ArchetypeName,
    ) -> SerializationResult<Self> {
        self.or_with_archetype_with_registry(archetype, ComponentTypeRegistry::global())
    }

    /// Like [`Self::or_with_archetype`], against a specific registry.
    pub fn or_with_archetype_with_registry(
        self,
        archetype: impl FnOnce() -> crate::ArchetypeName,
        registry: &ComponentTypeRegistry,
    ) -> SerializationResult<Self> {
        let descriptor = self.descriptor.or_with_archetype(archetype);
        self.with_descriptor_override_with_registry(descriptor, registry)
    }

    /// Partitions the batch into runs of the given lengths.
    ///
    /// The lengths must sum up to [`Self::len`].
    #[inline]
    pub fn partitioned(
        self,
        lengths: impl IntoIterator<Item = u32>,
    ) -> SerializationResult<ComponentColumn> {
        let list_array_type = re_arrow_util::list_datatype_of(self.array.data_type().clone());
        ComponentColumn::from_batch_with_lengths(self, lengths, &list_array_type)
    }

    /// Export the batch through the Arrow C data interface.
    pub fn to_c_ffi_struct(&self) -> SerializationResult<CComponentBatch> {
        re_tracing::profile_function!();

        let (array, schema) = arrow::ffi::to_ffi(&self.array.to_data())?;
        Ok(CComponentBatch {
            component_type: self.component_type,
            array,
            schema,
        })
    }

    /// Export the batch through the Arrow C data interface, into caller-provided memory.
    ///
    /// # Safety
    ///
    /// If `out` is not null, it must be valid for writes and properly aligned.
    /// Whatever `out` points to is overwritten without being dropped.
    #[allow(unsafe_code)]
    pub unsafe fn write_c_ffi_struct(&self, out: *mut CComponentBatch) -> SerializationResult<()> {
        if out.is_null() {
            return Err(SerializationError::unexpected_null("out"));
        }

        let ffi = self.to_c_ffi_struct()?;

        // SAFETY: upheld by the caller, see above.
        unsafe { out.write(ffi) };

        Ok(())
    }
}

/// A [`ComponentBatch`] exported through the Arrow C data interface.
///
/// Releasing `array` and `schema` is up to whoever ends up owning them; dropping this struct
/// on the Rust side releases both.
#[repr(C)]
pub struct CComponentBatch {
    pub component_type: ComponentTypeHandle,
    pub array: FFI_ArrowArray,
    pub schema: FFI_ArrowSchema,
}

#[cfg(test)]
mod tests {
    use std::mem::MaybeUninit;

    use arrow::array::Int32Array;
    use arrow::datatypes::DataType;

    use super::*;

    fn descr() -> ComponentDescriptor {
        ComponentDescriptor::new("Archetype", "field", "rerun.testing.Int32")
    }

    #[test]
    fn from_borrowed_loggable() {
        let registry = ComponentTypeRegistry::with_local_store();
        let data = [1_i32, 2, 3];

        let batch =
            ComponentBatch::from_loggable_with_registry(&data, descr(), &registry).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.array().data_type(), &DataType::Int32);
        assert_eq!(batch.descriptor(), &descr());
        assert_eq!(registry.get(batch.component_type()).unwrap().descriptor, descr());
        assert_eq!(i32::from_arrow(batch.array().as_ref()).unwrap(), data);
    }

    #[test]
    fn absent_is_empty() {
        let registry = ComponentTypeRegistry::with_local_store();
        let batch =
            ComponentBatch::from_loggable_with_registry(None::<i32>, descr(), &registry).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.array().data_type(), &DataType::Int32);

        let empty = ComponentBatch::empty::<f32>(ComponentDescriptor::partial("empty_floats"))
            .unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.array().data_type(), &DataType::Float32);
    }

    #[test]
    fn same_descriptor_same_handle() {
        let registry = ComponentTypeRegistry::with_local_store();
        let a = ComponentBatch::from_loggable_with_registry([1_i32], descr(), &registry).unwrap();
        let b =
            ComponentBatch::from_loggable_with_registry(vec![4_i32, 5], descr(), &registry)
                .unwrap();
        assert_eq!(a.component_type(), b.component_type());

        let err = ComponentBatch::from_loggable_with_registry([1.0_f64], descr(), &registry)
            .unwrap_err();
        assert!(matches!(
            err.root(),
            SerializationError::ComponentTypeMismatch { .. }
        ));
    }

    #[test]
    fn descriptor_override() {
        let batch = ComponentBatch::from_loggable(
            [7_u32],
            ComponentDescriptor::partial("ids").with_component_type("rerun.testing.UInt32".into()),
        )
        .unwrap();
        let original_handle = batch.component_type();

        let batch = batch
            .or_with_archetype(|| "rerun.archetypes.Testing".into())
            .unwrap();
        assert_eq!(
            batch.descriptor().archetype,
            Some("rerun.archetypes.Testing".into())
        );
        assert_ne!(batch.component_type(), original_handle);

        let handle = batch.component_type();
        let batch = batch
            .or_with_archetype(|| "rerun.archetypes.Other".into())
            .unwrap();
        assert_eq!(batch.component_type(), handle);
    }

    #[test]
    fn descriptor_override_stays_in_its_registry() {
        let registry = ComponentTypeRegistry::with_local_store();
        let batch = ComponentBatch::from_loggable_with_registry(
            [7_u32],
            ComponentDescriptor::partial("local_ids"),
            &registry,
        )
        .unwrap();
        let original = batch.component_type();

        let batch = batch
            .or_with_archetype_with_registry(|| "rerun.archetypes.Testing".into(), &registry)
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_ne!(batch.component_type(), original);
        assert_eq!(
            registry.get(batch.component_type()).unwrap().descriptor,
            *batch.descriptor()
        );
        assert_eq!(
            registry.get(original).unwrap().descriptor,
            ComponentDescriptor::partial("local_ids")
        );

        let empty =
            ComponentBatch::empty_with_registry::<u32>(ComponentDescriptor::partial("none"), &registry)
                .unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get(empty.component_type()).unwrap().descriptor,
            ComponentDescriptor::partial("none")
        );
    }

    #[test]
    #[allow(unsafe_code)]
    fn c_ffi_roundtrip() {
        let batch = ComponentBatch::from_loggable(vec![1_i32, 2, 3], descr()).unwrap();

        let mut out = MaybeUninit::<CComponentBatch>::uninit();
        unsafe { batch.write_c_ffi_struct(out.as_mut_ptr()) }.unwrap();
        let CComponentBatch {
            component_type,
            array,
            schema,
        } = unsafe { out.assume_init() };

        assert_eq!(component_type, batch.component_type());

        let data = unsafe { arrow::ffi::from_ffi(array, &schema) }.unwrap();
        let imported = arrow::array::make_array(data);
        assert_eq!(
            imported.as_any().downcast_ref::<Int32Array>().unwrap(),
            &Int32Array::from(vec![1, 2, 3])
        );
    }

    #[test]
    #[allow(unsafe_code)]
    fn c_ffi_null_out() {
        let batch = ComponentBatch::from_loggable([1_i32], descr()).unwrap();
        let err = unsafe { batch.write_c_ffi_struct(std::ptr::null_mut()) }.unwrap_err();
        assert!(matches!(
            err,
            SerializationError::UnexpectedNullArgument {
                argument_name: "out"
            }
        ));
    }
}
