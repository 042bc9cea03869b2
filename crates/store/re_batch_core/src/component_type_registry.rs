use std::sync::OnceLock;

use arrow::datatypes::DataType;
use nohash_hasher::IntMap;
use parking_lot::RwLock;

use crate::{ComponentDescriptor, SerializationError, SerializationResult};

/// Identifies a registered component type for the rest of the process.
///
/// Handles are assigned by a [`ComponentTypeStore`], and are never reused or revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ComponentTypeHandle(pub u32);

impl nohash_hasher::IsEnabled for ComponentTypeHandle {}

impl std::fmt::Display for ComponentTypeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a [`ComponentTypeHandle`] stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredComponentType {
    pub descriptor: ComponentDescriptor,
    pub datatype: DataType,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("The global component type registry was already initialized")]
    AlreadyInitialized,
}

// ---

/// Where component types are ultimately registered.
///
/// A [`ComponentTypeRegistry`] only ever calls [`ComponentTypeStore::register`] once per
/// descriptor, while holding its exclusive lock.
pub trait ComponentTypeStore: Send + Sync {
    /// Register a new component type and assign it a handle.
    fn register(
        &mut self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> SerializationResult<ComponentTypeHandle>;

    /// Look up a previously registered component type.
    fn get(&self, handle: ComponentTypeHandle) -> Option<RegisteredComponentType>;
}

/// An in-process [`ComponentTypeStore`] handing out sequential handles, starting at zero.
#[derive(Default)]
pub struct LocalComponentTypeStore {
    types: Vec<RegisteredComponentType>,
}

impl LocalComponentTypeStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentTypeStore for LocalComponentTypeStore {
    fn register(
        &mut self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> SerializationResult<ComponentTypeHandle> {
        let next_id = u32::try_from(self.types.len()).map_err(|_err| {
            SerializationError::Registration {
                reason: "ran out of component type handles".to_owned(),
            }
        })?;

        self.types.push(RegisteredComponentType {
            descriptor: *descriptor,
            datatype: datatype.clone(),
        });

        Ok(ComponentTypeHandle(next_id))
    }

    fn get(&self, handle: ComponentTypeHandle) -> Option<RegisteredComponentType> {
        self.types.get(handle.0 as usize).cloned()
    }
}

// ---

struct RegistryInner {
    store: Box<dyn ComponentTypeStore>,
    handles: IntMap<ComponentDescriptor, (ComponentTypeHandle, DataType)>,
}

/// Maps `(descriptor, datatype)` pairs to [`ComponentTypeHandle`]s, registering each descriptor
/// with the underlying [`ComponentTypeStore`] at most once.
///
/// Lookups of known descriptors only take a shared lock, so concurrent serialization of known
/// component types never contends.
pub struct ComponentTypeRegistry {
    inner: RwLock<RegistryInner>,
}

static GLOBAL_REGISTRY: OnceLock<ComponentTypeRegistry> = OnceLock::new();

impl ComponentTypeRegistry {
    pub fn new(store: impl ComponentTypeStore + 'static) -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                store: Box::new(store),
                handles: IntMap::default(),
            }),
        }
    }

    /// A registry backed by a fresh [`LocalComponentTypeStore`].
    #[inline]
    pub fn with_local_store() -> Self {
        Self::new(LocalComponentTypeStore::new())
    }

    /// The process-wide registry.
    ///
    /// Created with a [`LocalComponentTypeStore`] on first use, unless
    /// [`Self::init_global`] installed another store before that.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::with_local_store)
    }

    /// Install the store backing [`Self::global`].
    ///
    /// Fails if the global registry is already in use.
    pub fn init_global(store: impl ComponentTypeStore + 'static) -> Result<(), RegistryError> {
        GLOBAL_REGISTRY
            .set(Self::new(store))
            .map_err(|_registry| RegistryError::AlreadyInitialized)
    }

    /// Returns the handle for `descriptor`, registering it first if it's new.
    ///
    /// Using a known descriptor with a different datatype than the one it was first registered
    /// with is an error.
    pub fn get_or_register(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> SerializationResult<ComponentTypeHandle> {
        if let Some((handle, registered)) = self.inner.read().handles.get(descriptor) {
            return check_datatype(descriptor, *handle, registered, datatype);
        }

        let mut inner = self.inner.write();

        // Someone else might have registered it while we were waiting for the lock.
        if let Some((handle, registered)) = inner.handles.get(descriptor) {
            return check_datatype(descriptor, *handle, registered, datatype);
        }

        let handle = inner.store.register(descriptor, datatype)?;
        inner.handles.insert(*descriptor, (handle, datatype.clone()));

        re_log::debug!("Registered component type {descriptor} ({datatype}) as {handle}");

        Ok(handle)
    }

    /// Look up what a handle stands for.
    pub fn get(&self, handle: ComponentTypeHandle) -> Option<RegisteredComponentType> {
        self.inner.read().store.get(handle)
    }

    /// Number of distinct descriptors registered through this registry.
    pub fn len(&self) -> usize {
        self.inner.read().handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_datatype(
    descriptor: &ComponentDescriptor,
    handle: ComponentTypeHandle,
    registered: &DataType,
    requested: &DataType,
) -> SerializationResult<ComponentTypeHandle> {
    if registered == requested {
        Ok(handle)
    } else {
        Err(SerializationError::ComponentTypeMismatch {
            descriptor: descriptor.full_name(),
            registered: Box::new(registered.clone()),
            requested: Box::new(requested.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn descr(component: &str) -> ComponentDescriptor {
        ComponentDescriptor::new("Archetype", component, "rerun.testing.Int32")
    }

    #[test]
    fn idempotent() {
        let registry = ComponentTypeRegistry::with_local_store();
        assert!(registry.is_empty());

        let a = registry
            .get_or_register(&descr("field"), &DataType::Int32)
            .unwrap();
        let b = registry
            .get_or_register(&descr("field"), &DataType::Int32)
            .unwrap();
        let c = registry
            .get_or_register(&descr("other_field"), &DataType::Int32)
            .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(registry.len(), 2);

        let registered = registry.get(a).unwrap();
        assert_eq!(registered.descriptor, descr("field"));
        assert_eq!(registered.datatype, DataType::Int32);
        assert!(registry.get(ComponentTypeHandle(1000)).is_none());
    }

    #[test]
    fn datatype_mismatch() {
        let registry = ComponentTypeRegistry::with_local_store();
        registry
            .get_or_register(&descr("field"), &DataType::Int32)
            .unwrap();

        let err = registry
            .get_or_register(&descr("field"), &DataType::Float32)
            .unwrap_err();
        assert!(matches!(
            err,
            SerializationError::ComponentTypeMismatch { .. }
        ));
        assert_eq!(registry.len(), 1);
    }

    /// Counts how often it is asked to register anything.
    struct CountingStore {
        inner: LocalComponentTypeStore,
        registrations: Arc<AtomicUsize>,
    }

    impl ComponentTypeStore for CountingStore {
        fn register(
            &mut self,
            descriptor: &ComponentDescriptor,
            datatype: &DataType,
        ) -> SerializationResult<ComponentTypeHandle> {
            self.registrations.fetch_add(1, Ordering::SeqCst);
            self.inner.register(descriptor, datatype)
        }

        fn get(&self, handle: ComponentTypeHandle) -> Option<RegisteredComponentType> {
            self.inner.get(handle)
        }
    }

    #[test]
    fn concurrent_first_registration() {
        let registrations = Arc::new(AtomicUsize::new(0));
        let registry = ComponentTypeRegistry::new(CountingStore {
            inner: LocalComponentTypeStore::new(),
            registrations: Arc::clone(&registrations),
        });

        let handles: Vec<ComponentTypeHandle> = std::thread::scope(|scope| {
            let threads: Vec<_> = (0..16)
                .map(|_| {
                    scope.spawn(|| {
                        registry
                            .get_or_register(&descr("contended"), &DataType::Int32)
                            .unwrap()
                    })
                })
                .collect();
            threads.into_iter().map(|t| t.join().unwrap()).collect()
        });

        assert!(handles.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(registrations.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    struct FailingStore;

    impl ComponentTypeStore for FailingStore {
        fn register(
            &mut self,
            _descriptor: &ComponentDescriptor,
            _datatype: &DataType,
        ) -> SerializationResult<ComponentTypeHandle> {
            Err(SerializationError::Registration {
                reason: "store is read-only".to_owned(),
            })
        }

        fn get(&self, _handle: ComponentTypeHandle) -> Option<RegisteredComponentType> {
            None
        }
    }

    #[test]
    fn store_errors_propagate() {
        let registry = ComponentTypeRegistry::new(FailingStore);
        let err = registry
            .get_or_register(&descr("field"), &DataType::Int32)
            .unwrap_err();
        assert!(matches!(err, SerializationError::Registration { .. }));
        assert!(registry.is_empty());
    }
}
