//! The core types and traits of typed component-batch serialization.
//!
//! The [`Loggable`] trait is the starting point: it turns N values of a type into one typed
//! Arrow array of length N.
//! A [`Component`] is a [`Loggable`] with a name.
//!
//! Values are handed to serialization as a [`Collection`], which either borrows them from the
//! caller or owns them.
//! Serializing a collection under a [`ComponentDescriptor`] and registering it with the
//! [`ComponentTypeRegistry`] yields a [`ComponentBatch`]: the atomic unit of logging.
//! Batches can be partitioned into a [`ComponentColumn`] to log many time points at once.
//!
//! An [`Archetype`] is a bundle of optional batches that flattens into an ordered list of
//! batches plus one indicator batch, see [`AsComponents`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
//!

// ---

mod archetype;
mod collection;
mod component_batch;
mod component_column;
mod component_descriptor;
mod component_type_registry;
mod loggable;
mod names;
mod result;
mod wrapper_component;

pub use self::{
    archetype::{
        Archetype, AsComponents, archetype_batches, archetype_columns,
        archetype_columns_of_unit_batches,
    },
    collection::Collection,
    component_batch::{CComponentBatch, ComponentBatch},
    component_column::ComponentColumn,
    component_descriptor::{
        ArchetypeName, ComponentDescriptor, ComponentDescriptorHash, ComponentIdentifier,
    },
    component_type_registry::{
        ComponentTypeHandle, ComponentTypeRegistry, ComponentTypeStore, LocalComponentTypeStore,
        RegisteredComponentType, RegistryError,
    },
    loggable::{Component, ComponentType, Loggable, list_arrow_datatype},
    names::InternedString,
    result::{
        DeserializationError, DeserializationResult, ResultExt, SerializationError,
        SerializationResult,
    },
    wrapper_component::WrapperComponent,
};

// ---

#[path = "macros.rs"]
mod _macros; // just for the side-effect of exporting the macros

pub mod macros {
    pub use super::impl_into_cow;
}

/// Re-exports of other crates.
pub mod external {
    pub use arrow;
    pub use nohash_hasher;
}
