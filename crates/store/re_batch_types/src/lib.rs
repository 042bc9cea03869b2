//! Concrete datatypes, components and archetypes.
//!
//! ## Overview
//!
//! * [`datatypes`] are plain data, each mapping to exactly one Arrow datatype.
//! * [`components`] give a datatype semantics and a name, e.g. [`components::Position2D`] is a
//!   [`datatypes::Vec2D`] that is a position.
//! * [`archetypes`] bundle components that are logged together, e.g. [`archetypes::Boxes2D`].
//!
//! Everything here follows the contract of [`re_batch_core`]: there is nothing a user-defined
//! component or archetype cannot do.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
//!

pub mod archetypes;
pub mod components;
pub mod datatypes;

pub use re_batch_core::{Archetype, AsComponents, Component, ComponentBatch, Loggable};
