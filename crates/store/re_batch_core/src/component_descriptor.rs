use std::borrow::Cow;

use crate::ComponentType;

crate::declare_interned_name!(
    /// The fully-qualified name of an [`crate::Archetype`], e.g. `rerun.archetypes.Boxes2D`.
    pub struct ArchetypeName;
);

impl ArchetypeName {
    /// The last segment of the name, e.g. `Boxes2D`.
    #[inline]
    pub fn short_name(&self) -> &'static str {
        crate::names::short_name(self.as_str())
    }
}

crate::declare_interned_name!(
    /// The name of a field within an archetype, e.g. `half_sizes`.
    ///
    /// For data logged outside of any archetype this is the only mandatory part of a
    /// [`ComponentDescriptor`].
    pub struct ComponentIdentifier;
);

/// A stable 64-bit hash of a [`ComponentDescriptor`].
///
/// Derived from the contents of the three name parts only, so it is identical across runs,
/// processes and platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ComponentDescriptorHash(pub u64);

impl nohash_hasher::IsEnabled for ComponentDescriptorHash {}

impl std::fmt::Display for ComponentDescriptorHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Identifies a run of component data: which archetype field it fills, and with which type.
///
/// Equal descriptors always map to the same registered component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ComponentDescriptor {
    /// The archetype the data was logged through, e.g. `rerun.archetypes.Boxes2D`.
    pub archetype: Option<ArchetypeName>,

    /// The field, e.g. `half_sizes`.
    pub component: ComponentIdentifier,

    /// The component type, e.g. `rerun.components.HalfSize2D`.
    pub component_type: Option<ComponentType>,
}

impl std::hash::Hash for ComponentDescriptor {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // `IsEnabled` requires exactly one `write_u64`.
        state.write_u64(self.hashed().0);
    }
}

impl nohash_hasher::IsEnabled for ComponentDescriptor {}

impl std::fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl From<ComponentDescriptor> for Cow<'static, ComponentDescriptor> {
    #[inline]
    fn from(descr: ComponentDescriptor) -> Self {
        Cow::Owned(descr)
    }
}

impl<'d> From<&'d ComponentDescriptor> for Cow<'d, ComponentDescriptor> {
    #[inline]
    fn from(descr: &'d ComponentDescriptor) -> Self {
        Cow::Borrowed(descr)
    }
}

impl ComponentDescriptor {
    /// A descriptor with only a component identifier.
    pub fn partial(component: impl Into<ComponentIdentifier>) -> Self {
        Self {
            archetype: None,
            component: component.into(),
            component_type: None,
        }
    }

    /// Shorthand for the full `(archetype, field, component type)` triple.
    pub fn new(
        archetype: impl Into<ArchetypeName>,
        component: impl Into<ComponentIdentifier>,
        component_type: impl Into<ComponentType>,
    ) -> Self {
        Self {
            archetype: Some(archetype.into()),
            component: component.into(),
            component_type: Some(component_type.into()),
        }
    }

    /// Combines the hashes of the three parts.
    ///
    /// Each slot is tagged before mixing, so a part moving between slots changes the hash.
    #[inline]
    pub fn hashed(&self) -> ComponentDescriptorHash {
        let Self {
            archetype,
            component,
            component_type,
        } = self;

        let mut parts = [0_u64; 3];
        parts[0] = archetype.map_or(0, |name| name.hash().rotate_left(1) | 1);
        parts[1] = component.hash();
        parts[2] = component_type.map_or(0, |name| name.hash().rotate_left(2) | 1);

        ComponentDescriptorHash(xxhash_rust::xxh64::xxh64(
            bytemuck::cast_slice(&parts[..]),
            0,
        ))
    }

    /// A short label for display.
    pub fn display_name(&self) -> &'static str {
        self.component.as_str()
    }

    /// Used for column names etc.
    ///
    /// `Archetype:field` if an archetype is set, otherwise the component identifier.
    #[inline]
    pub fn column_name(&self) -> String {
        let Self {
            archetype,
            component,
            ..
        } = self;

        if let Some(archetype) = archetype {
            format!("{}:{component}", archetype.short_name())
        } else {
            component.to_string()
        }
    }

    /// Returns the fully-qualified name, e.g. `rerun.archetypes.Boxes2D:rerun.components.HalfSize2D#half_sizes`.
    #[inline]
    pub fn full_name(&self) -> String {
        let Self {
            archetype,
            component,
            component_type,
        } = self;

        match (archetype, component_type) {
            (None, None) => component.to_string(),
            (Some(archetype), None) => format!("{archetype}:{component}"),
            (None, Some(component_type)) => format!("{component_type}#{component}"),
            (Some(archetype), Some(component_type)) => {
                format!("{archetype}:{component_type}#{component}")
            }
        }
    }

    /// Whether this describes an archetype indicator.
    pub fn is_indicator_component(&self) -> bool {
        self.component.ends_with("Indicator")
            || self
                .component_type
                .is_some_and(|component_type| component_type.is_indicator_component())
    }

    /// Replaces [`Self::archetype`].
    #[inline]
    pub fn with_archetype(mut self, archetype: ArchetypeName) -> Self {
        self.archetype = Some(archetype);
        self
    }

    /// Replaces [`Self::component_type`].
    #[inline]
    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    /// Fills in [`Self::archetype`] if it is `None`.
    #[inline]
    pub fn or_with_archetype(mut self, archetype: impl FnOnce() -> ArchetypeName) -> Self {
        if self.archetype.is_none() {
            self.archetype = Some(archetype());
        }
        self
    }

    /// Fills in [`Self::component_type`] if it is `None`.
    #[inline]
    pub fn or_with_component_type(
        mut self,
        component_type: impl FnOnce() -> ComponentType,
    ) -> Self {
        if self.component_type.is_none() {
            self.component_type = Some(component_type());
        }
        self
    }
}
