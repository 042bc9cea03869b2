use std::borrow::Cow;

use re_batch_core::{
    Archetype, ArchetypeName, AsComponents, Component as _, ComponentBatch, ComponentColumn,
    ComponentDescriptor, ResultExt as _, SerializationResult,
};

use super::{DeferredError, try_serialize_field};
use crate::components::{ClassId, Color, DrawOrder, Position2D, Radius, Text, Vector2D};

/// **Archetype**: 2D arrows with optional colors, radii, labels, etc.
///
/// ## Example
///
/// ```
/// use re_batch_types::archetypes::Arrows2D;
/// use re_batch_core::AsComponents as _;
///
/// let arrows = Arrows2D::from_vectors([(1.0, 0.0), (0.0, 1.0)])
///     .with_origins([(0.0, 0.0), (1.0, 1.0)]);
///
/// // vectors, origins and the indicator.
/// assert_eq!(arrows.as_component_batches().unwrap().len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arrows2D {
    /// All the vectors for each arrow in the batch.
    pub vectors: Option<ComponentBatch>,

    /// All the origin (base) positions for each arrow in the batch.
    ///
    /// If no origins are set, (0, 0) is used as the origin for each arrow.
    pub origins: Option<ComponentBatch>,

    /// Optional radii for the arrows.
    ///
    /// The shaft is rendered as a line with `radius = 0.5 * radius`.
    pub radii: Option<ComponentBatch>,

    /// Optional colors for the arrows.
    pub colors: Option<ComponentBatch>,

    /// Optional text labels for the arrows.
    pub labels: Option<ComponentBatch>,

    /// An optional floating point value that specifies the 2D drawing order.
    pub draw_order: Option<ComponentBatch>,

    /// Optional class IDs for the arrows.
    pub class_ids: Option<ComponentBatch>,

    error: DeferredError,
}

impl Arrows2D {
    #[inline]
    pub fn descriptor_vectors() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "vectors", Vector2D::name())
    }

    #[inline]
    pub fn descriptor_origins() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "origins", Position2D::name())
    }

    #[inline]
    pub fn descriptor_radii() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "radii", Radius::name())
    }

    #[inline]
    pub fn descriptor_colors() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "colors", Color::name())
    }

    #[inline]
    pub fn descriptor_labels() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "labels", Text::name())
    }

    #[inline]
    pub fn descriptor_draw_order() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "draw_order", DrawOrder::name())
    }

    #[inline]
    pub fn descriptor_class_ids() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "class_ids", ClassId::name())
    }
}

impl Archetype for Arrows2D {
    #[inline]
    fn name() -> ArchetypeName {
        "rerun.archetypes.Arrows2D".into()
    }

    #[inline]
    fn display_name() -> &'static str {
        "Arrows 2D"
    }

    #[inline]
    fn required_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![Self::descriptor_vectors()])
    }

    #[inline]
    fn recommended_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![Self::descriptor_origins(), Self::indicator()])
    }

    #[inline]
    fn optional_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![
            Self::descriptor_radii(),
            Self::descriptor_colors(),
            Self::descriptor_labels(),
            Self::descriptor_draw_order(),
            Self::descriptor_class_ids(),
        ])
    }
}

impl AsComponents for Arrows2D {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        re_batch_core::archetype_batches::<Self>(
            self.error.then_fields(self.fields()),
            self.num_instances(),
        )
    }
}

impl Arrows2D {
    /// Create a new `Arrows2D`.
    #[inline]
    pub fn new(vectors: impl IntoIterator<Item = impl Into<Vector2D>>) -> Self {
        Self::default().with_vectors(vectors)
    }

    /// Creates new 2D arrows pointing in the given directions, with a base at the origin (0, 0).
    #[inline]
    pub fn from_vectors(vectors: impl IntoIterator<Item = impl Into<Vector2D>>) -> Self {
        Self::new(vectors)
    }

    /// The number of instances: the length of the longest set field.
    #[inline]
    pub fn num_instances(&self) -> usize {
        super::max_num_instances(&self.fields())
    }

    fn fields(&self) -> [Option<ComponentBatch>; 7] {
        let Self {
            vectors,
            origins,
            radii,
            colors,
            labels,
            draw_order,
            class_ids,
            error: _,
        } = self;

        [
            vectors.clone(),
            origins.clone(),
            radii.clone(),
            colors.clone(),
            labels.clone(),
            draw_order.clone(),
            class_ids.clone(),
        ]
    }

    /// Partitions the component data into multiple sub-batches, see [`ComponentColumn`].
    ///
    /// The specified `lengths` must sum to the total length of every set component batch.
    #[inline]
    pub fn columns(
        self,
        lengths: impl IntoIterator<Item = u32> + Clone,
    ) -> SerializationResult<Vec<ComponentColumn>> {
        self.error.check().with_context(Self::name())?;
        re_batch_core::archetype_columns::<Self>(self.fields(), lengths)
    }

    /// Partitions the component data into unit-length sub-batches.
    #[inline]
    pub fn columns_of_unit_batches(self) -> SerializationResult<Vec<ComponentColumn>> {
        self.error.check().with_context(Self::name())?;
        re_batch_core::archetype_columns_of_unit_batches::<Self>(self.fields())
    }

    /// All the vectors for each arrow in the batch.
    #[inline]
    pub fn with_vectors(mut self, vectors: impl IntoIterator<Item = impl Into<Vector2D>>) -> Self {
        let batch = try_serialize_field::<Vector2D>(Self::descriptor_vectors(), vectors);
        self.vectors = self.error.keep(batch);
        self
    }

    /// All the origin (base) positions for each arrow in the batch.
    #[inline]
    pub fn with_origins(mut self, origins: impl IntoIterator<Item = impl Into<Position2D>>) -> Self {
        let batch = try_serialize_field::<Position2D>(Self::descriptor_origins(), origins);
        self.origins = self.error.keep(batch);
        self
    }

    #[inline]
    pub fn with_radii(mut self, radii: impl IntoIterator<Item = impl Into<Radius>>) -> Self {
        let batch = try_serialize_field::<Radius>(Self::descriptor_radii(), radii);
        self.radii = self.error.keep(batch);
        self
    }

    #[inline]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = impl Into<Color>>) -> Self {
        let batch = try_serialize_field::<Color>(Self::descriptor_colors(), colors);
        self.colors = self.error.keep(batch);
        self
    }

    #[inline]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<Text>>) -> Self {
        let batch = try_serialize_field::<Text>(Self::descriptor_labels(), labels);
        self.labels = self.error.keep(batch);
        self
    }

    #[inline]
    pub fn with_draw_order(mut self, draw_order: impl Into<DrawOrder>) -> Self {
        let batch = try_serialize_field::<DrawOrder>(Self::descriptor_draw_order(), [draw_order]);
        self.draw_order = self.error.keep(batch);
        self
    }

    #[inline]
    pub fn with_class_ids(mut self, class_ids: impl IntoIterator<Item = impl Into<ClassId>>) -> Self {
        let batch = try_serialize_field::<ClassId>(Self::descriptor_class_ids(), class_ids);
        self.class_ids = self.error.keep(batch);
        self
    }
}
