use std::borrow::Cow;

use re_batch_core::{
    Archetype, ArchetypeName, AsComponents, Component as _, ComponentBatch, ComponentColumn,
    ComponentDescriptor, ResultExt as _, SerializationResult,
};

use super::{DeferredError, try_serialize_field};
use crate::components::{ClassId, Color, DrawOrder, HalfSize2D, Position2D, Radius, Text};

/// **Archetype**: 2D boxes with half-extents and optional center, colors etc.
///
/// ## Example
///
/// ```
/// use re_batch_types::archetypes::Boxes2D;
/// use re_batch_core::AsComponents as _;
///
/// let boxes = Boxes2D::from_mins_and_sizes([(-1.0, -1.0)], [(2.0, 2.0)])
///     .with_colors([[255_u8, 0, 0]])
///     .with_labels(["my box"]);
///
/// // half sizes, centers, colors, labels and the indicator.
/// assert_eq!(boxes.as_component_batches().unwrap().len(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Boxes2D {
    /// All half-extents that make up the batch of boxes.
    pub half_sizes: Option<ComponentBatch>,

    /// Optional center positions of the boxes.
    pub centers: Option<ComponentBatch>,

    /// Optional colors for the boxes.
    pub colors: Option<ComponentBatch>,

    /// Optional radii for the lines that make up the boxes.
    pub radii: Option<ComponentBatch>,

    /// Optional text labels for the boxes.
    pub labels: Option<ComponentBatch>,

    /// An optional floating point value that specifies the 2D drawing order.
    ///
    /// Objects with higher values are drawn on top of those with lower values.
    pub draw_order: Option<ComponentBatch>,

    /// Optional class IDs for the boxes.
    pub class_ids: Option<ComponentBatch>,

    error: DeferredError,
}

impl Boxes2D {
    #[inline]
    pub fn descriptor_half_sizes() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "half_sizes", HalfSize2D::name())
    }

    #[inline]
    pub fn descriptor_centers() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "centers", Position2D::name())
    }

    #[inline]
    pub fn descriptor_colors() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "colors", Color::name())
    }

    #[inline]
    pub fn descriptor_radii() -> ComponentDescriptor {
        ComponentDescriptor::new(Self::name(), "radii", Radius::name())
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

impl Archetype for Boxes2D {
    #[inline]
    fn name() -> ArchetypeName {
        "rerun.archetypes.Boxes2D".into()
    }

    #[inline]
    fn display_name() -> &'static str {
        "Boxes 2D"
    }

    #[inline]
    fn required_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![Self::descriptor_half_sizes()])
    }

    #[inline]
    fn recommended_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![
            Self::descriptor_centers(),
            Self::descriptor_colors(),
            Self::indicator(),
        ])
    }

    #[inline]
    fn optional_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![
            Self::descriptor_radii(),
            Self::descriptor_labels(),
            Self::descriptor_draw_order(),
            Self::descriptor_class_ids(),
        ])
    }
}

impl AsComponents for Boxes2D {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        re_batch_core::archetype_batches::<Self>(
            self.error.then_fields(self.fields()),
            self.num_instances(),
        )
    }
}

impl Boxes2D {
    /// Create a new `Boxes2D`.
    #[inline]
    pub fn new(half_sizes: impl IntoIterator<Item = impl Into<HalfSize2D>>) -> Self {
        Self::default().with_half_sizes(half_sizes)
    }

    /// The number of instances: the length of the longest set field.
    #[inline]
    pub fn num_instances(&self) -> usize {
        super::max_num_instances(&self.fields())
    }

    /// The set fields, in declaration order.
    fn fields(&self) -> [Option<ComponentBatch>; 7] {
        let Self {
            half_sizes,
            centers,
            colors,
            radii,
            labels,
            draw_order,
            class_ids,
            error: _,
        } = self;

        [
            half_sizes.clone(),
            centers.clone(),
            colors.clone(),
            radii.clone(),
            labels.clone(),
            draw_order.clone(),
            class_ids.clone(),
        ]
    }

    /// Partitions the component data into multiple sub-batches.
    ///
    /// This makes it possible to use `RecordingStream::send_columns` to send columnar data.
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

    /// All half-extents that make up the batch of boxes.
    #[inline]
    pub fn with_half_sizes(
        mut self,
        half_sizes: impl IntoIterator<Item = impl Into<HalfSize2D>>,
    ) -> Self {
        let batch = try_serialize_field::<HalfSize2D>(Self::descriptor_half_sizes(), half_sizes);
        self.half_sizes = self.error.keep(batch);
        self
    }

    /// Optional center positions of the boxes.
    #[inline]
    pub fn with_centers(mut self, centers: impl IntoIterator<Item = impl Into<Position2D>>) -> Self {
        let batch = try_serialize_field::<Position2D>(Self::descriptor_centers(), centers);
        self.centers = self.error.keep(batch);
        self
    }

    /// Optional colors for the boxes.
    #[inline]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = impl Into<Color>>) -> Self {
        let batch = try_serialize_field::<Color>(Self::descriptor_colors(), colors);
        self.colors = self.error.keep(batch);
        self
    }

    /// Optional radii for the lines that make up the boxes.
    #[inline]
    pub fn with_radii(mut self, radii: impl IntoIterator<Item = impl Into<Radius>>) -> Self {
        let batch = try_serialize_field::<Radius>(Self::descriptor_radii(), radii);
        self.radii = self.error.keep(batch);
        self
    }

    /// Optional text labels for the boxes.
    #[inline]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<Text>>) -> Self {
        let batch = try_serialize_field::<Text>(Self::descriptor_labels(), labels);
        self.labels = self.error.keep(batch);
        self
    }

    /// An optional floating point value that specifies the 2D drawing order.
    #[inline]
    pub fn with_draw_order(mut self, draw_order: impl Into<DrawOrder>) -> Self {
        let batch = try_serialize_field::<DrawOrder>(Self::descriptor_draw_order(), [draw_order]);
        self.draw_order = self.error.keep(batch);
        self
    }

    /// Packs multiple [`DrawOrder`]s in a single batch.
    ///
    /// Only makes sense in conjunction with [`Self::columns`].
    #[inline]
    pub fn with_many_draw_order(
        mut self,
        draw_order: impl IntoIterator<Item = impl Into<DrawOrder>>,
    ) -> Self {
        let batch = try_serialize_field::<DrawOrder>(Self::descriptor_draw_order(), draw_order);
        self.draw_order = self.error.keep(batch);
        self
    }

    /// Optional class IDs for the boxes.
    #[inline]
    pub fn with_class_ids(mut self, class_ids: impl IntoIterator<Item = impl Into<ClassId>>) -> Self {
        let batch = try_serialize_field::<ClassId>(Self::descriptor_class_ids(), class_ids);
        self.class_ids = self.error.keep(batch);
        self
    }
}
