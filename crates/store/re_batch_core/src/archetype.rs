use std::borrow::Cow;

use crate::{
    ArchetypeName, ComponentBatch, ComponentColumn, ComponentDescriptor, ComponentType,
    ResultExt as _, SerializationResult,
};

// ---

/// An archetype is a high-level construct that represents a set of [`crate::Component`]s that
/// usually play well with each other (i.e. they compose nicely).
///
/// Internally, it is no different than a collection of components, but working at that higher
/// layer of abstraction opens opportunities for nicer APIs & tools that wouldn't be possible
/// otherwise.
///
/// E.g. consider the `Boxes2D` archetype, which represents the set of components to consider
/// when working with a 2D box: half sizes, centers, colors, radii, labels, draw order and
/// class ids.
pub trait Archetype {
    /// The fully-qualified name of this archetype, e.g. `rerun.archetypes.Boxes2D`.
    fn name() -> ArchetypeName;

    /// Readable name for displaying in UI.
    fn display_name() -> &'static str;

    /// Marks the data of an entity as having been logged through this archetype.
    ///
    /// Its component type is `rerun.components.{ShortName}Indicator`.
    fn indicator() -> ComponentDescriptor {
        let short_name = Self::name().short_name();
        ComponentDescriptor {
            archetype: Some(Self::name()),
            component: format!("{short_name}Indicator").into(),
            component_type: Some(ComponentType::from(format!(
                "rerun.components.{short_name}Indicator"
            ))),
        }
    }

    /// Returns all component descriptors that _must_ be provided by the user when constructing this archetype.
    fn required_components() -> Cow<'static, [ComponentDescriptor]>;

    /// Returns all component descriptors that _should_ be provided by the user when constructing this archetype.
    #[inline]
    fn recommended_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Owned(vec![Self::indicator()])
    }

    /// Returns all component descriptors that _may_ be provided by the user when constructing this archetype.
    #[inline]
    fn optional_components() -> Cow<'static, [ComponentDescriptor]> {
        Cow::Borrowed(&[])
    }

    /// Returns all component descriptors that must, should and may be provided by the user when constructing
    /// this archetype.
    ///
    /// The default implementation always does the right thing, at the cost of some runtime
    /// allocations.
    /// If you know all your component descriptors statically, you can override this method to get rid of the
    /// extra allocations.
    #[inline]
    fn all_components() -> Cow<'static, [ComponentDescriptor]> {
        [
            Self::required_components().into_owned(),
            Self::recommended_components().into_owned(),
            Self::optional_components().into_owned(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .into()
    }
}

// ---

/// Describes the interface for interpreting an object as a bundle of [`ComponentBatch`]es.
///
/// Every [`Archetype`] implements this, but it is also possible to implement fully custom
/// bundles.
pub trait AsComponents {
    /// Exposes the object's contents as an ordered list of serialized [`ComponentBatch`]es.
    ///
    /// Either every batch is returned, or the first error: never a partial list.
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>>;
}

impl AsComponents for ComponentBatch {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        Ok(vec![self.clone()])
    }
}

impl AsComponents for Vec<ComponentBatch> {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        Ok(self.clone())
    }
}

impl<AS: AsComponents + ?Sized> AsComponents for Box<AS> {
    #[inline]
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        (**self).as_component_batches()
    }
}

/// The batches of an archetype `A`: the set fields in the order given, then one indicator batch
/// of length `num_instances`.
///
/// Stops at the first field that fails to serialize.
pub fn archetype_batches<A: Archetype>(
    fields: impl IntoIterator<Item = SerializationResult<Option<ComponentBatch>>>,
    num_instances: usize,
) -> SerializationResult<Vec<ComponentBatch>> {
    re_tracing::profile_function!();

    let mut batches = fields
        .into_iter()
        .filter_map(Result::transpose)
        .collect::<SerializationResult<Vec<_>>>()
        .with_context(A::name())?;

    batches.push(ComponentBatch::from_indicator::<A>(num_instances).with_context(A::name())?);

    Ok(batches)
}

/// Partitions the set fields of an archetype `A` into columns of the given run `lengths`,
/// followed by one indicator column with a single indicator per run.
///
/// Every set field must have as many instances as the `lengths` sum up to.
pub fn archetype_columns<A: Archetype>(
    fields: impl IntoIterator<Item = Option<ComponentBatch>>,
    lengths: impl IntoIterator<Item = u32> + Clone,
) -> SerializationResult<Vec<ComponentColumn>> {
    re_tracing::profile_function!();

    let mut columns = fields
        .into_iter()
        .flatten()
        .map(|batch| batch.partitioned(lengths.clone()))
        .collect::<SerializationResult<Vec<_>>>()
        .with_context(A::name())?;

    let num_runs = lengths.into_iter().count();
    let indicator = ComponentBatch::from_indicator::<A>(num_runs).with_context(A::name())?;
    columns.push(ComponentColumn::from_unit_batch(indicator)?);

    Ok(columns)
}

/// Like [`archetype_columns`], with every instance in its own run.
///
/// The number of runs is the length of the first set field.
pub fn archetype_columns_of_unit_batches<A: Archetype>(
    fields: impl IntoIterator<Item = Option<ComponentBatch>>,
) -> SerializationResult<Vec<ComponentColumn>> {
    let fields: Vec<_> = fields.into_iter().collect();
    let len = fields.iter().flatten().map(|batch| batch.len()).next().unwrap_or(0);
    archetype_columns::<A>(fields, std::iter::repeat_n(1, len))
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::DataType;

    use super::*;
    use crate::SerializationError;

    struct Testing;

    impl Archetype for Testing {
        fn name() -> ArchetypeName {
            "rerun.archetypes.Testing".into()
        }

        fn display_name() -> &'static str {
            "Testing"
        }

        fn required_components() -> Cow<'static, [ComponentDescriptor]> {
            Cow::Owned(vec![descr("a")])
        }
    }

    fn descr(field: &str) -> ComponentDescriptor {
        ComponentDescriptor::new("rerun.archetypes.Testing", field, "rerun.testing.Int32")
    }

    fn field(name: &str, data: &[i32]) -> Option<ComponentBatch> {
        Some(ComponentBatch::from_loggable(data, descr(name)).unwrap())
    }

    #[test]
    fn indicator_descriptor() {
        let indicator = Testing::indicator();
        assert_eq!(indicator.archetype, Some(Testing::name()));
        assert_eq!(
            indicator.component_type,
            Some("rerun.components.TestingIndicator".into())
        );
        assert!(indicator.is_indicator_component());

        let all = Testing::all_components();
        assert_eq!(all.as_ref(), &[descr("a"), indicator]);
    }

    #[test]
    fn unset_fields_are_skipped() {
        let batches = archetype_batches::<Testing>(
            [
                Ok(field("a", &[1, 2])),
                Ok(None),
                Ok(field("c", &[3, 4])),
            ],
            2,
        )
        .unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].descriptor(), &descr("a"));
        assert_eq!(batches[1].descriptor(), &descr("c"));

        let indicator = &batches[2];
        assert_eq!(indicator.descriptor(), &Testing::indicator());
        assert_eq!(indicator.len(), 2);
        assert_eq!(indicator.array().data_type(), &DataType::Null);
    }

    #[test]
    fn fail_fast() {
        let err = archetype_batches::<Testing>(
            [
                Ok(field("a", &[1])),
                Err(SerializationError::Registration {
                    reason: "boom".to_owned(),
                }),
                Ok(field("c", &[3])),
            ],
            1,
        )
        .unwrap_err();

        assert!(matches!(
            err.root(),
            SerializationError::Registration { .. }
        ));
    }

    #[test]
    fn columns() {
        let columns = archetype_columns::<Testing>(
            [field("a", &[1, 2, 3]), None, field("c", &[4, 5, 6])],
            [1, 2],
        )
        .unwrap();

        assert_eq!(columns.len(), 3);
        for column in &columns {
            assert_eq!(column.num_runs(), 2);
        }
        similar_asserts::assert_eq!(columns[0].offsets(), &[0, 1, 3]);

        let indicator = &columns[2];
        assert_eq!(indicator.descriptor(), &Testing::indicator());
        similar_asserts::assert_eq!(indicator.offsets(), &[0, 1, 2]);
    }

    #[test]
    fn columns_of_unit_batches() {
        let columns =
            archetype_columns_of_unit_batches::<Testing>([None, field("c", &[4, 5, 6])]).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].num_runs(), 3);
        assert_eq!(columns[1].num_runs(), 3);
    }

    #[test]
    fn columns_length_mismatch() {
        let err = archetype_columns::<Testing>([field("a", &[1, 2, 3])], [1, 1]).unwrap_err();
        assert!(matches!(
            err.root(),
            SerializationError::PartitionLengthMismatch { .. }
        ));
    }
}
