//! Builder calls that fail to serialize.
//!
//! These tests claim descriptors in the global registry with foreign datatypes, so they live in
//! their own test binary.

use re_batch_core::{
    Archetype as _, AsComponents as _, ComponentBatch, SerializationError, SerializationResult,
};
use re_batch_types::archetypes::{Arrows2D, Boxes2D};

fn assert_type_mismatch<T: std::fmt::Debug>(result: SerializationResult<T>) {
    let err = result.unwrap_err();
    assert!(
        matches!(err.root(), SerializationError::ComponentTypeMismatch { .. }),
        "{err}"
    );
}

#[test]
fn failed_field_fails_the_whole_archetype() {
    re_log::setup_logging();

    // Boxes2D colors are now taken by a Float64 component.
    ComponentBatch::from_loggable([1.0_f64], Boxes2D::descriptor_colors()).unwrap();

    let boxes = Boxes2D::new([(1.0, 1.0)]).with_colors([[255_u8, 0, 0]]);
    assert!(boxes.colors.is_none());

    let err = boxes.as_component_batches().unwrap_err();
    assert!(err.to_string().contains(Boxes2D::name().as_str()), "{err}");
    assert!(matches!(
        err.root(),
        SerializationError::ComponentTypeMismatch { .. }
    ));

    assert_type_mismatch(boxes.clone().columns([1]));
    assert_type_mismatch(boxes.columns_of_unit_batches());
}

#[test]
fn later_fields_do_not_clear_the_error() {
    ComponentBatch::from_loggable([1.0_f64], Arrows2D::descriptor_colors()).unwrap();

    let arrows = Arrows2D::new([(1.0, 0.0)])
        .with_colors([[0_u8, 255, 0]])
        .with_labels(["x"])
        .with_colors([[0_u8, 0, 255]]);
    assert!(arrows.labels.is_some());

    assert_type_mismatch(arrows.as_component_batches());

    // Without the failing field, the same archetype serializes.
    let arrows = Arrows2D::new([(1.0, 0.0)]).with_labels(["x"]);
    assert_eq!(arrows.as_component_batches().unwrap().len(), 3);
}
