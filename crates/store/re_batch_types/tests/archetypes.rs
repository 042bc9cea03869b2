use itertools::Itertools as _;

use re_batch_core::{Archetype, AsComponents as _, ComponentDescriptor, Loggable as _};
use re_batch_types::archetypes::{Arrows2D, Boxes2D, Scalars};
use re_batch_types::components::{Color, HalfSize2D, Position2D, Radius, Text, Vector2D};

fn descriptors(batches: &[re_batch_core::ComponentBatch]) -> Vec<ComponentDescriptor> {
    batches.iter().map(|batch| *batch.descriptor()).collect()
}

#[test]
fn boxes_batches_in_declaration_order() {
    re_log::setup_logging();

    let boxes = Boxes2D::from_centers_and_half_sizes([(0.0, 0.0), (5.0, 5.0)], [(1.0, 1.0)])
        .with_labels(["a", "b"])
        .with_colors([Color::from_rgb(255, 0, 0)]);

    let batches = boxes.as_component_batches().unwrap();

    similar_asserts::assert_eq!(
        descriptors(&batches),
        vec![
            Boxes2D::descriptor_half_sizes(),
            Boxes2D::descriptor_centers(),
            Boxes2D::descriptor_colors(),
            Boxes2D::descriptor_labels(),
            Boxes2D::indicator(),
        ]
    );

    // The indicator spans the longest field.
    assert_eq!(batches.last().unwrap().len(), 2);
}

#[test]
fn arrows_roundtrip() {
    let vectors = [Vector2D::new(1.0, 0.0), Vector2D::new(0.0, -1.0)];
    let arrows = Arrows2D::from_vectors(vectors)
        .with_radii([Radius::new_ui_points(2.0)])
        .with_draw_order(10.0);

    let batches = arrows.as_component_batches().unwrap();
    assert_eq!(batches.len(), 4);

    let vectors_batch = batches
        .iter()
        .find(|batch| batch.descriptor() == &Arrows2D::descriptor_vectors())
        .unwrap();
    assert_eq!(
        Vector2D::from_arrow(vectors_batch.array().as_ref()).unwrap(),
        vectors
    );
}

#[test]
fn all_components_are_unique() {
    for all in [
        Boxes2D::all_components(),
        Arrows2D::all_components(),
        Scalars::all_components(),
    ] {
        assert!(all.iter().all_unique(), "{all:?}");
        assert_eq!(all.iter().filter(|d| d.is_indicator_component()).count(), 1);
    }
}

#[test]
fn boxes_as_columns() {
    let boxes = Boxes2D::new([(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])
        .with_centers([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);

    let columns = boxes.clone().columns([1, 2]).unwrap();
    assert_eq!(columns.len(), 3);
    for column in &columns {
        assert_eq!(column.num_runs(), 2);
    }
    similar_asserts::assert_eq!(columns[1].offsets(), &[0, 1, 3]);

    let columns = boxes.columns_of_unit_batches().unwrap();
    assert!(columns.iter().all(|column| column.num_runs() == 3));
}

#[test]
fn mismatched_column_lengths() {
    let boxes = Boxes2D::new([(1.0, 1.0), (2.0, 2.0)]).with_labels(["only one"]);
    assert!(boxes.columns([1, 1]).is_err());
}

#[test]
fn components_from_slices() {
    let positions = vec![Position2D::new(1.0, 2.0); 16];
    let half_sizes = vec![HalfSize2D::new(0.5, 0.5); 16];

    let boxes = Boxes2D::from_centers_and_half_sizes(
        positions.iter().copied(),
        half_sizes.iter().copied(),
    );
    assert_eq!(boxes.num_instances(), 16);

    let labels = boxes
        .with_labels((0..16).map(|i| format!("box #{i}")))
        .labels
        .unwrap();
    assert_eq!(
        Text::from_arrow(labels.array().as_ref()).unwrap()[3],
        Text::from("box #3")
    );
}
