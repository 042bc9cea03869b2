use re_batch_sdk::{
    Archetype as _, AsComponents, ComponentBatch, LogMsg, RecordingStreamBuilder,
    RecordingStreamError, SerializationError, SerializationResult,
    archetypes::{Arrows2D, Boxes2D},
};

#[test]
fn log_archetype() -> anyhow::Result<()> {
    re_log::setup_logging();

    let (rec, storage) = RecordingStreamBuilder::new("log_archetype")
        .enabled(true)
        .memory();

    rec.log(
        "world/boxes",
        &Boxes2D::from_centers_and_sizes([(0.0, 0.0), (2.0, 2.0)], [(1.0, 1.0)])
            .with_labels(["a", "b"]),
    )?;
    rec.flush_blocking();

    let msgs = storage.take();
    assert_eq!(msgs.len(), 1);

    let LogMsg::Batches {
        entity_path,
        num_instances,
        batches,
    } = &msgs[0]
    else {
        anyhow::bail!("expected batches, got {:?}", msgs[0]);
    };

    assert_eq!(entity_path.to_string(), "/world/boxes");
    assert_eq!(*num_instances, 2);
    similar_asserts::assert_eq!(
        batches.iter().map(|b| *b.descriptor()).collect::<Vec<_>>(),
        vec![
            Boxes2D::descriptor_half_sizes(),
            Boxes2D::descriptor_centers(),
            Boxes2D::descriptor_labels(),
            Boxes2D::indicator(),
        ]
    );

    Ok(())
}

struct Failing;

impl AsComponents for Failing {
    fn as_component_batches(&self) -> SerializationResult<Vec<ComponentBatch>> {
        Err(SerializationError::Registration {
            reason: "no store".to_owned(),
        })
    }
}

#[test]
fn failed_serialization_sends_nothing() {
    let (rec, storage) = RecordingStreamBuilder::new("failing").enabled(true).memory();

    let err = rec.log("broken", &Failing).unwrap_err();
    assert!(matches!(err, RecordingStreamError::Serialization(_)));
    assert_eq!(storage.num_msgs(), 0);
}

#[test]
fn log_from_many_threads() {
    let (rec, storage) = RecordingStreamBuilder::new("threads").enabled(true).memory();

    std::thread::scope(|scope| {
        for thread in 0..4 {
            let rec = rec.clone();
            scope.spawn(move || {
                for i in 0..25 {
                    let arrows = Arrows2D::from_vectors([(i as f32, thread as f32)]);
                    rec.log(format!("thread/{thread}"), &arrows).unwrap();
                }
            });
        }
    });

    let msgs = storage.take();
    assert_eq!(msgs.len(), 100);

    for thread in 0..4 {
        let path = format!("/thread/{thread}");
        let rows: Vec<_> = msgs
            .iter()
            .filter(|msg| msg.entity_path().to_string() == path)
            .collect();
        assert_eq!(rows.len(), 25);
    }
}

#[test]
fn columns_of_boxes() -> anyhow::Result<()> {
    let (rec, storage) = RecordingStreamBuilder::new("columns").enabled(true).memory();

    let boxes = Boxes2D::from_half_sizes([(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
    rec.send_columns("boxes", boxes.columns([1, 3])?)?;

    let msgs = storage.take();
    assert_eq!(msgs[0].num_rows(), 2);

    Ok(())
}
