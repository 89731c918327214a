use swirl_continuum::{snapshot_path, Continuum, SnapshotError};
use swirl_core::StepId;
use swirl_space::Grid;

#[test]
fn snapshot_from_a_different_grid_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut small = Continuum::new(Grid::new(4, 4, 1).unwrap()).unwrap();
    small.set(3, 3, 0, 1.0, [0.01, 0.02, 0.0]);
    small.export(dir.path(), "field", StepId(5)).unwrap();

    let mut large = Continuum::new(Grid::new(4, 4, 2).unwrap()).unwrap();
    let err = large.import(dir.path(), "field", StepId(5)).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::SizeMismatch { expected: 1024, found: 512, .. }
    ));
    assert!(large.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn successive_steps_land_in_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = Continuum::new(Grid::new(2, 2, 2).unwrap()).unwrap();
    for step in 0..3u64 {
        c.set(0, 0, 0, 1.0 + step as f64, [0.0; 3]);
        let path = c.export(dir.path(), "field", StepId(step)).unwrap();
        assert_eq!(path, snapshot_path(dir.path(), "field", StepId(step)));
    }
    c.import(dir.path(), "field", StepId(1)).unwrap();
    assert_eq!(c.density(0, 0, 0), 2.0);
}

#[test]
fn missing_snapshot_message_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = Continuum::new(Grid::new(1, 1, 1).unwrap()).unwrap();
    let err = c.import(dir.path(), "field", StepId(999)).unwrap_err();
    assert!(err.to_string().contains("field_999.bin"));
}
