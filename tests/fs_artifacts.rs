use csv_report_actions::actions::{
    process, Action, ActionOutcome, ProcessOptions, ProcessRequest,
};
use csv_report_actions::artifacts::{ArtifactStore, FsArtifactStore};

#[test]
fn fs_store_writes_bytes_under_its_root() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());

    let name = store.put("merged_0a1b2c3d.csv", b"id\n1\n").unwrap();
    assert_eq!(name, "merged_0a1b2c3d.csv");

    let on_disk = std::fs::read(dir.path().join(&name)).unwrap();
    assert_eq!(on_disk, b"id\n1\n");
}

#[test]
fn fs_store_creates_its_root_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("outputs").join("today");
    let store = FsArtifactStore::new(&nested);

    store.put("part1_00000000.csv", b"id\n").unwrap();
    assert!(nested.join("part1_00000000.csv").is_file());
}

#[test]
fn merge_through_the_fs_store_lands_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());

    let request = ProcessRequest::new(Action::Merge, "id\n1\n".as_bytes().to_vec())
        .with_second_file("id\n2\n".as_bytes().to_vec());
    let ActionOutcome::Merge { file, rows_total } =
        process(&request, &store, &ProcessOptions::default()).unwrap()
    else {
        panic!("expected merge outcome");
    };

    assert_eq!(rows_total, 2);
    let text = std::fs::read_to_string(dir.path().join(&file)).unwrap();
    assert_eq!(text, "id\n1\n2\n");
}
