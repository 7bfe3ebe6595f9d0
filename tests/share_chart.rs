use csv_report_actions::actions::{
    process, Action, ActionOutcome, ProcessOptions, ProcessRequest, ShareOutcome,
};
use csv_report_actions::artifacts::MemoryArtifactStore;

fn run(csv: &str) -> (ActionOutcome, MemoryArtifactStore) {
    let store = MemoryArtifactStore::new();
    let request = ProcessRequest::new(Action::Pie, csv.as_bytes().to_vec());
    let outcome = process(&request, &store, &ProcessOptions::default()).unwrap();
    (outcome, store)
}

#[test]
fn nonzero_total_produces_one_chart_artifact() {
    let (outcome, store) = run("gender,impressions\nM,100\nF,400\nM,200\nF,300\n");

    let ActionOutcome::Pie(ShareOutcome::Chart { file }) = outcome else {
        panic!("expected a chart artifact");
    };
    assert!(file.starts_with("gender_share_"));
    assert!(file.ends_with(".svg"));
    assert_eq!(store.names(), vec![file.clone()]);

    let svg = String::from_utf8(store.get(&file).unwrap()).unwrap();
    assert!(svg.contains("Total impressions: 1000"));
    assert!(svg.contains("M 30.0%"));
    assert!(svg.contains("F 70.0%"));
}

#[test]
fn blank_gender_cells_are_charted_as_unknown() {
    let (outcome, store) = run("gender,impressions\n,60\nM,40\n");

    let ActionOutcome::Pie(ShareOutcome::Chart { file }) = outcome else {
        panic!("expected a chart artifact");
    };
    let svg = String::from_utf8(store.get(&file).unwrap()).unwrap();
    assert!(svg.contains("unknown 60.0%"));
    assert!(svg.contains("M 40.0%"));
}

#[test]
fn zero_grand_total_returns_the_inline_empty_shape() {
    let (outcome, store) = run("gender,impressions\nM,0\nF,\n");

    // The empty-data guard intentionally answers with data instead of an
    // artifact; the two shapes for the same action are not to be unified.
    assert_eq!(
        outcome,
        ActionOutcome::Pie(ShareOutcome::Empty {
            percentages: Default::default(),
            total_impressions: 0,
        })
    );
    assert!(store.is_empty());

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["action"], "pie");
    assert_eq!(json["total_impressions"], 0);
    assert!(json["percentages"].as_object().unwrap().is_empty());
}

#[test]
fn pie_requires_both_gender_and_impressions() {
    let store = MemoryArtifactStore::new();
    let request = ProcessRequest::new(
        Action::Pie,
        "gender,cost\nM,5\n".as_bytes().to_vec(),
    );

    let err = process(&request, &store, &ProcessOptions::default()).unwrap_err();
    assert_eq!(err.kind(), "column_not_found");
    assert!(err.to_string().contains("impressions"));
}
