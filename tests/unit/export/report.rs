use super::*;

fn ok(size: u32, file: &str) -> SizeReport {
    SizeReport {
        size,
        outcome: SizeOutcome::Success {
            paths: vec![PathBuf::from(file)],
        },
    }
}

#[test]
fn status_follows_cancelled_sizes() {
    let done = ExportReport::from_sizes(vec![ok(64, "a.png"), ok(128, "b.png")]);
    assert_eq!(done.status, RunStatus::Completed);
    assert!(done.all_succeeded());
    assert_eq!(done.written_paths().count(), 2);

    let cut = ExportReport::from_sizes(vec![
        ok(64, "a.png"),
        SizeReport {
            size: 128,
            outcome: SizeOutcome::Cancelled,
        },
    ]);
    assert_eq!(cut.status, RunStatus::Cancelled);
    assert!(!cut.all_succeeded());
    assert_eq!(cut.written_paths().count(), 1);
}

#[test]
fn failures_keep_the_error_kind() {
    let err = KnobError::render("boom");
    let report = ExportReport::from_sizes(vec![SizeReport {
        size: 32,
        outcome: SizeOutcome::failed(&err),
    }]);
    assert_eq!(report.status, RunStatus::Completed);
    assert!(!report.all_succeeded());
    assert!(matches!(
        report.size(32).unwrap().outcome,
        SizeOutcome::Failed {
            kind: ErrorKind::Render,
            ..
        }
    ));
}

#[test]
fn serializes_flat_outcomes() {
    let report = ExportReport::from_sizes(vec![
        ok(64, "k.png"),
        SizeReport {
            size: 128,
            outcome: SizeOutcome::Failed {
                kind: ErrorKind::Io,
                message: "disk full".into(),
            },
        },
    ]);
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["status"], "completed");
    assert_eq!(v["sizes"][0]["size"], 64);
    assert_eq!(v["sizes"][0]["outcome"], "success");
    assert_eq!(v["sizes"][0]["paths"][0], "k.png");
    assert_eq!(v["sizes"][1]["kind"], "io");
}
