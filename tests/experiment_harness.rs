use std::fs;
use std::path::PathBuf;

use knapsack_lab::{
    ExperimentHarness, FailurePolicy, HarnessConfig, KnapsackError, Method, ReportWriter,
};

const TEXTBOOK: &str = "3\n\n60 100 120\n\n50\n\n10 20 30\n";
const SINGLE: &str = "1\n\n10\n\n5\n\n5\n";
const SHORT_PROFITS: &str = "5\n\n1 2 3 4\n\n10\n\n1 1 1 1 1\n";

/// Fresh batch directory for one test.
fn batch_dir(test: &str, files: &[(&str, &str)]) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "knapsack-lab-{}-{}",
        test,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&root);
    for (relative, contents) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    root
}

fn heuristics_config(policy: FailurePolicy) -> HarnessConfig {
    HarnessConfig::default()
        .with_methods(vec![Method::RelaxedDantzig, Method::ViableDantzig])
        .with_failure_policy(policy)
}

fn report_text(writer: ReportWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn batch_writes_one_line_per_instance() {
    let root = batch_dir(
        "complete",
        &[("1/single.txt", SINGLE), ("3/textbook.txt", TEXTBOOK)],
    );
    let harness = ExperimentHarness::new(&heuristics_config(FailurePolicy::FailFast)).unwrap();
    let mut report = ReportWriter::new(Vec::new(), "memory");

    let outcome = harness.run_batch(&root, &mut report).unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(
        report_text(report),
        "instance_name,relaxed_cost,viable_cost\nsingle.txt,10,10\ntextbook.txt,240,160\n"
    );
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn fail_fast_aborts_on_malformed_instance() {
    let root = batch_dir(
        "fail-fast",
        &[
            ("1/a_single.txt", SINGLE),
            ("1/b_broken.txt", SHORT_PROFITS),
            ("3/textbook.txt", TEXTBOOK),
        ],
    );
    let harness = ExperimentHarness::new(&heuristics_config(FailurePolicy::FailFast)).unwrap();
    let mut report = ReportWriter::new(Vec::new(), "memory");

    let err = harness.run_batch(&root, &mut report).unwrap_err();

    match err {
        KnapsackError::Instance { path, source } => {
            assert!(path.ends_with("1/b_broken.txt"));
            assert!(matches!(*source, KnapsackError::Format(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    // lines before the failure stay in the report
    assert_eq!(
        report_text(report),
        "instance_name,relaxed_cost,viable_cost\na_single.txt,10,10\n"
    );
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn continue_policy_collects_failures() {
    let root = batch_dir(
        "continue",
        &[
            ("1/a_single.txt", SINGLE),
            ("1/b_broken.txt", SHORT_PROFITS),
            ("3/textbook.txt", TEXTBOOK),
        ],
    );
    let harness = ExperimentHarness::new(&heuristics_config(FailurePolicy::Continue)).unwrap();
    let mut report = ReportWriter::new(Vec::new(), "memory");

    let outcome = harness.run_batch(&root, &mut report).unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].path.ends_with("1/b_broken.txt"));
    assert_eq!(
        report_text(report),
        "instance_name,relaxed_cost,viable_cost\na_single.txt,10,10\ntextbook.txt,240,160\n"
    );
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn report_file_is_created_with_its_directory() {
    let dir = std::env::temp_dir().join(format!("knapsack-lab-report-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("nested/results.txt");

    let mut writer = ReportWriter::create(&path).unwrap();
    writer.write_header(&Method::ALL).unwrap();
    drop(writer);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "instance_name,relaxed_cost,viable_cost,gurobi_cost\n"
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[cfg(feature = "highs")]
#[test]
fn all_three_methods_on_the_textbook_instance() {
    let root = batch_dir("exact", &[("3/textbook.txt", TEXTBOOK)]);
    let harness = ExperimentHarness::new(&HarnessConfig::default()).unwrap();
    let mut report = ReportWriter::new(Vec::new(), "memory");

    let outcome = harness.run_batch(&root, &mut report).unwrap();

    let record = &outcome.records[0];
    assert_eq!(record.objective(Method::ViableDantzig), Some(160.0));
    assert_eq!(record.objective(Method::Exact), Some(220.0));
    assert!((record.objective(Method::RelaxedDantzig).unwrap() - 240.0).abs() < 1e-9);
    fs::remove_dir_all(&root).unwrap();
}
