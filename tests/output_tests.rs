use ceph_ops_analyzer::commands::{analyze_to_writer, AnalyzeArgs};
use ceph_ops_analyzer::utils::config::AnalyzerConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn ts(secs: f64) -> String {
    format!("2024-01-01 00:00:{:09.6}", secs)
}

fn op(description: &str, age: f64, duration: f64, events: &[(&str, f64)]) -> serde_json::Value {
    let events: Vec<serde_json::Value> = events
        .iter()
        .map(|(event, secs)| json!({ "time": ts(*secs), "event": event }))
        .collect();

    json!({
        "description": description,
        "initiated_at": ts(0.0),
        "age": age,
        "duration": duration,
        "type_data": {
            "flag_point": "commit sent; apply or cleanup",
            "client_info": { "client": "client.4100", "client_addr": "10.0.0.1:0/1", "tid": 7 },
            "events": events
        }
    })
}

const OP_A: &str = "osd_op(client.4100.0:1 2.3 rbd_data.1 [write 0~4096] ondisk+write e42)";
const OP_B: &str = "osd_op(client.4100.0:2 2.3 rbd_data.1 [write 4096~4096] ondisk+write e42)";
const OP_E: &str = "osd_op(client.4100.0:3 2.7 rbd_data.2 [write 0~8192] ondisk+write e42)";

fn fixture_files() -> (NamedTempFile, NamedTempFile) {
    let first = json!({
        "size": 20,
        "duration": 600,
        "ops": [
            op(OP_A, 12.5, 6.0, &[
                ("initiated", 0.0),
                ("queued_for_pg", 0.5),
                ("reached_pg", 1.0),
                ("started", 1.25),
                ("op_commit", 4.0),
                ("done", 6.0),
            ]),
            // reaches op_commit fast: filtered
            op(OP_B, 3.0, 2.0, &[("initiated", 0.0), ("op_commit", 0.1)]),
        ]
    });

    let mut repop = op("osd_repop(client.4100.0:9 2.3)", 1.0, 1.5, &[]);
    repop["type_data"]["events"] = serde_json::Value::Null;

    let second = json!({
        "Ops": [
            // same description as A: ignored
            op(OP_A, 1.0, 100.0, &[("initiated", 0.0), ("done", 50.0)]),
            repop,
            op(OP_E, 2.25, 3.0, &[
                ("initiated", 0.0),
                ("queued_for_pg", 0.5),
                ("reached_pg", 0.5),
                ("started", 0.5),
                ("commit_sent", 2.5),
                ("done", 3.0),
            ]),
        ]
    });

    let mut a = NamedTempFile::new().unwrap();
    a.write_all(first.to_string().as_bytes()).unwrap();
    let mut b = NamedTempFile::new().unwrap();
    b.write_all(second.to_string().as_bytes()).unwrap();
    (a, b)
}

fn run(args: &AnalyzeArgs) -> String {
    let mut buf = Vec::new();
    analyze_to_writer(args, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_full_report() {
    let (a, b) = fixture_files();
    let args = AnalyzeArgs {
        files: vec![a.path().to_path_buf(), b.path().to_path_buf()],
        config: AnalyzerConfig::default(),
    };

    let expected = [
        "------------------------------".to_string(),
        "----- Top 20 longest ops ".to_string(),
        "------------------------------".to_string(),
        format!("== OP == {}, age 12.5 took 6.0", OP_A),
        "  > started-op_commit (2.75) =  46 %".to_string(),
        "  > op_commit-done (2.00) =  33 %".to_string(),
        "  > initiated-queued_for_pg (0.50) =   8 %".to_string(),
        format!("== OP == {}, age 2.25 took 3.0", OP_E),
        "  > started-commit_sent (2.00) =  67 %".to_string(),
        "  > initiated-queued_for_pg (0.50) =  17 %".to_string(),
        "  > commit_sent-done (0.50) =  17 %".to_string(),
        "------------------------------".to_string(),
        "----- Summary of all ops ".to_string(),
        "------------------------------".to_string(),
        "Total # Ops analyzed: 2 ".to_string(),
        "* Across all ops, spots that took most total time:".to_string(),
        "    >> started-op_commit -- Total 2.75 seconds".to_string(),
        "    >> op_commit-done -- Total 2.00 seconds".to_string(),
        "    >> started-commit_sent -- Total 2.00 seconds".to_string(),
        "    >> initiated-queued_for_pg -- Total 1.00 seconds".to_string(),
        "    >> commit_sent-done -- Total 0.50 seconds".to_string(),
        "* Across all ops, average % of time each spot took in the op:".to_string(),
        "    >> started-commit_sent -- Avg 33.33% ".to_string(),
        "    >> started-op_commit -- Avg 22.92% ".to_string(),
        "    >> op_commit-done -- Avg 16.67% ".to_string(),
        "    >> initiated-queued_for_pg -- Avg 12.50% ".to_string(),
        "    >> commit_sent-done -- Avg 8.33% ".to_string(),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect::<String>();

    assert_eq!(run(&args), expected);
}

#[test]
fn test_report_is_repeatable() {
    let (a, b) = fixture_files();
    let args = AnalyzeArgs {
        files: vec![a.path().to_path_buf(), b.path().to_path_buf()],
        config: AnalyzerConfig::default(),
    };

    assert_eq!(run(&args), run(&args));
}

#[test]
fn test_summary_covers_ops_beyond_print_top() {
    let (a, b) = fixture_files();
    let mut config = AnalyzerConfig::default();
    config.print_top = 1;
    let args = AnalyzeArgs {
        files: vec![a.path().to_path_buf(), b.path().to_path_buf()],
        config,
    };

    let report = run(&args);
    assert_eq!(report.matches("== OP ==").count(), 1);
    assert!(report.contains("Total # Ops analyzed: 2 \n"));
    assert!(report.contains("    >> started-commit_sent -- Total 2.00 seconds\n"));
}

#[test]
fn test_empty_dump_prints_empty_sections() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"ops": []}"#).unwrap();
    let args = AnalyzeArgs {
        files: vec![file.path().to_path_buf()],
        config: AnalyzerConfig::default(),
    };

    let report = run(&args);
    assert!(report.contains("Total # Ops analyzed: 0 \n"));
    assert!(!report.contains("== OP =="));
    assert!(!report.contains(">>"));
}
