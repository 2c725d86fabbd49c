// tests/pipeline_e2e.rs
use std::fs;
use std::path::{Path, PathBuf};

use zeus_attendance::cli;
use zeus_attendance::csv::parse_rows;
use zeus_attendance::store;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("zeus_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const HISTORY: &str = r#"[
  {"id": 1, "author_display": "tollmannd", "author_id": 11, "created_at": "2022-05-21T18:48:57Z",
   "message": "**A1: Toll(L), BLoaf**\nZ1 - Asimov, Barr"},
  {"id": 2, "author_display": "Goose", "author_id": 12, "created_at": "2022-05-21T18:55:33Z",
   "message": "HQCO: Goose(Zeus)"},
  {"id": 3, "author_display": "someone", "author_id": 13, "created_at": "2022-05-21T19:10:00Z",
   "message": "did I miss it?", "reactions": [{"emoji": "❌", "count": 1}]},
  {"id": 4, "author_display": "someone", "author_id": 13, "created_at": "2022-05-21T19:11:00Z",
   "message": "gg"},
  {"id": 5, "author_display": "DaSchmitt", "author_id": 14, "created_at": "2022-05-22T18:50:38Z",
   "message": "A: Schmitt (L), Lietuvis", "reactions": [{"emoji": "🆕", "count": 1}]}
]"#;

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn run_cli(v: &[&str]) {
    let parsed = cli::parse_args(args(v)).unwrap();
    cli::run(&parsed).unwrap();
}

fn read_table(path: &Path, sep: char) -> Vec<Vec<String>> {
    parse_rows(&fs::read_to_string(path).unwrap(), sep)
}

#[test]
fn run_writes_json_and_tables() {
    let dir = tmp_dir("run");
    let input = dir.join("attendance.json");
    fs::write(&input, HISTORY).unwrap();
    let out = dir.join("out");
    let conf = dir.join("none.conf");

    run_cli(&[
        "run",
        "-i", input.to_str().unwrap(),
        "-o", out.to_str().unwrap(),
        "-c", conf.to_str().unwrap(),
        "--format", "tsv",
        "--dump-processed",
        "-q",
    ]);

    let ops = store::load_operations_json(&out.join("parsed_attendance.json")).unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].user_count(), 5);

    let operations = read_table(&out.join("operations.tsv"), '\t');
    assert_eq!(operations, vec![
        vec!["date", "attendance_count"],
        vec!["2022-05-21", "5"],
        vec!["2022-05-22", "2"],
    ]);

    let attendance = read_table(&out.join("attendance.tsv"), '\t');
    assert_eq!(attendance.len(), 1 + 7);
    assert_eq!(attendance[1], vec!["1", "2022-05-21", "Toll", "A1 L"]);
    assert_eq!(attendance[5], vec!["5", "2022-05-21", "Goose", "HQCO Zeus"]);
    assert_eq!(attendance[7], vec!["7", "2022-05-22", "Lietuvis", "A"]);

    // The first message became two fragments
    let processed = store::load_messages_json(&out.join("processed_attendance.json")).unwrap();
    assert_eq!(processed.len(), 6);
    assert!(processed[0].is_split && processed[1].is_split);
    assert_eq!(processed[0].message, "A1: Toll(L), BLoaf");
}

#[test]
fn export_rewrites_tables_from_parsed_json() {
    let dir = tmp_dir("export");
    let input = dir.join("attendance.json");
    fs::write(&input, HISTORY).unwrap();
    let first = dir.join("first");
    let second = dir.join("second");
    let conf = dir.join("none.conf");

    run_cli(&["-i", input.to_str().unwrap(), "-o", first.to_str().unwrap(), "-c", conf.to_str().unwrap(), "-q"]);
    assert!(!first.join("processed_attendance.json").exists());

    let parsed = first.join("parsed_attendance.json");
    run_cli(&[
        "export",
        "-i", parsed.to_str().unwrap(),
        "-o", second.to_str().unwrap(),
        "-c", conf.to_str().unwrap(),
        "--no-headers",
        "-q",
    ]);

    let a = read_table(&first.join("attendance.csv"), ',');
    let b = read_table(&second.join("attendance.csv"), ',');
    assert_eq!(&a[1..], &b[..]);
}

#[test]
fn preprocess_only_writes_messages() {
    let dir = tmp_dir("preprocess");
    let input = dir.join("attendance.json");
    fs::write(&input, HISTORY).unwrap();
    let out = dir.join("out");
    let conf = dir.join("none.conf");

    run_cli(&["preprocess", "-i", input.to_str().unwrap(), "-o", out.to_str().unwrap(), "-c", conf.to_str().unwrap(), "-q"]);
    assert!(out.join("processed_attendance.json").exists());
    assert!(!out.join("operations.csv").exists());
}

#[test]
fn malformed_history_fails_the_run() {
    let dir = tmp_dir("malformed");
    let input = dir.join("attendance.json");
    fs::write(&input, r#"[{"id": 1, "author_display": "x", "author_id": 2}]"#).unwrap();
    let conf = dir.join("none.conf");

    let parsed = cli::parse_args(args(&["-i", input.to_str().unwrap(), "-o", dir.join("out").to_str().unwrap(), "-c", conf.to_str().unwrap(), "-q"])).unwrap();
    let err = cli::run(&parsed).unwrap_err();
    assert!(err.to_string().contains("#0"));
    assert!(!dir.join("out").exists());
}

#[test]
fn save_config_persists_resolved_flags() {
    use zeus_attendance::config::{file as conf_file, options::{AppOptions, ExportFormat}};

    let dir = tmp_dir("save_config");
    let input = dir.join("attendance.json");
    fs::write(&input, HISTORY).unwrap();
    let out = dir.join("out");
    let conf = dir.join("saved.conf");

    run_cli(&[
        "-i", input.to_str().unwrap(),
        "-o", out.to_str().unwrap(),
        "-c", conf.to_str().unwrap(),
        "--format", "tsv",
        "-w", "3",
        "--save-config",
        "-q",
    ]);
    assert!(out.join("operations.tsv").exists());

    let mut loaded = AppOptions::default();
    assert!(conf_file::load(&conf, &mut loaded));
    assert_eq!(loaded.export.format, ExportFormat::Tsv);
    assert_eq!(loaded.run.workers, 3);
    assert_eq!(loaded.export.out_dir, out);
    assert_eq!(loaded.input, input);
}
