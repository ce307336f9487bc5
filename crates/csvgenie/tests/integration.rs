use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn genie_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("genie");
    path
}

fn setup_test_env(catalog_csv: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(root.join("catalog.csv"), catalog_csv).unwrap();

    let config_content = format!(
        r#"[catalog]
path = "{}/catalog.csv"
format = "csv"
"#,
        root.display()
    );
    let config_path = root.join("genie.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_genie(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = genie_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run genie binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

const PRODUCE_CATALOG: &str = "code,name,category\n\
    A1,Red Apple,Produce\n\
    B1,Bananas,Produce\n\
    M1,Whole Milk,Dairy\n";

#[test]
fn test_process_maps_order_to_csv() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    fs::write(&order, "2 apples\n").unwrap();

    let (stdout, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success, "process failed: stderr={}", stderr);
    assert!(stdout.starts_with("Item Code,Item Name,Quantity"));
    assert!(stdout.contains("A1,Red Apple,2"), "stdout={}", stdout);
}

#[test]
fn test_process_drops_blank_lines_and_keeps_order() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    fs::write(&order, "3 bananas\n\n1 milk\n").unwrap();

    let (stdout, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success, "process failed: stderr={}", stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Item Code,Item Name,Quantity");
    assert_eq!(lines[1], "B1,Bananas,3");
    assert_eq!(lines[2], "M1,Whole Milk,1");
    assert_eq!(lines.len(), 3);
    assert!(stderr.contains("2 lines"), "stderr={}", stderr);
}

#[test]
fn test_unmatched_line_lands_in_unmapped_rows() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    fs::write(&order, "2 apples\n5 qwzx\n").unwrap();

    let (stdout, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("A1,Red Apple,2"));
    assert!(stdout.contains(",5 qwzx,5"), "stdout={}", stdout);
    assert!(stderr.contains("NO_CANDIDATE"), "stderr={}", stderr);
}

#[test]
fn test_ambiguous_entries_are_not_guessed() {
    let (tmp, config) = setup_test_env(
        "code,name,category\nR1,Brown Rice,Grains\nR2,Brown Rice,Grains\n",
    );
    let order = tmp.path().join("order.txt");
    fs::write(&order, "brown rice\n").unwrap();

    let (stdout, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains(",brown rice,1"), "stdout={}", stdout);
    assert!(stderr.contains("AMBIGUOUS"), "stderr={}", stderr);
}

#[test]
fn test_fractional_quantity_survives_export() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    fs::write(&order, "1.5 milk\n").unwrap();

    let (stdout, _, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("M1,Whole Milk,1.5"), "stdout={}", stdout);
}

#[test]
fn test_empty_catalog_refuses_to_process() {
    let (tmp, config) = setup_test_env("code,name,category\n");
    let order = tmp.path().join("order.txt");
    fs::write(&order, "2 apples\n").unwrap();

    let (_, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("no usable entries"), "stderr={}", stderr);
}

#[test]
fn test_non_txt_order_file_rejected() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.md");
    fs::write(&order, "2 apples\n").unwrap();

    let (_, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains(".txt"), "stderr={}", stderr);
}

#[test]
fn test_output_file_written() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    let results = tmp.path().join("results.csv");
    fs::write(&order, "2 apples\n").unwrap();

    let (_, stderr, success) = run_genie(
        &config,
        &[
            "process",
            order.to_str().unwrap(),
            "--output",
            results.to_str().unwrap(),
        ],
    );
    assert!(success, "stderr={}", stderr);
    assert!(stderr.contains("Exported"), "stderr={}", stderr);

    let written = fs::read_to_string(&results).unwrap();
    assert!(written.contains("A1,Red Apple,2"));
}

#[test]
fn test_json_export_contains_report_fields() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let order = tmp.path().join("order.txt");
    fs::write(&order, "2 apples\n").unwrap();

    let (stdout, _, success) = run_genie(
        &config,
        &["process", order.to_str().unwrap(), "--format", "json", "--quiet"],
    );
    assert!(success);
    assert!(stdout.contains("\"mapped\""));
    assert!(stdout.contains("\"item_code\": \"A1\""));
    assert!(stdout.contains("\"confidence\""));
}

#[test]
fn test_search_ranks_candidates() {
    let (_tmp, config) = setup_test_env(PRODUCE_CATALOG);

    let (stdout, stderr, success) = run_genie(&config, &["search", "apple"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.starts_with("1. ["), "stdout={}", stdout);
    assert!(stdout.contains("Red Apple"));
    assert!(stdout.contains("strategies:"));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config) = setup_test_env(PRODUCE_CATALOG);

    let (stdout, _, success) = run_genie(&config, &["search", "qwzx"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_stats_shows_category_breakdown() {
    let (_tmp, config) = setup_test_env(PRODUCE_CATALOG);

    let (stdout, _, success) = run_genie(&config, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Entries:    3"));
    assert!(stdout.contains("Produce"));
    assert!(stdout.contains("Dairy"));
}

#[test]
fn test_validate_rejects_duplicate_codes() {
    let (_tmp, config) = setup_test_env(
        "code,name,category\nA1,Red Apple,Produce\nA1,Green Apple,Produce\n",
    );

    let (_, stderr, success) = run_genie(&config, &["validate"]);
    assert!(!success);
    assert!(stderr.contains("duplicate catalog code"), "stderr={}", stderr);
}

#[test]
fn test_validate_accepts_good_catalog() {
    let (_tmp, config) = setup_test_env(PRODUCE_CATALOG);

    let (stdout, _, success) = run_genie(&config, &["validate"]);
    assert!(success);
    assert!(stdout.contains("Catalog OK: 3 entries."));
}

#[test]
fn test_catalog_override_flag() {
    let (tmp, config) = setup_test_env(PRODUCE_CATALOG);
    let other = tmp.path().join("other.csv");
    fs::write(&other, "code,name,category\nZ1,Zucchini,Produce\n").unwrap();

    let (stdout, _, success) = run_genie(
        &config,
        &["stats", "--catalog", other.to_str().unwrap()],
    );
    assert!(success);
    assert!(stdout.contains("Entries:    1"));
}

#[test]
fn test_raised_floor_pushes_weak_match_to_review() {
    let (tmp, _) = setup_test_env(PRODUCE_CATALOG);
    let root = tmp.path();

    // Same catalog, stricter policy: a fuzzy-only match no longer clears
    // the floor.
    let config_content = format!(
        r#"[catalog]
path = "{}/catalog.csv"

[classify]
floor = 0.8
medium = 0.9
high = 0.95
"#,
        root.display()
    );
    let config = root.join("strict.toml");
    fs::write(&config, config_content).unwrap();

    let order = root.join("order.txt");
    fs::write(&order, "2 apples\n").unwrap();

    let (stdout, stderr, success) = run_genie(&config, &["process", order.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains(",2 apples,2"), "stdout={}", stdout);
    assert!(stderr.contains("BELOW_THRESHOLD"), "stderr={}", stderr);
}

#[test]
fn test_invalid_config_rejected() {
    let (tmp, _) = setup_test_env(PRODUCE_CATALOG);
    let config = tmp.path().join("bad.toml");
    fs::write(&config, "[classify]\nfloor = 1.5\n").unwrap();

    let (_, stderr, success) = run_genie(&config, &["validate"]);
    assert!(!success);
    assert!(stderr.contains("floor"), "stderr={}", stderr);
}
