use predicates::str::contains;
use std::fs;

mod common;
use common::{scc, seed_full_rows, setup_test_db, temp_out};

#[test]
fn test_export_csv_contains_all_rows() {
    let db_path = setup_test_db("export_csv");
    seed_full_rows(&db_path);
    let out = temp_out("export_csv", "csv");

    scc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("id,stop_date,stop_time"));
    assert!(content.contains("KA-01"));
    assert!(content.contains("Drug Possession"));
    assert_eq!(content.lines().count(), 5); // header + 4 rows
}

#[test]
fn test_export_json_is_valid() {
    let db_path = setup_test_db("export_json");
    seed_full_rows(&db_path);
    let out = temp_out("export_json", "json");

    scc()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array of records");
    assert_eq!(rows.len(), 4);
    // newest first
    assert_eq!(rows[0]["violation"], "Drug Possession");
}

#[test]
fn test_export_violation_filter() {
    let db_path = setup_test_db("export_filter");
    seed_full_rows(&db_path);
    let out = temp_out("export_filter", "csv");

    scc()
        .args([
            "--db", &db_path, "export",
            "--format", "csv",
            "--file", &out,
            "--violation", "Speeding",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    assert_eq!(content.lines().count(), 3); // header + 2 Speeding rows
    assert!(!content.contains("DUI"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_overwrite");
    seed_full_rows(&db_path);
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "existing").expect("pre-create file");

    scc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("already exists"));
    assert_eq!(fs::read_to_string(&out).expect("unchanged"), "existing");

    scc()
        .args([
            "--db", &db_path, "export",
            "--format", "csv",
            "--file", &out,
            "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
}

#[test]
fn test_backup_copies_and_compresses() {
    let db_path = setup_test_db("backup");
    seed_full_rows(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    scc()
        .args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&plain).expect("backup exists").len() > 0);

    let zipped = temp_out("backup_zip", "sqlite");
    scc()
        .args(["--db", &db_path, "backup", "--file", &zipped, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    let zip_file = std::path::Path::new(&zipped).with_extension("zip");
    assert!(zip_file.exists());
    fs::remove_file(zip_file).ok();
}
