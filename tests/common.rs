#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn scc() -> Command {
    cargo_bin_cmd!("securecheck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_securecheck.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    // init DB (creates tables)
    scc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    scc()
        .args([
            "--db", db_path, "add",
            "--date", "2025-08-01",
            "--time", "09:15",
            "--county", "Kent",
            "--gender", "male",
            "--age", "27",
            "--duration", "0-15 min",
            "--vehicle", "KA-01",
        ])
        .assert()
        .success();

    scc()
        .args([
            "--db", db_path, "add",
            "--date", "2025-08-02",
            "--time", "22:05",
            "--county", "Albany",
            "--gender", "female",
            "--age", "34",
            "--search",
            "--search-type", "Frisk",
            "--duration", "16-30 min",
            "--vehicle", "NY-77",
        ])
        .assert()
        .success();
}

/// Seed richer rows directly via SQL, exercising columns the `add` form
/// does not set (arrests, drug-related flags, outcomes).
pub fn seed_full_rows(db_path: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    securecheck::db::initialize::init_db(&conn).expect("init db");
    conn.execute_batch(
        r#"
        INSERT INTO stops (stop_date, stop_time, country_name, county_name,
            driver_gender, driver_age, driver_race, search_conducted, search_type,
            drugs_related_stop, is_arrested, stop_duration, vehicle_number,
            stop_outcome, violation, created_at)
        VALUES
        ('2025-08-01','09:15','Canada','Kent','male',27,'white',1,'Frisk',0,0,'0-15 min','KA-01','Warning','Speeding','2025-08-01T09:20:00Z'),
        ('2025-08-01','09:15','Canada','Kent','female',34,'black',1,'Vehicle Search',1,1,'16-30 min','KA-02','Arrest','DUI','2025-08-01T09:40:00Z'),
        ('2025-08-02','22:05','USA','Albany','male',27,'asian',0,'',0,0,'0-15 min','NY-77','Citation','Speeding','2025-08-02T22:15:00Z'),
        ('2025-08-03','22:05','USA','Albany','male',45,'white',0,'',1,1,'30+ min','NY-12','Arrest','Drug Possession','2025-08-03T22:30:00Z');
        "#,
    )
    .expect("seed stops");
}
