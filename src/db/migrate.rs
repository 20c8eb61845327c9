use crate::db::schema;
use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `stops` table with the modern schema.
fn create_stops_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS stops (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            stop_date          TEXT NOT NULL,
            stop_time          TEXT NOT NULL,
            country_name       TEXT DEFAULT '',
            county_name        TEXT DEFAULT '',
            driver_gender      TEXT CHECK(driver_gender IN ('male','female')),
            driver_age         INTEGER,
            driver_race        TEXT DEFAULT '',
            search_conducted   INTEGER NOT NULL DEFAULT 0,
            search_type        TEXT DEFAULT '',
            drugs_related_stop INTEGER NOT NULL DEFAULT 0,
            is_arrested        INTEGER NOT NULL DEFAULT 0,
            stop_duration      TEXT NOT NULL DEFAULT '0-15 min',
            vehicle_number     TEXT DEFAULT '',
            stop_outcome       TEXT DEFAULT '',
            violation          TEXT DEFAULT '',
            created_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_stops_date_time ON stops(stop_date, stop_time);
        CREATE INDEX IF NOT EXISTS idx_stops_violation ON stops(violation);
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    // A pre-existing table may lack any of these columns.
    let cols = schema::live_columns(conn)?;
    if schema::has_column(&cols, "stop_date") && schema::has_column(&cols, "stop_time") {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_stops_date_time ON stops(stop_date, stop_time);",
        )?;
    }
    if schema::has_column(&cols, "violation") {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_stops_violation ON stops(violation);",
        )?;
    }
    Ok(())
}

/// Add `drugs_related_stop` to tables created before 0.2.0.
fn migrate_add_drugs_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250612_0002_add_drugs_related_stop";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    // Schema may already carry the column (externally created table)
    if schema::has_column(&schema::live_columns(conn)?, "drugs_related_stop") {
        return Ok(());
    }

    // 2) Apply
    conn.execute(
        "ALTER TABLE stops ADD COLUMN drugs_related_stop INTEGER NOT NULL DEFAULT 0;",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'drugs_related_stop' column: {}", e)),
        )
    })?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added drugs_related_stop flag to stops')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'drugs_related_stop' to stops table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create or upgrade the stops table
    if !schema::stops_table_exists(conn)? {
        create_stops_table(conn)?;
        success("Created stops table (modern schema).");
    } else {
        ensure_indexes(conn)?;
        migrate_add_drugs_column(conn)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_full_schema_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let cols = schema::live_columns(&conn).unwrap();
        for c in schema::STOP_COLUMNS {
            assert!(schema::has_column(&cols, c), "missing column {c}");
        }
    }

    #[test]
    fn migrations_tolerate_tables_missing_date_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stops (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                driver_age INTEGER,
                created_at TEXT
            );",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        let cols = schema::live_columns(&conn).unwrap();
        assert!(schema::has_column(&cols, "drugs_related_stop"));
        assert!(!schema::has_column(&cols, "stop_date"));
    }

    #[test]
    fn adds_drugs_column_to_old_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stops (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                stop_date TEXT NOT NULL,
                stop_time TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        let cols = schema::live_columns(&conn).unwrap();
        assert!(schema::has_column(&cols, "drugs_related_stop"));

        // marker row written exactly once, reruns are no-ops
        run_pending_migrations(&conn).unwrap();
        let markers: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(markers, 1);
    }
}
