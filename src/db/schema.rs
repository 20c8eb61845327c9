//! Live-schema introspection for the `stops` table.
//!
//! The table may predate this tool (imported datasets, older versions), so
//! nothing assumes the full column set: readers substitute NULL for absent
//! columns and the writer inserts only what exists.

use rusqlite::{Connection, OptionalExtension, Result};

/// Every column this tool knows how to read or write, in display order.
/// `id` is excluded: it is never selected by name nor inserted.
pub const STOP_COLUMNS: [&str; 16] = [
    "stop_date",
    "stop_time",
    "country_name",
    "county_name",
    "driver_gender",
    "driver_age",
    "driver_race",
    "search_conducted",
    "search_type",
    "drugs_related_stop",
    "is_arrested",
    "stop_duration",
    "vehicle_number",
    "stop_outcome",
    "violation",
    "created_at",
];

pub fn stops_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='stops'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of the live `stops` table (empty if the table is missing).
pub fn live_columns(conn: &Connection) -> Result<Vec<String>> {
    if !stops_table_exists(conn)? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare("PRAGMA table_info('stops')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

pub fn has_column(cols: &[String], name: &str) -> bool {
    cols.iter().any(|c| c == name)
}

/// SELECT list over all known columns, substituting `NULL AS col` for the
/// ones the live table lacks so row mapping never fails on an old schema.
pub fn select_clause(cols: &[String]) -> String {
    let mut parts = vec!["id".to_string()];
    for col in STOP_COLUMNS {
        if has_column(cols, col) {
            parts.push(col.to_string());
        } else {
            parts.push(format!("NULL AS {}", col));
        }
    }
    parts.join(", ")
}
