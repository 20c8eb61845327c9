use crate::db::pool::DbPool;
use crate::db::schema;
use crate::errors::{AppError, AppResult};
use crate::models::gender::Gender;
use crate::models::stop::{StopDraft, StopRecord};
use crate::utils::date::{parse_date, parse_time};
use rusqlite::types::Value;
use rusqlite::{Connection, Result, Row, params_from_iter};

/// Optional filters for the full-table view and the export.
/// A filter naming a column the live table lacks is ignored (the caller
/// warns about it; see `ListFilters::ignored`).
#[derive(Debug, Default, Clone)]
pub struct ListFilters {
    pub limit: Option<u32>,
    pub county: Option<String>,
    pub violation: Option<String>,
    pub outcome: Option<String>,
}

impl ListFilters {
    fn candidates(&self) -> Vec<(&'static str, Option<&String>)> {
        vec![
            ("county_name", self.county.as_ref()),
            ("violation", self.violation.as_ref()),
            ("stop_outcome", self.outcome.as_ref()),
        ]
    }

    /// Filter columns requested but absent from the live schema.
    pub fn ignored(&self, cols: &[String]) -> Vec<&'static str> {
        self.candidates()
            .into_iter()
            .filter(|(name, v)| v.is_some() && !schema::has_column(cols, name))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Map a row produced by `schema::select_clause` into a StopRecord.
/// Absent columns arrive as NULL and map to None; malformed stored values
/// (bad dates/times/genders) are conversion errors, not silent Nones.
pub fn map_row(row: &Row) -> Result<StopRecord> {
    let stop_date = match row.get::<_, Option<String>>("stop_date")? {
        Some(s) => Some(parse_date(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })?),
        None => None,
    };

    let stop_time = match row.get::<_, Option<String>>("stop_time")? {
        Some(s) => Some(parse_time(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(s.clone())),
            )
        })?),
        None => None,
    };

    let driver_gender = match row.get::<_, Option<String>>("driver_gender")? {
        Some(s) if !s.is_empty() => Some(Gender::from_db_str(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidGender(s.clone())),
            )
        })?),
        _ => None,
    };

    Ok(StopRecord {
        id: row.get("id")?,
        stop_date,
        stop_time,
        country_name: row.get("country_name")?,
        county_name: row.get("county_name")?,
        driver_gender,
        driver_age: row.get("driver_age")?,
        driver_race: row.get("driver_race")?,
        search_conducted: row
            .get::<_, Option<i64>>("search_conducted")?
            .map(|v| v != 0),
        search_type: row.get("search_type")?,
        drugs_related_stop: row
            .get::<_, Option<i64>>("drugs_related_stop")?
            .map(|v| v != 0),
        is_arrested: row.get::<_, Option<i64>>("is_arrested")?.map(|v| v != 0),
        stop_duration: row.get("stop_duration")?,
        vehicle_number: row.get("vehicle_number")?,
        stop_outcome: row.get("stop_outcome")?,
        violation: row.get("violation")?,
        created_at: row.get("created_at")?,
    })
}

/// Load stop records, newest first, honoring whatever filters the live
/// schema can express. `cols` comes from `schema::live_columns`.
pub fn load_stops(
    pool: &mut DbPool,
    cols: &[String],
    filters: &ListFilters,
) -> AppResult<Vec<StopRecord>> {
    if cols.is_empty() {
        // no stops table at all: degrade to an empty result set
        return Ok(Vec::new());
    }

    let mut sql = format!("SELECT {} FROM stops", schema::select_clause(cols));
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    for (name, value) in filters.candidates() {
        if let Some(v) = value
            && schema::has_column(cols, name)
        {
            // LIKE without wildcards: case-insensitive equality
            conditions.push(format!("{} LIKE ?", name));
            params.push(v.clone());
        }
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id DESC");

    if let Some(n) = filters.limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }

    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a new stop record, writing only the columns the live schema has.
/// Returns the names of the columns actually inserted (empty when the
/// schema shares no columns with the draft at all).
pub fn insert_stop(
    conn: &Connection,
    cols: &[String],
    draft: &StopDraft,
    outcome: &str,
    violation: &str,
) -> AppResult<Vec<&'static str>> {
    let candidates: Vec<(&'static str, Value)> = vec![
        ("stop_date", Value::Text(draft.date_str())),
        ("stop_time", Value::Text(draft.time_str())),
        ("country_name", Value::Text(draft.country_name.clone())),
        ("county_name", Value::Text(draft.county_name.clone())),
        (
            "driver_gender",
            Value::Text(draft.driver_gender.to_db_str().to_string()),
        ),
        ("driver_age", Value::Integer(draft.driver_age)),
        ("driver_race", Value::Text(draft.driver_race.clone())),
        (
            "search_conducted",
            Value::Integer(if draft.search_conducted { 1 } else { 0 }),
        ),
        ("search_type", Value::Text(draft.search_type.clone())),
        ("stop_duration", Value::Text(draft.stop_duration.clone())),
        ("vehicle_number", Value::Text(draft.vehicle_number.clone())),
        ("stop_outcome", Value::Text(outcome.to_string())),
        ("violation", Value::Text(violation.to_string())),
        ("created_at", Value::Text(draft.created_at.clone())),
    ];

    let mut names: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    for (name, value) in candidates {
        if schema::has_column(cols, name) {
            names.push(name);
            values.push(value);
        }
    }

    if names.is_empty() {
        return Ok(names);
    }

    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO stops ({}) VALUES ({})",
        names.join(", "),
        placeholders
    );

    conn.execute(&sql, params_from_iter(values.iter()))?;
    Ok(names)
}

/// Distinct duration buckets observed in the table (the entry form offers
/// these instead of the configured defaults when data exists).
pub fn distinct_durations(pool: &mut DbPool, cols: &[String]) -> AppResult<Vec<String>> {
    if !schema::has_column(cols, "stop_duration") {
        return Ok(Vec::new());
    }

    let mut stmt = pool.conn.prepare(
        "SELECT DISTINCT stop_duration FROM stops
         WHERE stop_duration IS NOT NULL AND stop_duration != ''
         ORDER BY stop_duration ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use chrono::{NaiveDate, NaiveTime};

    fn mem_pool() -> DbPool {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        DbPool { conn }
    }

    fn draft() -> StopDraft {
        StopDraft::new(
            NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            "Canada".into(),
            "Kent".into(),
            Gender::Male,
            27,
            "white".into(),
            true,
            "Frisk".into(),
            "0-15 min".into(),
            "KA-01".into(),
        )
    }

    #[test]
    fn insert_then_load_round_trip() {
        let mut pool = mem_pool();
        let cols = schema::live_columns(&pool.conn).unwrap();

        let inserted = insert_stop(&pool.conn, &cols, &draft(), "Warning", "Speeding").unwrap();
        assert!(inserted.contains(&"stop_outcome"));
        assert!(!inserted.contains(&"drugs_related_stop"));

        let stops = load_stops(&mut pool, &cols, &ListFilters::default()).unwrap();
        assert_eq!(stops.len(), 1);
        let s = &stops[0];
        assert_eq!(s.county_name.as_deref(), Some("Kent"));
        assert_eq!(s.driver_gender, Some(Gender::Male));
        assert_eq!(s.search_conducted, Some(true));
        assert_eq!(s.stop_outcome.as_deref(), Some("Warning"));
        assert_eq!(s.date_str(), "2025-08-20");
        assert_eq!(s.time_str(), "14:30");
    }

    #[test]
    fn insert_skips_columns_missing_from_live_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stops (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                stop_date TEXT,
                driver_age INTEGER,
                created_at TEXT
            );",
        )
        .unwrap();

        let cols = schema::live_columns(&conn).unwrap();
        let inserted = insert_stop(&conn, &cols, &draft(), "Warning", "Speeding").unwrap();
        assert_eq!(inserted, vec!["stop_date", "driver_age", "created_at"]);

        let mut pool = DbPool { conn };
        let cols = schema::live_columns(&pool.conn).unwrap();
        let stops = load_stops(&mut pool, &cols, &ListFilters::default()).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].driver_age, Some(27));
        assert_eq!(stops[0].violation, None);
    }

    #[test]
    fn filters_on_missing_columns_are_reported_and_skipped() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stops (id INTEGER PRIMARY KEY, stop_date TEXT, created_at TEXT);",
        )
        .unwrap();
        let mut pool = DbPool { conn };
        let cols = schema::live_columns(&pool.conn).unwrap();

        let filters = ListFilters {
            violation: Some("Speeding".into()),
            ..Default::default()
        };
        assert_eq!(filters.ignored(&cols), vec!["violation"]);
        // skipped filter: query still runs
        assert!(load_stops(&mut pool, &cols, &filters).unwrap().is_empty());
    }

    #[test]
    fn violation_filter_is_case_insensitive() {
        let mut pool = mem_pool();
        let cols = schema::live_columns(&pool.conn).unwrap();
        insert_stop(&pool.conn, &cols, &draft(), "Warning", "Speeding").unwrap();

        let filters = ListFilters {
            violation: Some("speeding".into()),
            ..Default::default()
        };
        assert_eq!(load_stops(&mut pool, &cols, &filters).unwrap().len(), 1);

        let filters = ListFilters {
            violation: Some("dui".into()),
            ..Default::default()
        };
        assert!(load_stops(&mut pool, &cols, &filters).unwrap().is_empty());
    }

    #[test]
    fn distinct_durations_reflect_data() {
        let mut pool = mem_pool();
        let cols = schema::live_columns(&pool.conn).unwrap();
        assert!(distinct_durations(&mut pool, &cols).unwrap().is_empty());

        insert_stop(&pool.conn, &cols, &draft(), "Warning", "Speeding").unwrap();
        let mut d2 = draft();
        d2.stop_duration = "30+ min".into();
        insert_stop(&pool.conn, &cols, &d2, "Arrest", "DUI").unwrap();

        let buckets = distinct_durations(&mut pool, &cols).unwrap();
        assert_eq!(buckets, vec!["0-15 min".to_string(), "30+ min".to_string()]);
    }
}
