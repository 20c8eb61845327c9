//! The fifteen canned aggregate reports offered by the `report` command.
//!
//! Each report is a fixed SQL statement over the `stops` table; results are
//! stringified into a generic table so one runner serves them all.

use crate::errors::{AppError, AppResult};
use crate::models::duration::midpoint_case_sql;
use rusqlite::Connection;
use rusqlite::types::ValueRef;

pub struct Report {
    pub slug: &'static str,
    pub title: &'static str,
    pub sql: String,
}

pub fn all_reports() -> Vec<Report> {
    let mk = |slug, title, sql: &str| Report {
        slug,
        title,
        sql: sql.to_string(),
    };

    vec![
        mk(
            "total-stops",
            "Total Number of Police Stops",
            "SELECT COUNT(*) AS total_stops FROM stops",
        ),
        mk(
            "stops-by-violation",
            "Count of Stops by Violation Type",
            "SELECT violation, COUNT(*) AS count FROM stops GROUP BY violation ORDER BY count DESC",
        ),
        mk(
            "arrests-vs-warnings",
            "Number of Arrests vs. Warnings",
            "SELECT stop_outcome, COUNT(*) AS count FROM stops GROUP BY stop_outcome",
        ),
        mk(
            "average-driver-age",
            "Average Age of Drivers Stopped",
            "SELECT AVG(driver_age) AS average_age FROM stops",
        ),
        mk(
            "top-search-types",
            "Top 5 Most Frequent Search Types",
            "SELECT search_type, COUNT(*) AS count FROM stops WHERE search_type != '' \
             GROUP BY search_type ORDER BY count DESC LIMIT 5",
        ),
        mk(
            "stops-by-gender",
            "Count of Stops by Gender",
            "SELECT driver_gender, COUNT(*) AS count FROM stops GROUP BY driver_gender",
        ),
        mk(
            "arrest-violations",
            "Most Common Violation for Arrests",
            "SELECT violation, COUNT(*) AS count FROM stops WHERE stop_outcome LIKE '%arrest%' \
             GROUP BY violation ORDER BY count DESC",
        ),
        mk(
            "drug-stop-vehicles",
            "Top 10 Vehicles in Drug-Related Stops",
            "SELECT vehicle_number, COUNT(*) AS count FROM stops WHERE drugs_related_stop = 1 \
             GROUP BY vehicle_number ORDER BY count DESC LIMIT 10",
        ),
        mk(
            "searched-vehicles",
            "Most Frequently Searched Vehicles",
            "SELECT vehicle_number, COUNT(*) AS count FROM stops WHERE search_conducted = 1 \
             GROUP BY vehicle_number ORDER BY count DESC LIMIT 10",
        ),
        mk(
            "arrests-by-age",
            "Driver Age with Highest Arrest Count",
            "SELECT driver_age, COUNT(*) AS arrests FROM stops WHERE is_arrested = 1 \
             GROUP BY driver_age ORDER BY arrests DESC LIMIT 1",
        ),
        mk(
            "gender-by-country",
            "Gender Distribution of Drivers by Country",
            "SELECT country_name, driver_gender, COUNT(*) AS count FROM stops \
             GROUP BY country_name, driver_gender",
        ),
        mk(
            "search-rate-race-gender",
            "Race & Gender Combination with Highest Search Count",
            "SELECT driver_race, driver_gender, COUNT(*) AS count FROM stops \
             WHERE search_conducted = 1 GROUP BY driver_race, driver_gender \
             ORDER BY count DESC LIMIT 1",
        ),
        mk(
            "busiest-stop-time",
            "Time of Day with Most Traffic Stops",
            "SELECT stop_time, COUNT(*) AS count FROM stops GROUP BY stop_time \
             ORDER BY count DESC LIMIT 1",
        ),
        Report {
            slug: "duration-by-violation",
            title: "Average Stop Duration by Violation",
            // buckets carry no exact minutes; the midpoint CASE stands in
            sql: format!(
                "SELECT violation, AVG({}) AS avg_duration_minutes FROM stops GROUP BY violation",
                midpoint_case_sql()
            ),
        },
        mk(
            "arrest-rate-country-violation",
            "Arrest Rate by Country and Violation",
            "SELECT country_name, violation, \
             CAST(SUM(is_arrested) AS REAL) / COUNT(*) AS arrest_rate \
             FROM stops GROUP BY country_name, violation",
        ),
    ]
}

pub fn find_report(slug: &str) -> AppResult<Report> {
    all_reports()
        .into_iter()
        .find(|r| r.slug == slug)
        .ok_or_else(|| AppError::UnknownReport(slug.to_string()))
}

/// Stringified result set of one report run.
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        // single-row aggregates over an empty table come back as one NULL
        self.rows.is_empty() || self.rows.iter().all(|r| r.iter().all(|c| c.is_empty()))
    }
}

fn fmt_value(v: ValueRef<'_>) -> String {
    match v {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{:.2}", f),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(_) => "<blob>".to_string(),
    }
}

pub fn run_report(conn: &Connection, report: &Report) -> AppResult<ReportTable> {
    let mut stmt = conn.prepare(&report.sql)?;
    let headers: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let ncols = headers.len();

    let mut rows = Vec::new();
    let mut query = stmt.query([])?;
    while let Some(row) = query.next()? {
        let mut cells = Vec::with_capacity(ncols);
        for i in 0..ncols {
            cells.push(fmt_value(row.get_ref(i)?));
        }
        rows.push(cells);
    }

    Ok(ReportTable { headers, rows })
}
