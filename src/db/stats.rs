use crate::db::pool::DbPool;
use crate::db::schema;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use rusqlite::OptionalExtension;
use std::fs;

/// The four dashboard metrics. Any metric whose source column is absent
/// from the live schema is 0, never an error.
#[derive(Debug, PartialEq, Eq)]
pub struct Metrics {
    pub total_stops: i64,
    pub total_arrests: i64,
    pub searches_conducted: i64,
    pub warnings: i64,
}

pub fn collect_metrics(pool: &mut DbPool) -> AppResult<Metrics> {
    let cols = schema::live_columns(&pool.conn)?;
    if cols.is_empty() {
        return Ok(Metrics {
            total_stops: 0,
            total_arrests: 0,
            searches_conducted: 0,
            warnings: 0,
        });
    }

    let total_stops: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM stops", [], |row| row.get(0))?;

    let total_arrests = if schema::has_column(&cols, "is_arrested") {
        pool.conn.query_row(
            "SELECT COALESCE(SUM(is_arrested), 0) FROM stops",
            [],
            |row| row.get(0),
        )?
    } else {
        0
    };

    let searches_conducted = if schema::has_column(&cols, "search_conducted") {
        pool.conn.query_row(
            "SELECT COALESCE(SUM(search_conducted), 0) FROM stops",
            [],
            |row| row.get(0),
        )?
    } else {
        0
    };

    let warnings = if schema::has_column(&cols, "stop_outcome") {
        pool.conn.query_row(
            "SELECT COUNT(*) FROM stops WHERE stop_outcome LIKE '%warning%'",
            [],
            |row| row.get(0),
        )?
    } else {
        0
    };

    Ok(Metrics {
        total_stops,
        total_arrests,
        searches_conducted,
        warnings,
    })
}

pub fn print_metrics(pool: &mut DbPool) -> AppResult<()> {
    let m = collect_metrics(pool)?;

    println!();
    println!(
        "{}• Total Police Stops:{} {}{}{}",
        CYAN, RESET, GREEN, m.total_stops, RESET
    );
    println!(
        "{}• Total Arrests:{}     {}{}{}",
        CYAN, RESET, GREEN, m.total_arrests, RESET
    );
    println!(
        "{}• Search Conducted:{}  {}{}{}",
        CYAN, RESET, GREEN, m.searches_conducted, RESET
    );
    println!(
        "{}• Warnings:{}          {}{}{}",
        CYAN, RESET, GREEN, m.warnings, RESET
    );
    println!();

    Ok(())
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL STOPS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM stops", [], |row| row.get(0))?;
    println!("{}• Total stops:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT stop_date FROM stops ORDER BY stop_date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT stop_date FROM stops ORDER BY stop_date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE STOPS/DAY
    //
    if let (Some(f), Some(l)) = (first_date.as_deref(), last_date.as_deref())
        && let (Some(d1), Some(d2)) = (parse_date(f), parse_date(l))
    {
        let days = (d2 - d1).num_days().max(1);
        let avg = count as f64 / days as f64;
        println!("{}• Average stops/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
