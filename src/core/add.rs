use crate::config::Config;
use crate::core::predict::{Prediction, predict};
use crate::db::pool::DbPool;
use crate::db::queries::{ListFilters, distinct_durations, insert_stop, load_stops};
use crate::db::schema;
use crate::errors::{AppError, AppResult};
use crate::models::stop::StopDraft;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{CYAN, RESET};

/// High-level business logic for the `add` command: validate the draft,
/// predict outcome/violation from history, then persist unless dry-run.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        draft: &StopDraft,
        dry_run: bool,
    ) -> AppResult<Prediction> {
        let cols = schema::live_columns(&pool.conn)?;

        //
        // 1. Validate the duration bucket against observed values
        //    (configured defaults when the table holds none yet)
        //
        let mut buckets = distinct_durations(pool, &cols)?;
        if buckets.is_empty() {
            buckets = cfg.duration_buckets.clone();
        }
        if !buckets.iter().any(|b| b == &draft.stop_duration) {
            return Err(AppError::InvalidDuration(format!(
                "'{}' (known buckets: {})",
                draft.stop_duration,
                buckets.join(", ")
            )));
        }

        //
        // 2. Predict from the full history
        //
        let history = load_stops(pool, &cols, &ListFilters::default())?;
        let prediction = predict(&history, &cols, draft, cfg);

        Self::print_summary(draft, &prediction);

        if dry_run {
            warning("Dry run: record not saved.");
            return Ok(prediction);
        }

        //
        // 3. Insert (only columns the live schema has)
        //
        let inserted = insert_stop(
            &pool.conn,
            &cols,
            draft,
            &prediction.stop_outcome,
            &prediction.violation,
        )?;

        if inserted.is_empty() {
            warning("No valid columns to insert into database.");
            return Ok(prediction);
        }

        success("New log added successfully!");

        //
        // 4. Audit log (non-blocking)
        //
        if let Err(e) = crate::db::log::audit(
            &pool.conn,
            "stop_added",
            &draft.date_str(),
            &format!(
                "Stop at {} {} predicted as {}/{} ({} columns)",
                draft.date_str(),
                draft.time_str(),
                prediction.violation,
                prediction.stop_outcome,
                inserted.len()
            ),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok(prediction)
    }

    /// Prediction summary, mirroring the ledger's submission recap.
    fn print_summary(draft: &StopDraft, prediction: &Prediction) {
        let search_text = if draft.search_conducted {
            "A search was conducted"
        } else {
            "No search was conducted"
        };
        let county = if draft.county_name.is_empty() {
            "an unknown county"
        } else {
            draft.county_name.as_str()
        };

        println!();
        println!("🧠 {CYAN}Prediction Summary{RESET}");
        println!("Predicted Violation:    {}", prediction.violation);
        println!("Predicted Stop Outcome: {}", prediction.stop_outcome);
        println!("Matching past stops:    {}", prediction.matched);
        println!();
        println!(
            "🚓 A {}-year-old {} driver in {} was stopped at {} on {}.",
            draft.driver_age,
            draft.driver_gender.to_db_str(),
            county,
            draft.time_str(),
            draft.date_str()
        );
        println!("{}", search_text);
        println!("Stop duration:  {}", draft.stop_duration);
        if !draft.vehicle_number.is_empty() {
            println!("Vehicle number: {}", draft.vehicle_number);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gender::Gender;
    use chrono::{NaiveDate, NaiveTime};
    use rusqlite::Connection;

    fn mem_pool() -> DbPool {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrate::run_pending_migrations(&conn).unwrap();
        DbPool { conn }
    }

    fn draft(duration: &str) -> StopDraft {
        StopDraft::new(
            NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            "Canada".into(),
            "Kent".into(),
            Gender::Male,
            27,
            "white".into(),
            false,
            String::new(),
            duration.into(),
            "KA-01".into(),
        )
    }

    #[test]
    fn empty_table_predicts_fallbacks_and_inserts() {
        let mut pool = mem_pool();
        let cfg = Config::default();

        let p = AddLogic::apply(&mut pool, &cfg, &draft("0-15 min"), false).unwrap();
        assert_eq!(p.stop_outcome, "warning");
        assert_eq!(p.violation, "speeding");

        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM stops", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);

        // second identical stop now predicts from the first one
        let p = AddLogic::apply(&mut pool, &cfg, &draft("0-15 min"), false).unwrap();
        assert_eq!(p.matched, 1);
    }

    #[test]
    fn dry_run_does_not_insert() {
        let mut pool = mem_pool();
        let cfg = Config::default();

        AddLogic::apply(&mut pool, &cfg, &draft("0-15 min"), true).unwrap();
        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM stops", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn unknown_duration_bucket_is_rejected() {
        let mut pool = mem_pool();
        let cfg = Config::default();

        let err = AddLogic::apply(&mut pool, &cfg, &draft("2 hours"), false).unwrap_err();
        assert!(matches!(err, AppError::InvalidDuration(_)));
    }

    #[test]
    fn audit_log_records_the_add() {
        let mut pool = mem_pool();
        let cfg = Config::default();
        AddLogic::apply(&mut pool, &cfg, &draft("0-15 min"), false).unwrap();

        let ops: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'stop_added'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(ops, 1);
    }
}
