//! Outcome/violation prediction by majority vote over matching history.
//!
//! Not a model: the predicted outcome and violation are simply the most
//! frequent values among historical stops that match the draft on gender,
//! age, search flag and duration bucket. Filters on columns the live table
//! lacks are skipped, and an empty match set yields the configured
//! fallbacks.

use crate::config::Config;
use crate::db::schema;
use crate::models::stop::{StopDraft, StopRecord};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub stop_outcome: String,
    pub violation: String,
    /// How many historical stops matched the draft filters.
    pub matched: usize,
}

/// Most frequent non-empty value; ties break toward the smallest value so
/// repeated runs over the same data are deterministic.
pub fn mode_of<'a, I>(values: I) -> Option<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        if !v.trim().is_empty() {
            *counts.entry(v).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(v, _)| v.to_string())
}

/// Rows matching the draft on every filter the live schema supports.
pub fn filter_matching<'a>(
    rows: &'a [StopRecord],
    cols: &[String],
    draft: &StopDraft,
) -> Vec<&'a StopRecord> {
    rows.iter()
        .filter(|r| {
            if schema::has_column(cols, "driver_gender")
                && r.driver_gender != Some(draft.driver_gender)
            {
                return false;
            }
            if schema::has_column(cols, "driver_age") && r.driver_age != Some(draft.driver_age) {
                return false;
            }
            if schema::has_column(cols, "search_conducted")
                && r.search_conducted != Some(draft.search_conducted)
            {
                return false;
            }
            if schema::has_column(cols, "stop_duration")
                && r.stop_duration.as_deref() != Some(draft.stop_duration.as_str())
            {
                return false;
            }
            true
        })
        .collect()
}

pub fn predict(rows: &[StopRecord], cols: &[String], draft: &StopDraft, cfg: &Config) -> Prediction {
    let matching = filter_matching(rows, cols, draft);

    let stop_outcome = mode_of(
        matching
            .iter()
            .filter_map(|r| r.stop_outcome.as_deref()),
    )
    .unwrap_or_else(|| cfg.fallback_outcome.clone());

    let violation = mode_of(matching.iter().filter_map(|r| r.violation.as_deref()))
        .unwrap_or_else(|| cfg.fallback_violation.clone());

    Prediction {
        stop_outcome,
        violation,
        matched: matching.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gender::Gender;
    use chrono::{NaiveDate, NaiveTime};

    fn record(outcome: &str, violation: &str) -> StopRecord {
        StopRecord {
            id: 0,
            stop_date: NaiveDate::from_ymd_opt(2025, 8, 1),
            stop_time: NaiveTime::from_hms_opt(9, 0, 0),
            country_name: None,
            county_name: None,
            driver_gender: Some(Gender::Male),
            driver_age: Some(27),
            driver_race: None,
            search_conducted: Some(false),
            search_type: None,
            drugs_related_stop: None,
            is_arrested: None,
            stop_duration: Some("0-15 min".to_string()),
            vehicle_number: None,
            stop_outcome: Some(outcome.to_string()),
            violation: Some(violation.to_string()),
            created_at: None,
        }
    }

    fn draft() -> StopDraft {
        StopDraft::new(
            NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            String::new(),
            String::new(),
            Gender::Male,
            27,
            String::new(),
            false,
            String::new(),
            "0-15 min".to_string(),
            String::new(),
        )
    }

    fn full_cols() -> Vec<String> {
        crate::db::schema::STOP_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn mode_picks_most_frequent_value() {
        let values = ["Citation", "Warning", "Warning"];
        assert_eq!(mode_of(values.into_iter()).as_deref(), Some("Warning"));
    }

    #[test]
    fn mode_tie_breaks_to_smallest_value() {
        let values = ["Warning", "Arrest"];
        assert_eq!(mode_of(values.into_iter()).as_deref(), Some("Arrest"));
    }

    #[test]
    fn mode_ignores_empty_values() {
        let values = ["", "  ", "Citation"];
        assert_eq!(mode_of(values.into_iter()).as_deref(), Some("Citation"));
        assert_eq!(mode_of(["", ""].into_iter()), None);
    }

    #[test]
    fn fallback_fires_exactly_when_no_rows_match() {
        let cfg = Config::default();
        let rows = vec![record("Arrest", "DUI")];
        let mut d = draft();
        d.driver_age = 55; // no historical 55-year-old

        let p = predict(&rows, &full_cols(), &d, &cfg);
        assert_eq!(p.matched, 0);
        assert_eq!(p.stop_outcome, "warning");
        assert_eq!(p.violation, "speeding");

        // matching row present: no fallback
        let p = predict(&rows, &full_cols(), &draft(), &cfg);
        assert_eq!(p.matched, 1);
        assert_eq!(p.stop_outcome, "Arrest");
        assert_eq!(p.violation, "DUI");
    }

    #[test]
    fn majority_wins_over_filtered_subset() {
        let cfg = Config::default();
        let rows = vec![
            record("Warning", "Speeding"),
            record("Warning", "Speeding"),
            record("Citation", "Seatbelt"),
        ];
        let p = predict(&rows, &full_cols(), &draft(), &cfg);
        assert_eq!(p.matched, 3);
        assert_eq!(p.stop_outcome, "Warning");
        assert_eq!(p.violation, "Speeding");
    }

    #[test]
    fn filters_on_missing_columns_are_skipped() {
        let cfg = Config::default();
        let mut row = record("Citation", "Seatbelt");
        row.driver_gender = None;
        row.driver_age = None;
        let rows = vec![row];

        // live schema without gender/age: rows match on the remaining filters
        let cols: Vec<String> = ["stop_duration", "search_conducted"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let p = predict(&rows, &cols, &draft(), &cfg);
        assert_eq!(p.matched, 1);
        assert_eq!(p.stop_outcome, "Citation");
    }
}
