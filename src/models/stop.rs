use super::gender::Gender;
use chrono::{Local, NaiveDate, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One row of the `stops` table.
///
/// Every schema-dependent field is an `Option`: the live table may predate
/// this tool and miss columns, and NULLs are legal in most of them. Loaders
/// substitute `NULL` for absent columns so a record can always be built.
#[derive(Debug, Clone, Serialize)]
pub struct StopRecord {
    pub id: i64,
    pub stop_date: Option<NaiveDate>,   // ⇔ stops.stop_date (TEXT "YYYY-MM-DD")
    pub stop_time: Option<NaiveTime>,   // ⇔ stops.stop_time (TEXT "HH:MM")
    pub country_name: Option<String>,
    pub county_name: Option<String>,
    pub driver_gender: Option<Gender>,
    pub driver_age: Option<i64>,
    pub driver_race: Option<String>,
    pub search_conducted: Option<bool>, // ⇔ INTEGER 0/1
    pub search_type: Option<String>,
    pub drugs_related_stop: Option<bool>,
    pub is_arrested: Option<bool>,
    pub stop_duration: Option<String>,  // bucketed string, see models::duration
    pub vehicle_number: Option<String>,
    pub stop_outcome: Option<String>,
    pub violation: Option<String>,
    pub created_at: Option<String>,     // ISO-8601
}

impl StopRecord {
    pub fn date_str(&self) -> String {
        self.stop_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn time_str(&self) -> String {
        self.stop_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    /// Text cell for an optional string field ("--" when missing/empty).
    pub fn cell(v: &Option<String>) -> String {
        match v {
            Some(s) if !s.trim().is_empty() => s.clone(),
            _ => "--".to_string(),
        }
    }

    pub fn flag_cell(v: Option<bool>) -> String {
        match v {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => "--".to_string(),
        }
    }
}

fn vehicle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9][A-Z0-9 -]{1,14}$").unwrap())
}

/// Validated input for a new stop record.
///
/// Outcome and violation are NOT part of the draft: they are filled in by
/// the mode prediction right before the insert.
#[derive(Debug, Clone)]
pub struct StopDraft {
    pub stop_date: NaiveDate,
    pub stop_time: NaiveTime,
    pub country_name: String,
    pub county_name: String,
    pub driver_gender: Gender,
    pub driver_age: i64,
    pub driver_race: String,
    pub search_conducted: bool,
    pub search_type: String,
    pub stop_duration: String,
    pub vehicle_number: String,
    pub created_at: String,
}

impl StopDraft {
    pub const MIN_AGE: i64 = 16;
    pub const MAX_AGE: i64 = 100;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stop_date: NaiveDate,
        stop_time: NaiveTime,
        country_name: String,
        county_name: String,
        driver_gender: Gender,
        driver_age: i64,
        driver_race: String,
        search_conducted: bool,
        search_type: String,
        stop_duration: String,
        vehicle_number: String,
    ) -> Self {
        Self {
            stop_date,
            stop_time,
            country_name,
            county_name,
            driver_gender,
            driver_age,
            driver_race,
            search_conducted,
            search_type,
            stop_duration,
            vehicle_number,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn age_in_range(age: i64) -> bool {
        (Self::MIN_AGE..=Self::MAX_AGE).contains(&age)
    }

    /// Plates are free-form in the data but a minimal shape check catches
    /// obvious typos. Empty means "not recorded" and is always accepted.
    pub fn vehicle_is_valid(vehicle: &str) -> bool {
        vehicle.is_empty() || vehicle_re().is_match(&vehicle.to_uppercase())
    }

    pub fn date_str(&self) -> String {
        self.stop_date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.stop_time.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_validation() {
        assert!(StopDraft::vehicle_is_valid(""));
        assert!(StopDraft::vehicle_is_valid("KA-01-HH-1234"));
        assert!(StopDraft::vehicle_is_valid("abc 123"));
        assert!(!StopDraft::vehicle_is_valid("!"));
        assert!(!StopDraft::vehicle_is_valid("X"));
    }

    #[test]
    fn age_bounds_match_the_entry_form() {
        assert!(StopDraft::age_in_range(16));
        assert!(StopDraft::age_in_range(100));
        assert!(!StopDraft::age_in_range(15));
        assert!(!StopDraft::age_in_range(101));
    }

    #[test]
    fn cells_render_placeholders_for_missing_values() {
        assert_eq!(StopRecord::cell(&None), "--");
        assert_eq!(StopRecord::cell(&Some("  ".into())), "--");
        assert_eq!(StopRecord::flag_cell(Some(true)), "yes");
        assert_eq!(StopRecord::flag_cell(None), "--");
    }
}
