use chrono::{NaiveDate, NaiveTime};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a clock time, accepting "HH:MM" and "HH:MM:SS".
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

pub fn fmt_time(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}
