//! Stop-duration buckets.
//!
//! Durations are stored as bucketed strings, not minutes. The default
//! buckets match the historical data; a live table may contain others, so
//! validation is always done against the observed set plus these defaults.

/// Buckets offered when the table is empty.
pub const DEFAULT_BUCKETS: [&str; 3] = ["0-15 min", "16-30 min", "30+ min"];

/// Midpoint minutes for a bucket, used by the duration-by-violation report.
/// Unknown buckets have no midpoint and are excluded from the average.
pub fn bucket_midpoint(bucket: &str) -> Option<i64> {
    match bucket {
        "0-15 min" => Some(8),
        "16-30 min" => Some(23),
        "30+ min" => Some(45),
        _ => None,
    }
}

/// SQL CASE expression mapping buckets to midpoint minutes.
pub fn midpoint_case_sql() -> String {
    let mut arms = String::new();
    for b in DEFAULT_BUCKETS {
        // midpoints exist for every default bucket
        let mid = bucket_midpoint(b).unwrap_or(0);
        arms.push_str(&format!("WHEN '{}' THEN {} ", b, mid));
    }
    format!("CASE stop_duration {}ELSE NULL END", arms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_cover_all_default_buckets() {
        for b in DEFAULT_BUCKETS {
            assert!(bucket_midpoint(b).is_some(), "no midpoint for {b}");
        }
        assert_eq!(bucket_midpoint("45-60 min"), None);
    }

    #[test]
    fn case_sql_mentions_every_bucket() {
        let sql = midpoint_case_sql();
        for b in DEFAULT_BUCKETS {
            assert!(sql.contains(b));
        }
        assert!(sql.ends_with("ELSE NULL END"));
    }
}
