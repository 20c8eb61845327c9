use crate::models::stop::StopRecord;
use csv::Writer;

/// Write stop records as CSV, one column per known field.
pub fn write_csv(path: &str, stops: &[StopRecord]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "id",
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
    ])?;

    for s in stops {
        wtr.write_record(&[
            s.id.to_string(),
            s.date_str(),
            s.time_str(),
            opt_str(&s.country_name),
            opt_str(&s.county_name),
            s.driver_gender
                .map(|g| g.to_db_str().to_string())
                .unwrap_or_default(),
            s.driver_age.map(|a| a.to_string()).unwrap_or_default(),
            opt_str(&s.driver_race),
            flag(s.search_conducted),
            opt_str(&s.search_type),
            flag(s.drugs_related_stop),
            flag(s.is_arrested),
            opt_str(&s.stop_duration),
            opt_str(&s.vehicle_number),
            opt_str(&s.stop_outcome),
            opt_str(&s.violation),
            opt_str(&s.created_at),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn opt_str(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn flag(v: Option<bool>) -> String {
    match v {
        Some(true) => "1".to_string(),
        Some(false) => "0".to_string(),
        None => String::new(),
    }
}
