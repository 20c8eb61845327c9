use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{ListFilters, load_stops};
use crate::db::schema;
use crate::errors::AppResult;
use crate::models::stop::StopRecord;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_flag, colorize_optional};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        limit,
        county,
        violation,
        outcome,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let cols = schema::live_columns(&pool.conn)?;

        let filters = ListFilters {
            limit: *limit,
            county: county.clone(),
            violation: violation.clone(),
            outcome: outcome.clone(),
        };

        for ignored in filters.ignored(&cols) {
            warning(format!(
                "Column '{ignored}' not found in database, filter ignored."
            ));
        }

        let stops = load_stops(&mut pool, &cols, &filters)?;

        header("Police Logs Overview");
        if stops.is_empty() {
            println!("No stop records found.");
            return Ok(());
        }

        println!("{}", render_stops(&stops));
        println!("{} record(s)", stops.len());
    }
    Ok(())
}

fn render_stops(stops: &[StopRecord]) -> String {
    let mut table = Table::new(vec![
        "id", "date", "time", "county", "gender", "age", "race", "search", "duration", "vehicle",
        "outcome", "violation",
    ]);

    for s in stops {
        table.add_row(vec![
            s.id.to_string(),
            colorize_optional(&s.date_str()),
            colorize_optional(&s.time_str()),
            colorize_optional(&StopRecord::cell(&s.county_name)),
            colorize_optional(
                &s.driver_gender
                    .map(|g| g.to_db_str().to_string())
                    .unwrap_or_else(|| "--".to_string()),
            ),
            colorize_optional(
                &s.driver_age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "--".to_string()),
            ),
            colorize_optional(&StopRecord::cell(&s.driver_race)),
            search_cell(s.search_conducted),
            colorize_optional(&StopRecord::cell(&s.stop_duration)),
            colorize_optional(&StopRecord::cell(&s.vehicle_number)),
            colorize_optional(&StopRecord::cell(&s.stop_outcome)),
            colorize_optional(&StopRecord::cell(&s.violation)),
        ]);
    }

    table.render()
}

/// Conducted searches stand out in red, "no"/unknown stay muted.
fn search_cell(v: Option<bool>) -> String {
    let text = StopRecord::flag_cell(v);
    match v {
        Some(set) => format!("{}{}{}", color_for_flag(set), text, RESET),
        None => colorize_optional(&text),
    }
}
