use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::charts::{render_bar_chart, value_counts};
use crate::db::pool::DbPool;
use crate::db::queries::{ListFilters, load_stops};
use crate::db::schema;
use crate::errors::AppResult;
use crate::models::stop::StopRecord;
use crate::ui::messages::{header, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Charts { violations, gender } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let cols = schema::live_columns(&pool.conn)?;
        let stops = load_stops(&mut pool, &cols, &ListFilters::default())?;

        // no flag selects both charts
        let both = !*violations && !*gender;

        header("Visual Insights");
        println!();

        if *violations || both {
            if schema::has_column(&cols, "violation") {
                let counts = value_counts(stops.iter().filter_map(|s| s.violation.as_deref()));
                print_chart("Stops by Violation Type", &counts, &stops);
            } else {
                warning("Violation column not found in database.");
            }
        }

        if *gender || both {
            if schema::has_column(&cols, "driver_gender") {
                let counts = value_counts(
                    stops
                        .iter()
                        .filter_map(|s| s.driver_gender.map(|g| g.to_db_str())),
                );
                print_chart("Driver Gender Distribution", &counts, &stops);
            } else {
                warning("Driver gender column not found in database.");
            }
        }
    }
    Ok(())
}

fn print_chart(title: &str, counts: &[(String, usize)], stops: &[StopRecord]) {
    if stops.is_empty() || counts.is_empty() {
        warning(format!("No data to display for: {title}"));
        return;
    }
    println!("{}", render_bar_chart(title, counts));
}
