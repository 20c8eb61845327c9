use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::reports::{all_reports, find_report, run_report};
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, warning};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { slug, list } = cmd {
        if *list {
            print_report_list();
            return Ok(());
        }

        let slug = slug
            .as_deref()
            .ok_or_else(|| AppError::UnknownReport("(none given, see --list)".to_string()))?;

        let report = find_report(slug)?;
        let pool = DbPool::new(&cfg.database)?;

        let table = run_report(&pool.conn, &report)?;

        header(report.title);
        if table.is_empty() {
            warning("No results found for the selected query.");
            return Ok(());
        }

        let mut out = Table::new(table.headers.clone());
        for row in &table.rows {
            out.add_row(row.clone());
        }
        println!("{}", out.render());

        let _ = db::log::audit(
            &pool.conn,
            "report",
            report.slug,
            &format!("Report run: {} ({} rows)", report.title, table.rows.len()),
        );
    }
    Ok(())
}

fn print_report_list() {
    header("Advanced Insights");
    println!();
    for r in all_reports() {
        println!("{}{:<30}{} {}", CYAN, r.slug, RESET, r.title);
    }
    println!();
}
