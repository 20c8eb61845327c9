use super::{ExportFormat, notify_export_success};
use crate::db::pool::DbPool;
use crate::db::queries::{ListFilters, load_stops};
use crate::db::schema;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        filters: &ListFilters,
        force: bool,
    ) -> AppResult<()> {
        let dest = Path::new(file);
        if dest.exists() && !force {
            warning(format!(
                "The file '{}' already exists. Use --force to overwrite.",
                dest.display()
            ));
            return Ok(());
        }

        let cols = schema::live_columns(&pool.conn)?;
        for ignored in filters.ignored(&cols) {
            warning(format!("Column '{ignored}' not found in database, filter ignored."));
        }

        let stops = load_stops(pool, &cols, filters)?;

        match format {
            ExportFormat::Csv => super::csv::write_csv(file, &stops)?,
            ExportFormat::Json => super::json::write_json(file, &stops)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), dest);

        let _ = crate::db::log::audit(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} stops as {}", stops.len(), format.as_str()),
        );

        Ok(())
    }
}
