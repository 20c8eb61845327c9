use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::ListFilters;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        violation,
        limit,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let filters = ListFilters {
            limit: *limit,
            violation: violation.clone(),
            ..Default::default()
        };

        ExportLogic::export(&mut pool, format, file, &filters, *force)?;
    }

    Ok(())
}
