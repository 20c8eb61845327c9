use crate::errors::{AppError, AppResult};
use crate::models::stop::StopRecord;

/// Write stop records as pretty-printed JSON.
pub fn write_json(path: &str, stops: &[StopRecord]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(stops).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
