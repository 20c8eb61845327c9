use crate::cli::parser::Commands;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::gender::Gender;
use crate::models::stop::StopDraft;
use crate::utils::date;

/// Add a new stop record (and predict its outcome first).
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        time,
        country,
        county,
        gender,
        age,
        race,
        search,
        search_type,
        duration,
        vehicle,
        dry_run,
    } = cmd
    {
        //
        // 1. Parse date and time (mandatory)
        //
        let d = date::parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let t = date::parse_time(time).ok_or_else(|| AppError::InvalidTime(time.to_string()))?;

        //
        // 2. Parse gender
        //
        let g = Gender::from_code(gender).ok_or_else(|| {
            AppError::InvalidGender(format!("'{}'. Use 'male'/'m' or 'female'/'f'", gender))
        })?;

        //
        // 3. Range-check age, shape-check vehicle
        //
        if !StopDraft::age_in_range(*age) {
            return Err(AppError::InvalidAge(format!(
                "{} (must be {}-{})",
                age,
                StopDraft::MIN_AGE,
                StopDraft::MAX_AGE
            )));
        }
        if !StopDraft::vehicle_is_valid(vehicle) {
            return Err(AppError::InvalidVehicle(vehicle.to_string()));
        }

        let draft = StopDraft::new(
            d,
            t,
            country.clone(),
            county.clone(),
            g,
            *age,
            race.clone(),
            *search,
            search_type.clone(),
            duration.clone(),
            vehicle.clone(),
        );

        //
        // 4. Open DB and execute logic
        //
        let mut pool = DbPool::new(&cfg.database)?;
        AddLogic::apply(&mut pool, cfg, &draft, *dry_run)?;
    }

    Ok(())
}
