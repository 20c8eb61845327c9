use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // init_all resolves a relative --db name onto the config dir and writes
    // that path into the config file; open the very same path here.
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let path = Config::config_file();

    println!("⚙️  Initializing SecureCheck…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", db_path.display());

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", db_path.display());

    // internal log (non-blocking)
    if let Err(e) = log::audit(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 SecureCheck initialization completed!");
    Ok(())
}
