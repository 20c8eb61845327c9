use crate::models::duration::DEFAULT_BUCKETS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_fallback_outcome")]
    pub fallback_outcome: String,
    #[serde(default = "default_fallback_violation")]
    pub fallback_violation: String,
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<String>,
}

fn default_fallback_outcome() -> String {
    "warning".to_string()
}
fn default_fallback_violation() -> String {
    "speeding".to_string()
}
fn default_duration_buckets() -> Vec<String> {
    DEFAULT_BUCKETS.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            fallback_outcome: default_fallback_outcome(),
            fallback_violation: default_fallback_violation(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("securecheck")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".securecheck")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("securecheck.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("securecheck.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A malformed file falls back to defaults rather than aborting; the
    /// `config --check` command reports what is wrong with it.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                    crate::ui::messages::warning(format!(
                        "Malformed config file ({}), using defaults",
                        e
                    ));
                    Config::default()
                }),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files.
    /// Returns the resolved database path (relative names land in the config
    /// dir) so the caller opens the same file the config points at.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (skipped in test mode to keep the user's intact)
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }

    /// Report config-file fields that are missing and would fall back to
    /// serde defaults. Returns the missing field names.
    pub fn missing_fields() -> io::Result<Vec<&'static str>> {
        let path = Self::config_file();
        let content = fs::read_to_string(&path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| io::Error::other(format!("parse config: {e}")))?;

        let mut missing = Vec::new();
        for field in [
            "database",
            "fallback_outcome",
            "fallback_violation",
            "duration_buckets",
        ] {
            if value.get(field).is_none() {
                missing.push(field);
            }
        }
        Ok(missing)
    }
}
