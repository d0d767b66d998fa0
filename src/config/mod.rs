use crate::errors::{AppError, AppResult};
use crate::models::reference::{DEFAULT_DEPARTMENTS, DEFAULT_LOCATIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// Label stamped on punches recorded from this station.
    #[serde(default)]
    pub device_label: Option<String>,
    #[serde(default = "default_departments")]
    pub default_departments: Vec<String>,
    #[serde(default = "default_locations")]
    pub default_locations: Vec<String>,
    /// Roster imported during `init` when the file exists.
    #[serde(default)]
    pub employees_csv: Option<String>,
}

fn default_report_title() -> String {
    "QR Time Punch System".to_string()
}
fn default_departments() -> Vec<String> {
    DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect()
}
fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            report_title: default_report_title(),
            device_label: None,
            default_departments: default_departments(),
            default_locations: default_locations(),
            employees_csv: None,
        }
    }

    /// Return the standard configuration directory (`~/.punchclock`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".punchclock")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("punchclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Initialize configuration and database files.
    ///
    /// `custom_db` is a path or a bare file name placed in the config dir.
    /// In test mode the config file is left alone and the returned config
    /// only lives in memory.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("punchclock.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if is_test {
            return Ok(Self::with_database(db_path));
        }

        fs::create_dir_all(&dir)?;

        // keep user edits, only repoint the database
        let mut config = Self::load()?;
        config.database = db_path.to_string_lossy().to_string();
        config.save_to(&Self::config_file())?;

        Ok(config)
    }
}
