use anyhow::{Context, Result};
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "BUDGETRACK_DATA_DIR";
const LOG_LEVEL_ENV: &str = "BUDGETRACK_LOG";
const STORE_FILE: &str = "budgetrack.db";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_level: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| crate::logging::default_log_level().to_string());

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Self {
            data_dir,
            log_level,
        })
    }

    pub(crate) fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub(crate) fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetrack", "Budgetrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
