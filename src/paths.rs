// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "party-planner.log";

pub struct AppPaths;

impl AppPaths {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "party-planner").context("Could not determine home directory")
    }

    /// Location of `config.toml`; the parent directory is created on demand.
    pub fn config_file() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        let dir = dirs.config_dir();
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create config dir {}", dir.display()))?;
        Ok(dir.join(CONFIG_FILE))
    }

    pub fn log_file() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        let dir = dirs.data_local_dir();
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create data dir {}", dir.display()))?;
        Ok(dir.join(LOG_FILE))
    }
}
