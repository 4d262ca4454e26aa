// File: src/paths.rs
use anyhow::Result;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "todoscan", "todoscan")
    }

    /// `TODOSCAN_CONFIG_DIR` wins over the OS default location.
    pub fn get_config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var("TODOSCAN_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let proj = Self::get_proj_dirs()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(proj.config_dir().to_path_buf())
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }
}
