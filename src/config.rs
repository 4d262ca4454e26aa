// File: ./src/config.rs
// Handles settings loading, defaults, validation and building the parser.
use crate::date_format::DateFormat;
use crate::error::ConfigError;
use crate::model::date_tag::DATE_TOKEN;
use crate::model::{DailyNotes, DateTagParser, TodoParser};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_date_format() -> String {
    "yyyy-MM-dd".to_string()
}
fn default_date_tag_format() -> String {
    format!("#{}", DATE_TOKEN)
}

fn default_global_date_tag_format() -> String {
    format!("#tbd-{}", DATE_TOKEN)
}
fn default_global_date_format() -> String {
    "kkkk-WW".to_string()
}

fn default_daily_notes_folder() -> String {
    crate::model::daily_note::DEFAULT_DAILY_NOTES_FOLDER.to_string()
}
fn default_daily_note_format() -> String {
    "yyyy-MM-dd".to_string()
}

/// Splits a comma or newline separated folder list, dropping blanks.
pub fn parse_excluded_folders(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_date_tag_format")]
    pub date_tag_format: String,

    #[serde(default = "default_global_date_tag_format")]
    pub global_date_tag_format: String,
    #[serde(default = "default_global_date_format")]
    pub global_date_format: String,

    #[serde(default)]
    pub excluded_folders: Vec<String>,

    #[serde(default = "default_daily_notes_folder")]
    pub daily_notes_folder: String,
    #[serde(default = "default_daily_note_format")]
    pub daily_note_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            date_tag_format: default_date_tag_format(),
            global_date_tag_format: default_global_date_tag_format(),
            global_date_format: default_global_date_format(),
            excluded_folders: Vec::new(),
            daily_notes_folder: default_daily_notes_folder(),
            daily_note_format: default_daily_note_format(),
        }
    }
}

fn or_default(value: &str, default: fn() -> String) -> String {
    if value.trim().is_empty() {
        default()
    } else {
        value.to_string()
    }
}

impl Settings {
    /// Load settings from a TOML file.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(settings.normalized())
    }

    /// Like [`Settings::load`], but a missing file gives the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(settings) => Ok(settings),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Empty values fall back to their defaults and blank folders are dropped.
    pub fn normalized(self) -> Self {
        Self {
            date_format: or_default(&self.date_format, default_date_format),
            date_tag_format: or_default(&self.date_tag_format, default_date_tag_format),
            global_date_tag_format: or_default(
                &self.global_date_tag_format,
                default_global_date_tag_format,
            ),
            global_date_format: or_default(&self.global_date_format, default_global_date_format),
            excluded_folders: self
                .excluded_folders
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            daily_notes_folder: or_default(&self.daily_notes_folder, default_daily_notes_folder),
            daily_note_format: or_default(&self.daily_note_format, default_daily_note_format),
        }
    }

    fn checked_format(pattern: &str) -> Result<DateFormat, ConfigError> {
        let format = DateFormat::new(pattern)?;
        if !format.round_trips() {
            return Err(ConfigError::DateFormatRoundTrip(pattern.to_string()));
        }
        Ok(format)
    }

    /// Checks tag templates and date formats without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_parser().map(|_| ())
    }

    pub fn build_parser(&self) -> Result<TodoParser, ConfigError> {
        let date_parser = DateTagParser::with_format(
            &self.date_tag_format,
            Self::checked_format(&self.date_format)?,
        )?;
        let global_date_parser = DateTagParser::with_format(
            &self.global_date_tag_format,
            Self::checked_format(&self.global_date_format)?,
        )?;
        let daily_notes = DailyNotes::new(
            self.daily_notes_folder.clone(),
            Self::checked_format(&self.daily_note_format)?,
        );

        Ok(
            TodoParser::new(date_parser, global_date_parser, self.excluded_folders.clone())
                .with_daily_notes(daily_notes),
        )
    }
}
