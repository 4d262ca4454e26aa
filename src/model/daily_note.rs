// File: ./src/model/daily_note.rs
//! Fallback dates for documents kept under the "daily notes" convention.
use crate::date_format::DateFormat;
use chrono::NaiveDate;

pub const DEFAULT_DAILY_NOTES_FOLDER: &str = "Daily Notes";

/// Derives a date from a document path alone.
///
/// `today` is passed in by the caller so that every task of one document sees
/// the same date.
pub trait DailyNoteSource: Send + Sync + std::fmt::Debug {
    fn resolve(&self, path: &str, today: NaiveDate) -> Option<NaiveDate>;
}

/// Files directly inside a folder with a given name are daily notes.
///
/// A note named after a date (`Daily Notes/2021-02-16.md`) resolves to that
/// date. Any other file in the folder is taken to be today's note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNotes {
    folder: String,
    format: DateFormat,
}

impl DailyNotes {
    pub fn new(folder: impl Into<String>, format: DateFormat) -> Self {
        Self {
            folder: folder.into(),
            format,
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }
}

impl Default for DailyNotes {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_NOTES_FOLDER, DateFormat::iso())
    }
}

impl DailyNoteSource for DailyNotes {
    fn resolve(&self, path: &str, today: NaiveDate) -> Option<NaiveDate> {
        let mut components = path.rsplit(['/', '\\']);
        let file_name = components.next().filter(|name| !name.is_empty())?;
        let parent = components.next()?;
        if parent != self.folder {
            return None;
        }

        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        Some(self.format.parse(stem).unwrap_or(today))
    }
}

/// Disables the daily note fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDailyNotes;

impl DailyNoteSource for NoDailyNotes {
    fn resolve(&self, _path: &str, _today: NaiveDate) -> Option<NaiveDate> {
        None
    }
}
