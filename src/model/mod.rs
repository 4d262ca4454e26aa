// File: ./src/model/mod.rs
pub mod daily_note;
pub mod date_tag;
pub mod item;
pub mod parser;

pub use daily_note::{DailyNoteSource, DailyNotes, NoDailyNotes};
pub use date_tag::{DATE_TOKEN, DateTagParser};
pub use item::{TodoItem, TodoStatus};
pub use parser::{ChecklistLine, SOMEDAY_MARKER, TodoParser, scan_checklist_lines};
