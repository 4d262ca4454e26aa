// File: src/model/parser.rs
use crate::model::daily_note::{DailyNoteSource, DailyNotes};
use crate::model::date_tag::DateTagParser;
use crate::model::{TodoItem, TodoStatus};
use chrono::{Local, NaiveDate};

/// Length of the `- ` / `* ` bullet that precedes the status cell.
const TODO_ITEM_OFFSET: usize = 2;

pub const SOMEDAY_MARKER: &str = "#someday";

/// A line shaped like `- [ ] description`, as found by [`scan_checklist_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistLine<'a> {
    pub status: TodoStatus,
    pub description: &'a str,
    /// Character offset of the bullet in the document.
    pub offset: usize,
    /// Characters from the bullet to the end of the line.
    pub length: usize,
}

/// Splits a single line into status cell and description.
///
/// Accepted: optional indentation, `-` or `*`, one space, `[`, an empty cell or
/// one whitespace character or `x`, `]`, one space or tab, then anything.
/// Returns the indentation width, the cell and the description.
fn parse_checklist_line(line: &str) -> Option<(usize, Option<char>, &str)> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = line.len() - body.len();

    let rest = body
        .strip_prefix(['-', '*'])?
        .strip_prefix(' ')?
        .strip_prefix('[')?;

    let (cell, rest) = match rest.strip_prefix(']') {
        Some(after) => (None, after),
        None => {
            let c = rest.chars().next()?;
            if c != 'x' && !c.is_whitespace() {
                return None;
            }
            (Some(c), rest[c.len_utf8()..].strip_prefix(']')?)
        }
    };

    let description = rest.strip_prefix([' ', '\t'])?;
    Some((indent, cell, description))
}

/// Finds every checklist line in `text`, in document order.
pub fn scan_checklist_lines(text: &str) -> Vec<ChecklistLine<'_>> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if let Some((indent, cell, description)) = parse_checklist_line(line) {
            // Indentation is ASCII, so its byte width is its character width.
            lines.push(ChecklistLine {
                status: TodoStatus::from_cell(cell),
                description,
                offset: line_start + indent,
                length: line.chars().count() - indent,
            });
        }
        line_start += raw_line.chars().count() + 1;
    }

    lines
}

/// Extracts to-dos from note text.
///
/// The parser holds only configuration and is shared freely between threads;
/// every call works on its own document.
#[derive(Debug)]
pub struct TodoParser {
    date_parser: DateTagParser,
    global_date_parser: DateTagParser,
    excluded_folders: Vec<String>,
    daily_notes: Box<dyn DailyNoteSource>,
}

impl TodoParser {
    pub fn new(
        date_parser: DateTagParser,
        global_date_parser: DateTagParser,
        excluded_folders: Vec<String>,
    ) -> Self {
        Self {
            date_parser,
            global_date_parser,
            excluded_folders,
            daily_notes: Box::new(DailyNotes::default()),
        }
    }

    pub fn with_daily_notes(mut self, daily_notes: impl DailyNoteSource + 'static) -> Self {
        self.daily_notes = Box::new(daily_notes);
        self
    }

    pub fn date_parser(&self) -> &DateTagParser {
        &self.date_parser
    }

    pub fn global_date_parser(&self) -> &DateTagParser {
        &self.global_date_parser
    }

    pub fn excluded_folders(&self) -> &[String] {
        &self.excluded_folders
    }

    /// Plain case-sensitive prefix test. Empty entries exclude nothing.
    pub fn is_excluded(&self, file_path: &str) -> bool {
        self.excluded_folders
            .iter()
            .any(|folder| !folder.is_empty() && file_path.starts_with(folder.as_str()))
    }

    pub fn parse_tasks(&self, file_path: &str, file_contents: &str) -> Vec<TodoItem> {
        self.parse_tasks_on(file_path, file_contents, Local::now().date_naive())
    }

    /// Same as [`parse_tasks`](Self::parse_tasks) with an explicit "today" for
    /// notes that resolve through the daily note convention.
    pub fn parse_tasks_on(
        &self,
        file_path: &str,
        file_contents: &str,
        today: NaiveDate,
    ) -> Vec<TodoItem> {
        if self.is_excluded(file_path) {
            log::debug!("Skipping excluded file {}", file_path);
            return Vec::new();
        }

        let global_date = self.global_date_parser.parse_date(file_contents);
        let daily_note_date = self.daily_notes.resolve(file_path, today);

        let todos: Vec<TodoItem> = scan_checklist_lines(file_contents)
            .into_iter()
            .map(|line| self.parse_task(file_path, &line, daily_note_date, global_date))
            .collect();

        log::debug!("Found {} todos in {}", todos.len(), file_path);
        todos
    }

    fn parse_task(
        &self,
        file_path: &str,
        line: &ChecklistLine<'_>,
        daily_note_date: Option<NaiveDate>,
        global_date: Option<NaiveDate>,
    ) -> TodoItem {
        let description = line.description;
        let is_someday_maybe = description.contains(SOMEDAY_MARKER);

        let action_date = if is_someday_maybe {
            None
        } else {
            self.date_parser
                .parse_date(description)
                .or(daily_note_date)
                .or(global_date)
        };

        let item = TodoItem::new(
            line.status,
            self.date_parser.remove_date(description),
            is_someday_maybe,
            file_path.to_string(),
            line.offset + TODO_ITEM_OFFSET,
            line.length - TODO_ITEM_OFFSET,
            action_date,
        );
        log::trace!(
            "{}:{} {:?} {:?} {:?}",
            file_path,
            item.start_index,
            item.status,
            item.action_date,
            item.description
        );
        item
    }
}
