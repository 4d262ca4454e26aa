// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TodoStatus {
    Todo,
    Done,
}

impl TodoStatus {
    /// Maps the content of a checklist status cell. `None` is the empty `[]` cell.
    pub fn from_cell(cell: Option<char>) -> Self {
        match cell {
            Some('x') => Self::Done,
            _ => Self::Todo,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One checklist line found in a document.
///
/// `start_index` and `length` count characters in the original document text,
/// starting right after the bullet and its space.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub status: TodoStatus,
    pub description: String,
    pub is_someday_maybe: bool,
    pub source_path: String,
    pub start_index: usize,
    pub length: usize,
    pub action_date: Option<NaiveDate>,
}

impl TodoItem {
    pub fn new(
        status: TodoStatus,
        description: String,
        is_someday_maybe: bool,
        source_path: String,
        start_index: usize,
        length: usize,
        action_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            status,
            description,
            is_someday_maybe,
            source_path,
            start_index,
            length,
            // Someday/maybe items are never scheduled.
            action_date: if is_someday_maybe { None } else { action_date },
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.action_date == Some(date)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.action_date.is_some_and(|d| d < today)
    }
}
