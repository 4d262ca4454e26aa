// Daily note convention: which paths resolve and to what date.
use chrono::NaiveDate;
use todoscan::date_format::DateFormat;
use todoscan::model::{DailyNoteSource, DailyNotes, NoDailyNotes};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2024, 6, 1)
}

#[test]
fn test_dated_daily_note() {
    let notes = DailyNotes::default();
    assert_eq!(
        notes.resolve("/Daily Notes/2021-02-16.md", today()),
        Some(ymd(2021, 2, 16))
    );
    assert_eq!(
        notes.resolve("vault/Daily Notes/2021-02-16", today()),
        Some(ymd(2021, 2, 16)),
        "Extension is optional"
    );
}

#[test]
fn test_undated_daily_note_is_today() {
    let notes = DailyNotes::default();
    assert_eq!(notes.resolve("/Daily Notes/today.md", today()), Some(today()));
    assert_eq!(
        notes.resolve("Daily Notes/2021-02-30.md", today()),
        Some(today()),
        "An impossible date in the name still marks a daily note"
    );
}

#[test]
fn test_windows_separators() {
    let notes = DailyNotes::default();
    assert_eq!(
        notes.resolve(r"C:\vault\Daily Notes\2021-02-16.md", today()),
        Some(ymd(2021, 2, 16))
    );
}

#[test]
fn test_paths_outside_folder() {
    let notes = DailyNotes::default();
    assert_eq!(notes.resolve("/", today()), None);
    assert_eq!(notes.resolve("2021-02-16.md", today()), None);
    assert_eq!(notes.resolve("/Projects/2021-02-16.md", today()), None);
    assert_eq!(notes.resolve("/Daily Notes/", today()), None);
    assert_eq!(
        notes.resolve("/Daily Notes/2021/2021-02-16.md", today()),
        None,
        "Only files directly inside the folder count"
    );
    assert_eq!(notes.resolve("/daily notes/2021-02-16.md", today()), None);
}

#[test]
fn test_custom_folder_and_format() {
    let notes = DailyNotes::new("journal", DateFormat::new("dd.MM.yyyy").unwrap());
    assert_eq!(notes.folder(), "journal");
    assert_eq!(
        notes.resolve("journal/16.02.2021.txt", today()),
        Some(ymd(2021, 2, 16))
    );
    assert_eq!(notes.resolve("journal/2021-02-16.txt", today()), Some(today()));
}

#[test]
fn test_no_daily_notes() {
    assert_eq!(NoDailyNotes.resolve("/Daily Notes/2021-02-16.md", today()), None);
}
