// Settings: TOML loading, defaults, validation and parser construction.
use chrono::NaiveDate;
use std::path::PathBuf;
use todoscan::config::{Settings, parse_excluded_folders};
use todoscan::error::ConfigError;

/// Unique directory under the OS temp dir, removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("todoscan_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create temp dir");
        Self(root)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_defaults() {
    let s = Settings::default();
    assert_eq!(s.date_format, "yyyy-MM-dd");
    assert_eq!(s.date_tag_format, "#%date%");
    assert_eq!(s.global_date_tag_format, "#tbd-%date%");
    assert_eq!(s.global_date_format, "kkkk-WW");
    assert!(s.excluded_folders.is_empty());
    assert_eq!(s.daily_notes_folder, "Daily Notes");
    assert!(s.validate().is_ok());
}

#[test]
fn test_load_partial_file() {
    let dir = TempDir::new();
    let path = dir.write(
        "config.toml",
        "date_tag_format = \"@due(%date%)\"\nexcluded_folders = [\"Archive/\", \"  \"]\n",
    );
    let s = Settings::load(&path).unwrap();
    assert_eq!(s.date_tag_format, "@due(%date%)");
    assert_eq!(s.date_format, "yyyy-MM-dd", "Missing keys use defaults");
    assert_eq!(s.excluded_folders, vec!["Archive/".to_string()]);
}

#[test]
fn test_empty_values_fall_back_to_defaults() {
    let dir = TempDir::new();
    let path = dir.write("config.toml", "date_format = \"\"\nglobal_date_tag_format = \"\"\n");
    let s = Settings::load(&path).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new();
    let path = dir.0.join("nope.toml");
    let err = Settings::load(&path).unwrap_err();
    assert!(Settings::is_missing_config_error(&err));
    assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new();
    let path = dir.write("config.toml", "date_format = [");
    let err = Settings::load(&path).unwrap_err();
    assert!(!Settings::is_missing_config_error(&err));
    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(Settings::load_or_default(&path).is_err());
}

#[test]
fn test_validate_rejects_bad_templates() {
    let s = Settings {
        date_tag_format: "#due".to_string(),
        ..Settings::default()
    };
    assert!(matches!(
        s.validate(),
        Err(ConfigError::MissingDateToken(_))
    ));
}

#[test]
fn test_validate_rejects_lossy_formats() {
    let s = Settings {
        date_format: "yyyy-MM".to_string(),
        ..Settings::default()
    };
    assert_eq!(
        s.validate(),
        Err(ConfigError::DateFormatRoundTrip("yyyy-MM".to_string()))
    );
}

#[test]
fn test_build_parser_uses_settings() {
    let s = Settings {
        date_tag_format: "due:%date%".to_string(),
        date_format: "dd/MM/yyyy".to_string(),
        excluded_folders: vec!["Templates/".to_string()],
        daily_notes_folder: "journal".to_string(),
        ..Settings::default()
    };
    let parser = s.build_parser().unwrap();
    assert_eq!(parser.date_parser().template(), "due:%date%");
    assert_eq!(parser.date_parser().date_format().pattern(), "dd/MM/yyyy");
    assert_eq!(parser.global_date_parser().date_format().to_string(), "kkkk-WW");
    assert_eq!(parser.excluded_folders(), ["Templates/".to_string()]);
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let todos = parser.parse_tasks_on("notes.md", "- [ ] Taxes due:30/04/2021", today);
    assert_eq!(todos[0].description, "Taxes");
    assert_eq!(todos[0].action_date, NaiveDate::from_ymd_opt(2021, 4, 30));

    let todos = parser.parse_tasks_on("journal/2021-03-01.md", "- [ ] Call", today);
    assert_eq!(todos[0].action_date, NaiveDate::from_ymd_opt(2021, 3, 1));

    assert!(parser.parse_tasks_on("Templates/t.md", "- [ ] x", today).is_empty());
}

#[test]
fn test_parse_excluded_folders() {
    assert_eq!(
        parse_excluded_folders("Archive/, Templates/\n\n,Old"),
        vec!["Archive/", "Templates/", "Old"]
    );
    assert!(parse_excluded_folders("").is_empty());
}
