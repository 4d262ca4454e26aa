// End-to-end runs of the todoscan binary.
use std::path::PathBuf;
use std::process::Command;

fn temp_note(contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("todoscan_bin_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("note.md");
    std::fs::write(&path, contents).expect("failed to write note");
    path
}

fn todoscan() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_todoscan"));
    // Keep the user's real config out of the run.
    cmd.env("TODOSCAN_CONFIG_DIR", std::env::temp_dir().join("todoscan_no_config"));
    cmd
}

#[test]
fn test_readable_files_exit_zero() {
    let note = temp_note("- [ ] Buy milk #2021-02-16\n");
    let out = todoscan().arg(&note).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[ ] Buy milk (2021-02-16)"), "Got: {}", stdout);
    let _ = std::fs::remove_dir_all(note.parent().unwrap());
}

#[test]
fn test_unreadable_file_exits_non_zero() {
    let note = temp_note("- [x] Done thing\n");
    let missing = note.with_file_name("missing.md");
    let out = todoscan().arg(&note).arg(&missing).output().unwrap();
    assert_eq!(out.status.code(), Some(1), "A missing file marks the run as incomplete");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("[x] Done thing"),
        "Readable files are still listed. Got: {}",
        stdout
    );
    let _ = std::fs::remove_dir_all(note.parent().unwrap());
}
