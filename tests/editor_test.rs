//! Tests for CommandEditor (the `standup edit` backend)
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

use standup::infrastructure::traits::{CommandEditor, Editor};
use standup::parse_roster;

/// Write an executable script that appends a name to the file it is given.
fn appending_editor(dir: &TempDir) -> PathBuf {
    let script = dir.path().join("fake-editor.sh");
    fs::write(&script, "#!/bin/sh\nprintf 'Zoe\\n' >> \"$1\"\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[test]
fn given_script_editor_when_opening_then_file_is_edited() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("names.txt");
    fs::write(&file, "Ann\n").unwrap();
    let editor = CommandEditor::new(appending_editor(&temp).to_string_lossy());

    // Act
    editor.open(&file).unwrap();

    // Assert
    let text = fs::read_to_string(&file).unwrap();
    assert_eq!(&*parse_roster(&text), ["Ann", "Zoe"]);
}

#[test]
fn given_failing_editor_when_opening_then_returns_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("names.txt");
    fs::write(&file, "").unwrap();

    let result = CommandEditor::new("false").open(&file);

    assert!(result.is_err());
}

#[test]
fn given_missing_editor_binary_when_opening_then_returns_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("names.txt");

    let result = CommandEditor::new("/nonexistent/standup-editor").open(&file);

    assert!(result.is_err());
}
