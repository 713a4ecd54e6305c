//! Tests for the RealFileSystem implementation

use tempfile::TempDir;

use standup::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_nested_path_when_ensure_parent_then_creates_directories() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("a/b/c/storage.json");
    let fs = RealFileSystem;

    // Act
    fs.ensure_parent(&target).unwrap();

    // Assert
    assert!(temp.path().join("a/b/c").is_dir());
    assert!(!target.exists());
}

#[test]
fn given_bare_file_name_when_ensure_parent_then_noop() {
    let fs = RealFileSystem;
    fs.ensure_parent(std::path::Path::new("storage.json")).unwrap();
}

#[test]
fn given_written_file_when_renamed_then_content_moves() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("storage.json.tmp");
    let dst = temp.path().join("storage.json");
    let fs = RealFileSystem;

    fs.write(&src, "{}").unwrap();
    fs.rename(&src, &dst).unwrap();

    assert!(!fs.exists(&src));
    assert_eq!(fs.read_to_string(&dst).unwrap(), "{}");
}
