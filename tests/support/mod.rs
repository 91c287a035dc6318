use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Copies `tests/fixtures/<name>` into a fresh temporary directory
#[allow(dead_code)]
pub fn copy_fixture(name: &str) -> TempDir {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let temp = TempDir::new().expect("Failed to create temp dir");

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("Failed to walk fixture");
        let relative = entry
            .path()
            .strip_prefix(&source)
            .expect("Entry outside of fixture");
        let target = temp.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).expect("Failed to create directory");
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }
    temp
}

/// Canonical project directory of the widget module inside a copied stack
#[allow(dead_code)]
pub fn widget_dir(stack: &TempDir) -> PathBuf {
    stack
        .path()
        .join("vertx-widget")
        .canonicalize()
        .expect("Failed to canonicalize project dir")
}

#[allow(dead_code)]
pub fn pom_sanitizer_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pom-sanitizer"))
}
