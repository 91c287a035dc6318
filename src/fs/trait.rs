//! The `FileSystem` seam between the sanitizer and the disk

use anyhow::Result;
use std::path::{Path, PathBuf};

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path segment, or an empty string for a root entry
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Every read and write the sanitizer does on project files goes through this
/// trait, so descriptor handling can run against an in-memory tree.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Creates `path` or truncates it before writing `content`
    fn write_string(&self, path: &Path, content: &str) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Immediate children of `path`, ordered by file name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Files called `file_name` anywhere below `root`, ordered by path.
    /// A missing root is not an error.
    fn find_files(&self, root: &Path, file_name: &str) -> Result<Vec<PathBuf>>;

    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_comes_from_path() {
        let entry = DirEntry {
            path: PathBuf::from("/proj/src/main/resources/widget-js"),
            is_dir: true,
        };
        assert_eq!(entry.file_name(), "widget-js");
        assert!(entry.is_dir());
    }

    #[test]
    fn test_root_entry_has_empty_name() {
        let entry = DirEntry {
            path: PathBuf::from("/"),
            is_dir: true,
        };
        assert_eq!(entry.file_name(), "");
    }
}
