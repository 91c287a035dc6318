use super::{DirEntry, FileSystem};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Cannot delete {}", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.with_context(|| format!("Cannot list {}", path.display()))?;
                // Follow symlinks so a linked resource directory still counts
                let is_dir = entry.path().is_dir();
                Ok(DirEntry {
                    path: entry.into_path(),
                    is_dir,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if entries.is_empty() && !path.is_dir() {
            anyhow::bail!("Not a directory: {}", path.display());
        }
        Ok(entries)
    }

    fn find_files(&self, root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() && entry.file_name() == file_name => {
                    Some(Ok(entry.into_path()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(anyhow::Error::new(e).context(format!("Cannot walk {}", root.display())))),
            })
            .collect()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("Cannot resolve {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vertx_module() -> TempDir {
        let dir = TempDir::new().unwrap();
        let java = dir.path().join("src/main/java/io/vertx");
        fs::create_dir_all(java.join("widget")).unwrap();
        fs::create_dir_all(java.join("gadget")).unwrap();
        fs::create_dir_all(dir.path().join("src/main/resources/widget-js")).unwrap();
        fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
        fs::write(java.join("widget/package-info.java"), "package io.vertx.widget;").unwrap();
        fs::write(java.join("gadget/package-info.java"), "package io.vertx.gadget;").unwrap();
        fs::write(java.join("widget/Widget.java"), "class Widget {}").unwrap();
        dir
    }

    #[test]
    fn test_file_queries() {
        let module = vertx_module();
        let fs = RealFileSystem;
        let pom = module.path().join("pom.xml");

        assert!(fs.exists(&pom));
        assert!(fs.is_file(&pom));
        assert!(!fs.is_dir(&pom));
        assert!(fs.is_dir(&module.path().join("src")));
        assert!(!fs.exists(&module.path().join("pom.xml.sanitized")));
    }

    #[test]
    fn test_write_read_remove() {
        let module = vertx_module();
        let fs = RealFileSystem;
        let path = module.path().join("pom.xml.sanitized");

        fs.write_string(&path, "first").unwrap();
        fs.write_string(&path, "second").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "second");

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
        assert!(fs.read_to_string(&path).is_err());
    }

    #[test]
    fn test_read_dir_is_shallow_and_sorted() {
        let module = vertx_module();
        let fs = RealFileSystem;

        let entries = fs.read_dir(module.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();
        assert_eq!(names, vec!["pom.xml", "src"]);
        assert!(!entries[0].is_dir());
        assert!(entries[1].is_dir());
    }

    #[test]
    fn test_read_dir_rejects_file() {
        let module = vertx_module();
        assert!(RealFileSystem.read_dir(&module.path().join("pom.xml")).is_err());
    }

    #[test]
    fn test_find_files_sorted() {
        let module = vertx_module();
        let found = RealFileSystem
            .find_files(&module.path().join("src/main/java"), "package-info.java")
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("io/vertx/gadget/package-info.java"));
        assert!(found[1].ends_with("io/vertx/widget/package-info.java"));
    }

    #[test]
    fn test_find_files_missing_root() {
        let module = vertx_module();
        let found = RealFileSystem
            .find_files(&module.path().join("does/not/exist"), "package-info.java")
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_canonicalize() {
        let module = vertx_module();
        let canonical = RealFileSystem.canonicalize(module.path()).unwrap();
        assert!(canonical.is_absolute());
    }
}
