//! Replaces the absolute project directory in a written descriptor with a
//! placeholder so the sanitized file does not depend on where it was built.

use crate::error::SanitizerError;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

pub const BASEDIR_PLACEHOLDER: &str = "${project.basedir}";

pub struct PathAnonymizer<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> PathAnonymizer<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Rewrites `file` in place and returns the number of replaced
    /// occurrences of `basedir`. Zero is a valid outcome.
    pub fn anonymize(&self, file: &Path, basedir: &Path) -> Result<usize, SanitizerError> {
        let content = self
            .fs
            .read_to_string(file)
            .map_err(|e| SanitizerError::write(file, format!("{:#}", e)))?;

        let (rewritten, count) = replace_basedir(&content, &basedir.to_string_lossy());
        debug!(
            "Replaced {} occurrence(s) of {} in {}",
            count,
            basedir.display(),
            file.display()
        );

        self.fs
            .write_string(file, &rewritten)
            .map_err(|e| SanitizerError::write(file, format!("{:#}", e)))?;
        Ok(count)
    }
}

/// Replaces `basedir` wherever it stands as a whole path prefix, i.e. when the
/// next character ends the path or starts a child segment. Markup that merely
/// contains the same characters (`/proj` in `</project>`) is left alone.
pub fn replace_basedir(content: &str, basedir: &str) -> (String, usize) {
    let basedir = basedir.trim_end_matches(['/', '\\']);
    if basedir.is_empty() {
        return (content.to_string(), 0);
    }

    let mut rewritten = String::with_capacity(content.len());
    let mut count = 0;
    let mut rest = 0;
    for (start, _) in content.match_indices(basedir) {
        let end = start + basedir.len();
        if !content[end..].chars().next().map_or(true, is_path_boundary) {
            continue;
        }
        rewritten.push_str(&content[rest..start]);
        rewritten.push_str(BASEDIR_PLACEHOLDER);
        rest = end;
        count += 1;
    }
    rewritten.push_str(&content[rest..]);
    (rewritten, count)
}

fn is_path_boundary(c: char) -> bool {
    matches!(c, '/' | '\\' | '<' | '"' | '\'' | ',' | ';' | ':') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;

    #[test]
    fn test_replaces_every_occurrence() {
        let content = "<directory>/home/u/proj/target</directory>\n<outputDirectory>/home/u/proj/target/classes</outputDirectory>";
        let (rewritten, count) = replace_basedir(content, "/home/u/proj");

        assert_eq!(count, 2);
        assert!(!rewritten.contains("/home/u/proj"));
        assert!(rewritten.contains("<directory>${project.basedir}/target</directory>"));
    }

    #[test]
    fn test_markup_sharing_the_prefix_survives() {
        let content = "<directory>/proj/target</directory></project>";
        let (rewritten, count) = replace_basedir(content, "/proj");

        assert_eq!(count, 1);
        assert_eq!(
            rewritten,
            "<directory>${project.basedir}/target</directory></project>"
        );
    }

    #[test]
    fn test_sibling_directory_is_not_replaced() {
        let content = "<directory>/home/u/proj-other/target</directory>\n<basedir>/home/u/proj</basedir>";
        let (rewritten, count) = replace_basedir(content, "/home/u/proj/");

        assert_eq!(count, 1);
        assert!(rewritten.contains("/home/u/proj-other/target"));
        assert!(rewritten.contains("<basedir>${project.basedir}</basedir>"));
    }

    #[test]
    fn test_no_occurrence() {
        let (rewritten, count) = replace_basedir("<project/>", "/home/u/proj");
        assert_eq!(count, 0);
        assert_eq!(rewritten, "<project/>");
    }

    #[test]
    fn test_anonymize_file_in_place() {
        let fs = MockFileSystem::with_root(PathBuf::from("/home/u/proj"));
        fs.add_file(
            "pom.xml.sanitized",
            "<sourceDirectory>/home/u/proj/src/main/java</sourceDirectory>",
        );
        let file = PathBuf::from("/home/u/proj/pom.xml.sanitized");

        let count = PathAnonymizer::new(&fs)
            .anonymize(&file, Path::new("/home/u/proj"))
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs.read_to_string(&file).unwrap(),
            "<sourceDirectory>${project.basedir}/src/main/java</sourceDirectory>"
        );
    }

    #[test]
    fn test_missing_file_is_write_error() {
        let fs = MockFileSystem::new();
        let err = PathAnonymizer::new(&fs)
            .anonymize(Path::new("/mock/none"), Path::new("/mock"))
            .unwrap_err();
        assert!(matches!(err, SanitizerError::Write { .. }));
    }
}
