use crate::config::ConfigError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Terminal failures of a sanitize or rebuild invocation
#[derive(Debug, Error)]
pub enum SanitizerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Cannot extract the module name: {0}")]
    Resolution(String),

    #[error("Unable to load the pom file {}: {message}", .path.display())]
    DescriptorLoad { path: PathBuf, message: String },

    #[error("Cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("Unable to find the pom file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Build execution failed: {0}")]
    Execution(String),
}

impl SanitizerError {
    pub fn descriptor_load(path: &Path, message: impl Into<String>) -> Self {
        SanitizerError::DescriptorLoad {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn write(path: &Path, message: impl Into<String>) -> Self {
        SanitizerError::Write {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = SanitizerError::MissingInput(PathBuf::from("/p/pom.xml.sanitized"));
        assert_eq!(
            err.to_string(),
            "Unable to find the pom file: /p/pom.xml.sanitized"
        );
    }

    #[test]
    fn test_descriptor_load_message() {
        let err = SanitizerError::descriptor_load(Path::new("pom.xml"), "unexpected end");
        assert_eq!(
            err.to_string(),
            "Unable to load the pom file pom.xml: unexpected end"
        );
    }

    #[test]
    fn test_configuration_from() {
        let err: SanitizerError = ConfigError::MalformedExclusion("oops".to_string()).into();
        assert!(matches!(err, SanitizerError::Configuration(_)));
        assert!(err.to_string().contains("oops"));
    }
}
