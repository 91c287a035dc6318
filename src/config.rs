//! Sanitizer configuration
//!
//! The YAML payload ([`ConfigFile`]) is read from an explicit path, from
//! `sanitizer-config.yml` in the project, or from the bundled default. It is
//! then resolved against the original project's coordinates and the module name
//! into an immutable [`SanitizerConfig`].

use crate::exclusion::parse_exclusions;
use crate::fs::FileSystem;
use crate::model::{Exclusion, PomModel};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Conventional configuration file looked up in the project base directory
pub const CONFIG_FILE_NAME: &str = "sanitizer-config.yml";

/// Configuration used when the project carries none
pub const DEFAULT_CONFIGURATION: &str = include_str!("../resources/default-configuration.yml");

const VERSION_PLACEHOLDER: &str = "${version}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed excluded dependency '{0}', expected groupId:artifactId")]
    MalformedExclusion(String),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unable to read the configuration file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid configuration ({origin}): {message}")]
    Parse { origin: String, message: String },

    #[error("The project does not declare {0}")]
    MissingCoordinate(&'static str),
}

/// Raw configuration file content
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    pub module: Option<String>,
    #[serde(rename = "groupId")]
    pub group_id: Option<String>,
    #[serde(rename = "artifactId")]
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent_version: Option<String>,
    pub excluded_dependencies: Option<Vec<String>>,
    pub excluded_plugins: Option<Vec<String>>,
    pub excluded_resources: Option<Vec<String>>,
    pub profiles: Option<Vec<String>>,
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Bundled,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Bundled => write!(f, "bundled default configuration"),
        }
    }
}

impl ConfigFile {
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIGURATION, "bundled default configuration")
    }

    /// Loads the explicit file if given (it must exist), else the conventional
    /// file in `basedir` if present, else the bundled default.
    pub fn load(
        fs: &dyn FileSystem,
        basedir: &Path,
        explicit: Option<&Path>,
    ) -> Result<(Self, ConfigSource), ConfigError> {
        let path = match explicit {
            Some(path) if !fs.is_file(path) => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => basedir.join(CONFIG_FILE_NAME),
        };

        if !fs.is_file(&path) {
            info!("Using default configuration...");
            return Ok((Self::bundled()?, ConfigSource::Bundled));
        }

        debug!("Reading configuration from {}", path.display());
        let content = fs.read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: format!("{:#}", e),
        })?;
        let file = Self::parse(&content, &path.display().to_string())?;
        Ok((file, ConfigSource::File(path)))
    }
}

/// Coordinates of the project being sanitized, parent inheritance applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ProjectCoordinates {
    pub fn from_model(model: &PomModel) -> Result<Self, ConfigError> {
        Ok(Self {
            group_id: model
                .effective_group_id()
                .ok_or(ConfigError::MissingCoordinate("groupId"))?
                .to_string(),
            artifact_id: model
                .artifact_id
                .clone()
                .ok_or(ConfigError::MissingCoordinate("artifactId"))?,
            version: model
                .effective_version()
                .ok_or(ConfigError::MissingCoordinate("version"))?
                .to_string(),
        })
    }
}

impl fmt::Display for ProjectCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Resolved, immutable rule set for one sanitize run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerConfig {
    pub module_name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub parent_version: Option<String>,
    pub excluded_dependencies: Vec<String>,
    pub exclusions: Vec<Exclusion>,
    pub excluded_plugins: Vec<String>,
    pub excluded_resources: Vec<String>,
    pub profiles: Vec<String>,
}

impl SanitizerConfig {
    pub fn resolve(
        file: ConfigFile,
        project: &ProjectCoordinates,
        module_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let excluded_dependencies = unique(file.excluded_dependencies.unwrap_or_default());
        let exclusions = parse_exclusions(&excluded_dependencies)?;

        let version = match file.version {
            Some(version) => version.replace(VERSION_PLACEHOLDER, &project.version),
            None => project.version.clone(),
        };

        Ok(Self {
            module_name: module_name.into(),
            group_id: file.group_id.unwrap_or_else(|| project.group_id.clone()),
            artifact_id: file
                .artifact_id
                .unwrap_or_else(|| project.artifact_id.clone()),
            version,
            parent_version: file.parent_version,
            excluded_dependencies,
            exclusions,
            excluded_plugins: unique(file.excluded_plugins.unwrap_or_default()),
            excluded_resources: unique(file.excluded_resources.unwrap_or_default()),
            profiles: unique(file.profiles.unwrap_or_default()),
        })
    }

    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Drops repeated values, keeping first-seen order
fn unique(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
