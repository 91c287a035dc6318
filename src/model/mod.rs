//! In-memory representation of a Maven build descriptor (POM)
//!
//! Only the parts the sanitizer rewrites or the local model builder resolves are
//! modelled as typed fields. Every other element is kept as a [`RawElement`], the
//! verbatim XML text of the subtree, so that reading and writing a descriptor
//! does not lose plugin configurations, SCM blocks, repositories, and so on.

pub mod reader;
pub mod writer;

use std::fmt;
use thiserror::Error;

pub use reader::{parse_pom, read_pom};
pub use writer::{render_pom, write_pom};

/// Default plugin group applied when a plugin declares none
pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Expected <project> as root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement { parent: String, element: String },
}

/// An XML subtree carried through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub name: String,
    pub xml: String,
}

impl RawElement {
    pub fn new(name: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: xml.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parent {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

/// A `groupId:artifactId` pair blocked from transitive resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub dependency_type: Option<String>,
    pub classifier: Option<String>,
    pub scope: Option<String>,
    pub system_path: Option<String>,
    pub optional: Option<String>,
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Key used by Maven to match a dependency against its managed declaration
    pub fn management_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.dependency_type.as_deref().unwrap_or("jar"),
            self.classifier.as_deref().unwrap_or("")
        )
    }

    /// True when the scope is absent or `compile` (any case)
    pub fn is_compile_scoped(&self) -> bool {
        match self.scope.as_deref() {
            None => true,
            Some(scope) => scope.eq_ignore_ascii_case("compile"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManagement {
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub directory: Option<String>,
    pub target_path: Option<String>,
    pub filtering: Option<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl Resource {
    pub fn from_directory(directory: impl Into<String>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugin {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    /// Executions, configuration, plugin dependencies and the like
    pub body: Vec<RawElement>,
}

impl Plugin {
    pub fn new(artifact_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or(DEFAULT_PLUGIN_GROUP),
            self.artifact_id
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginManagement {
    pub plugins: Vec<Plugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Build {
    pub source_directory: Option<String>,
    pub test_source_directory: Option<String>,
    pub output_directory: Option<String>,
    pub test_output_directory: Option<String>,
    pub default_goal: Option<String>,
    pub resources: Vec<Resource>,
    pub test_resources: Vec<Resource>,
    pub directory: Option<String>,
    pub final_name: Option<String>,
    pub plugin_management: Option<PluginManagement>,
    pub plugins: Vec<Plugin>,
    pub extra: Vec<RawElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    pub active_by_default: bool,
    /// jdk, os, property and file triggers
    pub triggers: Vec<RawElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub activation: Option<Activation>,
    pub body: Vec<RawElement>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomModel {
    pub model_version: Option<String>,
    pub parent: Option<Parent>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub properties: Vec<(String, String)>,
    pub dependency_management: Option<DependencyManagement>,
    pub dependencies: Vec<Dependency>,
    pub build: Option<Build>,
    pub profiles: Vec<Profile>,
    pub extra: Vec<RawElement>,
}

impl PomModel {
    /// groupId, falling back to the parent's as Maven does
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or_else(|| self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// version, falling back to the parent's as Maven does
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.parent.as_ref().and_then(|p| p.version.as_deref()))
    }

    pub fn coordinates(&self) -> String {
        format!(
            "{}:{}:{}",
            self.effective_group_id().unwrap_or("?"),
            self.artifact_id.as_deref().unwrap_or("?"),
            self.effective_version().unwrap_or("?")
        )
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a property, keeping the position of an existing key
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn build_mut(&mut self) -> &mut Build {
        self.build.get_or_insert_with(Build::default)
    }

    pub fn plugins(&self) -> &[Plugin] {
        self.build.as_ref().map(|b| b.plugins.as_slice()).unwrap_or(&[])
    }
}
