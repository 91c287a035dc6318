//! Building the effective model of a descriptor

mod interpolation;
mod local;
mod maven;

pub use local::LocalModelBuilder;
pub use maven::{mvn_executable, profile_argument, MavenModelBuilder, MVN_ENV};

use crate::error::SanitizerError;
use crate::model::PomModel;
use std::collections::BTreeMap;
use std::path::Path;

/// `-Dkey=value` style properties, kept sorted for reproducible command lines
pub type Properties = BTreeMap<String, String>;

/// Inputs of an effective-model build besides the descriptor itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    pub user_properties: Properties,
    pub active_profiles: Vec<String>,
    pub inactive_profiles: Vec<String>,
}

impl LoadRequest {
    pub fn with_properties(user_properties: Properties) -> Self {
        Self {
            user_properties,
            ..Default::default()
        }
    }
}

/// Turns a descriptor path into its effective model: parent inherited,
/// expressions interpolated, managed versions injected, paths made absolute.
pub trait ModelLoader {
    fn load(&self, pom: &Path, request: &LoadRequest) -> Result<PomModel, SanitizerError>;
}

/// Parses `key=value`; a bare `key` means `key=true` as on the Maven command line
pub fn parse_property(entry: &str) -> (String, String) {
    match entry.split_once('=') {
        Some((key, value)) => (key.trim().to_string(), value.to_string()),
        None => (entry.trim().to_string(), "true".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("skipTests=false"),
            ("skipTests".to_string(), "false".to_string())
        );
        assert_eq!(
            parse_property("a=b=c"),
            ("a".to_string(), "b=c".to_string())
        );
        assert_eq!(
            parse_property("offline"),
            ("offline".to_string(), "true".to_string())
        );
    }
}
