//! Parsing of `groupId:artifactId` exclusion entries

use crate::config::ConfigError;
use crate::model::Exclusion;

/// Turns `"group:artifact"` strings into exclusion records.
///
/// Each entry must split on `:` into exactly two non-empty segments. No
/// deduplication happens here.
pub fn parse_exclusions<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Exclusion>, ConfigError> {
    entries.iter().map(|e| parse_exclusion(e.as_ref())).collect()
}

pub fn parse_exclusion(entry: &str) -> Result<Exclusion, ConfigError> {
    let segments: Vec<&str> = entry.split(':').map(str::trim).collect();
    match segments.as_slice() {
        [group, artifact] if !group.is_empty() && !artifact.is_empty() => {
            Ok(Exclusion::new(*group, *artifact))
        }
        _ => Err(ConfigError::MalformedExclusion(entry.to_string())),
    }
}
