//! Module name resolution
//!
//! The module name parametrizes resource exclusion globs (`${module}`). It comes
//! from an explicit override, a `@ModuleGen(name = "...")` annotation in a
//! `package-info.java`, a `<name>-js` / `<name>` pair of resource directories,
//! or finally the artifact id.

use crate::error::SanitizerError;
use crate::fs::FileSystem;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

const SOURCE_ROOT: &str = "src/main/java";
const RESOURCES_ROOT: &str = "src/main/resources";
const PACKAGE_INFO: &str = "package-info.java";
const MODULE_MARKERS: &[&str] = &["@ModuleGen", "@io.vertx.codegen.annotations.ModuleGen"];
const RESOURCE_DIR_SUFFIX: &str = "-js";

fn name_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"name\s*=\s*"([a-zA-Z0-9\-]+)""#).expect("module name pattern is valid")
    })
}

pub struct ModuleNameResolver<'a> {
    fs: &'a dyn FileSystem,
    basedir: PathBuf,
}

impl<'a> ModuleNameResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, basedir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            basedir: basedir.into(),
        }
    }

    /// Resolves the module name. `explicit` wins without touching the file system;
    /// `artifact_id` is the last resort.
    pub fn resolve(&self, explicit: Option<&str>, artifact_id: &str) -> Result<String, SanitizerError> {
        if let Some(name) = explicit {
            return Ok(name.to_string());
        }

        if let Some(name) = self.from_package_info()? {
            return Ok(name);
        }
        warn!("Cannot extract module name from the package-info files, using directory name recognition");

        if let Some(name) = self.from_resource_directories()? {
            return Ok(name);
        }
        warn!("Unable to detect the module name from the resource directories, using artifact id");

        Ok(artifact_id.to_string())
    }

    fn from_package_info(&self) -> Result<Option<String>, SanitizerError> {
        let files = self
            .fs
            .find_files(&self.basedir.join(SOURCE_ROOT), PACKAGE_INFO)
            .map_err(|e| SanitizerError::Resolution(format!("{:#}", e)))?;
        if files.is_empty() {
            debug!("No {} file", PACKAGE_INFO);
        }

        for file in files {
            debug!("Reading {}", file.display());
            let content = self
                .fs
                .read_to_string(&file)
                .map_err(|e| SanitizerError::Resolution(format!("{:#}", e)))?;
            if let Some(name) = extract_module_name(&content) {
                info!("Module name extracted from {}: {}", file.display(), name);
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    fn from_resource_directories(&self) -> Result<Option<String>, SanitizerError> {
        let resources = self.basedir.join(RESOURCES_ROOT);
        if !self.fs.is_dir(&resources) {
            return Ok(None);
        }

        let entries = self
            .fs
            .read_dir(&resources)
            .map_err(|e| SanitizerError::Resolution(format!("{:#}", e)))?;
        for entry in entries.iter().filter(|e| e.is_dir()) {
            let Some(name) = entry.file_name().strip_suffix(RESOURCE_DIR_SUFFIX) else {
                continue;
            };
            if !name.is_empty() && self.fs.is_dir(&resources.join(name)) {
                info!("Module name found using directory name recognition: {}", name);
                return Ok(Some(name.to_string()));
            }
        }
        Ok(None)
    }
}

/// Module name from the first line carrying a module marker annotation. When
/// that line has several `name="..."` attributes the last one is taken.
pub fn extract_module_name(content: &str) -> Option<String> {
    content
        .lines()
        .filter(|line| MODULE_MARKERS.iter().any(|marker| line.contains(marker)))
        .find_map(|line| {
            debug!("Line with @ModuleGen found: {}", line.trim());
            name_attribute()
                .captures_iter(line)
                .last()
                .map(|caps| caps[1].to_string())
        })
}
