//! Effective model built by Maven itself (`help:effective-pom`)

use super::{LoadRequest, ModelLoader};
use crate::error::SanitizerError;
use crate::fs::FileSystem;
use crate::model::{read_pom, PomModel};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Overrides the `mvn` executable
pub const MVN_ENV: &str = "POM_SANITIZER_MVN";
const DEFAULT_MVN: &str = "mvn";
const EFFECTIVE_SUFFIX: &str = ".effective";

/// `$POM_SANITIZER_MVN`, else `mvn` from the PATH
pub fn mvn_executable() -> String {
    std::env::var(MVN_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MVN.to_string())
}

/// `-P` argument for the given selections; deactivations are prefixed with `!`
pub fn profile_argument(active: &[String], inactive: &[String]) -> Option<String> {
    let selection: Vec<String> = active
        .iter()
        .cloned()
        .chain(inactive.iter().map(|id| format!("!{}", id)))
        .collect();
    if selection.is_empty() {
        None
    } else {
        Some(format!("-P{}", selection.join(",")))
    }
}

pub struct MavenModelBuilder<'a> {
    fs: &'a dyn FileSystem,
    mvn: String,
}

impl<'a> MavenModelBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem, mvn: impl Into<String>) -> Self {
        Self {
            fs,
            mvn: mvn.into(),
        }
    }

    pub fn arguments(&self, pom: &Path, output: &Path, request: &LoadRequest) -> Vec<String> {
        let mut args = vec![
            "-q".to_string(),
            "-N".to_string(),
            "-f".to_string(),
            pom.display().to_string(),
            "help:effective-pom".to_string(),
            format!("-Doutput={}", output.display()),
        ];
        args.extend(profile_argument(
            &request.active_profiles,
            &request.inactive_profiles,
        ));
        args.extend(
            request
                .user_properties
                .iter()
                .map(|(key, value)| format!("-D{}={}", key, value)),
        );
        args
    }
}

impl ModelLoader for MavenModelBuilder<'_> {
    fn load(&self, pom: &Path, request: &LoadRequest) -> Result<PomModel, SanitizerError> {
        let output = effective_path(pom);
        let args = self.arguments(pom, &output, request);
        info!("Building the effective model with {} {}", self.mvn, args.join(" "));

        let result = Command::new(&self.mvn)
            .args(&args)
            .output()
            .map_err(|e| {
                SanitizerError::descriptor_load(pom, format!("cannot run {}: {}", self.mvn, e))
            })?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stdout = String::from_utf8_lossy(&result.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(SanitizerError::descriptor_load(
                pom,
                format!("{} exited with {}: {}", self.mvn, result.status, detail.trim()),
            ));
        }

        let model = read_pom(self.fs, &output)?;
        if let Err(e) = self.fs.remove_file(&output) {
            debug!("Cannot remove {}: {:#}", output.display(), e);
        }
        Ok(model)
    }
}

fn effective_path(pom: &Path) -> PathBuf {
    let mut name = OsString::from(pom.as_os_str());
    name.push(EFFECTIVE_SUFFIX);
    PathBuf::from(name)
}
