use super::session::ExecutionSession;
use crate::error::SanitizerError;
use crate::loader::{mvn_executable, profile_argument};
use std::process::Command;
use tracing::info;

/// Runs the secondary build described by a session
pub trait BuildExecutor {
    fn execute(&self, session: &ExecutionSession) -> Result<(), SanitizerError>;
}

/// Spawns `mvn` against the session's descriptor, sharing this process's
/// stdio
#[derive(Debug, Clone)]
pub struct MavenCliExecutor {
    pub mvn: String,
    /// Log the command line instead of running it
    pub dry_run: bool,
}

impl Default for MavenCliExecutor {
    fn default() -> Self {
        Self::new(mvn_executable())
    }
}

impl MavenCliExecutor {
    pub fn new(mvn: impl Into<String>) -> Self {
        Self {
            mvn: mvn.into(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Arguments passed to `mvn`, properties in key order
    pub fn arguments(&self, session: &ExecutionSession) -> Vec<String> {
        let request = &session.request;
        let mut args = vec![
            "-f".to_string(),
            session.current_project().file.display().to_string(),
        ];
        if !request.recursive {
            args.push("--non-recursive".to_string());
        }
        if request.offline {
            args.push("--offline".to_string());
        }
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
        args.extend(request.goals.iter().cloned());
        args
    }

    pub fn command_line(&self, session: &ExecutionSession) -> String {
        let mut parts = vec![self.mvn.clone()];
        parts.extend(self.arguments(session));
        parts.join(" ")
    }
}

impl BuildExecutor for MavenCliExecutor {
    fn execute(&self, session: &ExecutionSession) -> Result<(), SanitizerError> {
        let command_line = self.command_line(session);
        if self.dry_run {
            info!("Dry run, would execute: {}", command_line);
            return Ok(());
        }

        info!("Executing: {}", command_line);
        let status = Command::new(&self.mvn)
            .args(self.arguments(session))
            .current_dir(&session.current_project().basedir)
            .status()
            .map_err(|e| SanitizerError::Execution(format!("cannot run {}: {}", self.mvn, e)))?;

        if !status.success() {
            return Err(SanitizerError::Execution(format!(
                "{} exited with {}",
                command_line, status
            )));
        }
        Ok(())
    }
}
