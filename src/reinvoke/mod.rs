//! Rebuilding a project from its sanitized descriptor

mod executor;
mod graph;
mod session;

pub use executor::{BuildExecutor, MavenCliExecutor};
pub use graph::{MavenProject, ProjectDependencyGraph, SingleProjectGraph};
pub use session::{ExecutionRequest, ExecutionSession, SessionContext};

use crate::error::SanitizerError;
use crate::fs::FileSystem;
use crate::loader::{LoadRequest, ModelLoader, Properties};
use std::path::Path;
use tracing::{error, info};

pub const DEFAULT_PHASE: &str = "install";

/// `skipTests=true`
pub fn default_properties() -> Properties {
    let mut properties = Properties::new();
    properties.insert("skipTests".to_string(), "true".to_string());
    properties
}

/// Loads a sanitized descriptor and runs a single-project build on it
pub struct BuildReinvoker<'a> {
    fs: &'a dyn FileSystem,
    loader: &'a dyn ModelLoader,
    executor: &'a dyn BuildExecutor,
    context: SessionContext,
}

impl<'a> BuildReinvoker<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        loader: &'a dyn ModelLoader,
        executor: &'a dyn BuildExecutor,
        context: SessionContext,
    ) -> Self {
        Self {
            fs,
            loader,
            executor,
            context,
        }
    }

    /// Runs `phase` against `pom`. `properties` override the ambient user
    /// properties.
    pub fn execute(
        &self,
        pom: &Path,
        phase: &str,
        properties: &Properties,
    ) -> Result<(), SanitizerError> {
        if !self.fs.is_file(pom) {
            return Err(SanitizerError::MissingInput(pom.to_path_buf()));
        }

        let mut user_properties = self.context.user_properties.clone();
        user_properties.extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));

        let load_request = LoadRequest {
            user_properties: user_properties.clone(),
            active_profiles: self.context.active_profiles.clone(),
            inactive_profiles: self.context.inactive_profiles.clone(),
        };
        let model = self.loader.load(pom, &load_request).map_err(|e| {
            error!("Error(s) detected in the pom file: {}", e);
            e
        })?;

        let project = MavenProject::new(model, pom);
        info!("Building {} ({})", project.key(), phase);

        let request = ExecutionRequest {
            goals: vec![phase.to_string()],
            user_properties,
            active_profiles: self.context.active_profiles.clone(),
            inactive_profiles: self.context.inactive_profiles.clone(),
            offline: self.context.offline,
            recursive: false,
        };
        self.executor
            .execute(&ExecutionSession::single(project, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::loader::LocalModelBuilder;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingExecutor {
        sessions: RefCell<Vec<ExecutionRequest>>,
        projects: RefCell<Vec<PathBuf>>,
    }

    impl BuildExecutor for RecordingExecutor {
        fn execute(&self, session: &ExecutionSession) -> Result<(), SanitizerError> {
            self.sessions.borrow_mut().push(session.request.clone());
            self.projects
                .borrow_mut()
                .extend(session.projects().iter().map(|p| p.file.clone()));
            Ok(())
        }
    }

    const SANITIZED: &str = "<project><groupId>io.vertx</groupId><artifactId>vertx-widget</artifactId><version>3.5.0</version></project>";

    #[test]
    fn test_missing_input_does_not_execute() {
        let fs = MockFileSystem::with_root(PathBuf::from("/proj"));
        let loader = LocalModelBuilder::new(&fs);
        let executor = RecordingExecutor::default();
        let reinvoker = BuildReinvoker::new(&fs, &loader, &executor, SessionContext::default());

        let err = reinvoker
            .execute(
                Path::new("/proj/pom.xml.sanitized"),
                DEFAULT_PHASE,
                &default_properties(),
            )
            .unwrap_err();

        assert!(matches!(err, SanitizerError::MissingInput(_)));
        assert!(executor.sessions.borrow().is_empty());
    }

    #[test]
    fn test_executes_single_project_session() {
        let fs = MockFileSystem::with_root(PathBuf::from("/proj"));
        fs.add_file("pom.xml.sanitized", SANITIZED);
        let loader = LocalModelBuilder::new(&fs);
        let executor = RecordingExecutor::default();
        let mut context = SessionContext {
            offline: true,
            ..Default::default()
        };
        context
            .user_properties
            .insert("skipTests".to_string(), "false".to_string());
        context
            .user_properties
            .insert("gpg.skip".to_string(), "true".to_string());
        let reinvoker = BuildReinvoker::new(&fs, &loader, &executor, context);

        reinvoker
            .execute(
                Path::new("/proj/pom.xml.sanitized"),
                DEFAULT_PHASE,
                &default_properties(),
            )
            .unwrap();

        let sessions = executor.sessions.borrow();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].goals, vec!["install"]);
        assert_eq!(sessions[0].user_properties.get("skipTests").map(String::as_str), Some("true"));
        assert_eq!(sessions[0].user_properties.get("gpg.skip").map(String::as_str), Some("true"));
        assert!(sessions[0].offline);
        assert!(!sessions[0].recursive);
        assert_eq!(
            *executor.projects.borrow(),
            vec![PathBuf::from("/proj/pom.xml.sanitized")]
        );
    }

    #[test]
    fn test_load_failure_is_surfaced() {
        let fs = MockFileSystem::with_root(PathBuf::from("/proj"));
        fs.add_file("pom.xml.sanitized", "<project><unclosed></project>");
        let loader = LocalModelBuilder::new(&fs);
        let executor = RecordingExecutor::default();
        let reinvoker = BuildReinvoker::new(&fs, &loader, &executor, SessionContext::default());

        let err = reinvoker
            .execute(Path::new("/proj/pom.xml.sanitized"), "verify", &Properties::new())
            .unwrap_err();

        assert!(matches!(err, SanitizerError::DescriptorLoad { .. }));
        assert!(executor.sessions.borrow().is_empty());
    }
}
