use super::graph::{MavenProject, ProjectDependencyGraph, SingleProjectGraph};
use crate::loader::Properties;

/// Settings of the invocation that asked for the rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user_properties: Properties,
    pub active_profiles: Vec<String>,
    pub inactive_profiles: Vec<String>,
    pub offline: bool,
}

/// What the secondary build should do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub goals: Vec<String>,
    pub user_properties: Properties,
    pub active_profiles: Vec<String>,
    pub inactive_profiles: Vec<String>,
    pub offline: bool,
    pub recursive: bool,
}

/// A request bound to the projects it runs against
#[derive(Debug, Clone)]
pub struct ExecutionSession {
    pub request: ExecutionRequest,
    graph: SingleProjectGraph,
}

impl ExecutionSession {
    /// Session over `project` alone; the build never recurses into modules
    pub fn single(project: MavenProject, mut request: ExecutionRequest) -> Self {
        request.recursive = false;
        Self {
            request,
            graph: SingleProjectGraph::new(project),
        }
    }

    pub fn graph(&self) -> &dyn ProjectDependencyGraph {
        &self.graph
    }

    pub fn projects(&self) -> Vec<&MavenProject> {
        self.graph.sorted_projects()
    }

    pub fn current_project(&self) -> &MavenProject {
        self.graph.project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PomModel;

    #[test]
    fn test_single_session_is_not_recursive() {
        let request = ExecutionRequest {
            goals: vec!["install".to_string()],
            recursive: true,
            ..Default::default()
        };
        let session = ExecutionSession::single(
            MavenProject::new(PomModel::default(), "/proj/pom.xml.sanitized"),
            request,
        );

        assert!(!session.request.recursive);
        assert_eq!(session.projects().len(), 1);
        assert_eq!(
            session.current_project().file,
            std::path::PathBuf::from("/proj/pom.xml.sanitized")
        );
        assert!(session
            .graph()
            .downstream_projects(session.current_project(), true)
            .is_empty());
    }
}
