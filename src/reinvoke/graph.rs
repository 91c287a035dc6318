use crate::model::PomModel;
use std::path::PathBuf;

/// A project taking part in a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenProject {
    pub model: PomModel,
    /// Descriptor the project was loaded from
    pub file: PathBuf,
    pub basedir: PathBuf,
}

impl MavenProject {
    pub fn new(model: PomModel, file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let basedir = file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            model,
            file,
            basedir,
        }
    }

    /// `groupId:artifactId:version`
    pub fn key(&self) -> String {
        self.model.coordinates()
    }
}

/// Ordering and relations between the projects of a build
pub trait ProjectDependencyGraph {
    /// All projects in build order
    fn sorted_projects(&self) -> Vec<&MavenProject>;

    fn upstream_projects(&self, project: &MavenProject, transitive: bool) -> Vec<&MavenProject>;

    fn downstream_projects(&self, project: &MavenProject, transitive: bool)
        -> Vec<&MavenProject>;
}

/// A build made of exactly one project, with nothing up- or downstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleProjectGraph {
    project: MavenProject,
}

impl SingleProjectGraph {
    pub fn new(project: MavenProject) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &MavenProject {
        &self.project
    }
}

impl ProjectDependencyGraph for SingleProjectGraph {
    fn sorted_projects(&self) -> Vec<&MavenProject> {
        vec![&self.project]
    }

    fn upstream_projects(&self, _project: &MavenProject, _transitive: bool) -> Vec<&MavenProject> {
        Vec::new()
    }

    fn downstream_projects(
        &self,
        _project: &MavenProject,
        _transitive: bool,
    ) -> Vec<&MavenProject> {
        Vec::new()
    }
}
