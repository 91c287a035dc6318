use crate::model::PomModel;
use crate::pipeline::phase_trait::ModelStep;

/// Removes the parent reference
pub struct DetachParent;

impl ModelStep for DetachParent {
    fn name(&self) -> &'static str {
        "DetachParent"
    }

    fn apply(&self, model: &mut PomModel) {
        model.parent = None;
    }
}

/// Removes the dependencyManagement section
pub struct DetachDependencyManagement;

impl ModelStep for DetachDependencyManagement {
    fn name(&self) -> &'static str {
        "DetachDependencyManagement"
    }

    fn apply(&self, model: &mut PomModel) {
        model.dependency_management = None;
    }
}

/// Clears name, description and url on the effective model when the project
/// itself did not declare them, so the parent's values do not leak through
/// inheritance.
pub struct PruneInheritedMetadata {
    pub keep_name: bool,
    pub keep_description: bool,
    pub keep_url: bool,
}

impl PruneInheritedMetadata {
    /// Keeps only what `original` declares with a non-blank value
    pub fn from_original(original: &PomModel) -> Self {
        let declared = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        Self {
            keep_name: declared(&original.name),
            keep_description: declared(&original.description),
            keep_url: declared(&original.url),
        }
    }
}

impl ModelStep for PruneInheritedMetadata {
    fn name(&self) -> &'static str {
        "PruneInheritedMetadata"
    }

    fn apply(&self, model: &mut PomModel) {
        if !self.keep_name {
            model.name = None;
        }
        if !self.keep_description {
            model.description = None;
        }
        if !self.keep_url {
            model.url = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dependency, DependencyManagement, Parent};

    #[test]
    fn test_detach_parent_and_management() {
        let mut model = PomModel {
            parent: Some(Parent {
                group_id: "io.vertx".to_string(),
                artifact_id: "vertx-parent".to_string(),
                version: Some("12".to_string()),
                relative_path: None,
            }),
            dependency_management: Some(DependencyManagement {
                dependencies: vec![Dependency::new("io.vertx", "vertx-core").with_version("3.5.0")],
            }),
            dependencies: vec![Dependency::new("io.vertx", "vertx-core")],
            ..Default::default()
        };
        DetachParent.apply(&mut model);
        DetachDependencyManagement.apply(&mut model);

        assert!(model.parent.is_none());
        assert!(model.dependency_management.is_none());
        assert_eq!(model.dependencies.len(), 1);
    }

    #[test]
    fn test_detach_without_parent_is_noop() {
        let mut model = PomModel::default();
        DetachParent.apply(&mut model);
        assert_eq!(model, PomModel::default());
    }

    #[test]
    fn test_prune_inherited_metadata() {
        let original = PomModel {
            name: Some("Widget".to_string()),
            description: Some("  ".to_string()),
            ..Default::default()
        };
        let mut effective = PomModel {
            name: Some("Widget".to_string()),
            description: Some("Parent description".to_string()),
            url: Some("https://parent.example/widget".to_string()),
            ..Default::default()
        };
        PruneInheritedMetadata::from_original(&original).apply(&mut effective);

        assert_eq!(effective.name.as_deref(), Some("Widget"));
        assert_eq!(effective.description, None);
        assert_eq!(effective.url, None);
    }
}
