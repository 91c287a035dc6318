//! The rewrites applied to the original and effective models

mod coordinates;
mod dependencies;
mod detach;
mod plugins;
mod profiles;
mod resources;

pub use coordinates::{OverrideParentVersion, SetCoordinates};
pub use dependencies::FixDependencies;
pub use detach::{DetachDependencyManagement, DetachParent, PruneInheritedMetadata};
pub use plugins::RemovePlugins;
pub use profiles::ActivateProfiles;
pub use resources::{ExcludeResources, MODULE_PLACEHOLDER};

use super::phase_trait::ModelStep;
use crate::config::SanitizerConfig;
use crate::model::PomModel;

/// Steps run on the original model, before it is written as the intermediate
/// descriptor
pub fn original_model_steps(config: &SanitizerConfig) -> Vec<Box<dyn ModelStep>> {
    let mut steps: Vec<Box<dyn ModelStep>> = vec![Box::new(SetCoordinates {
        group_id: config.group_id.clone(),
        artifact_id: config.artifact_id.clone(),
        version: config.version.clone(),
    })];
    if let Some(version) = &config.parent_version {
        steps.push(Box::new(OverrideParentVersion {
            version: version.clone(),
        }));
    }
    steps.push(Box::new(FixDependencies::new(&config.exclusions)));
    steps
}

/// Steps run on the effective model reloaded from the intermediate descriptor
pub fn effective_model_steps(
    config: &SanitizerConfig,
    original: &PomModel,
) -> Vec<Box<dyn ModelStep>> {
    vec![
        Box::new(PruneInheritedMetadata::from_original(original)),
        Box::new(DetachParent),
        Box::new(DetachDependencyManagement),
        Box::new(FixDependencies::new(&config.exclusions)),
        Box::new(ExcludeResources::new(
            &config.excluded_resources,
            &config.module_name,
        )),
        Box::new(RemovePlugins {
            artifact_ids: config.excluded_plugins.clone(),
        }),
        Box::new(ActivateProfiles {
            ids: config.profiles.clone(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exclusion;

    fn config(parent_version: Option<&str>) -> SanitizerConfig {
        SanitizerConfig {
            module_name: "widget".to_string(),
            group_id: "org.acme".to_string(),
            artifact_id: "widget".to_string(),
            version: "1.0".to_string(),
            parent_version: parent_version.map(str::to_string),
            excluded_dependencies: vec!["com.acme:legacy".to_string()],
            exclusions: vec![Exclusion::new("com.acme", "legacy")],
            excluded_plugins: vec![],
            excluded_resources: vec![],
            profiles: vec![],
        }
    }

    fn names(steps: &[Box<dyn ModelStep>]) -> Vec<&'static str> {
        steps.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_original_model_step_order() {
        assert_eq!(
            names(&original_model_steps(&config(Some("13")))),
            vec!["SetCoordinates", "OverrideParentVersion", "FixDependencies"]
        );
        assert_eq!(
            names(&original_model_steps(&config(None))),
            vec!["SetCoordinates", "FixDependencies"]
        );
    }

    #[test]
    fn test_effective_model_step_order() {
        assert_eq!(
            names(&effective_model_steps(&config(None), &PomModel::default())),
            vec![
                "PruneInheritedMetadata",
                "DetachParent",
                "DetachDependencyManagement",
                "FixDependencies",
                "ExcludeResources",
                "RemovePlugins",
                "ActivateProfiles",
            ]
        );
    }
}
