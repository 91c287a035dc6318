use crate::model::PomModel;
use crate::pipeline::phase_trait::ModelStep;

pub const MODULE_PLACEHOLDER: &str = "${module}";

/// Replaces the exclude list of every main resource with the configured globs.
///
/// The list is replaced, never appended to, which makes the step idempotent.
/// Test resources are left alone.
pub struct ExcludeResources {
    pub patterns: Vec<String>,
}

impl ExcludeResources {
    /// Substitutes `${module}` in every pattern
    pub fn new(patterns: &[String], module_name: &str) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.replace(MODULE_PLACEHOLDER, module_name))
                .collect(),
        }
    }
}

impl ModelStep for ExcludeResources {
    fn name(&self) -> &'static str {
        "ExcludeResources"
    }

    fn apply(&self, model: &mut PomModel) {
        let Some(build) = model.build.as_mut() else {
            return;
        };
        for resource in &mut build.resources {
            resource.excludes = self.patterns.clone();
        }
    }
}
