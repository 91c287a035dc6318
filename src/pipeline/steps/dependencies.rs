use crate::model::{Dependency, Exclusion, PomModel};
use crate::pipeline::phase_trait::ModelStep;

/// Drops excluded dependencies, then pushes every exclusion onto the
/// compile-scoped survivors so the excluded artifacts cannot come back
/// transitively.
pub struct FixDependencies {
    pub exclusions: Vec<Exclusion>,
}

impl FixDependencies {
    pub fn new(exclusions: &[Exclusion]) -> Self {
        Self {
            exclusions: exclusions.to_vec(),
        }
    }

    fn is_excluded(&self, dependency: &Dependency) -> bool {
        self.exclusions
            .iter()
            .any(|e| e.artifact_id == dependency.artifact_id)
    }
}

impl ModelStep for FixDependencies {
    fn name(&self) -> &'static str {
        "FixDependencies"
    }

    fn apply(&self, model: &mut PomModel) {
        if self.exclusions.is_empty() {
            return;
        }

        // Matched on artifact id only, the group is ignored
        model.dependencies.retain(|d| !self.is_excluded(d));

        for dependency in model.dependencies.iter_mut().filter(|d| d.is_compile_scoped()) {
            for exclusion in &self.exclusions {
                if !dependency.exclusions.contains(exclusion) {
                    dependency.exclusions.push(exclusion.clone());
                }
            }
        }
    }
}
