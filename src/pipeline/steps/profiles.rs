use crate::model::{Activation, PomModel};
use crate::pipeline::phase_trait::ModelStep;

/// Marks the listed profiles active by default, creating their activation
/// block when missing. Existing triggers are kept.
pub struct ActivateProfiles {
    pub ids: Vec<String>,
}

impl ModelStep for ActivateProfiles {
    fn name(&self) -> &'static str {
        "ActivateProfiles"
    }

    fn apply(&self, model: &mut PomModel) {
        for profile in model.profiles.iter_mut().filter(|p| self.ids.contains(&p.id)) {
            profile
                .activation
                .get_or_insert_with(Activation::default)
                .active_by_default = true;
        }
    }
}
