use crate::model::PomModel;
use std::time::Instant;
use tracing::{debug, info};

/// One rewrite of the structured descriptor.
///
/// Steps are infallible and touch only the subtree they document, so each can be
/// exercised alone against a hand-built model.
pub trait ModelStep {
    fn name(&self) -> &'static str;

    fn apply(&self, model: &mut PomModel);
}

/// Applies `steps` in order
pub fn apply_steps(model: &mut PomModel, steps: &[Box<dyn ModelStep>]) {
    for step in steps {
        info!("Step: {}", step.name());
        let start = Instant::now();
        step.apply(model);
        debug!("Step {} complete in {:?}", step.name(), start.elapsed());
    }
}
