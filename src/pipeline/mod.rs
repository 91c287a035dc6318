//! The sanitize pipeline: rewrite the original model, reload it as an
//! effective model, rewrite that, write it and anonymize paths.

pub mod anonymize;
pub mod orchestrator;
pub mod phase_trait;
pub mod steps;

pub use anonymize::{PathAnonymizer, BASEDIR_PLACEHOLDER};
pub use orchestrator::{
    intermediate_path, SanitizeReport, SanitizeRequest, Sanitizer, DEFAULT_POM, SANITIZED_POM,
};
pub use phase_trait::{apply_steps, ModelStep};
