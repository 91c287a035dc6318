//! pom-sanitizer - derive a sanitized Maven descriptor and rebuild from it
//!
//! A project's `pom.xml` is rewritten into `pom.xml.sanitized` following the
//! rules of a `sanitizer-config.yml`: coordinates are overridden, excluded
//! dependencies are removed and excluded everywhere else, resources and plugins
//! are filtered, profiles are activated, the parent and dependency management
//! are flattened into the file and absolute paths are replaced by
//! `${project.basedir}`. The sanitized descriptor can then drive a
//! single-project Maven build.
//!
//! # Example
//!
//! ```no_run
//! use pom_sanitizer::fs::RealFileSystem;
//! use pom_sanitizer::loader::LocalModelBuilder;
//! use pom_sanitizer::pipeline::{SanitizeRequest, Sanitizer};
//!
//! let fs = RealFileSystem;
//! let loader = LocalModelBuilder::new(&fs);
//! let report = Sanitizer::new(&fs, &loader)
//!     .run(&SanitizeRequest::new("/path/to/project"))
//!     .unwrap();
//! println!("{} written", report.output.display());
//! ```
//!
//! # Project Structure
//!
//! - [`model`]: the structured descriptor and its XML reader and writer
//! - [`config`]: the rule file and the resolved rule set
//! - [`pipeline`]: the rewriting steps, path anonymization and the sanitize run
//! - [`loader`]: effective-model construction, in process or through Maven
//! - [`reinvoke`]: the rebuild from the sanitized descriptor

pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod fs;
pub mod loader;
pub mod model;
pub mod module_name;
pub mod pipeline;
pub mod reinvoke;
pub mod util;

pub use config::{ConfigError, ConfigFile, SanitizerConfig};
pub use error::SanitizerError;
pub use loader::{LocalModelBuilder, MavenModelBuilder, ModelLoader};
pub use model::PomModel;
pub use pipeline::{SanitizeReport, SanitizeRequest, Sanitizer};
pub use reinvoke::{BuildExecutor, BuildReinvoker, MavenCliExecutor};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
