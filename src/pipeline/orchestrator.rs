use super::anonymize::PathAnonymizer;
use super::phase_trait::apply_steps;
use super::steps::{effective_model_steps, original_model_steps};
use crate::config::{ConfigFile, ProjectCoordinates, SanitizerConfig};
use crate::error::SanitizerError;
use crate::fs::FileSystem;
use crate::loader::{LoadRequest, ModelLoader, Properties};
use crate::model::{read_pom, write_pom, PomModel};
use crate::module_name::ModuleNameResolver;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_POM: &str = "pom.xml";
pub const SANITIZED_POM: &str = "pom.xml.sanitized";
const INTERMEDIATE_SUFFIX: &str = ".modified";

/// What to sanitize and where to put the result
#[derive(Debug, Clone, Default)]
pub struct SanitizeRequest {
    pub basedir: PathBuf,
    /// Defaults to `<basedir>/pom.xml`
    pub pom: Option<PathBuf>,
    /// Defaults to `<basedir>/pom.xml.sanitized`
    pub output: Option<PathBuf>,
    pub module: Option<String>,
    pub config: Option<PathBuf>,
    /// Passed to the effective-model build
    pub properties: Properties,
}

impl SanitizeRequest {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            ..Default::default()
        }
    }

    pub fn pom_path(&self) -> PathBuf {
        self.pom
            .clone()
            .unwrap_or_else(|| self.basedir.join(DEFAULT_POM))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.basedir.join(SANITIZED_POM))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub output: PathBuf,
    pub intermediate: PathBuf,
    pub config_source: String,
    pub module_name: String,
    pub coordinates: String,
    pub removed_dependencies: Vec<String>,
    pub removed_plugins: Vec<String>,
    pub activated_profiles: Vec<String>,
    pub anonymized_paths: usize,
}

/// Derives the sanitized descriptor of a single project.
///
/// The original model is rewritten and written next to the descriptor as
/// `<pom>.modified`, which is then handed to the loader to obtain the effective
/// model. That one is rewritten again, written to the output path and finally
/// stripped of the absolute project directory.
pub struct Sanitizer<'a> {
    fs: &'a dyn FileSystem,
    loader: &'a dyn ModelLoader,
}

impl<'a> Sanitizer<'a> {
    pub fn new(fs: &'a dyn FileSystem, loader: &'a dyn ModelLoader) -> Self {
        Self { fs, loader }
    }

    pub fn run(&self, request: &SanitizeRequest) -> Result<SanitizeReport, SanitizerError> {
        let pom = request.pom_path();
        info!("Sanitizing {}", pom.display());

        let mut model = read_pom(self.fs, &pom)?;
        let (file, source) =
            ConfigFile::load(self.fs, &request.basedir, request.config.as_deref())?;
        debug!("Configuration source: {}", source);

        let coordinates = ProjectCoordinates::from_model(&model)?;
        let explicit = request.module.as_deref().or(file.module.as_deref());
        let module_name = ModuleNameResolver::new(self.fs, &request.basedir)
            .resolve(explicit, &coordinates.artifact_id)?;
        info!("Module name: {}", module_name);
        let config = SanitizerConfig::resolve(file, &coordinates, module_name)?;

        let mut removed_dependencies = removed_artifacts(&model, &config);
        apply_steps(&mut model, &original_model_steps(&config));

        let intermediate = intermediate_path(&pom);
        write_pom(self.fs, &intermediate, &model)?;
        debug!("{} has been generated", intermediate.display());

        let mut effective = self
            .loader
            .load(
                &intermediate,
                &LoadRequest::with_properties(request.properties.clone()),
            )?;

        for id in removed_artifacts(&effective, &config) {
            if !removed_dependencies.contains(&id) {
                removed_dependencies.push(id);
            }
        }
        let removed_plugins = declared_plugins(&effective, &config.excluded_plugins);
        let activated_profiles = config
            .profiles
            .iter()
            .filter(|id| effective.profiles.iter().any(|p| &&p.id == id))
            .cloned()
            .collect();

        apply_steps(&mut effective, &effective_model_steps(&config, &model));

        let output = request.output_path();
        write_pom(self.fs, &output, &effective)?;
        let anonymized_paths = PathAnonymizer::new(self.fs).anonymize(&output, &request.basedir)?;
        info!("{} has been generated", output.display());

        Ok(SanitizeReport {
            output,
            intermediate,
            config_source: source.to_string(),
            module_name: config.module_name.clone(),
            coordinates: config.coordinates(),
            removed_dependencies,
            removed_plugins,
            activated_profiles,
            anonymized_paths,
        })
    }
}

/// `pom.xml` becomes `pom.xml.modified`
pub fn intermediate_path(pom: &Path) -> PathBuf {
    let mut name = OsString::from(pom.as_os_str());
    name.push(INTERMEDIATE_SUFFIX);
    PathBuf::from(name)
}

fn removed_artifacts(model: &PomModel, config: &SanitizerConfig) -> Vec<String> {
    let mut removed: Vec<String> = Vec::new();
    for dependency in &model.dependencies {
        let excluded = config
            .exclusions
            .iter()
            .any(|e| e.artifact_id == dependency.artifact_id);
        if excluded && !removed.contains(&dependency.artifact_id) {
            removed.push(dependency.artifact_id.clone());
        }
    }
    removed
}

fn declared_plugins(model: &PomModel, ids: &[String]) -> Vec<String> {
    ids.iter()
        .filter(|id| model.plugins().iter().any(|p| &&p.artifact_id == id))
        .cloned()
        .collect()
}
