//! In-process effective model construction

use super::interpolation::Interpolator;
use super::{LoadRequest, ModelLoader};
use crate::error::SanitizerError;
use crate::fs::FileSystem;
use crate::model::{
    read_pom, Build, Dependency, Parent, Plugin, PluginManagement, PomModel, RawElement, Resource,
    DEFAULT_PLUGIN_GROUP,
};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

pub(super) const DEFAULT_BUILD_DIRECTORY: &str = "target";
pub(super) const DEFAULT_SOURCE_DIRECTORY: &str = "src/main/java";
const DEFAULT_TEST_SOURCE_DIRECTORY: &str = "src/test/java";
const DEFAULT_RESOURCES: &str = "src/main/resources";
const DEFAULT_TEST_RESOURCES: &str = "src/test/resources";
const DEFAULT_RELATIVE_PATH: &str = "../pom.xml";
const POM_FILE_NAME: &str = "pom.xml";
const MAX_PARENT_DEPTH: usize = 16;

/// Top-level elements a child never inherits
const NON_INHERITED: &[&str] = &["modules", "prerequisites"];

/// Builds the effective model without Maven.
///
/// Parents are only looked up on disk through `relativePath`; there is no
/// repository access, so a declared parent that cannot be found locally is a
/// `DescriptorLoad` error.
pub struct LocalModelBuilder<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> LocalModelBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    fn inherit(&self, pom: &Path, model: PomModel, depth: usize) -> Result<PomModel, SanitizerError> {
        let Some(reference) = model.parent.clone() else {
            return Ok(model);
        };
        if depth >= MAX_PARENT_DEPTH {
            return Err(unresolved_parent(
                pom,
                &reference,
                &format!("parent chain is deeper than {}", MAX_PARENT_DEPTH),
            ));
        }

        let (parent_pom, parent) = self.locate_parent(pom, &reference)?;
        debug!("Inheriting from {}", parent_pom.display());
        let parent = self.inherit(&parent_pom, parent, depth + 1)?;
        Ok(merge(model, parent))
    }

    fn locate_parent(
        &self,
        pom: &Path,
        reference: &Parent,
    ) -> Result<(PathBuf, PomModel), SanitizerError> {
        let relative = reference
            .relative_path
            .as_deref()
            .unwrap_or(DEFAULT_RELATIVE_PATH);
        if relative.is_empty() {
            return Err(unresolved_parent(pom, reference, "relativePath is empty"));
        }

        let mut candidate = normalize(&base_directory(pom).join(relative));
        if self.fs.is_dir(&candidate) {
            candidate = candidate.join(POM_FILE_NAME);
        }
        if !self.fs.is_file(&candidate) {
            return Err(unresolved_parent(
                pom,
                reference,
                &format!("{} does not exist", candidate.display()),
            ));
        }

        let parent = read_pom(self.fs, &candidate)?;
        let matches = parent.effective_group_id() == Some(reference.group_id.as_str())
            && parent.artifact_id.as_deref() == Some(reference.artifact_id.as_str());
        if !matches {
            return Err(unresolved_parent(
                pom,
                reference,
                &format!("{} is {}", candidate.display(), parent.coordinates()),
            ));
        }
        Ok((candidate, parent))
    }
}

/// A declared parent the local builder cannot inherit from
fn unresolved_parent(pom: &Path, reference: &Parent, reason: &str) -> SanitizerError {
    warn!(
        "Parent {}:{} of {} is not available locally: {}",
        reference.group_id,
        reference.artifact_id,
        pom.display(),
        reason
    );
    SanitizerError::descriptor_load(
        pom,
        format!(
            "parent {}:{}:{} cannot be resolved locally ({}), use --resolver maven",
            reference.group_id,
            reference.artifact_id,
            reference.version.as_deref().unwrap_or("?"),
            reason
        ),
    )
}

impl ModelLoader for LocalModelBuilder<'_> {
    fn load(&self, pom: &Path, request: &LoadRequest) -> Result<PomModel, SanitizerError> {
        let model = read_pom(self.fs, pom)?;
        let mut model = self.inherit(pom, model, 0)?;
        let basedir = base_directory(pom);

        if !request.active_profiles.is_empty() || !request.inactive_profiles.is_empty() {
            debug!("Profile selection is not applied by the local builder");
        }

        Interpolator::new(&model, &basedir, &request.user_properties).apply(&mut model);
        apply_build_defaults(&mut model, &basedir);
        inject_management(&mut model);
        Ok(model)
    }
}

/// Directory holding `pom`; `.` for a bare file name
fn base_directory(pom: &Path) -> PathBuf {
    match pom.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Lexically resolves `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn merge(mut child: PomModel, parent: PomModel) -> PomModel {
    let child_artifact = child.artifact_id.clone().unwrap_or_default();

    child.model_version = child.model_version.or(parent.model_version);
    child.group_id = child.group_id.or(parent.group_id);
    child.version = child.version.or(parent.version);
    child.name = child.name.or(parent.name);
    child.description = child.description.or(parent.description);
    if child.url.is_none() {
        child.url = parent
            .url
            .map(|url| format!("{}/{}", url.trim_end_matches('/'), child_artifact));
    }

    let mut properties = parent.properties;
    for (key, value) in child.properties {
        match properties.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => properties.push((key, value)),
        }
    }
    child.properties = properties;

    child.dependency_management = match (child.dependency_management, parent.dependency_management) {
        (Some(mut own), Some(inherited)) => {
            own.dependencies = merge_dependencies(own.dependencies, inherited.dependencies);
            Some(own)
        }
        (own, inherited) => own.or(inherited),
    };
    child.dependencies = merge_dependencies(child.dependencies, parent.dependencies);

    child.build = match (child.build, parent.build) {
        (Some(own), Some(inherited)) => Some(merge_build(own, inherited)),
        (own, inherited) => own.or(inherited),
    };

    child.extra = merge_raw(
        child.extra,
        parent
            .extra
            .into_iter()
            .filter(|e| !NON_INHERITED.contains(&e.name.as_str()))
            .collect(),
    );
    child
}

/// Child entries first, then inherited ones the child does not redeclare
fn merge_dependencies(own: Vec<Dependency>, inherited: Vec<Dependency>) -> Vec<Dependency> {
    let mut merged = own;
    for dependency in inherited {
        let key = dependency.management_key();
        if !merged.iter().any(|d| d.management_key() == key) {
            merged.push(dependency);
        }
    }
    merged
}

/// Inherited plugins keep their position and are replaced by a child
/// declaration with the same key; child-only plugins follow.
fn merge_plugins(own: Vec<Plugin>, inherited: Vec<Plugin>) -> Vec<Plugin> {
    let mut own: Vec<Option<Plugin>> = own.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(own.len() + inherited.len());
    for plugin in inherited {
        let key = plugin.key();
        let replacement = own
            .iter_mut()
            .find(|p| p.as_ref().is_some_and(|p| p.key() == key))
            .and_then(Option::take);
        merged.push(replacement.unwrap_or(plugin));
    }
    merged.extend(own.into_iter().flatten());
    merged
}

fn merge_raw(own: Vec<RawElement>, inherited: Vec<RawElement>) -> Vec<RawElement> {
    let mut merged = own;
    for element in inherited {
        if !merged.iter().any(|e| e.name == element.name) {
            merged.push(element);
        }
    }
    merged
}

fn merge_build(own: Build, inherited: Build) -> Build {
    let plugin_management = match (own.plugin_management, inherited.plugin_management) {
        (Some(own), Some(inherited)) => Some(PluginManagement {
            plugins: merge_plugins(own.plugins, inherited.plugins),
        }),
        (own, inherited) => own.or(inherited),
    };
    let non_empty = |own: Vec<Resource>, inherited: Vec<Resource>| {
        if own.is_empty() {
            inherited
        } else {
            own
        }
    };

    Build {
        source_directory: own.source_directory.or(inherited.source_directory),
        test_source_directory: own.test_source_directory.or(inherited.test_source_directory),
        output_directory: own.output_directory.or(inherited.output_directory),
        test_output_directory: own.test_output_directory.or(inherited.test_output_directory),
        default_goal: own.default_goal.or(inherited.default_goal),
        resources: non_empty(own.resources, inherited.resources),
        test_resources: non_empty(own.test_resources, inherited.test_resources),
        directory: own.directory.or(inherited.directory),
        final_name: own.final_name.or(inherited.final_name),
        plugin_management,
        plugins: merge_plugins(own.plugins, inherited.plugins),
        extra: merge_raw(own.extra, inherited.extra),
    }
}

/// Fills in the conventional directories and resources and makes every build
/// path absolute against `basedir`.
fn apply_build_defaults(model: &mut PomModel, basedir: &Path) {
    let artifact_id = model.artifact_id.clone().unwrap_or_default();
    let version = model.effective_version().unwrap_or_default().to_string();
    let build = model.build_mut();

    let directory = absolute(
        basedir,
        build.directory.as_deref().unwrap_or(DEFAULT_BUILD_DIRECTORY),
    );
    let output = build
        .output_directory
        .clone()
        .unwrap_or_else(|| format!("{}/classes", directory));
    let test_output = build
        .test_output_directory
        .clone()
        .unwrap_or_else(|| format!("{}/test-classes", directory));

    build.source_directory = Some(absolute(
        basedir,
        build.source_directory.as_deref().unwrap_or(DEFAULT_SOURCE_DIRECTORY),
    ));
    build.test_source_directory = Some(absolute(
        basedir,
        build
            .test_source_directory
            .as_deref()
            .unwrap_or(DEFAULT_TEST_SOURCE_DIRECTORY),
    ));
    build.output_directory = Some(absolute(basedir, &output));
    build.test_output_directory = Some(absolute(basedir, &test_output));
    build.directory = Some(directory);
    if build.final_name.is_none() {
        build.final_name = Some(format!("{}-{}", artifact_id, version));
    }

    if build.resources.is_empty() {
        build.resources.push(Resource::from_directory(DEFAULT_RESOURCES));
    }
    if build.test_resources.is_empty() {
        build
            .test_resources
            .push(Resource::from_directory(DEFAULT_TEST_RESOURCES));
    }
    for resource in build.resources.iter_mut().chain(build.test_resources.iter_mut()) {
        if let Some(dir) = resource.directory.as_mut() {
            *dir = absolute(basedir, dir);
        }
    }
}

fn absolute(basedir: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        normalize(&basedir.join(path)).to_string_lossy().into_owned()
    }
}

/// Copies managed versions, scopes and exclusions onto the dependencies and
/// plugins that omit them
fn inject_management(model: &mut PomModel) {
    if let Some(management) = &model.dependency_management {
        for dependency in &mut model.dependencies {
            let key = dependency.management_key();
            let Some(managed) = management
                .dependencies
                .iter()
                .find(|m| m.management_key() == key)
            else {
                continue;
            };
            for (value, managed_value) in [
                (&mut dependency.version, &managed.version),
                (&mut dependency.scope, &managed.scope),
                (&mut dependency.system_path, &managed.system_path),
                (&mut dependency.optional, &managed.optional),
            ] {
                if value.is_none() {
                    *value = managed_value.clone();
                }
            }
            if dependency.exclusions.is_empty() {
                dependency.exclusions = managed.exclusions.clone();
            }
        }
    }

    let Some(build) = model.build.as_mut() else {
        return;
    };
    if let Some(management) = build.plugin_management.as_mut() {
        for plugin in &mut management.plugins {
            plugin
                .group_id
                .get_or_insert_with(|| DEFAULT_PLUGIN_GROUP.to_string());
        }
    }
    for plugin in &mut build.plugins {
        plugin
            .group_id
            .get_or_insert_with(|| DEFAULT_PLUGIN_GROUP.to_string());
        if plugin.version.is_some() {
            continue;
        }
        let key = plugin.key();
        plugin.version = build
            .plugin_management
            .as_ref()
            .and_then(|m| m.plugins.iter().find(|p| p.key() == key))
            .and_then(|p| p.version.clone());
    }
}
