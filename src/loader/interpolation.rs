//! `${...}` expression expansion over a whole model

use super::Properties;
use crate::model::writer::escape;
use crate::model::{Build, Dependency, Plugin, PomModel, RawElement, Resource};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Nested expressions are expanded at most this many times
const MAX_PASSES: usize = 8;

fn expression() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}$]+)\}").expect("expression pattern is valid"))
}

/// Values an expression can resolve to, in decreasing precedence: user
/// properties, model properties, then `project.*` built-ins.
pub struct Interpolator<'a> {
    user_properties: &'a Properties,
    model_properties: Vec<(String, String)>,
    builtins: BTreeMap<String, String>,
}

impl<'a> Interpolator<'a> {
    /// Snapshots `model`; later changes to it are not seen
    pub fn new(model: &PomModel, basedir: &Path, user_properties: &'a Properties) -> Self {
        Self {
            user_properties,
            model_properties: model.properties.clone(),
            builtins: builtins(model, basedir),
        }
    }

    pub fn lookup(&self, expression: &str) -> Option<String> {
        if let Some(value) = self.user_properties.get(expression) {
            return Some(value.clone());
        }
        if let Some((_, value)) = self.model_properties.iter().find(|(k, _)| k == expression) {
            return Some(value.clone());
        }
        let key = expression
            .strip_prefix("project.")
            .or_else(|| expression.strip_prefix("pom."))
            .unwrap_or(expression);
        self.builtins.get(key).cloned()
    }

    /// Expands every known expression in `value`. Unknown ones stay verbatim.
    pub fn expand(&self, value: &str) -> String {
        self.expand_with(value, false)
    }

    /// Same as [`expand`](Self::expand) for XML markup: substituted values are
    /// escaped.
    pub fn expand_markup(&self, value: &str) -> String {
        self.expand_with(value, true)
    }

    fn expand_with(&self, value: &str, markup: bool) -> String {
        let mut current = value.to_string();
        for _ in 0..MAX_PASSES {
            if !current.contains("${") {
                break;
            }
            let next = expression()
                .replace_all(&current, |caps: &Captures| match self.lookup(&caps[1]) {
                    Some(resolved) if markup => escape(&resolved),
                    Some(resolved) => resolved,
                    None => caps[0].to_string(),
                })
                .into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    pub fn apply(&self, model: &mut PomModel) {
        for value in [
            &mut model.group_id,
            &mut model.artifact_id,
            &mut model.version,
            &mut model.packaging,
            &mut model.name,
            &mut model.description,
            &mut model.url,
        ] {
            self.optional(value);
        }
        if let Some(parent) = model.parent.as_mut() {
            self.optional(&mut parent.version);
            self.optional(&mut parent.relative_path);
        }
        for (_, value) in &mut model.properties {
            *value = self.expand(value);
        }
        if let Some(management) = model.dependency_management.as_mut() {
            self.dependencies(&mut management.dependencies);
        }
        self.dependencies(&mut model.dependencies);
        if let Some(build) = model.build.as_mut() {
            self.build(build);
        }
        for profile in &mut model.profiles {
            if let Some(activation) = profile.activation.as_mut() {
                self.raw(&mut activation.triggers);
            }
            self.raw(&mut profile.body);
        }
        self.raw(&mut model.extra);
    }

    fn optional(&self, value: &mut Option<String>) {
        if let Some(v) = value.as_mut() {
            *v = self.expand(v);
        }
    }

    fn raw(&self, elements: &mut [RawElement]) {
        for element in elements {
            element.xml = self.expand_markup(&element.xml);
        }
    }

    fn dependencies(&self, dependencies: &mut [Dependency]) {
        for dependency in dependencies {
            dependency.group_id = self.expand(&dependency.group_id);
            dependency.artifact_id = self.expand(&dependency.artifact_id);
            for value in [
                &mut dependency.version,
                &mut dependency.dependency_type,
                &mut dependency.classifier,
                &mut dependency.scope,
                &mut dependency.system_path,
                &mut dependency.optional,
            ] {
                self.optional(value);
            }
        }
    }

    fn resources(&self, resources: &mut [Resource]) {
        for resource in resources {
            self.optional(&mut resource.directory);
            self.optional(&mut resource.target_path);
            self.optional(&mut resource.filtering);
            for pattern in resource.includes.iter_mut().chain(resource.excludes.iter_mut()) {
                *pattern = self.expand(pattern);
            }
        }
    }

    fn plugins(&self, plugins: &mut [Plugin]) {
        for plugin in plugins {
            self.optional(&mut plugin.group_id);
            plugin.artifact_id = self.expand(&plugin.artifact_id);
            self.optional(&mut plugin.version);
            self.raw(&mut plugin.body);
        }
    }

    fn build(&self, build: &mut Build) {
        for value in [
            &mut build.source_directory,
            &mut build.test_source_directory,
            &mut build.output_directory,
            &mut build.test_output_directory,
            &mut build.default_goal,
            &mut build.directory,
            &mut build.final_name,
        ] {
            self.optional(value);
        }
        self.resources(&mut build.resources);
        self.resources(&mut build.test_resources);
        if let Some(management) = build.plugin_management.as_mut() {
            self.plugins(&mut management.plugins);
        }
        self.plugins(&mut build.plugins);
        self.raw(&mut build.extra);
    }
}

fn builtins(model: &PomModel, basedir: &Path) -> BTreeMap<String, String> {
    let basedir_str = basedir.to_string_lossy().into_owned();
    let mut values = BTreeMap::new();
    let mut set = |key: &str, value: Option<&str>| {
        if let Some(value) = value {
            values.insert(key.to_string(), value.to_string());
        }
    };

    set("groupId", model.effective_group_id());
    set("artifactId", model.artifact_id.as_deref());
    set("version", model.effective_version());
    set("packaging", Some(model.packaging.as_deref().unwrap_or("jar")));
    set("name", model.name.as_deref());
    set("description", model.description.as_deref());
    set("url", model.url.as_deref());
    set("basedir", Some(&basedir_str));
    set("baseUri", Some(&format!("file://{}/", basedir_str)));
    if let Some(parent) = &model.parent {
        set("parent.groupId", Some(&parent.group_id));
        set("parent.artifactId", Some(&parent.artifact_id));
        set("parent.version", parent.version.as_deref());
    }

    let build = model.build.clone().unwrap_or_default();
    let directory = build
        .directory
        .clone()
        .unwrap_or_else(|| super::local::DEFAULT_BUILD_DIRECTORY.to_string());
    set("build.directory", Some(&align(&directory, &basedir_str)));
    set(
        "build.outputDirectory",
        Some(&align(
            &build
                .output_directory
                .clone()
                .unwrap_or_else(|| format!("{}/classes", directory)),
            &basedir_str,
        )),
    );
    set(
        "build.testOutputDirectory",
        Some(&align(
            &build
                .test_output_directory
                .clone()
                .unwrap_or_else(|| format!("{}/test-classes", directory)),
            &basedir_str,
        )),
    );
    set(
        "build.sourceDirectory",
        Some(&align(
            build
                .source_directory
                .as_deref()
                .unwrap_or(super::local::DEFAULT_SOURCE_DIRECTORY),
            &basedir_str,
        )),
    );
    set(
        "build.finalName",
        Some(
            build
                .final_name
                .as_deref()
                .unwrap_or("${project.artifactId}-${project.version}"),
        ),
    );
    values
}

/// Joins relative paths onto `basedir`, leaving absolute paths and
/// expressions untouched
fn align(path: &str, basedir: &str) -> String {
    if path.starts_with('$') || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        format!("{}/{}", basedir.trim_end_matches('/'), path)
    }
}
