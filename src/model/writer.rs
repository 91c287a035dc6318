//! POM serialization
//!
//! Produces an indented Maven 4.0.0 document. Raw elements are emitted exactly as
//! they were read, only their first line is re-indented.

use super::{Build, Dependency, Plugin, PomModel, Profile, RawElement, Resource};
use crate::error::SanitizerError;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const PROJECT_OPEN: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">"#;
const INDENT: &str = "  ";

/// Serializes `model` and replaces the file at `path` with it
pub fn write_pom(fs: &dyn FileSystem, path: &Path, model: &PomModel) -> Result<(), SanitizerError> {
    debug!("Writing descriptor {}", path.display());
    fs.write_string(path, &render_pom(model))
        .map_err(|e| SanitizerError::write(path, format!("{:#}", e)))
}

pub fn render_pom(model: &PomModel) -> String {
    let mut xml = XmlBuffer::default();
    xml.line(XML_DECLARATION);
    xml.line(PROJECT_OPEN);
    xml.depth += 1;

    xml.leaf_opt("modelVersion", &model.model_version);
    if let Some(parent) = &model.parent {
        xml.open("parent");
        xml.leaf("groupId", &parent.group_id);
        xml.leaf("artifactId", &parent.artifact_id);
        xml.leaf_opt("version", &parent.version);
        xml.leaf_opt("relativePath", &parent.relative_path);
        xml.close("parent");
    }
    xml.leaf_opt("groupId", &model.group_id);
    xml.leaf_opt("artifactId", &model.artifact_id);
    xml.leaf_opt("version", &model.version);
    xml.leaf_opt("packaging", &model.packaging);
    xml.leaf_opt("name", &model.name);
    xml.leaf_opt("description", &model.description);
    xml.leaf_opt("url", &model.url);
    xml.raw_all(&model.extra);

    if !model.properties.is_empty() {
        xml.open("properties");
        for (key, value) in &model.properties {
            xml.leaf(key, value);
        }
        xml.close("properties");
    }

    if let Some(management) = &model.dependency_management {
        xml.open("dependencyManagement");
        write_dependencies(&mut xml, &management.dependencies);
        xml.close("dependencyManagement");
    }
    write_dependencies(&mut xml, &model.dependencies);

    if let Some(build) = &model.build {
        write_build(&mut xml, build);
    }

    if !model.profiles.is_empty() {
        xml.open("profiles");
        for profile in &model.profiles {
            write_profile(&mut xml, profile);
        }
        xml.close("profiles");
    }

    xml.depth -= 1;
    xml.line("</project>");
    xml.out
}

fn write_dependencies(xml: &mut XmlBuffer, dependencies: &[Dependency]) {
    if dependencies.is_empty() {
        return;
    }
    xml.open("dependencies");
    for dep in dependencies {
        xml.open("dependency");
        xml.leaf("groupId", &dep.group_id);
        xml.leaf("artifactId", &dep.artifact_id);
        xml.leaf_opt("version", &dep.version);
        xml.leaf_opt("type", &dep.dependency_type);
        xml.leaf_opt("classifier", &dep.classifier);
        xml.leaf_opt("scope", &dep.scope);
        xml.leaf_opt("systemPath", &dep.system_path);
        if !dep.exclusions.is_empty() {
            xml.open("exclusions");
            for exclusion in &dep.exclusions {
                xml.open("exclusion");
                xml.leaf("groupId", &exclusion.group_id);
                xml.leaf("artifactId", &exclusion.artifact_id);
                xml.close("exclusion");
            }
            xml.close("exclusions");
        }
        xml.leaf_opt("optional", &dep.optional);
        xml.close("dependency");
    }
    xml.close("dependencies");
}

fn write_resources(xml: &mut XmlBuffer, list: &str, item: &str, resources: &[Resource]) {
    if resources.is_empty() {
        return;
    }
    xml.open(list);
    for resource in resources {
        xml.open(item);
        xml.leaf_opt("targetPath", &resource.target_path);
        xml.leaf_opt("filtering", &resource.filtering);
        xml.leaf_opt("directory", &resource.directory);
        xml.list("includes", "include", &resource.includes);
        xml.list("excludes", "exclude", &resource.excludes);
        xml.close(item);
    }
    xml.close(list);
}

fn write_plugins(xml: &mut XmlBuffer, plugins: &[Plugin]) {
    if plugins.is_empty() {
        return;
    }
    xml.open("plugins");
    for plugin in plugins {
        xml.open("plugin");
        xml.leaf_opt("groupId", &plugin.group_id);
        xml.leaf("artifactId", &plugin.artifact_id);
        xml.leaf_opt("version", &plugin.version);
        xml.raw_all(&plugin.body);
        xml.close("plugin");
    }
    xml.close("plugins");
}

fn write_build(xml: &mut XmlBuffer, build: &Build) {
    xml.open("build");
    xml.leaf_opt("sourceDirectory", &build.source_directory);
    xml.leaf_opt("testSourceDirectory", &build.test_source_directory);
    xml.leaf_opt("outputDirectory", &build.output_directory);
    xml.leaf_opt("testOutputDirectory", &build.test_output_directory);
    xml.leaf_opt("defaultGoal", &build.default_goal);
    write_resources(xml, "resources", "resource", &build.resources);
    write_resources(xml, "testResources", "testResource", &build.test_resources);
    xml.leaf_opt("directory", &build.directory);
    xml.leaf_opt("finalName", &build.final_name);
    xml.raw_all(&build.extra);
    if let Some(management) = &build.plugin_management {
        xml.open("pluginManagement");
        write_plugins(xml, &management.plugins);
        xml.close("pluginManagement");
    }
    write_plugins(xml, &build.plugins);
    xml.close("build");
}

fn write_profile(xml: &mut XmlBuffer, profile: &Profile) {
    xml.open("profile");
    xml.leaf("id", &profile.id);
    if let Some(activation) = &profile.activation {
        if !activation.active_by_default && activation.triggers.is_empty() {
            xml.line("<activation/>");
        } else {
            xml.open("activation");
            if activation.active_by_default {
                xml.leaf("activeByDefault", "true");
            }
            xml.raw_all(&activation.triggers);
            xml.close("activation");
        }
    }
    xml.raw_all(&profile.body);
    xml.close("profile");
}

#[derive(Default)]
struct XmlBuffer {
    out: String,
    depth: usize,
}

impl XmlBuffer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, name: &str) {
        self.line(&format!("<{}>", name));
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth -= 1;
        self.line(&format!("</{}>", name));
    }

    fn leaf(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.line(&format!("<{}/>", name));
        } else {
            self.line(&format!("<{0}>{1}</{0}>", name, escape(value)));
        }
    }

    fn leaf_opt(&mut self, name: &str, value: &Option<String>) {
        if let Some(value) = value {
            self.leaf(name, value);
        }
    }

    fn list(&mut self, list: &str, item: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        self.open(list);
        for value in values {
            self.leaf(item, value);
        }
        self.close(list);
    }

    fn raw(&mut self, element: &RawElement) {
        self.line(element.xml.trim());
    }

    fn raw_all(&mut self, elements: &[RawElement]) {
        for element in elements {
            self.raw(element);
        }
    }
}

pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
