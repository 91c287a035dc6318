//! POM parsing with roxmltree

use super::{
    Activation, Build, Dependency, DependencyManagement, Exclusion, ModelError, Parent, Plugin,
    PluginManagement, PomModel, Profile, RawElement, Resource,
};
use crate::error::SanitizerError;
use crate::fs::FileSystem;
use roxmltree::{Document, Node};
use std::path::Path;
use tracing::debug;

/// Reads and parses the descriptor at `path`
pub fn read_pom(fs: &dyn FileSystem, path: &Path) -> Result<PomModel, SanitizerError> {
    debug!("Reading descriptor {}", path.display());
    let content = fs
        .read_to_string(path)
        .map_err(|e| SanitizerError::descriptor_load(path, format!("{:#}", e)))?;
    parse_pom(&content).map_err(|e| SanitizerError::descriptor_load(path, e.to_string()))
}

pub fn parse_pom(content: &str) -> Result<PomModel, ModelError> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();

    if root.tag_name().name() != "project" {
        return Err(ModelError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    let mut model = PomModel::default();
    for child in elements(root) {
        match child.tag_name().name() {
            "modelVersion" => model.model_version = text(child),
            "parent" => model.parent = Some(parse_parent(child)?),
            "groupId" => model.group_id = text(child),
            "artifactId" => model.artifact_id = text(child),
            "version" => model.version = text(child),
            "packaging" => model.packaging = text(child),
            "name" => model.name = text(child),
            "description" => model.description = text(child),
            "url" => model.url = text(child),
            "properties" => model.properties = parse_properties(child),
            "dependencyManagement" => {
                model.dependency_management = Some(DependencyManagement {
                    dependencies: match element(child, "dependencies") {
                        Some(deps) => parse_dependencies(deps)?,
                        None => Vec::new(),
                    },
                })
            }
            "dependencies" => model.dependencies = parse_dependencies(child)?,
            "build" => model.build = Some(parse_build(content, child)?),
            "profiles" => model.profiles = parse_profiles(content, child)?,
            _ => model.extra.push(raw(content, child)),
        }
    }

    Ok(model)
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|n| n.has_tag_name(name))
}

fn text(node: Node) -> Option<String> {
    node.text()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn child_text(node: Node, name: &str) -> Option<String> {
    element(node, name).and_then(text)
}

fn required(node: Node, name: &str) -> Result<String, ModelError> {
    child_text(node, name).ok_or_else(|| ModelError::MissingElement {
        parent: node.tag_name().name().to_string(),
        element: name.to_string(),
    })
}

fn raw(content: &str, node: Node) -> RawElement {
    RawElement::new(node.tag_name().name(), &content[node.range()])
}

fn string_list(node: Node, item: &str) -> Vec<String> {
    elements(node)
        .filter(|n| n.has_tag_name(item))
        .filter_map(text)
        .collect()
}

fn parse_parent(node: Node) -> Result<Parent, ModelError> {
    Ok(Parent {
        group_id: required(node, "groupId")?,
        artifact_id: required(node, "artifactId")?,
        version: child_text(node, "version"),
        // An empty <relativePath/> is meaningful: it disables the local lookup
        relative_path: element(node, "relativePath")
            .map(|n| n.text().unwrap_or_default().trim().to_string()),
    })
}

fn parse_properties(node: Node) -> Vec<(String, String)> {
    elements(node)
        .map(|n| {
            (
                n.tag_name().name().to_string(),
                n.text().map(|s| s.trim().to_string()).unwrap_or_default(),
            )
        })
        .collect()
}

fn parse_dependencies(node: Node) -> Result<Vec<Dependency>, ModelError> {
    elements(node)
        .filter(|n| n.has_tag_name("dependency"))
        .map(parse_dependency)
        .collect()
}

fn parse_dependency(node: Node) -> Result<Dependency, ModelError> {
    let exclusions = match element(node, "exclusions") {
        Some(list) => elements(list)
            .filter(|n| n.has_tag_name("exclusion"))
            .map(|n| {
                Ok(Exclusion {
                    group_id: required(n, "groupId")?,
                    artifact_id: required(n, "artifactId")?,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?,
        None => Vec::new(),
    };

    Ok(Dependency {
        group_id: required(node, "groupId")?,
        artifact_id: required(node, "artifactId")?,
        version: child_text(node, "version"),
        dependency_type: child_text(node, "type"),
        classifier: child_text(node, "classifier"),
        scope: child_text(node, "scope"),
        system_path: child_text(node, "systemPath"),
        optional: child_text(node, "optional"),
        exclusions,
    })
}

fn parse_resources(node: Node, item: &str) -> Vec<Resource> {
    elements(node)
        .filter(|n| n.has_tag_name(item))
        .map(|n| Resource {
            directory: child_text(n, "directory"),
            target_path: child_text(n, "targetPath"),
            filtering: child_text(n, "filtering"),
            includes: element(n, "includes")
                .map(|l| string_list(l, "include"))
                .unwrap_or_default(),
            excludes: element(n, "excludes")
                .map(|l| string_list(l, "exclude"))
                .unwrap_or_default(),
        })
        .collect()
}

fn parse_plugins(content: &str, node: Node) -> Result<Vec<Plugin>, ModelError> {
    elements(node)
        .filter(|n| n.has_tag_name("plugin"))
        .map(|n| {
            let mut plugin = Plugin {
                artifact_id: required(n, "artifactId")?,
                ..Default::default()
            };
            for child in elements(n) {
                match child.tag_name().name() {
                    "groupId" => plugin.group_id = text(child),
                    "artifactId" => {}
                    "version" => plugin.version = text(child),
                    _ => plugin.body.push(raw(content, child)),
                }
            }
            Ok(plugin)
        })
        .collect()
}

fn parse_build(content: &str, node: Node) -> Result<Build, ModelError> {
    let mut build = Build::default();
    for child in elements(node) {
        match child.tag_name().name() {
            "sourceDirectory" => build.source_directory = text(child),
            "testSourceDirectory" => build.test_source_directory = text(child),
            "outputDirectory" => build.output_directory = text(child),
            "testOutputDirectory" => build.test_output_directory = text(child),
            "defaultGoal" => build.default_goal = text(child),
            "resources" => build.resources = parse_resources(child, "resource"),
            "testResources" => build.test_resources = parse_resources(child, "testResource"),
            "directory" => build.directory = text(child),
            "finalName" => build.final_name = text(child),
            "pluginManagement" => {
                build.plugin_management = Some(PluginManagement {
                    plugins: match element(child, "plugins") {
                        Some(plugins) => parse_plugins(content, plugins)?,
                        None => Vec::new(),
                    },
                })
            }
            "plugins" => build.plugins = parse_plugins(content, child)?,
            _ => build.extra.push(raw(content, child)),
        }
    }
    Ok(build)
}

fn parse_profiles(content: &str, node: Node) -> Result<Vec<Profile>, ModelError> {
    let mut profiles = Vec::new();
    for profile_node in elements(node).filter(|n| n.has_tag_name("profile")) {
        // Maven names anonymous profiles "default"
        let mut profile = Profile::new("default");
        for child in elements(profile_node) {
            match child.tag_name().name() {
                "id" => {
                    if let Some(id) = text(child) {
                        profile.id = id;
                    }
                }
                "activation" => {
                    let mut activation = Activation::default();
                    for trigger in elements(child) {
                        if trigger.has_tag_name("activeByDefault") {
                            activation.active_by_default = text(trigger)
                                .map(|v| v.eq_ignore_ascii_case("true"))
                                .unwrap_or(false);
                        } else {
                            activation.triggers.push(raw(content, trigger));
                        }
                    }
                    profile.activation = Some(activation);
                }
                _ => profile.body.push(raw(content, child)),
            }
        }
        profiles.push(profile);
    }
    Ok(profiles)
}
