//! End-to-end sanitize runs against the vertx-stack fixture

mod support;

use pom_sanitizer::fs::{FileSystem, MockFileSystem, RealFileSystem};
use pom_sanitizer::loader::LocalModelBuilder;
use pom_sanitizer::model::{parse_pom, read_pom, Exclusion};
use pom_sanitizer::pipeline::{SanitizeRequest, Sanitizer};
use pom_sanitizer::{ConfigError, SanitizerError};
use std::fs;
use std::path::{Path, PathBuf};
use support::{copy_fixture, widget_dir};

#[test]
fn test_sanitize_widget_module() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);

    let report = Sanitizer::new(&fs, &loader)
        .run(&SanitizeRequest::new(&basedir))
        .unwrap();

    assert_eq!(report.module_name, "widget");
    assert_eq!(report.coordinates, "io.vertx:vertx-widget:3.5.0-redhat-1");
    assert_eq!(report.removed_dependencies, vec!["legacy"]);
    assert_eq!(report.removed_plugins, vec!["old-plugin"]);
    assert_eq!(report.activated_profiles, vec!["prod"]);
    assert!(report.anonymized_paths > 0);
    assert!(basedir.join("pom.xml.modified").is_file());

    let sanitized = read_pom(&fs, &basedir.join("pom.xml.sanitized")).unwrap();
    assert!(sanitized.parent.is_none());
    assert!(sanitized.dependency_management.is_none());
    assert_eq!(sanitized.group_id.as_deref(), Some("io.vertx"));
    assert_eq!(sanitized.version.as_deref(), Some("3.5.0-redhat-1"));
    assert_eq!(sanitized.name, None);
    assert_eq!(sanitized.description, None);

    let ids: Vec<&str> = sanitized
        .dependencies
        .iter()
        .map(|d| d.artifact_id.as_str())
        .collect();
    assert_eq!(ids, vec!["vertx-core", "junit"]);
    let core = &sanitized.dependencies[0];
    assert_eq!(core.version.as_deref(), Some("3.5.0"));
    assert_eq!(core.exclusions, vec![Exclusion::new("com.acme", "legacy")]);
    let junit = &sanitized.dependencies[1];
    // Unscoped in the original descriptor, so it picked up the exclusion
    // before the managed test scope was injected
    assert_eq!(junit.scope.as_deref(), Some("test"));
    assert_eq!(junit.exclusions, vec![Exclusion::new("com.acme", "legacy")]);

    let plugins: Vec<&str> = sanitized
        .plugins()
        .iter()
        .map(|p| p.artifact_id.as_str())
        .collect();
    assert_eq!(plugins, vec!["maven-compiler-plugin"]);
    assert_eq!(sanitized.plugins()[0].version.as_deref(), Some("3.7.0"));

    let build = sanitized.build.as_ref().unwrap();
    assert_eq!(build.resources[0].excludes, vec!["widget/*.bin"]);

    let prod = &sanitized.profiles[0];
    assert_eq!(prod.id, "prod");
    assert!(prod.activation.as_ref().unwrap().active_by_default);
    assert!(sanitized.profiles[1].activation.is_none());

    let names: Vec<&str> = sanitized.extra.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"licenses"));
    assert!(!names.contains(&"modules"));
}

#[test]
fn test_sanitized_file_has_no_absolute_project_path() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);

    Sanitizer::new(&fs, &loader)
        .run(&SanitizeRequest::new(&basedir))
        .unwrap();

    let content = fs::read_to_string(basedir.join("pom.xml.sanitized")).unwrap();
    assert!(!content.contains(&*basedir.to_string_lossy()));
    assert!(content.contains("<sourceDirectory>${project.basedir}/src/main/java</sourceDirectory>"));
    assert!(content.contains(
        "<generatedSourcesDirectory>${project.basedir}/src/main/generated</generatedSourcesDirectory>"
    ));
    assert!(!content.contains("<parent>"));
    assert!(!content.contains("<dependencyManagement>"));
}

#[test]
fn test_rerun_is_stable() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);
    let sanitizer = Sanitizer::new(&fs, &loader);

    sanitizer.run(&SanitizeRequest::new(&basedir)).unwrap();
    let first = fs::read_to_string(basedir.join("pom.xml.sanitized")).unwrap();
    sanitizer.run(&SanitizeRequest::new(&basedir)).unwrap();
    let second = fs::read_to_string(basedir.join("pom.xml.sanitized")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_explicit_module_and_output() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    let output = stack.path().join("out.xml");
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);

    let mut request = SanitizeRequest::new(&basedir);
    request.module = Some("gadget".to_string());
    request.output = Some(output.clone());
    let report = Sanitizer::new(&fs, &loader).run(&request).unwrap();

    assert_eq!(report.module_name, "gadget");
    assert_eq!(report.output, output);
    let sanitized = read_pom(&fs, &output).unwrap();
    assert_eq!(
        sanitized.build.unwrap().resources[0].excludes,
        vec!["gadget/*.bin"]
    );
    assert!(!basedir.join("pom.xml.sanitized").exists());
}

#[test]
fn test_malformed_exclusion_produces_no_output() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    fs::write(
        basedir.join("sanitizer-config.yml"),
        "excluded-dependencies:\n  - onlyonesegment\n",
    )
    .unwrap();
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);

    let err = Sanitizer::new(&fs, &loader)
        .run(&SanitizeRequest::new(&basedir))
        .unwrap_err();

    assert!(matches!(
        err,
        SanitizerError::Configuration(ConfigError::MalformedExclusion(ref entry)) if entry == "onlyonesegment"
    ));
    assert!(!basedir.join("pom.xml.modified").exists());
    assert!(!basedir.join("pom.xml.sanitized").exists());
}

#[test]
fn test_missing_explicit_config() {
    let stack = copy_fixture("vertx-stack");
    let basedir = widget_dir(&stack);
    let fs = RealFileSystem;
    let loader = LocalModelBuilder::new(&fs);

    let mut request = SanitizeRequest::new(&basedir);
    request.config = Some(basedir.join("missing.yml"));
    let err = Sanitizer::new(&fs, &loader).run(&request).unwrap_err();

    assert!(matches!(
        err,
        SanitizerError::Configuration(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_bundled_configuration_when_no_file() {
    let fs = MockFileSystem::with_root(PathBuf::from("/home/u/proj"));
    fs.add_file(
        "pom.xml",
        r#"<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>io.vertx</groupId>
  <artifactId>vertx-widget</artifactId>
  <version>3.5.0</version>
  <dependencies>
    <dependency>
      <groupId>io.vertx</groupId>
      <artifactId>vertx-codegen</artifactId>
      <version>3.5.0</version>
    </dependency>
    <dependency>
      <groupId>io.vertx</groupId>
      <artifactId>vertx-core</artifactId>
      <version>3.5.0</version>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <artifactId>maven-gpg-plugin</artifactId>
        <version>1.6</version>
      </plugin>
    </plugins>
  </build>
</project>
"#,
    );
    let loader = LocalModelBuilder::new(&fs);

    let report = Sanitizer::new(&fs, &loader)
        .run(&SanitizeRequest::new("/home/u/proj"))
        .unwrap();

    assert_eq!(report.config_source, "bundled default configuration");
    assert_eq!(report.removed_dependencies, vec!["vertx-codegen"]);
    assert_eq!(report.removed_plugins, vec!["maven-gpg-plugin"]);

    let content = fs
        .read_to_string(Path::new("/home/u/proj/pom.xml.sanitized"))
        .unwrap();
    assert!(!content.contains("/home/u/proj"));
    assert!(content.contains("${project.basedir}/target"));

    let sanitized = parse_pom(&content).unwrap();
    assert_eq!(sanitized.dependencies.len(), 1);
    assert_eq!(sanitized.dependencies[0].exclusions.len(), 2);
}
