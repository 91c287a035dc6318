//! Subcommand entry points. Each returns the process exit code.

use super::commands::{BuildArgs, GenerateArgs, ResolverArg};
use super::output::OutputFormatter;
use crate::fs::{FileSystem, RealFileSystem};
use crate::loader::{
    mvn_executable, parse_property, LocalModelBuilder, MavenModelBuilder, ModelLoader, Properties,
};
use crate::pipeline::{SanitizeRequest, Sanitizer, SANITIZED_POM};
use crate::reinvoke::{default_properties, BuildReinvoker, MavenCliExecutor, SessionContext};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const SKIP_TESTS: &str = "skipTests";

pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match run_generate(args) {
        Ok(rendered) => {
            if !quiet {
                println!("{}", rendered);
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub fn handle_build(args: &BuildArgs) -> i32 {
    match run_build(args) {
        Ok(()) => {
            info!("Build with the sanitized pom completed");
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run_generate(args: &GenerateArgs) -> Result<String> {
    let fs = RealFileSystem;
    let basedir = project_directory(&fs, args.project_dir.as_deref())?;

    let request = SanitizeRequest {
        basedir: basedir.clone(),
        pom: args.pom.as_deref().map(|p| within(&basedir, p)),
        output: args.output.as_deref().map(|p| within(&basedir, p)),
        module: args.module.clone(),
        config: args.config.clone(),
        properties: parse_properties(&args.properties),
    };
    debug!("Sanitize request: {:?}", request);

    let loader = loader_for(&fs, args.resolver, args.mvn.as_deref());
    let report = Sanitizer::new(&fs, loader.as_ref())
        .run(&request)
        .context("Cannot generate the sanitized pom")?;

    OutputFormatter::new(args.format.into()).format(&report)
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let fs = RealFileSystem;
    let basedir = project_directory(&fs, args.project_dir.as_deref())?;
    let pom = args
        .pom
        .as_deref()
        .map(|p| within(&basedir, p))
        .unwrap_or_else(|| basedir.join(SANITIZED_POM));

    let user_properties = parse_properties(&args.properties);
    let supplied = if args.run_tests || user_properties.contains_key(SKIP_TESTS) {
        Properties::new()
    } else {
        default_properties()
    };
    let (active_profiles, inactive_profiles) = split_profiles(&args.profiles);
    let context = SessionContext {
        user_properties,
        active_profiles,
        inactive_profiles,
        offline: args.offline,
    };

    let mvn = args.mvn.clone().unwrap_or_else(mvn_executable);
    let loader = loader_for(&fs, args.resolver, Some(mvn.as_str()));
    let executor = MavenCliExecutor::new(mvn).with_dry_run(args.dry_run);

    BuildReinvoker::new(&fs, loader.as_ref(), &executor, context)
        .execute(&pom, &args.phase, &supplied)
        .context("Cannot build with the sanitized pom")
}

/// The given directory, or the current one, canonicalized
fn project_directory(fs: &dyn FileSystem, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !fs.is_dir(&dir) {
        return Err(anyhow!("Project directory does not exist: {}", dir.display()));
    }
    let dir = fs.canonicalize(&dir)?;
    debug!("Project directory: {}", dir.display());
    Ok(dir)
}

/// Relative paths are taken from the canonical project directory
fn within(basedir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        basedir.join(path)
    }
}

fn loader_for<'a>(
    fs: &'a dyn FileSystem,
    resolver: ResolverArg,
    mvn: Option<&str>,
) -> Box<dyn ModelLoader + 'a> {
    match resolver {
        ResolverArg::Local => Box::new(LocalModelBuilder::new(fs)),
        ResolverArg::Maven => Box::new(MavenModelBuilder::new(
            fs,
            mvn.map(str::to_string).unwrap_or_else(mvn_executable),
        )),
    }
}

fn parse_properties(entries: &[String]) -> Properties {
    entries.iter().map(|e| parse_property(e)).collect()
}

/// `!id` deactivates, anything else activates
fn split_profiles(profiles: &[String]) -> (Vec<String>, Vec<String>) {
    let mut active = Vec::new();
    let mut inactive = Vec::new();
    for profile in profiles.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        match profile.strip_prefix('!').or_else(|| profile.strip_prefix('-')) {
            Some(id) => inactive.push(id.to_string()),
            None => active.push(profile.to_string()),
        }
    }
    (active, inactive)
}
