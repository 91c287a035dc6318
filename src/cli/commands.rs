use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Derives a sanitized pom.xml and rebuilds projects from it
#[derive(Parser, Debug)]
#[command(
    name = "pom-sanitizer",
    about = "Derive a sanitized pom.xml and rebuild projects from it",
    version,
    long_about = "pom-sanitizer rewrites a project's pom.xml into pom.xml.sanitized: coordinates \
                  are overridden, unwanted dependencies, plugins and resources are removed, \
                  selected profiles are activated, the parent and dependencyManagement are \
                  flattened away and absolute paths are replaced by ${project.basedir}. \
                  The project can then be rebuilt from the sanitized descriptor."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        visible_alias = "generate",
        about = "Generate pom.xml.sanitized for a project",
        long_about = "Applies the rules of sanitizer-config.yml (or the bundled defaults) to the \
                      project's pom.xml and writes pom.xml.sanitized next to it. An intermediate \
                      pom.xml.modified is left in the project directory.\n\n\
                      Examples:\n  \
                      pom-sanitizer generate-sanitized-pom\n  \
                      pom-sanitizer generate /path/to/project --module widget\n  \
                      pom-sanitizer generate --config rules.yml --format json\n  \
                      pom-sanitizer generate --resolver maven -D revision=3.5.0"
    )]
    GenerateSanitizedPom(GenerateArgs),

    #[command(
        visible_alias = "build",
        about = "Build a project from its pom.xml.sanitized",
        long_about = "Loads pom.xml.sanitized and runs a single, non-recursive Maven build of it. \
                      Tests are skipped unless --run-tests is given.\n\n\
                      Examples:\n  \
                      pom-sanitizer build-with-sanitized-pom\n  \
                      pom-sanitizer build /path/to/project --phase verify --run-tests\n  \
                      pom-sanitizer build --offline -P release --dry-run"
    )]
    BuildWithSanitizedPom(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PROJECT_DIR",
        help = "Project directory (defaults to current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Module name used for ${module} substitution")]
    pub module: Option<String>,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Configuration file (defaults to <PROJECT_DIR>/sanitizer-config.yml, then the bundled rules)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Descriptor to sanitize, relative to PROJECT_DIR (defaults to pom.xml)")]
    pub pom: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Output file, relative to PROJECT_DIR (defaults to pom.xml.sanitized)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value = "local",
        help = "How the effective model is built"
    )]
    pub resolver: ResolverArg,

    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        help = "User property for the effective model (repeatable)"
    )]
    pub properties: Vec<String>,

    #[arg(long, value_name = "PATH", help = "Maven executable for --resolver maven")]
    pub mvn: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(
        value_name = "PROJECT_DIR",
        help = "Project directory (defaults to current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(long, default_value = "install", help = "Lifecycle phase to run")]
    pub phase: String,

    #[arg(
        long,
        value_name = "FILE",
        help = "Sanitized descriptor, relative to PROJECT_DIR (defaults to pom.xml.sanitized)"
    )]
    pub pom: Option<PathBuf>,

    #[arg(long, help = "Do not pass -DskipTests=true")]
    pub run_tests: bool,

    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        help = "User property (repeatable)"
    )]
    pub properties: Vec<String>,

    #[arg(
        short = 'P',
        long = "activate-profiles",
        value_name = "PROFILE",
        value_delimiter = ',',
        help = "Profiles to activate, prefix with ! to deactivate (repeatable)"
    )]
    pub profiles: Vec<String>,

    #[arg(long, help = "Work offline")]
    pub offline: bool,

    #[arg(
        long,
        value_enum,
        default_value = "local",
        help = "How the sanitized descriptor is loaded"
    )]
    pub resolver: ResolverArg,

    #[arg(long, value_name = "PATH", help = "Maven executable (defaults to $POM_SANITIZER_MVN or mvn)")]
    pub mvn: Option<String>,

    #[arg(long, help = "Print the Maven command instead of running it")]
    pub dry_run: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverArg {
    /// In-process effective model
    Local,
    /// `mvn help:effective-pom`
    Maven,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
