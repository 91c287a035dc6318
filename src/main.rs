use pom_sanitizer::cli::commands::{CliArgs, Commands};
use pom_sanitizer::cli::handlers::{handle_build, handle_generate};
use pom_sanitizer::util::logging::{init_logging, parse_level, LoggingConfig};
use pom_sanitizer::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::GenerateSanitizedPom(generate_args) => handle_generate(generate_args, args.quiet),
        Commands::BuildWithSanitizedPom(build_args) => handle_build(build_args),
    };

    process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over the environment
fn init_logging_from_args(args: &CliArgs) {
    let config = if let Some(level) = &args.log_level {
        LoggingConfig::with_level(parse_level(level))
    } else if args.verbose {
        LoggingConfig::verbose()
    } else if args.quiet {
        LoggingConfig::with_level(Level::ERROR)
    } else {
        LoggingConfig::from_env()
    };
    init_logging(config);
}
