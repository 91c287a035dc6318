pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{BuildArgs, CliArgs, Commands, GenerateArgs, OutputFormatArg, ResolverArg};
pub use handlers::{handle_build, handle_generate};
pub use output::{OutputFormat, OutputFormatter};
