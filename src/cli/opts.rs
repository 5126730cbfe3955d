use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

/// Severity-mapping log dispatch adapter
#[derive(Debug, Parser)]
#[command(
    name = "sevhook",
    version,
    about = "Map frontend log levels to platform severities and dispatch records to a sink",
    long_about = "A small adapter that routes leveled log records through a dispatch hook, translating source levels to a fixed target severity set before writing to a platform sink."
)]
pub struct Cli {
    /// Enable verbose output (debug level)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Suppress non-error output (error level only)
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send one record through the configured hook and sink
    Emit {
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = "sevhook.toml")]
        config: String,
        /// Source level (trace, debug, info, warning, error, alert)
        #[arg(short = 'l', long = "level", default_value = "info")]
        level: String,
        /// Metadata field as key=value (repeatable)
        #[arg(short = 'f', long = "field")]
        fields: Vec<String>,
        /// Message text; a leading "level:" prefix overrides --level
        message: String,
    },
    /// Print the effective level map and hook subscription
    Levels {
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = "sevhook.toml")]
        config: String,
    },
    /// Generate a default configuration file
    Init {
        /// Output configuration file path
        #[arg(short = 'o', long = "output", default_value = "sevhook.toml")]
        output: String,
        /// Force overwrite if file exists
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = "sevhook.toml")]
        config: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    }
}
