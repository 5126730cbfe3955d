use log::info;
use sevhook::cli;
use sevhook::config::Config;
use sevhook::error::{self, Result};
use sevhook::logging;
use std::path::Path;

fn main() -> Result<()> {
    use clap::Parser;
    let cli = cli::opts::Cli::parse();

    match &cli.command {
        Some(cli::opts::Commands::Init { output, force }) => {
            logging::init_simple_logging(cli.verbose, cli.quiet);
            cli::init::handle_init(output, *force)
        }
        Some(cli::opts::Commands::Completions { shell }) => {
            cli::opts::Cli::generate_completions(*shell);
            Ok(())
        }
        Some(cli::opts::Commands::Emit {
            config,
            level,
            fields,
            message,
        }) => {
            let cfg = prepare(config, cli.verbose, cli.quiet)?;
            cli::emit::handle_emit(&cfg, level, fields, message)
        }
        Some(cli::opts::Commands::Levels { config }) => {
            let cfg = prepare(config, cli.verbose, cli.quiet)?;
            cli::levels::handle_levels(&cfg)
        }
        Some(cli::opts::Commands::Validate { config }) => {
            let cfg = prepare(config, cli.verbose, cli.quiet)?;
            eprintln!("Configuration validation passed");
            cli::validate::handle_validate(&cfg)
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    }
}

/// 加载、验证配置并初始化诊断日志
fn prepare(config_path: &str, verbose: bool, quiet: bool) -> Result<Config> {
    let mut cfg = load_config(config_path)?;
    cfg.validate()?;

    if verbose {
        cfg.logging.level = "debug".to_string();
    } else if quiet {
        cfg.logging.level = "error".to_string();
    }

    logging::init_logging(&cfg.logging)?;
    info!("Configuration loaded");
    Ok(cfg)
}

fn load_config(config_path: &str) -> Result<Config> {
    let path = Path::new(config_path);
    match Config::from_file(path) {
        Ok(c) => {
            eprintln!("Loaded configuration file: {config_path}");
            Ok(c)
        }
        Err(e) => {
            if let error::Error::Config(error::ConfigError::NotFound(_)) = &e {
                eprintln!(
                    "Configuration file not found: {config_path}, using default configuration"
                );
                eprintln!("Tip: run 'sevhook init' to generate a configuration file");
                Ok(Config::default())
            } else {
                Err(e)
            }
        }
    }
}

fn print_help() {
    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("sevhook - Severity-mapping log dispatch adapter");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("\nUsage: sevhook <COMMAND> [OPTIONS]");
    eprintln!("\nCommands:");
    eprintln!("  emit         Send one record through the configured hook and sink");
    eprintln!("  levels       Print the effective level map and subscription");
    eprintln!("  init         Generate a default configuration file");
    eprintln!("  validate     Validate a configuration file");
    eprintln!("  completions  Generate shell completion scripts");
    eprintln!("\nOptions:");
    eprintln!("  -v, --verbose   Enable verbose output (debug level)");
    eprintln!("  -q, --quiet     Suppress non-error output");
    eprintln!("  -h, --help      Print help information");
    eprintln!("  -V, --version   Print version information");
    eprintln!("\nExamples:");
    eprintln!("  # Initialize configuration");
    eprintln!("  sevhook init");
    eprintln!("\n  # Send an alert (mapped to critical by default)");
    eprintln!("  sevhook emit \"alert: disk full\"");
    eprintln!("\n  # Send with metadata and a custom config");
    eprintln!("  sevhook emit -c custom.toml -l warning -f user=bob \"quota low\"");
    eprintln!("\n  # Show level routing");
    eprintln!("  sevhook levels -c sevhook.toml");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
