//! txtbook - Convert plain-text novels into structured JSON chapter documents

mod config;
mod convert;
mod document;
mod error;
mod stats;
mod text;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{PathOverrides, TxtbookConfig};
use convert::ConvertPaths;
use error::ConvertError;
use stats::ConversionStats;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "txtbook")]
#[command(about = "Convert a plain-text novel into a JSON document of chapters and blocks", long_about = None)]
#[command(version)]
struct Args {
    /// Project root that relative input/output paths are resolved against
    #[arg(long)]
    root: Option<PathBuf>,

    /// Source text file (default: original/吾輩は猫である.txt)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (default: lib/mock-data/wagahai.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Args {
    fn overrides(&self) -> PathOverrides {
        PathOverrides {
            root: self.root.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default project root
    SetRoot {
        /// Directory relative paths are resolved against
        path: PathBuf,
    },
    /// Set the default input text file
    SetInput {
        /// Path to the source text
        path: PathBuf,
    },
    /// Set the default output JSON file
    SetOutput {
        /// Path to the JSON destination
        path: PathBuf,
    },
    /// Restore the built-in defaults
    Reset,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    if let Some(Commands::Config { action }) = &args.command {
        return match handle_config_command(action) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = TxtbookConfig::load_for_run().context("Failed to load configuration")?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let paths = config.resolve_paths(&args.overrides(), &cwd);

    log::debug!("Input: {}", paths.input.display());
    log::debug!("Output: {}", paths.output.display());

    let stats = convert_and_report(&paths)?;
    println!("{}", stats);

    Ok(())
}

/// Run one conversion and report where the output went.
fn convert_and_report(paths: &ConvertPaths) -> std::result::Result<ConversionStats, ConvertError> {
    let doc = convert::convert_file(paths)?;
    eprintln!("Successfully converted to: {}", paths.output.display());

    Ok(ConversionStats::from_document(&doc))
}

/// User-facing message for a failed run.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConvertError>() {
        Some(e) if e.is_missing_input() => format!("Error: {}", e),
        _ => format!("Error during conversion: {:#}", err),
    }
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = TxtbookConfig::load()?;
            println!("Configuration file: {:?}", TxtbookConfig::config_path()?);
            println!();
            if let Some(root) = &config.project_root {
                println!("project_root = \"{}\"", root.display());
            } else {
                println!("project_root = (current directory)");
            }
            println!("input = \"{}\"", config.input.display());
            println!("output = \"{}\"", config.output.display());
        }
        ConfigAction::SetRoot { path } => {
            let mut config = TxtbookConfig::load()?;
            config.project_root = Some(path.clone());
            config.save()?;
            println!("Default project root set to: {}", path.display());
        }
        ConfigAction::SetInput { path } => {
            let mut config = TxtbookConfig::load()?;
            config.input = path.clone();
            config.save()?;
            println!("Default input set to: {}", path.display());
        }
        ConfigAction::SetOutput { path } => {
            let mut config = TxtbookConfig::load()?;
            config.output = path.clone();
            config.save()?;
            println!("Default output set to: {}", path.display());
        }
        ConfigAction::Reset => {
            TxtbookConfig::default().save()?;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}
