//! # formgen
//!
//! CLI tool for rendering schema-driven forms into JSON node trees.
//!
//! ## Usage
//!
//! ```bash
//! # Render a form document to ./generated/form.json
//! formgen render --input form.json
//!
//! # Render a TOML document into a specific directory
//! formgen render --input form.toml --output ./out
//!
//! # Preview the tree without writing
//! formgen render --input form.json --dry-run
//!
//! # Initialize configuration
//! formgen init
//!
//! # Verify a rendered tree is up-to-date
//! formgen check --input form.json --path ./generated/form.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use formgen_cli::{
    config::{CliArgs, ConfigManager},
    document::FormDocument,
    error::CliError,
    render::DocumentRenderer,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "formgen")]
#[command(author, version, about = "Render schema-driven forms into JSON node trees", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a form document into a node tree
    Render {
        /// Form document (.json or .toml)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the rendered tree
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output filename
        #[arg(long)]
        output_file: Option<String>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Propagate disabled flags into nested fields
        #[arg(long)]
        cascade_disabled: bool,

        /// Preview the tree without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new formgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "formgen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that a rendered tree matches its document
    Check {
        /// Form document (.json or .toml)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the rendered tree
        #[arg(short, long)]
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Usage(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Render {
            input,
            output,
            output_file,
            compact,
            cascade_disabled,
            dry_run,
            config,
        } => cmd_render(
            input,
            CliArgs {
                output,
                output_file,
                pretty: compact.then_some(false),
                cascade_disabled: cascade_disabled.then_some(true),
            },
            dry_run,
            config,
        ),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            input,
            path,
            config,
        } => cmd_check(input, path, config),
    }
}

/// Render command implementation.
fn cmd_render(
    input: PathBuf,
    args: CliArgs,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, &args);

    println!("{} {}", "Rendering".cyan(), input.display());
    let document = FormDocument::load(&input)?;
    let output = DocumentRenderer::new(config.render.clone())
        .with_pretty(config.output.pretty)
        .render(&document)?;

    let writer = FileWriter::new(dry_run);
    match writer.write(&config.output.path(), &output.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is up-to-date", "✓".green(), path.display());
        }
        WriteResult::Exists { path } => {
            return Err(CliError::Usage(format!(
                "Refusing to overwrite {}",
                path.display()
            )));
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    let writer = FileWriter::new(false).with_overwrite(force);
    match writer.write(&output, ConfigManager::default_config_content())? {
        WriteResult::Exists { path } => {
            println!("  Use --force to overwrite");
            Err(CliError::Usage(format!(
                "Configuration file already exists: {}",
                path.display()
            )))
        }
        result => {
            println!(
                "{} Created configuration file: {}",
                "✓".green(),
                result.path().display()
            );
            Ok(())
        }
    }
}

/// Check command implementation.
fn cmd_check(
    input: PathBuf,
    rendered_path: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Checking rendered tree...".cyan());

    if !rendered_path.exists() {
        return Err(CliError::Usage(format!(
            "Rendered tree not found: {}",
            rendered_path.display()
        )));
    }
    let existing = std::fs::read_to_string(&rendered_path)?;

    let config = ConfigManager::load(config_path.as_deref())?;
    let document = FormDocument::load(&input)?;
    let output = DocumentRenderer::new(config.render)
        .with_pretty(config.output.pretty)
        .render(&document)?;

    if existing.trim() == output.content.trim() {
        println!("{} Rendered tree is up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Rendered tree is out of date", "✗".red());
        println!("  Run 'formgen render' to update");
        Err(CliError::Usage("Rendered tree is out of date".to_string()))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
