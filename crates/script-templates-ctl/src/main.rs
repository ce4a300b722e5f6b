//! script-templates-ctl
//!
//! Generates the ability system's embedded script template table and installs
//! templates into an editor script templates directory.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "script-templates-ctl",
    version,
    about = "Generate and install ability system script templates",
    styles = output::clap_styles()
)]
struct Cli {
    /// Config file (default: ./.script-templates.toml, then ~/.config/script-templates.toml)
    #[arg(long, global = true, env = "SCRIPT_TEMPLATES_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the C++ header holding the template table
    Generate {
        /// Templates root containing <TypeName>/<template> files
        #[arg(long)]
        templates_dir: Option<PathBuf>,

        /// Output header path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on meta-lines with unknown keys
        #[arg(long)]
        strict: bool,

        /// Explicit template files, in table order (skips discovery)
        files: Vec<PathBuf>,
    },

    /// List templates with their parsed metadata
    List {
        #[arg(long)]
        templates_dir: Option<PathBuf>,

        files: Vec<PathBuf>,
    },

    /// Write templates as script files into an editor script templates directory
    Install {
        /// Destination directory (receives <inherits>/<name>.<ext>)
        #[arg(long)]
        target: PathBuf,

        #[arg(long)]
        templates_dir: Option<PathBuf>,

        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose)?;

    let cli_config = cli_config::load_cli_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            templates_dir,
            output,
            strict,
            files,
        } => commands::handle_generate_command(
            &cli_config,
            templates_dir.as_deref(),
            output.as_deref(),
            strict,
            &files,
        ),
        Commands::List {
            templates_dir,
            files,
        } => commands::handle_list_command(&cli_config, templates_dir.as_deref(), &files),
        Commands::Install {
            target,
            templates_dir,
            files,
        } => commands::handle_install_command(
            &cli_config,
            &target,
            templates_dir.as_deref(),
            &files,
        ),
    }
}

/// `RUST_LOG` wins when set; `-v` adds debug output for both crates on top.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("script_templates=info,script_templates_ctl=info"));
    if verbose {
        filter = filter
            .add_directive("script_templates=debug".parse()?)
            .add_directive("script_templates_ctl=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
