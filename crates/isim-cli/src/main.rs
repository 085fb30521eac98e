//! Command-line launcher for iOS Simulator devices.
//!
//! # Usage
//!
//! ```bash
//! # Launch the default simulator
//! isim
//!
//! # List available simulators, optionally filtered
//! isim list
//! isim list iphone
//! isim list 'iOS 17'
//!
//! # Launch by name, OS version, or UDID
//! isim launch 'iPhone 15 Pro'
//!
//! # Show or set the default
//! isim default
//! isim default A1B2C3D4-E5F6-7890-ABCD-EF1234567890
//! ```

mod commands;
mod format;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, CommandFactory, Parser, Subcommand};
use isim_core::simctl::Simctl;
use isim_core::store::{default_config_dir, FileDefaultStore};
use isim_core::{IsimError, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{exit_status, report_error, App, OutputFormat};
use crate::format::Themes;

/// Command-line launcher for iOS Simulator devices.
#[derive(Parser)]
#[command(name = "isim")]
#[command(about = "iOS Simulator launcher")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Output format: text or json
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding the stored default (defaults to ~/.config/isim)
    #[arg(long, env = "ISIM_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,
}

impl GlobalArgs {
    fn open_store(&self) -> Result<FileDefaultStore> {
        let config_dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => default_config_dir()?,
        };
        debug!(config_dir = %config_dir.display(), "using config directory");
        Ok(FileDefaultStore::new(config_dir))
    }

    fn app<'a>(
        &self,
        store: &'a FileDefaultStore,
        themes: Themes,
    ) -> App<'a, Simctl, FileDefaultStore> {
        App::new(&Simctl, store, self.format, self.quiet, themes)
    }
}

#[derive(Subcommand)]
enum Command {
    /// List available simulators
    List {
        /// Only show devices whose name, OS version or UDID contains this text
        filter: Option<String>,
        /// Only show booted devices
        #[arg(long)]
        booted: bool,
    },

    /// Launch a simulator by name, OS version, or UDID
    Launch {
        /// Name, OS version, or UDID; must match exactly one device
        query: String,
    },

    /// Show the current default, or set it when a UDID is given
    Default {
        /// UDID of the simulator to launch when no subcommand is given
        udid: Option<String>,
        /// Store the UDID even if no available simulator has it
        #[arg(long, requires = "udid")]
        force: bool,
    },

    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let themes = Themes::detect();

    match run(cli, themes) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            // Nothing useful to do if stderr itself is gone
            let _ = report_error(&e, &themes.stderr, &mut std::io::stderr().lock());
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Returns `Ok(false)` for failures that have already been reported.
fn run(cli: Cli, themes: Themes) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let global = &cli.global;

    match cli.command {
        Some(Command::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "isim", &mut out);
            Ok(true)
        }
        None => {
            let store = global.open_store()?;
            match global.app(&store, themes).launch_default(&mut out) {
                Err(IsimError::NoDefault) => {
                    eprintln!("No default simulator set.");
                    eprintln!("Run 'isim list' to browse simulators, then: isim default <udid>");
                    eprintln!();
                    Cli::command().write_help(&mut out)?;
                    out.flush()?;
                    Ok(false)
                }
                other => other,
            }
        }
        Some(Command::List { filter, booted }) => {
            let store = global.open_store()?;
            global
                .app(&store, themes)
                .list(filter.as_deref(), booted, &mut out)
        }
        Some(Command::Launch { query }) => {
            let store = global.open_store()?;
            global.app(&store, themes).launch(&query, &mut out)
        }
        Some(Command::Default { udid: None, .. }) => {
            let store = global.open_store()?;
            global.app(&store, themes).show_default(&mut out)
        }
        Some(Command::Default {
            udid: Some(udid),
            force,
        }) => {
            let store = global.open_store()?;
            global.app(&store, themes).set_default(&udid, force, &mut out)
        }
    }
}
