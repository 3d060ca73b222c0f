//! CLI commands.

mod listeners;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// meshctl - Inspect the listeners of a proxy's config dump.
#[derive(Debug, Parser)]
#[command(name = "meshctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (short or json).
    #[arg(short = 'o', long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the listeners in a config dump.
    Listeners(listeners::ListenersCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        crate::logging::init(&config.log_level);

        let ctx = CommandContext {
            format: self.output.unwrap_or(config.format),
        };

        match self.command {
            Commands::Listeners(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("meshctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub format: OutputFormat,
}
