//! Listener commands.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use meshscope_configdump::{ConfigWriter, ListenerFilter, ANY_PORT};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::output::OutputFormat;

use super::CommandContext;

/// Show listeners, optionally filtered by address, port or type.
#[derive(Debug, Args)]
pub struct ListenersCommand {
    /// Binary config dump file; reads stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Filter listeners by address.
    #[arg(long)]
    address: Option<String>,

    /// Filter listeners by port (0 matches any).
    #[arg(long, default_value_t = ANY_PORT)]
    port: u32,

    /// Filter listeners by type (HTTP, TCP, HTTP+TCP, UNKNOWN).
    #[arg(long = "type")]
    listener_type: Option<String>,
}

impl ListenersCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let bytes = read_config_dump(self.file.as_deref()).await?;
        debug!(bytes = bytes.len(), "Config dump read");

        let filter = self.filter();
        let mut writer = ConfigWriter::new(io::stdout());
        writer.prime(&bytes)?;

        match ctx.format {
            OutputFormat::Short => writer.print_listener_summary(&filter)?,
            OutputFormat::Json => writer.print_listener_dump(&filter)?,
        }
        Ok(())
    }

    fn filter(&self) -> ListenerFilter {
        ListenerFilter {
            address: self.address.clone(),
            port: self.port,
            listener_type: self.listener_type.clone(),
        }
    }
}

/// Read the whole dump before any processing starts.
async fn read_config_dump(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read config dump from {:?}", path)),
        _ => {
            let mut bytes = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut bytes)
                .await
                .context("Failed to read config dump from stdin")?;
            Ok(bytes)
        }
    }
}
