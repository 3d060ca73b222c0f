//! meshctl - listener inspector for Envoy config dumps.
//!
//! Reads a binary `envoy.admin.v3.ConfigDump` from a file or stdin and
//! prints the proxy's listeners as a summary table or a JSON dump.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
