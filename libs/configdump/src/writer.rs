//! Config writer: a primed config dump plus an output sink.

use std::io::Write;

use meshscope_proto::envoy::admin::v3::ConfigDump;
use meshscope_proto::Message;
use tracing::debug;

use crate::error::{ConfigDumpError, Result};
use crate::extract::retrieve_listeners;
use crate::filter::ListenerFilter;
use crate::render::{write_dump, write_summary};

/// Prints listener views of a config dump to `stdout`.
#[derive(Debug)]
pub struct ConfigWriter<W> {
    stdout: W,
    config_dump: Option<ConfigDump>,
}

impl<W: Write> ConfigWriter<W> {
    /// Create an unprimed writer.
    pub fn new(stdout: W) -> Self {
        Self {
            stdout,
            config_dump: None,
        }
    }

    /// Prime the writer with a binary-encoded `ConfigDump`.
    pub fn prime(&mut self, bytes: &[u8]) -> Result<()> {
        let config_dump = ConfigDump::decode(bytes).map_err(ConfigDumpError::Prime)?;
        debug!(
            bytes = bytes.len(),
            sections = config_dump.configs.len(),
            "Config dump primed"
        );
        self.config_dump = Some(config_dump);
        Ok(())
    }

    /// Prime the writer with an already decoded dump.
    pub fn prime_with(&mut self, config_dump: ConfigDump) {
        self.config_dump = Some(config_dump);
    }

    /// Print an address/port/type summary of the matching listeners.
    pub fn print_listener_summary(&mut self, filter: &ListenerFilter) -> Result<()> {
        let listeners = retrieve_listeners(self.config_dump.as_ref())?;
        let selected = filter.apply(&listeners);
        debug!(
            total = listeners.len(),
            selected = selected.len(),
            "Printing listener summary"
        );
        write_summary(&mut self.stdout, &selected)
    }

    /// Print the matching listeners in full as JSON.
    pub fn print_listener_dump(&mut self, filter: &ListenerFilter) -> Result<()> {
        let listeners = retrieve_listeners(self.config_dump.as_ref())?;
        let selected = filter.apply(&listeners);
        debug!(
            total = listeners.len(),
            selected = selected.len(),
            "Printing listener dump"
        );
        write_dump(&mut self.stdout, &selected)
    }

    /// Consume the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.stdout
    }
}
