//! Summary table and JSON dump rendering.

use std::io::Write;

use meshscope_proto::envoy::config::listener::v3::Listener;
use serde::Serialize;
use tabled::settings::{Padding, Style};
use tabled::{Table, Tabled};

use crate::classify::{classify, listener_address, listener_port, ListenerType};
use crate::error::Result;
use crate::reflect::listeners_json;

/// Spaces between summary columns.
const COLUMN_PADDING: usize = 5;

/// Indentation of the JSON dump.
const DUMP_INDENT: &[u8] = b"    ";

/// One row of the listener summary.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ListenerSummary {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "PORT")]
    pub port: u32,

    #[tabled(rename = "TYPE")]
    pub listener_type: ListenerType,
}

impl From<&Listener> for ListenerSummary {
    fn from(listener: &Listener) -> Self {
        Self {
            address: listener_address(listener).to_string(),
            port: listener_port(listener),
            listener_type: classify(listener),
        }
    }
}

/// Write an `ADDRESS PORT TYPE` table, one row per listener, in the given order.
pub fn write_summary<W: Write>(out: &mut W, listeners: &[&Listener]) -> Result<()> {
    let rows: Vec<ListenerSummary> = listeners.iter().map(|l| ListenerSummary::from(*l)).collect();

    let mut table = Table::new(&rows);
    table
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_PADDING, 0, 0));

    let mut rendered = String::new();
    for line in table.to_string().lines() {
        rendered.push_str(line.trim_end());
        rendered.push('\n');
    }

    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the full listeners as a 4-space indented JSON array.
///
/// Each listener is rendered in the proto3 JSON mapping with every field the
/// schema describes. Serialization completes before anything is written, so
/// a failure leaves the sink untouched.
pub fn write_dump<W: Write>(out: &mut W, listeners: &[&Listener]) -> Result<()> {
    let json = listeners_json(listeners)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(DUMP_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    json.serialize(&mut serializer)?;
    buf.push(b'\n');

    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}
