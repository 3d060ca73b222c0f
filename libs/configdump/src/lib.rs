//! # meshscope-configdump
//!
//! Listener inspection over a single Envoy config dump snapshot.
//!
//! ## Pipeline
//!
//! - [`retrieve_listeners`] decodes the dump's listener section into a flat,
//!   ordered list (dynamic listeners first, then static ones)
//! - [`classify`] derives a [`ListenerType`] from a listener's network filters
//! - [`ListenerFilter`] selects listeners by address, port and type
//! - [`write_summary`] renders the selection as a table; [`write_dump`]
//!   renders it as proto3 JSON through the `prost-reflect` descriptor pool
//!
//! [`ConfigWriter`] ties the stages together around a primed dump and an
//! output sink. Everything is synchronous and in-memory; fetching the dump
//! is the caller's job.

mod classify;
mod error;
mod extract;
mod filter;
mod reflect;
mod render;
mod writer;

pub use classify::*;
pub use error::{ConfigDumpError, Result};
pub use extract::{listener_config_dump, retrieve_listeners};
pub use filter::{ListenerFilter, ANY_PORT};
pub use render::{write_dump, write_summary, ListenerSummary};
pub use writer::ConfigWriter;

#[cfg(test)]
pub(crate) mod fixtures;
