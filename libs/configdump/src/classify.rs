//! Listener protocol classification.
//!
//! Listeners carry no explicit protocol field, so the type is inferred from
//! the network filters attached to their filter chains. Only the filter names
//! below are recognized; anything else contributes nothing and a listener
//! with no recognized filter classifies as [`ListenerType::Unknown`].

use std::fmt;

use meshscope_proto::envoy::config::listener::v3::{Filter, Listener};
use serde::Serialize;

/// Identifies a listener as HTTP by the presence of an HTTP connection manager filter.
pub const HTTP_CONNECTION_MANAGER: &str = "envoy.http_connection_manager";

/// Identifies a listener as TCP by the presence of a TCP proxy filter.
pub const TCP_PROXY: &str = "envoy.tcp_proxy";

/// Fallback cluster injected by the control plane when nothing else matches.
///
/// A TCP proxy pointing here is mesh plumbing, not user traffic.
pub const BLACK_HOLE_CLUSTER: &str = "BlackHoleCluster";

/// Effective protocol of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListenerType {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "HTTP+TCP")]
    HttpTcp,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ListenerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenerType::Http => "HTTP",
            ListenerType::Tcp => "TCP",
            ListenerType::HttpTcp => "HTTP+TCP",
            ListenerType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ListenerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a listener as HTTP, TCP, HTTP+TCP or UNKNOWN.
pub fn classify(listener: &Listener) -> ListenerType {
    let mut http = 0usize;
    let mut tcp = 0usize;

    for filter in listener.filter_chains.iter().flat_map(|chain| &chain.filters) {
        match filter.name.as_str() {
            HTTP_CONNECTION_MANAGER => http += 1,
            TCP_PROXY if !routes_to_black_hole(filter) => tcp += 1,
            _ => {}
        }
    }

    match (http > 0, tcp > 0) {
        (true, false) => ListenerType::Http,
        (true, true) => ListenerType::HttpTcp,
        (false, true) => ListenerType::Tcp,
        (false, false) => ListenerType::Unknown,
    }
}

fn routes_to_black_hole(filter: &Filter) -> bool {
    filter
        .typed_config()
        .map(|config| String::from_utf8_lossy(&config.value).contains(BLACK_HOLE_CLUSTER))
        .unwrap_or(false)
}

/// Bound socket address; empty for pipes or unset addresses.
pub fn listener_address(listener: &Listener) -> &str {
    listener
        .address
        .as_ref()
        .and_then(|address| address.socket_address())
        .map(|socket| socket.address.as_str())
        .unwrap_or("")
}

/// Bound port; 0 for pipes, named ports or unset addresses.
pub fn listener_port(listener: &Listener) -> u32 {
    listener
        .address
        .as_ref()
        .and_then(|address| address.socket_address())
        .map(|socket| socket.port_value())
        .unwrap_or(0)
}
