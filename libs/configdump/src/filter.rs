//! Listener selection by address, port and type.

use meshscope_proto::envoy::config::listener::v3::Listener;

use crate::classify::{classify, listener_address, listener_port};

/// Port value meaning "match any port".
pub const ANY_PORT: u32 = 0;

/// Match specification for listeners. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerFilter {
    /// Bound address, compared case-insensitively.
    pub address: Option<String>,
    /// Bound port; [`ANY_PORT`] disables the check.
    pub port: u32,
    /// Classification label (`HTTP`, `TCP`, `HTTP+TCP`, `UNKNOWN`), compared case-insensitively.
    pub listener_type: Option<String>,
}

impl ListenerFilter {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.address().is_none() && self.port == ANY_PORT && self.listener_type().is_none()
    }

    /// Returns true if the listener satisfies every specified field.
    pub fn verify(&self, listener: &Listener) -> bool {
        if self.is_empty() {
            return true;
        }
        if let Some(address) = self.address() {
            if !listener_address(listener).eq_ignore_ascii_case(address) {
                return false;
            }
        }
        if self.port != ANY_PORT && listener_port(listener) != self.port {
            return false;
        }
        if let Some(listener_type) = self.listener_type() {
            if !classify(listener).as_str().eq_ignore_ascii_case(listener_type) {
                return false;
            }
        }
        true
    }

    /// Select matching listeners, preserving order.
    pub fn apply<'a>(&self, listeners: &'a [Listener]) -> Vec<&'a Listener> {
        listeners.iter().filter(|l| self.verify(l)).collect()
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref().filter(|s| !s.is_empty())
    }

    fn listener_type(&self) -> Option<&str> {
        self.listener_type.as_deref().filter(|s| !s.is_empty())
    }
}
