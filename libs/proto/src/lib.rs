//! Envoy message definitions for config-dump inspection.
//!
//! Types are generated by `build.rs` from the vendored protos under `proto/`.
//! Field tags match the upstream Envoy v3 schema, so dumps produced by a real
//! proxy decode cleanly. [`FILE_DESCRIPTOR_SET`] carries the same schema for
//! reflection-based JSON rendering.

pub mod envoy {
    pub mod admin {
        pub mod v3 {
            include!(concat!(env!("OUT_DIR"), "/envoy.admin.v3.rs"));

            impl listeners_config_dump::DynamicListener {
                /// Packed listener of the active state, if the listener has one.
                pub fn active_listener(&self) -> Option<&::prost_types::Any> {
                    self.active_state.as_ref()?.listener.as_ref()
                }
            }
        }
    }

    pub mod config {
        pub mod accesslog {
            pub mod v3 {
                include!(concat!(env!("OUT_DIR"), "/envoy.config.accesslog.v3.rs"));
            }
        }

        pub mod core {
            pub mod v3 {
                include!(concat!(env!("OUT_DIR"), "/envoy.config.core.v3.rs"));

                impl Address {
                    pub fn socket_address(&self) -> Option<&SocketAddress> {
                        match &self.address {
                            Some(address::Address::SocketAddress(socket)) => Some(socket),
                            _ => None,
                        }
                    }
                }

                impl SocketAddress {
                    /// Numeric port, or 0 when the port is named or absent.
                    pub fn port_value(&self) -> u32 {
                        match self.port_specifier {
                            Some(socket_address::PortSpecifier::PortValue(port)) => port,
                            _ => 0,
                        }
                    }
                }
            }
        }

        pub mod listener {
            pub mod v3 {
                include!(concat!(env!("OUT_DIR"), "/envoy.config.listener.v3.rs"));

                impl Filter {
                    /// Inline typed config; filters discovered through ECDS have none.
                    pub fn typed_config(&self) -> Option<&::prost_types::Any> {
                        match &self.config_type {
                            Some(filter::ConfigType::TypedConfig(any)) => Some(any),
                            _ => None,
                        }
                    }
                }
            }
        }
    }

    pub mod r#type {
        pub mod v3 {
            include!(concat!(env!("OUT_DIR"), "/envoy.r#type.v3.rs"));
        }
    }
}

pub mod xds {
    pub mod core {
        pub mod v3 {
            include!(concat!(env!("OUT_DIR"), "/xds.core.v3.rs"));
        }
    }

    pub mod r#type {
        pub mod matcher {
            pub mod v3 {
                include!(concat!(env!("OUT_DIR"), "/xds.r#type.matcher.v3.rs"));
            }
        }
    }
}

pub mod meshscope {
    pub mod v1 {
        include!(concat!(env!("OUT_DIR"), "/meshscope.v1.rs"));
    }
}

pub use prost::{Message, Name};
pub use prost_types::Any;

/// Encoded `FileDescriptorSet` for every generated message, well-known types included.
pub const FILE_DESCRIPTOR_SET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/envoy_descriptor.bin"));

/// Prefix shared by every well-known type URL.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Canonical (v3) listener type URL.
pub const LISTENER_TYPE_URL: &str = "type.googleapis.com/envoy.config.listener.v3.Listener";

/// Legacy (v2) listener type URL, wire-compatible with v3.
pub const LISTENER_V2_TYPE_URL: &str = "type.googleapis.com/envoy.api.v2.Listener";

/// Canonical (v3) listeners config dump type URL.
pub const LISTENERS_DUMP_TYPE_URL: &str = "type.googleapis.com/envoy.admin.v3.ListenersConfigDump";

/// Legacy (v2alpha) listeners config dump type URL.
pub const LISTENERS_DUMP_V2_TYPE_URL: &str =
    "type.googleapis.com/envoy.admin.v2alpha.ListenersConfigDump";

/// Type URL of [`meshscope::v1::OpaqueAny`].
pub const OPAQUE_ANY_TYPE_URL: &str = "type.googleapis.com/meshscope.v1.OpaqueAny";
