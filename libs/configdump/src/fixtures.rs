//! Listener and dump builders for unit tests.

use meshscope_proto::envoy::admin::v3::listeners_config_dump::{
    DynamicListener, DynamicListenerState, StaticListener,
};
use meshscope_proto::envoy::admin::v3::{ConfigDump, ListenersConfigDump};
use meshscope_proto::envoy::config::core::v3::{
    address, socket_address, Address, SocketAddress,
};
use meshscope_proto::envoy::config::listener::v3::{filter, Filter, FilterChain, Listener};
use meshscope_proto::{Any, Message, LISTENERS_DUMP_TYPE_URL, LISTENER_TYPE_URL};

use crate::classify::{HTTP_CONNECTION_MANAGER, TCP_PROXY};

pub(crate) fn http_filter() -> Filter {
    other_filter(HTTP_CONNECTION_MANAGER)
}

/// TCP proxy filter whose config names `cluster`.
pub(crate) fn tcp_filter(cluster: &str) -> Filter {
    let mut value = vec![0x12, cluster.len() as u8];
    value.extend_from_slice(cluster.as_bytes());
    Filter {
        name: TCP_PROXY.to_string(),
        config_type: Some(filter::ConfigType::TypedConfig(Any {
            type_url: "type.googleapis.com/envoy.extensions.filters.network.tcp_proxy.v3.TcpProxy"
                .to_string(),
            value,
        })),
    }
}

pub(crate) fn other_filter(name: &str) -> Filter {
    Filter {
        name: name.to_string(),
        config_type: None,
    }
}

pub(crate) fn chain(filters: Vec<Filter>) -> FilterChain {
    FilterChain {
        filters,
        ..Default::default()
    }
}

pub(crate) fn listener(addr: &str, port: u32, filter_chains: Vec<FilterChain>) -> Listener {
    Listener {
        name: format!("{addr}_{port}"),
        address: Some(Address {
            address: Some(address::Address::SocketAddress(SocketAddress {
                address: addr.to_string(),
                port_specifier: Some(socket_address::PortSpecifier::PortValue(port)),
                ..Default::default()
            })),
        }),
        filter_chains,
        ..Default::default()
    }
}

pub(crate) fn packed(listener: &Listener, type_url: &str) -> Any {
    Any {
        type_url: type_url.to_string(),
        value: listener.encode_to_vec(),
    }
}

pub(crate) fn listeners_section(section: &ListenersConfigDump) -> Any {
    Any {
        type_url: LISTENERS_DUMP_TYPE_URL.to_string(),
        value: section.encode_to_vec(),
    }
}

/// Config dump with the given dynamic (active) and static listeners.
pub(crate) fn dump(dynamic: &[Listener], statics: &[Listener]) -> ConfigDump {
    let section = ListenersConfigDump {
        version_info: "2024-01-01T00:00:00Z/1".to_string(),
        dynamic_listeners: dynamic
            .iter()
            .map(|l| DynamicListener {
                name: l.name.clone(),
                active_state: Some(DynamicListenerState {
                    listener: Some(packed(l, LISTENER_TYPE_URL)),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect(),
        static_listeners: statics
            .iter()
            .map(|l| StaticListener {
                listener: Some(packed(l, LISTENER_TYPE_URL)),
                last_updated: None,
            })
            .collect(),
    };
    ConfigDump {
        configs: vec![listeners_section(&section)],
    }
}
