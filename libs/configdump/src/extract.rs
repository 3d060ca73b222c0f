//! Listener extraction from a config dump.

use meshscope_proto::envoy::admin::v3::{ConfigDump, ListenersConfigDump};
use meshscope_proto::envoy::config::listener::v3::Listener;
use meshscope_proto::{
    Any, Name, LISTENERS_DUMP_TYPE_URL, LISTENERS_DUMP_V2_TYPE_URL, LISTENER_TYPE_URL,
};
use tracing::debug;

use crate::error::{ConfigDumpError, Result};

/// Locate and decode the listener section of a config dump.
pub fn listener_config_dump(config_dump: &ConfigDump) -> Result<ListenersConfigDump> {
    let section = config_dump
        .configs
        .iter()
        .find(|config| {
            config.type_url == LISTENERS_DUMP_TYPE_URL
                || config.type_url == LISTENERS_DUMP_V2_TYPE_URL
        })
        .ok_or_else(|| {
            ConfigDumpError::Retrieval(format!(
                "config dump has no configuration type {}",
                LISTENERS_DUMP_TYPE_URL
            ))
        })?;

    retype(section, ListenersConfigDump::type_url())
        .to_msg::<ListenersConfigDump>()
        .map_err(|e| ConfigDumpError::Retrieval(e.to_string()))
}

/// Decode every listener in the dump.
///
/// Active dynamic listeners come first, then static ones, each in encounter
/// order. No sorting is applied. The first undecodable entry aborts the
/// whole extraction.
pub fn retrieve_listeners(config_dump: Option<&ConfigDump>) -> Result<Vec<Listener>> {
    let config_dump = config_dump.ok_or(ConfigDumpError::NotPrimed)?;
    let section = listener_config_dump(config_dump)?;

    let dynamic = section
        .dynamic_listeners
        .iter()
        .filter_map(|listener| listener.active_listener());
    let bootstrap = section
        .static_listeners
        .iter()
        .filter_map(|listener| listener.listener.as_ref());

    let listeners = dynamic
        .chain(bootstrap)
        .map(decode_listener)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        version_info = %section.version_info,
        dynamic_listeners = section.dynamic_listeners.len(),
        static_listeners = section.static_listeners.len(),
        decoded = listeners.len(),
        "Listeners extracted"
    );

    if listeners.is_empty() {
        return Err(ConfigDumpError::NoListeners);
    }
    Ok(listeners)
}

/// Decode a listener payload, accepting either schema version's type URL.
fn decode_listener(payload: &Any) -> Result<Listener> {
    retype(payload, LISTENER_TYPE_URL.to_string())
        .to_msg::<Listener>()
        .map_err(ConfigDumpError::Decode)
}

fn retype(payload: &Any, type_url: String) -> Any {
    Any {
        type_url,
        value: payload.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use meshscope_proto::envoy::admin::v3::listeners_config_dump::{
        DynamicListener, DynamicListenerState, StaticListener,
    };
    use meshscope_proto::{Message, LISTENER_V2_TYPE_URL};

    use super::*;
    use crate::classify::listener_address;
    use crate::fixtures::{chain, dump, http_filter, listener, listeners_section, packed};

    #[test]
    fn test_unprimed_dump() {
        let err = retrieve_listeners(None).unwrap_err();
        assert!(matches!(err, ConfigDumpError::NotPrimed));
        assert_eq!(err.to_string(), "config writer has not been primed");
    }

    #[test]
    fn test_empty_dump_has_no_listeners() {
        let config_dump = dump(&[], &[]);
        let err = retrieve_listeners(Some(&config_dump)).unwrap_err();
        assert!(matches!(err, ConfigDumpError::NoListeners));
    }

    #[test]
    fn test_missing_listener_section() {
        let config_dump = ConfigDump {
            configs: vec![Any {
                type_url: "type.googleapis.com/envoy.admin.v3.ClustersConfigDump".to_string(),
                value: Vec::new(),
            }],
        };
        let err = retrieve_listeners(Some(&config_dump)).unwrap_err();
        assert!(matches!(err, ConfigDumpError::Retrieval(_)));
        assert!(err.to_string().starts_with("listener dump:"));
    }

    #[test]
    fn test_dynamic_before_static() {
        let a = listener("10.0.0.3", 3, vec![]);
        let b = listener("10.0.0.1", 1, vec![]);
        let c = listener("10.0.0.2", 2, vec![]);
        let config_dump = dump(&[a, b], &[c]);

        let listeners = retrieve_listeners(Some(&config_dump)).unwrap();
        let addresses: Vec<_> = listeners.iter().map(listener_address).collect();
        assert_eq!(addresses, vec!["10.0.0.3", "10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_inactive_dynamic_listeners_are_skipped() {
        let warming = listener("10.0.0.9", 9, vec![]);
        let serving = listener("10.0.0.1", 1, vec![]);
        let section = ListenersConfigDump {
            dynamic_listeners: vec![
                DynamicListener {
                    name: "warming".to_string(),
                    warming_state: Some(DynamicListenerState {
                        listener: Some(packed(&warming, LISTENER_TYPE_URL)),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                DynamicListener {
                    name: "serving".to_string(),
                    active_state: Some(DynamicListenerState {
                        listener: Some(packed(&serving, LISTENER_TYPE_URL)),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            static_listeners: vec![StaticListener::default()],
            ..Default::default()
        };
        let config_dump = ConfigDump {
            configs: vec![listeners_section(&section)],
        };

        let listeners = retrieve_listeners(Some(&config_dump)).unwrap();
        assert_eq!(listeners, vec![serving]);
    }

    #[test]
    fn test_v2_payloads_are_normalized() {
        let l = listener("10.0.0.1", 8080, vec![chain(vec![http_filter()])]);
        let section = ListenersConfigDump {
            static_listeners: vec![StaticListener {
                listener: Some(packed(&l, LISTENER_V2_TYPE_URL)),
                last_updated: None,
            }],
            ..Default::default()
        };
        let config_dump = ConfigDump {
            configs: vec![Any {
                type_url: LISTENERS_DUMP_V2_TYPE_URL.to_string(),
                value: section.encode_to_vec(),
            }],
        };

        let listeners = retrieve_listeners(Some(&config_dump)).unwrap();
        assert_eq!(listeners, vec![l]);
    }

    #[test]
    fn test_v2_dynamic_listener_is_normalized() {
        let l = listener("10.0.0.4", 9090, vec![chain(vec![http_filter()])]);
        let section = ListenersConfigDump {
            dynamic_listeners: vec![DynamicListener {
                name: l.name.clone(),
                active_state: Some(DynamicListenerState {
                    listener: Some(packed(&l, LISTENER_V2_TYPE_URL)),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let config_dump = ConfigDump {
            configs: vec![listeners_section(&section)],
        };

        let listeners = retrieve_listeners(Some(&config_dump)).unwrap();
        assert_eq!(listeners, vec![l]);
    }

    #[test]
    fn test_corrupt_entry_fails_whole_extraction() {
        let good = listener("10.0.0.1", 1, vec![]);
        let section = ListenersConfigDump {
            static_listeners: vec![
                StaticListener {
                    listener: Some(packed(&good, LISTENER_TYPE_URL)),
                    last_updated: None,
                },
                StaticListener {
                    listener: Some(Any {
                        type_url: LISTENER_TYPE_URL.to_string(),
                        value: vec![0x0a, 0xff, 0x01],
                    }),
                    last_updated: None,
                },
            ],
            ..Default::default()
        };
        let config_dump = ConfigDump {
            configs: vec![listeners_section(&section)],
        };

        let err = retrieve_listeners(Some(&config_dump)).unwrap_err();
        assert!(matches!(err, ConfigDumpError::Decode(_)));
        assert_eq!(err.to_string(), "unmarshal listener");
        assert!(std::error::Error::source(&err).is_some());
    }
}
