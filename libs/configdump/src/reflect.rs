//! Proto3 JSON for listeners, driven by the reflection descriptor pool.
//!
//! Every field the listener schema knows is rendered, including ones the
//! classifier never reads. `Any` payloads whose type is in the pool are
//! expanded in place; the rest keep their `@type` and base64 `value`.

use std::sync::OnceLock;

use meshscope_proto::envoy::config::listener::v3::Listener;
use meshscope_proto::meshscope::v1::OpaqueAny;
use meshscope_proto::{Message, Name, FILE_DESCRIPTOR_SET, OPAQUE_ANY_TYPE_URL};
use prost_reflect::{DescriptorPool, DynamicMessage, ReflectMessage, Value};
use serde_json::Value as Json;

use crate::error::{ConfigDumpError, Result};

const ANY_MESSAGE: &str = "google.protobuf.Any";

fn descriptor_pool() -> Option<&'static DescriptorPool> {
    static DESCRIPTORS: OnceLock<Option<DescriptorPool>> = OnceLock::new();
    DESCRIPTORS
        .get_or_init(|| DescriptorPool::decode(FILE_DESCRIPTOR_SET).ok())
        .as_ref()
}

/// Render listeners as a JSON array in the proto3 JSON mapping.
pub(crate) fn listeners_json(listeners: &[&Listener]) -> Result<Json> {
    let pool = descriptor_pool()
        .ok_or_else(|| ConfigDumpError::Schema("descriptor set does not decode".to_string()))?;
    let descriptor = pool
        .get_message_by_name(&Listener::full_name())
        .ok_or_else(|| ConfigDumpError::Schema(format!("{} is not described", Listener::full_name())))?;

    let messages = listeners
        .iter()
        .map(|listener| {
            let mut message =
                DynamicMessage::decode(descriptor.clone(), listener.encode_to_vec().as_slice())
                    .map_err(ConfigDumpError::Decode)?;
            resolve_any_fields(&mut message, pool);
            Ok(message)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut json = serde_json::to_value(&messages)?;
    unwrap_opaque(&mut json);
    Ok(json)
}

fn resolve_any_fields(message: &mut DynamicMessage, pool: &DescriptorPool) {
    if message.descriptor().full_name() == ANY_MESSAGE {
        resolve_any(message, pool);
        return;
    }
    for (_, value) in message.fields_mut() {
        resolve_value(value, pool);
    }
}

fn resolve_value(value: &mut Value, pool: &DescriptorPool) {
    match value {
        Value::Message(message) => resolve_any_fields(message, pool),
        Value::List(items) => items.iter_mut().for_each(|item| resolve_value(item, pool)),
        Value::Map(entries) => entries
            .values_mut()
            .for_each(|entry| resolve_value(entry, pool)),
        _ => {}
    }
}

/// Expand an `Any` the pool can describe; wrap anything else in an [`OpaqueAny`]
/// so serialization never has to resolve an unknown type.
fn resolve_any(any: &mut DynamicMessage, pool: &DescriptorPool) {
    let type_url = any
        .get_field_by_name("type_url")
        .and_then(|value| value.as_str().map(str::to_owned))
        .unwrap_or_default();
    let payload = any
        .get_field_by_name("value")
        .and_then(|value| value.as_bytes().cloned())
        .unwrap_or_default();

    let message_name = type_url.rsplit('/').next().unwrap_or(&type_url);
    let expanded = pool
        .get_message_by_name(message_name)
        .and_then(|descriptor| DynamicMessage::decode(descriptor, payload.clone()).ok());

    match expanded {
        Some(mut inner) => {
            resolve_any_fields(&mut inner, pool);
            any.set_field_by_name("value", Value::Bytes(inner.encode_to_vec().into()));
        }
        None => {
            let opaque = OpaqueAny {
                type_url,
                value: payload.to_vec(),
            };
            any.set_field_by_name("type_url", Value::String(OPAQUE_ANY_TYPE_URL.to_string()));
            any.set_field_by_name("value", Value::Bytes(opaque.encode_to_vec().into()));
        }
    }
}

/// Turn serialized [`OpaqueAny`] wrappers back into `{"@type", "value"}` objects.
fn unwrap_opaque(json: &mut Json) {
    match json {
        Json::Object(entries) => {
            if entries.get("@type").and_then(Json::as_str) == Some(OPAQUE_ANY_TYPE_URL) {
                let type_url = entries.remove("typeUrl").unwrap_or_else(|| Json::from(""));
                let value = entries.remove("value").unwrap_or_else(|| Json::from(""));
                entries.clear();
                entries.insert("@type".to_string(), type_url);
                entries.insert("value".to_string(), value);
            } else {
                entries.values_mut().for_each(unwrap_opaque);
            }
        }
        Json::Array(items) => items.iter_mut().for_each(unwrap_opaque),
        _ => {}
    }
}
