//! Versioned document envelope
//!
//! Stored shape: `{"version": 1, "data": <payload>}`.
//! Documents written before versioning (bare payloads, and the session as a
//! bare unquoted username) read as version 0 and are rewritten as the current
//! version on the next save.

use eyre::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::KvStore;

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Read and validate the document under `key`, or `None` if absent
pub fn read<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        // Unversioned session values were stored as raw text
        Err(e) => match serde_json::from_value(Value::String(raw.clone())) {
            Ok(data) => {
                log::debug!("Document '{}' is raw text, reading as version 0", key);
                return Ok(Some(data));
            }
            Err(_) => return Err(e).with_context(|| format!("Document '{}' is not valid JSON", key)),
        },
    };

    decode(key, value).map(Some)
}

/// Read the document under `key`, falling back to the type's default
pub fn read_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> Result<T> {
    Ok(read(store, key)?.unwrap_or_default())
}

/// Write `data` under `key` in the current envelope
pub fn write<T: Serialize>(store: &dyn KvStore, key: &str, data: &T) -> Result<()> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        data,
    };
    let json = serde_json::to_string(&envelope).with_context(|| format!("Failed to serialize document '{}'", key))?;
    store.set(key, &json)
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T> {
    if !is_envelope(&value) {
        log::debug!("Document '{}' has no envelope, reading as version 0", key);
        return serde_json::from_value(value).with_context(|| format!("Document '{}' is malformed", key));
    }

    let envelope: Envelope<Value> =
        serde_json::from_value(value).with_context(|| format!("Document '{}' has a malformed envelope", key))?;

    if envelope.version != SCHEMA_VERSION {
        eyre::bail!(
            "Document '{}' has unsupported schema version {} (expected {})",
            key,
            envelope.version,
            SCHEMA_VERSION
        );
    }

    serde_json::from_value(envelope.data).with_context(|| format!("Document '{}' is malformed", key))
}

fn is_envelope(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.len() == 2 && map.contains_key("version") && map.contains_key("data"),
        _ => false,
    }
}
