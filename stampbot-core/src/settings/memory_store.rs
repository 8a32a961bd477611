// File: stampbot-core/src/settings/memory_store.rs

use dashmap::DashMap;
use serde_json::{Map, Value};
use stampbot_common::traits::settings_traits::SettingsStore;
use crate::Error;

/// Extension settings kept in memory, keyed like the host's
/// `extension_settings` object.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: DashMap<String, Value>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a host settings blob; it must be a JSON object.
    pub fn from_json(blob: Value) -> Result<Self, Error> {
        match blob {
            Value::Object(map) => {
                let store = Self::new();
                for (key, value) in map {
                    store.entries.insert(key, value);
                }
                Ok(store)
            }
            other => Err(Error::Settings(format!(
                "expected a settings object, got {}",
                other
            ))),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        let blob: Value = serde_json::from_str(raw)?;
        Self::from_json(blob)
    }

    /// Snapshot of every key, suitable for handing back to the host.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        Value::Object(map)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}
