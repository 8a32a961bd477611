// File: stampbot-core/src/services/settings_service.rs

use std::sync::Arc;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use stampbot_common::models::timestamp::{
    TimestampConfig, DEFAULT_MESSAGE_FORMAT, DEFAULT_TIMESTAMP_FORMAT, SETTINGS_KEY,
};
use stampbot_common::traits::settings_traits::{ConfigProvider, SettingsSaver, SettingsStore};

pub const EXTENSION_NAME: &str = "Message Timestamp";
pub const ENABLED_LABEL: &str = "Enabled";
pub const TIMESTAMP_FORMAT_LABEL: &str = "Timestamp format";
pub const MESSAGE_FORMAT_LABEL: &str = "Message format";
pub const TIMESTAMP_FORMAT_PLACEHOLDER: &str = "Example: YYYY-MM-DD HH:mm:ss";
pub const MESSAGE_FORMAT_PLACEHOLDER: &str = "Example: [{{timestamp}}] {{message}}";

const KEY_ENABLED: &str = "enabled";
const KEY_TIMESTAMP_FORMAT: &str = "timestampFormat";
const KEY_MESSAGE_FORMAT: &str = "messageFormat";

/// Loads, back-fills and edits the timestamp settings held in the host store.
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    saver: Arc<dyn SettingsSaver>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, saver: Arc<dyn SettingsSaver>) -> Self {
        Self { store, saver }
    }

    /// Returns the current settings, creating them on first use. Missing keys
    /// are filled with defaults; keys already in the stored object are kept as
    /// they are, and a wrongly typed value reads as switched off.
    pub fn get_configuration(&self) -> TimestampConfig {
        let object = self.load_object();
        TimestampConfig {
            enabled: object.get(KEY_ENABLED).is_some_and(is_truthy),
            timestamp_format: string_or_empty(object.get(KEY_TIMESTAMP_FORMAT)),
            message_format: string_or_empty(object.get(KEY_MESSAGE_FORMAT)),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.update(KEY_ENABLED, Value::Bool(enabled));
    }

    pub fn set_timestamp_format(&self, format: &str) {
        self.update(KEY_TIMESTAMP_FORMAT, Value::String(format.to_string()));
    }

    pub fn set_message_format(&self, format: &str) {
        self.update(KEY_MESSAGE_FORMAT, Value::String(format.to_string()));
    }

    fn update(&self, key: &str, value: Value) {
        let mut object = self.load_object();
        object.insert(key.to_string(), value);
        self.store.set(SETTINGS_KEY, Value::Object(object));
        debug!("Updated '{}' in {} settings", key, SETTINGS_KEY);
        self.saver.save_debounced();
    }

    fn load_object(&self) -> Map<String, Value> {
        let (mut object, mut changed) = match self.store.get(SETTINGS_KEY) {
            Some(Value::Object(map)) => (map, false),
            Some(other) => {
                warn!("Stored {} settings are not an object ({}); resetting to defaults", SETTINGS_KEY, other);
                (Map::new(), true)
            }
            None => (Map::new(), true),
        };

        changed |= back_fill(&mut object, KEY_ENABLED, Value::Bool(false));
        changed |= back_fill(
            &mut object,
            KEY_TIMESTAMP_FORMAT,
            Value::String(DEFAULT_TIMESTAMP_FORMAT.to_string()),
        );
        changed |= back_fill(
            &mut object,
            KEY_MESSAGE_FORMAT,
            Value::String(DEFAULT_MESSAGE_FORMAT.to_string()),
        );

        if changed {
            self.store.set(SETTINGS_KEY, Value::Object(object.clone()));
        }
        object
    }
}

impl ConfigProvider for SettingsService {
    fn get_configuration(&self) -> TimestampConfig {
        SettingsService::get_configuration(self)
    }
}

/// Insert `default` under `key` only when the key is absent.
fn back_fill(object: &mut Map<String, Value>, key: &str, default: Value) -> bool {
    if object.contains_key(key) {
        return false;
    }
    object.insert(key.to_string(), default);
    true
}

/// Truthiness as the host script sees it: `null`, `false`, `0`, `NaN` and `""`
/// are off, anything else is on.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::settings::InMemorySettingsStore;

    mockall::mock! {
        Saver {}
        impl SettingsSaver for Saver {
            fn save_debounced(&self);
        }
    }

    fn service(store: Arc<InMemorySettingsStore>, saves: usize) -> SettingsService {
        let mut saver = MockSaver::new();
        saver.expect_save_debounced().times(saves).return_const(());
        SettingsService::new(store, Arc::new(saver))
    }

    #[test]
    fn test_defaults_written_on_first_load() {
        let store = Arc::new(InMemorySettingsStore::new());
        let cfg = service(store.clone(), 0).get_configuration();

        assert_eq!(cfg, TimestampConfig::default());
        assert_eq!(
            store.get(SETTINGS_KEY),
            Some(json!({
                "enabled": false,
                "timestampFormat": "YYYY-MM-DD HH:mm:ss",
                "messageFormat": "[{{timestamp}}] {{message}}",
            }))
        );
    }

    #[test]
    fn test_back_fill_keeps_present_keys() {
        let store = Arc::new(InMemorySettingsStore::new());
        store.set(SETTINGS_KEY, json!({ "enabled": true, "timestampFormat": "HH:mm", "custom": 7 }));

        let cfg = service(store.clone(), 0).get_configuration();
        assert!(cfg.enabled);
        assert_eq!(cfg.timestamp_format, "HH:mm");
        assert_eq!(cfg.message_format, DEFAULT_MESSAGE_FORMAT);

        let stored = store.get(SETTINGS_KEY).unwrap();
        assert_eq!(stored["custom"], json!(7));
        assert_eq!(stored["messageFormat"], json!(DEFAULT_MESSAGE_FORMAT));
    }

    #[test]
    fn test_wrong_types_are_kept_and_read_as_inactive() {
        let store = Arc::new(InMemorySettingsStore::new());
        let stored = json!({ "enabled": true, "timestampFormat": null, "messageFormat": "{{message}}" });
        store.set(SETTINGS_KEY, stored.clone());

        let cfg = service(store.clone(), 0).get_configuration();
        assert!(cfg.enabled);
        assert_eq!(cfg.timestamp_format, "");
        assert!(!cfg.is_active());
        assert_eq!(store.get(SETTINGS_KEY), Some(stored));

        store.set(SETTINGS_KEY, json!({ "enabled": "yes", "timestampFormat": "HH:mm", "messageFormat": 3 }));
        let cfg = service(store.clone(), 0).get_configuration();
        assert!(cfg.enabled);
        assert_eq!(cfg.message_format, "");
        assert_eq!(store.get(SETTINGS_KEY).unwrap()["messageFormat"], json!(3));
    }

    #[test]
    fn test_non_object_is_reset_to_defaults() {
        let store = Arc::new(InMemorySettingsStore::new());
        store.set(SETTINGS_KEY, json!("garbage"));
        assert_eq!(service(store.clone(), 0).get_configuration(), TimestampConfig::default());
        assert!(store.get(SETTINGS_KEY).unwrap().is_object());
    }

    #[test]
    fn test_enabled_truthiness() {
        for (value, want) in [
            (json!(null), false),
            (json!(0), false),
            (json!(""), false),
            (json!(false), false),
            (json!(1), true),
            (json!("no"), true),
            (json!([]), true),
            (json!({}), true),
        ] {
            assert_eq!(is_truthy(&value), want, "{}", value);
        }
    }

    #[test]
    fn test_setters_persist_and_save() {
        let store = Arc::new(InMemorySettingsStore::new());
        let svc = service(store.clone(), 3);

        svc.set_enabled(true);
        svc.set_timestamp_format("HH:mm");
        svc.set_message_format("{{message}} ({{timestamp}})");

        let cfg = svc.get_configuration();
        assert!(cfg.enabled);
        assert_eq!(cfg.timestamp_format, "HH:mm");
        assert_eq!(cfg.message_format, "{{message}} ({{timestamp}})");
    }

    #[test]
    fn test_empty_format_is_kept_not_defaulted() {
        let store = Arc::new(InMemorySettingsStore::new());
        let svc = service(store.clone(), 1);

        svc.set_timestamp_format("");
        assert_eq!(svc.get_configuration().timestamp_format, "");
    }
}
