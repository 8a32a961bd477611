// File: stampbot-common/src/traits/settings_traits.rs

use serde_json::Value;
use crate::models::timestamp::TimestampConfig;

/// Host-provided keyed store for extension settings.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

/// Host-provided debounced save of the whole settings store.
pub trait SettingsSaver: Send + Sync {
    fn save_debounced(&self);
}

/// Anything that can hand out the current timestamp settings.
pub trait ConfigProvider: Send + Sync {
    fn get_configuration(&self) -> TimestampConfig;
}
