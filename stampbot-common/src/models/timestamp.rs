// File: stampbot-common/src/models/timestamp.rs

use serde::{Deserialize, Serialize};

/// Key under which the settings object lives in the host's extension store.
pub const SETTINGS_KEY: &str = "messageTimestamp";

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";
pub const DEFAULT_MESSAGE_FORMAT: &str = "[{{timestamp}}] {{message}}";

/// User-facing settings for timestamp injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimestampConfig {
    pub enabled: bool,
    pub timestamp_format: String,
    pub message_format: String,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
        }
    }
}

impl TimestampConfig {
    /// Injection only runs when enabled and both formats are non-empty.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.timestamp_format.is_empty() && !self.message_format.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_disabled() {
        let cfg = TimestampConfig::default();
        assert!(!cfg.enabled);
        assert!(!cfg.is_active());
        assert!(cfg.message_format.contains("{{timestamp}}"));
        assert!(cfg.message_format.contains("{{message}}"));
    }

    #[test]
    fn test_camel_case_shape() {
        let cfg: TimestampConfig = serde_json::from_value(json!({
            "enabled": true,
            "timestampFormat": "HH:mm",
        }))
        .unwrap();

        assert!(cfg.is_active());
        assert_eq!(cfg.timestamp_format, "HH:mm");
        assert_eq!(cfg.message_format, DEFAULT_MESSAGE_FORMAT);
    }

    #[test]
    fn test_empty_format_is_inactive() {
        let cfg = TimestampConfig {
            enabled: true,
            timestamp_format: String::new(),
            ..Default::default()
        };
        assert!(!cfg.is_active());
    }
}
