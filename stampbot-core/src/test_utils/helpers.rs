// File: stampbot-core/src/test_utils/helpers.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stampbot_common::models::chat::ChatMessage;
use stampbot_common::models::timestamp::TimestampConfig;
use stampbot_common::traits::settings_traits::SettingsSaver;
use crate::render::{MacroRenderer, MomentFormatter, Zone};
use crate::services::timestamp_injector::TimestampInjector;

/// 2024-01-15T10:30:00Z in epoch milliseconds.
pub const FIXED_INSTANT_MS: i64 = 1_705_314_600_000;

/// Injector that renders in UTC so results do not depend on the machine zone.
pub fn utc_injector() -> TimestampInjector {
    TimestampInjector::new(
        Arc::new(MacroRenderer::new()),
        Arc::new(MomentFormatter::with_zone(Zone::utc())),
    )
}

pub fn enabled_config(timestamp_format: &str, message_format: &str) -> TimestampConfig {
    TimestampConfig {
        enabled: true,
        timestamp_format: timestamp_format.to_string(),
        message_format: message_format.to_string(),
    }
}

pub fn message_at(text: &str, send_date_ms: i64) -> ChatMessage {
    ChatMessage::new(text, send_date_ms)
}

/// `SettingsSaver` that just counts calls.
#[derive(Debug, Default)]
pub struct CountingSaver {
    saves: AtomicUsize,
}

impl CountingSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsSaver for CountingSaver {
    fn save_debounced(&self) {
        self.saves.fetch_add(1, Ordering::SeqCst);
    }
}
