// File: stampbot-core/src/services/timestamp_injector.rs

use std::sync::Arc;
use tracing::{debug, trace};
use stampbot_common::models::chat::ChatMessage;
use stampbot_common::models::timestamp::TimestampConfig;
use stampbot_common::traits::render_traits::{DateFormatter, TemplateRenderer};
use crate::render::{MacroRenderer, MomentFormatter};

/// Rewrites chat messages in place so each one carries its send time,
/// e.g. `[2024-01-15 10:30:00] hello`.
///
/// Unusable messages (tool output, empty or non-string text, unreadable
/// `send_date`) are left alone. Nothing here ever fails.
#[derive(Clone)]
pub struct TimestampInjector {
    renderer: Arc<dyn TemplateRenderer>,
    formatter: Arc<dyn DateFormatter>,
}

impl TimestampInjector {
    pub fn new(renderer: Arc<dyn TemplateRenderer>, formatter: Arc<dyn DateFormatter>) -> Self {
        Self { renderer, formatter }
    }

    /// `{{name}}` macros and moment-style formatting in the local zone.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(MacroRenderer::new()), Arc::new(MomentFormatter::new()))
    }

    /// Stamp every eligible message. Re-running on the same messages wraps
    /// them again; `{{message}}` always binds to the current text.
    pub fn inject(&self, messages: &mut [ChatMessage], config: &TimestampConfig) {
        if !config.is_active() {
            trace!("Timestamp injection inactive; leaving {} messages untouched", messages.len());
            return;
        }

        let mut stamped = 0usize;
        for (index, message) in messages.iter_mut().enumerate() {
            if self.stamp(index, message, config) {
                stamped += 1;
            }
        }

        debug!("Timestamp injection stamped {} of {} messages", stamped, messages.len());
    }

    fn stamp(&self, index: usize, message: &mut ChatMessage, config: &TimestampConfig) -> bool {
        if message.has_tool_invocations() {
            trace!(index, "skipping tool invocation message");
            return false;
        }

        let Some(text) = message.text() else {
            trace!(index, "skipping message without text");
            return false;
        };

        let Some(time) = message.send_date.as_ref().and_then(|raw| self.formatter.parse(raw)) else {
            trace!(index, send_date = ?message.send_date, "skipping message with invalid send_date");
            return false;
        };

        let timestamp = self.formatter.format(&time, &config.timestamp_format);
        let rendered = self.renderer.render(
            &config.message_format,
            &[("timestamp", timestamp.as_str()), ("message", text)],
        );

        message.set_text(rendered);
        true
    }
}
