// File: stampbot-common/src/traits/render_traits.rs

use chrono::{DateTime, FixedOffset};
use crate::models::chat::SendDate;

/// Renders a `{{name}}` template against a set of named tokens.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, tokens: &[(&str, &str)]) -> String;
}

/// Turns a raw `send_date` into a calendar time and formats it with a
/// token pattern such as `YYYY-MM-DD HH:mm:ss`.
pub trait DateFormatter: Send + Sync {
    /// Returns `None` for anything that is not a usable date.
    fn parse(&self, raw: &SendDate) -> Option<DateTime<FixedOffset>>;

    fn format(&self, time: &DateTime<FixedOffset>, pattern: &str) -> String;
}
