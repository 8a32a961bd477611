// File: stampbot-core/src/render/template.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use stampbot_common::traits::render_traits::TemplateRenderer;

static MACRO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_\-]+)\s*\}\}").unwrap()
});

/// `{{name}}` substitution in the host's macro syntax.
///
/// Names are matched case-insensitively. Tokens passed to `render` win over
/// macros registered with `with_macro`. Unknown names are left as written, and
/// substituted text is never scanned again.
#[derive(Debug, Clone, Default)]
pub struct MacroRenderer {
    macros: Vec<(String, String)>,
}

impl MacroRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixed macro such as `{{user}}` or `{{char}}`.
    pub fn with_macro(mut self, name: &str, value: &str) -> Self {
        self.macros.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.macros.push((name.to_string(), value.to_string()));
        self
    }

    fn lookup<'a>(&'a self, name: &str, tokens: &'a [(&str, &str)]) -> Option<&'a str> {
        tokens
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
            .or_else(|| {
                self.macros
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v.as_str())
            })
    }
}

impl TemplateRenderer for MacroRenderer {
    fn render(&self, template: &str, tokens: &[(&str, &str)]) -> String {
        MACRO_RE
            .replace_all(template, |caps: &Captures| {
                match self.lookup(&caps[1], tokens) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_substitution() {
        let r = MacroRenderer::new();
        let out = r.render(
            "[{{timestamp}}] {{message}}",
            &[("timestamp", "2024-01-15"), ("message", "hello")],
        );
        assert_eq!(out, "[2024-01-15] hello");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let r = MacroRenderer::new();
        let out = r.render("{{ Timestamp }}|{{MESSAGE}}", &[("timestamp", "t"), ("message", "m")]);
        assert_eq!(out, "t|m");
    }

    #[test]
    fn test_unknown_tokens_left_verbatim() {
        let r = MacroRenderer::new();
        assert_eq!(r.render("{{nope}} {{message}}", &[("message", "x")]), "{{nope}} x");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let r = MacroRenderer::new();
        let out = r.render(
            "[{{timestamp}}] {{message}}",
            &[("timestamp", "noon"), ("message", "literal {{timestamp}}")],
        );
        assert_eq!(out, "[noon] literal {{timestamp}}");
    }

    #[test]
    fn test_tokens_override_fixed_macros() {
        let r = MacroRenderer::new()
            .with_macro("user", "Alice")
            .with_macro("message", "fallback");
        let out = r.render("{{user}}: {{message}}", &[("message", "hi")]);
        assert_eq!(out, "Alice: hi");
    }
}
