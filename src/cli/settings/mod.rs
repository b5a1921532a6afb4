//! Settings management for the `set`, `unset` and `config` commands.
//!
//! Each configuration key has a handler that parses, clears and formats
//! its value. Handlers edit a loaded [`Config`]; the caller saves it.

pub mod error;
pub mod handlers;

use std::collections::HashMap;

pub use error::SettingError;

use crate::core::config::Config;
use handlers::{
    markdown_handler, raw_html_handler, syntax_handler, AppearanceHandler, BaseUrlHandler,
    ModelNameHandler,
};

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key. Returns the
    /// message to show on success.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `sparkle config` output.
    fn format(&self, config: &Config) -> String;
}

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `sparkle config` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(BaseUrlHandler));
        registry.register(Box::new(ModelNameHandler));
        registry.register(Box::new(AppearanceHandler));
        registry.register(Box::new(raw_html_handler()));
        registry.register(Box::new(markdown_handler()));
        registry.register(Box::new(syntax_handler()));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Result<&dyn SettingHandler, SettingError> {
        self.handlers
            .get(key)
            .map(|h| h.as_ref())
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))
    }

    /// Get all keys in display order.
    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }

    /// One formatted line per key, in display order.
    pub fn describe(&self, config: &Config) -> Vec<String> {
        self.display_order
            .iter()
            .filter_map(|key| self.handlers.get(key))
            .map(|handler| handler.format(config))
            .collect()
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean value for display.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Appearance;
    use crate::core::constants::DEFAULT_MODEL_NAME;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn every_config_key_has_a_handler() {
        let registry = SettingRegistry::new();
        assert_eq!(
            registry.keys_display_order(),
            &[
                "base-url",
                "model-name",
                "appearance",
                "raw-html",
                "markdown",
                "syntax"
            ]
        );
        assert!(matches!(
            registry.get("theme"),
            Err(SettingError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_and_unset_round_trip_through_config() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();

        let message = registry
            .get("appearance")
            .and_then(|h| h.set(&args(&["Light"]), &mut config))
            .expect("appearance should parse");
        assert_eq!(message, "✅ Set appearance to: light");
        assert_eq!(config.appearance, Some(Appearance::Light));

        registry
            .get("model-name")
            .and_then(|h| h.set(&args(&["gemini-1.5-pro"]), &mut config))
            .expect("model should set");
        assert_eq!(config.model_name(), "gemini-1.5-pro");

        let handler = registry.get("model-name").expect("handler");
        handler.unset(&mut config);
        assert_eq!(config.model_name(), DEFAULT_MODEL_NAME);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();

        let err = registry
            .get("raw-html")
            .and_then(|h| h.set(&args(&["maybe"]), &mut config))
            .expect_err("not a boolean");
        assert_eq!(err, SettingError::InvalidBoolean("maybe".into()));

        let err = registry
            .get("base-url")
            .and_then(|h| h.set(&args(&["localhost:8000"]), &mut config))
            .expect_err("missing scheme");
        assert!(matches!(
            err,
            SettingError::InvalidValue {
                key: "base-url",
                ..
            }
        ));

        let err = registry
            .get("appearance")
            .and_then(|h| h.set(&[], &mut config))
            .expect_err("missing value");
        assert!(matches!(err, SettingError::MissingArgs { .. }));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn describe_lists_defaults() {
        let registry = SettingRegistry::new();
        let lines = registry.describe(&Config::default());
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "  appearance: (unset, default: dark)");
        assert_eq!(lines[3], "  raw-html: (unset, default: off)");
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
