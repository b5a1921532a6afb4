//! Handlers for each configuration key.

use super::error::SettingError;
use super::{format_bool, parse_bool, SettingHandler};
use crate::core::config::{Appearance, Config};
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL_NAME};
use crate::utils::url::validate_base_url;

fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

fn success_unset(key: &str, default: &str) -> String {
    format!("✅ Unset {key} (will use default: {default})")
}

/// Handler for the `base-url` setting.
pub struct BaseUrlHandler;

impl SettingHandler for BaseUrlHandler {
    fn key(&self) -> &'static str {
        "base-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the service URL, specify it:",
                example: "sparkle set base-url http://localhost:8000",
            });
        };
        let url = validate_base_url(input).map_err(|message| SettingError::InvalidValue {
            key: "base-url",
            message,
        })?;
        let message = success_set("base-url", &url);
        config.base_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.base_url = None;
        success_unset("base-url", DEFAULT_BASE_URL)
    }

    fn format(&self, config: &Config) -> String {
        match &config.base_url {
            Some(url) => format!("  base-url: {url}"),
            None => format!("  base-url: (unset, default: {DEFAULT_BASE_URL})"),
        }
    }
}

/// Handler for the `model-name` setting.
pub struct ModelNameHandler;

impl SettingHandler for ModelNameHandler {
    fn key(&self) -> &'static str {
        "model-name"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let model = args.join(" ");
        let model = model.trim();
        if model.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set the model, specify its name:",
                example: "sparkle set model-name gemini-2.0-flash",
            });
        }
        config.model_name = Some(model.to_string());
        Ok(success_set("model-name", model))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.model_name = None;
        success_unset("model-name", DEFAULT_MODEL_NAME)
    }

    fn format(&self, config: &Config) -> String {
        match &config.model_name {
            Some(model) => format!("  model-name: {model}"),
            None => format!("  model-name: (unset, default: {DEFAULT_MODEL_NAME})"),
        }
    }
}

/// Handler for the `appearance` setting.
pub struct AppearanceHandler;

impl SettingHandler for AppearanceHandler {
    fn key(&self) -> &'static str {
        "appearance"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set the appearance, specify dark or light:",
                example: "sparkle set appearance light",
            });
        }
        let input = args.join(" ");
        let appearance = Appearance::parse(&input).ok_or_else(|| SettingError::InvalidValue {
            key: "appearance",
            message: format!("expected dark or light, got '{input}'"),
        })?;
        config.appearance = Some(appearance);
        Ok(success_set("appearance", appearance.as_str()))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.appearance = None;
        success_unset("appearance", Appearance::default().as_str())
    }

    fn format(&self, config: &Config) -> String {
        match config.appearance {
            Some(appearance) => format!("  appearance: {appearance}"),
            None => format!("  appearance: (unset, default: {})", Appearance::default()),
        }
    }
}

/// Data-driven handler for boolean (on/off) settings.
pub struct BooleanHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default: bool,
    get: fn(&Config) -> Option<bool>,
    set_field: fn(&mut Config, Option<bool>),
}

impl SettingHandler for BooleanHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let input = args.join(" ");
        let value = parse_bool(&input).ok_or(SettingError::InvalidBoolean(input))?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, format_bool(value)))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        success_unset(self.key, format_bool(self.default))
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {}", self.key, format_bool(value)),
            None => format!(
                "  {}: (unset, default: {})",
                self.key,
                format_bool(self.default)
            ),
        }
    }
}

/// Create a handler for the `raw-html` setting.
pub fn raw_html_handler() -> BooleanHandler {
    BooleanHandler {
        key: "raw-html",
        hint: "To pass HTML in replies through unescaped, specify on or off:",
        example: "sparkle set raw-html on",
        default: false,
        get: |c| c.raw_html,
        set_field: |c, v| c.raw_html = v,
    }
}

/// Create a handler for the `markdown` setting.
pub fn markdown_handler() -> BooleanHandler {
    BooleanHandler {
        key: "markdown",
        hint: "To set markdown rendering, specify on or off:",
        example: "sparkle set markdown off",
        default: true,
        get: |c| c.markdown,
        set_field: |c, v| c.markdown = v,
    }
}

/// Create a handler for the `syntax` setting.
pub fn syntax_handler() -> BooleanHandler {
    BooleanHandler {
        key: "syntax",
        hint: "To set syntax highlighting, specify on or off:",
        example: "sparkle set syntax off",
        default: true,
        get: |c| c.syntax,
        set_field: |c, v| c.syntax = v,
    }
}
