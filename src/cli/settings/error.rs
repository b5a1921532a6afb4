//! Failures of `sparkle set` / `sparkle unset`.

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    UnknownKey(String),
    /// Not one of the on/off spellings `parse_bool` accepts.
    InvalidBoolean(String),
    InvalidValue { key: &'static str, message: String },
    /// `set` was given a key but no value.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
    /// Writing the config file failed.
    SaveFailed(String),
}

impl SettingError {
    /// Extra line printed under the error, if any.
    fn follow_up(&self) -> Option<String> {
        match self {
            SettingError::UnknownKey(_) => {
                Some("   Run 'sparkle config' to list the available keys.".to_string())
            }
            SettingError::InvalidBoolean(_) => {
                Some("   Use 'on' or 'off' (also accepts true/false, yes/no)".to_string())
            }
            SettingError::MissingArgs { example, .. } => Some(format!("Example: {example}")),
            SettingError::InvalidValue { .. } | SettingError::SaveFailed(_) => None,
        }
    }

    /// Report on stderr the way the other CLI failures are reported.
    pub fn print(&self) {
        let marker = match self {
            SettingError::MissingArgs { .. } => "⚠️ ",
            _ => "❌",
        };
        eprintln!("{marker} {self}");
        if let Some(line) = self.follow_up() {
            eprintln!("{line}");
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidBoolean(input) => write!(f, "Invalid boolean value: {input}"),
            SettingError::InvalidValue { key, message } => {
                write!(f, "Invalid value for {key}: {message}")
            }
            SettingError::MissingArgs { hint, .. } => f.write_str(hint),
            SettingError::SaveFailed(msg) => write!(f, "Failed to save configuration: {msg}"),
        }
    }
}

impl std::error::Error for SettingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_up_lines() {
        assert!(SettingError::UnknownKey("x".into())
            .follow_up()
            .is_some_and(|line| line.contains("sparkle config")));
        assert_eq!(
            SettingError::MissingArgs {
                hint: "h",
                example: "sparkle set syntax on"
            }
            .follow_up()
            .as_deref(),
            Some("Example: sparkle set syntax on")
        );
        assert_eq!(SettingError::SaveFailed("disk".into()).follow_up(), None);
    }
}
