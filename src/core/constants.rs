//! Shared constants used across the application

/// Service used when neither the config file nor `--url` names one.
pub const DEFAULT_BASE_URL: &str = "https://chat-app-5x03.onrender.com";

/// Model requested when neither the config file nor `--model` names one.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.0-flash";

pub const STREAM_ENDPOINT: &str = "api/chat/stream";
pub const RESET_ENDPOINT: &str = "api/chat/reset";
pub const HISTORY_ENDPOINT: &str = "api/chat/history";

/// Shown in place of the reply when the transport fails.
pub const SEND_FAILURE_MESSAGE: &str = "Sorry, there was an error processing your message.";

/// Package version plus the git description of the build.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ")"
);
