//! Endpoint URL helpers.

/// Join a service base URL and an endpoint path with exactly one slash.
///
/// ```
/// use sparkle_chat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://chat.example.com", "api/chat/stream"),
///     "https://chat.example.com/api/chat/stream"
/// );
/// assert_eq!(
///     construct_api_url("https://chat.example.com//", "/api/chat/reset"),
///     "https://chat.example.com/api/chat/reset"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}

/// Check that a user-supplied base URL can be used for requests.
///
/// Returns the URL without trailing slashes.
pub fn validate_base_url(base_url: &str) -> Result<String, String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| format!("base URL must start with http:// or https://: {base_url}"))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("base URL is missing a host: {base_url}"));
    }
    Ok(trimmed.to_string())
}
