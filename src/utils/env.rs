/// Read a setting from the environment.
///
/// `PLANDESK_{key}` wins; the bare `{key}` is the fallback, so a shared
/// `LOG_LEVEL` works without the prefix.
///
/// ```rust
/// use plandesk::utils::get_env_with_prefix;
///
/// let delay_ms: u64 = get_env_with_prefix("LOGIN_DELAY_MS")
///     .and_then(|ms| ms.parse().ok())
///     .unwrap_or(1000);
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("PLANDESK_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

/// Parse a boolean environment value, accepting `1`/`0`, `yes`/`no` and `true`/`false`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
