//! Keep response bodies and credentials readable but bounded in logs.

/// Longest body excerpt written to the log, in bytes.
const BODY_LOG_LIMIT: usize = 512;
/// Characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// Cut `s` to at most [`BODY_LOG_LIMIT`] bytes on a char boundary.
///
/// Longer input is suffixed with its full length so truncation is visible.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= BODY_LOG_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= BODY_LOG_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [{} bytes total]", &s[..cut], s.len())
}

/// Show only the first few characters of a credential (`"abcd****"`).
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(VISIBLE_SECRET_CHARS).collect();
    if visible.len() == secret.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
