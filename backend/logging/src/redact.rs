//! Log Redaction
//!
//! Scrubs API keys and bearer tokens from strings prior to logging. Error
//! bodies from the vision service can echo request headers back.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[A-Za-z0-9_\-]{16,})|(Bearer\s+[A-Za-z0-9\-\._~+/]+=*)").unwrap()
});

// Base64 image payloads are large and useless in logs.
static DATA_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:image/[a-z+]+;base64,[A-Za-z0-9+/=]{64,}").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    DATA_URL_RE
        .replace_all(&redacted, "[IMAGE_DATA]")
        .into_owned()
}
