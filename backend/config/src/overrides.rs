//! Environment variable overrides, applied on top of the config file.
//!
//! Each recognised variable becomes a JSON merge patch entry, so a variable
//! only touches the field it names.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::io::apply_merge_patch;
use crate::schema::ScanConfig;

/// Credential variable read for the OpenAI provider.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// `(variable, section, field, kind)` for every supported override.
const OVERRIDES: &[(&str, &str, &str, Kind)] = &[
    (OPENAI_API_KEY_VAR, "provider", "apiKey", Kind::Text),
    ("OBJSCAN_PROVIDER", "provider", "kind", Kind::Text),
    ("OBJSCAN_MODEL", "provider", "model", Kind::Text),
    ("OBJSCAN_BASE_URL", "provider", "baseUrl", Kind::Text),
    ("OBJSCAN_TIMEOUT_SECS", "provider", "timeoutSecs", Kind::Number),
    ("OBJSCAN_BIND", "server", "bind", Kind::Text),
    ("PORT", "server", "port", Kind::Number),
    ("OBJSCAN_MAX_UPLOAD_BYTES", "server", "maxUploadBytes", Kind::Number),
    ("OBJSCAN_LOG_LEVEL", "logging", "level", Kind::Text),
    ("OBJSCAN_LOG_JSON", "logging", "json", Kind::Flag),
    ("OBJSCAN_LOG_DIR", "logging", "dir", Kind::Text),
];

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Number,
    Flag,
}

/// Apply overrides from an environment map.
pub fn apply_env_overrides_with(
    config: &ScanConfig,
    env: &HashMap<String, String>,
) -> Result<ScanConfig> {
    let mut patch = Map::new();

    for (var, section, field, kind) in OVERRIDES {
        let Some(raw) = env.get(*var).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = match kind {
            Kind::Text => Value::String(raw.to_string()),
            Kind::Number => {
                let n: u64 = raw
                    .parse()
                    .with_context(|| format!("{var} must be a non-negative integer, got {raw:?}"))?;
                json!(n)
            }
            Kind::Flag => Value::Bool(matches!(
                raw.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )),
        };
        let entry = patch
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(fields) = entry {
            fields.insert(field.to_string(), value);
        }
    }

    if patch.is_empty() {
        return Ok(config.clone());
    }
    apply_merge_patch(config, &Value::Object(patch))
}
