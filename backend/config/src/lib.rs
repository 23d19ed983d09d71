//! `objscan-config`: runtime configuration for objscan.
//!
//! Provides:
//! - Typed config schema (provider, server, logging)
//! - YAML loading
//! - `${ENV_VAR}` substitution and environment overrides
//! - Default value application
//! - Validation and redaction for display

pub mod defaults;
pub mod env;
pub mod io;
pub mod overrides;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{collect_referenced_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{apply_merge_patch, config_dir, config_file_path, load_config, parse_config};
pub use overrides::{apply_env_overrides_with, OPENAI_API_KEY_VAR};
pub use redact::redact;
pub use schema::{LoggingConfig, ProviderConfig, ScanConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load a config file and run it through the full preparation pipeline
/// using the process environment.
///
/// The validation report is returned rather than logged because the logger
/// is usually configured from this very config.
pub async fn load_and_prepare(path: &Path) -> Result<(ScanConfig, ValidationReport)> {
    let raw = load_config(path).await?;
    prepare_with_env(raw, &std::env::vars().collect())
}

/// Substitute `${VAR}`s, apply env overrides and defaults, then validate.
pub fn prepare_with_env(
    raw: ScanConfig,
    env: &HashMap<String, String>,
) -> Result<(ScanConfig, ValidationReport)> {
    let value = serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: ScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides_with(&config, env)?;
    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn yaml_reference_resolved_then_validated() {
        let raw = parse_config("provider:\n  apiKey: ${OPENAI_API_KEY}\n").unwrap();
        let (cfg, report) = prepare_with_env(raw, &env(&[("OPENAI_API_KEY", "sk-x")])).unwrap();
        assert!(report.is_valid());
        assert_eq!(cfg.provider().api_key(), Some("sk-x"));
        assert_eq!(cfg.provider().model(), "gpt-4o-mini");
    }

    #[test]
    fn env_only_setup_without_file() {
        let (cfg, report) = prepare_with_env(
            ScanConfig::default(),
            &env(&[("OPENAI_API_KEY", "sk-y"), ("PORT", "9000")]),
        )
        .unwrap();
        assert!(report.is_valid());
        assert_eq!(cfg.server().port(), 9000);
    }

    #[test]
    fn missing_credential_reported_not_raised() {
        let (_, report) = prepare_with_env(ScanConfig::default(), &HashMap::new()).unwrap();
        assert!(!report.is_valid());
    }
}
