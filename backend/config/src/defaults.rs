//! Config defaults: applies default values to a parsed config.

use crate::schema::{LoggingConfig, ProviderConfig, ScanConfig, ServerConfig};

pub const DEFAULT_PROVIDER: &str = "openai";

/// Default vision model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default upper bound on one vision call (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8080;

/// Default upload limit (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ScanConfig) -> ScanConfig {
    let config = apply_provider_defaults(config);
    let config = apply_server_defaults(config);
    apply_logging_defaults(config)
}

fn apply_provider_defaults(mut config: ScanConfig) -> ScanConfig {
    let provider = config.provider.get_or_insert_with(ProviderConfig::default);
    provider.kind.get_or_insert_with(|| DEFAULT_PROVIDER.to_string());
    provider.model.get_or_insert_with(|| DEFAULT_MODEL.to_string());
    provider.base_url.get_or_insert_with(|| DEFAULT_BASE_URL.to_string());
    provider.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
}

fn apply_server_defaults(mut config: ScanConfig) -> ScanConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    config
}

fn apply_logging_defaults(mut config: ScanConfig) -> ScanConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(ScanConfig::default());
        let provider = cfg.provider.unwrap();
        assert_eq!(provider.model.as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(provider.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.server.unwrap().port, Some(DEFAULT_PORT));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = ScanConfig::default();
        cfg.provider = Some(ProviderConfig {
            model: Some("gpt-4o".into()),
            timeout_secs: Some(5),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        let provider = cfg.provider.unwrap();
        assert_eq!(provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(provider.timeout_secs, Some(5));
        assert!(provider.api_key.is_none());
    }
}
