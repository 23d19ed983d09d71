//! Config validation with path-qualified error messages.

use crate::overrides::OPENAI_API_KEY_VAR;
use crate::schema::ScanConfig;
use thiserror::Error;

/// Provider kinds the client factory knows how to build.
pub const KNOWN_PROVIDERS: &[&str] = &["openai", "mock"];

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    /// Convert into a single error listing every failure, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("invalid configuration: {joined}")
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_provider(config, &mut report);
    validate_server(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_provider(config: &ScanConfig, report: &mut ValidationReport) {
    let provider = config.provider();
    let kind = provider.kind();

    if !KNOWN_PROVIDERS.contains(&kind) {
        report.error(
            "provider.kind",
            format!("Unknown provider '{kind}'. Use one of: {}", KNOWN_PROVIDERS.join(", ")),
        );
    }
    if kind == "openai" && provider.api_key().is_none() {
        report.error(
            "provider.apiKey",
            format!("{OPENAI_API_KEY_VAR} environment variable is not set"),
        );
    }
    if kind == "mock" && provider.mock_replies.is_empty() {
        report.warn("provider.mockReplies", "Mock provider has no canned replies");
    }
    if provider.model().trim().is_empty() {
        report.error("provider.model", "Model cannot be empty");
    }
    let base_url = provider.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        report.error(
            "provider.baseUrl",
            format!("Base URL must start with http:// or https://, got '{base_url}'"),
        );
    }
    if provider.timeout_secs() == 0 {
        report.error("provider.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_server(config: &ScanConfig, report: &mut ValidationReport) {
    let server = config.server();
    let port = server.port();
    if port != 0 && port < 1024 && port != 80 && port != 443 {
        report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        );
    }
    if server.bind().trim().is_empty() {
        report.error("server.bind", "Bind address cannot be empty");
    }
    if server.max_upload_bytes() == 0 {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
}

fn validate_logging(config: &ScanConfig, report: &mut ValidationReport) {
    let logging = config.logging();
    let level = logging.level();
    // Directives like "objscan_gateway=debug" are passed through to the filter.
    if !level.contains('=') && !KNOWN_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("Unrecognised log level '{level}'"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ProviderConfig, ServerConfig};

    fn with_key() -> ScanConfig {
        ScanConfig {
            provider: Some(ProviderConfig {
                api_key: Some("sk-test".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn configured_openai_is_valid() {
        let report = validate(&with_key());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn missing_api_key_is_error() {
        let report = validate(&ScanConfig::default());
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "provider.apiKey");
        assert!(report.errors[0].message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn mock_provider_needs_no_key() {
        let cfg = ScanConfig {
            provider: Some(ProviderConfig {
                kind: Some("mock".into()),
                mock_replies: vec!["{}".into()],
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate(&cfg).is_valid());
    }

    #[test]
    fn unknown_provider_is_error() {
        let cfg = ScanConfig {
            provider: Some(ProviderConfig {
                kind: Some("gemini".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.errors.iter().any(|e| e.path == "provider.kind"));
    }

    #[test]
    fn zero_timeout_is_error() {
        let mut cfg = with_key();
        cfg.provider.as_mut().unwrap().timeout_secs = Some(0);
        let err = validate(&cfg).into_result().unwrap_err();
        assert!(err.to_string().contains("timeoutSecs"));
    }

    #[test]
    fn privileged_port_is_warning_only() {
        let mut cfg = with_key();
        cfg.server = Some(ServerConfig {
            port: Some(81),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "server.port");
    }
}
