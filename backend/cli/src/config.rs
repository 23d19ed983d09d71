use std::path::{Path, PathBuf};

use anyhow::Result;
use objscan_config::{config_dir, config_file_path, ProviderConfig};
use objscan_detection::Detector;
use objscan_providers::{build_client, request_timeout};

/// The config file to read: the explicit `--config` path, else the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path(&config_dir()),
    }
}

/// Build the detection pipeline from provider settings.
///
/// Fails on a missing credential without making any request.
pub fn build_detector(provider: &ProviderConfig) -> Result<Detector> {
    let client = build_client(provider)?;
    Ok(Detector::new(client).with_timeout(request_timeout(provider)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("/tmp/custom.yaml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.yaml"));
    }

    #[test]
    fn default_path_is_config_yaml() {
        assert!(resolve_config_path(None).ends_with("config.yaml"));
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let err = build_detector(&ProviderConfig::default()).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
