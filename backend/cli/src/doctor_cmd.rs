//! `objscan doctor`: offline configuration diagnosis.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use objscan_config::{
    collect_referenced_vars, load_config, prepare_with_env, redact, ScanConfig, ValidationReport,
    OPENAI_API_KEY_VAR,
};

/// Print the diagnosis; fails when the configuration would not start.
pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n🔍 Running objscan doctor...\n");

    let env: HashMap<String, String> = std::env::vars().collect();
    let healthy = diagnose(config_path, &env).await?;

    println!();
    if healthy {
        println!("✅ All checks passed! objscan is ready.");
        Ok(())
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
        bail!("configuration is not usable")
    }
}

/// Run every check against `env`; `Ok(false)` means at least one failed.
async fn diagnose(config_path: &Path, env: &HashMap<String, String>) -> Result<bool> {
    check_config_file(config_path);
    let raw = load_config(config_path).await?;
    let references_ok = check_env_references(&raw, env)?;

    let (config, report) = match prepare_with_env(raw, env) {
        Ok(prepared) => prepared,
        Err(e) => {
            println!("  🔴 {e:#}");
            return Ok(false);
        }
    };
    let credential_ok = check_credential(&config);
    let report_ok = print_report(&report);
    print_effective_config(&config)?;

    Ok(references_ok && credential_ok && report_ok)
}

/// `${VAR}` names the config file references, each paired with whether it is set.
fn env_references(raw: &ScanConfig, env: &HashMap<String, String>) -> Result<Vec<(String, bool)>> {
    let value = serde_json::to_value(raw).context("Failed to serialize config")?;
    Ok(collect_referenced_vars(&value)
        .into_iter()
        .map(|var| {
            let set = env.get(&var).is_some_and(|v| !v.is_empty());
            (var, set)
        })
        .collect())
}

fn check_env_references(raw: &ScanConfig, env: &HashMap<String, String>) -> Result<bool> {
    let references = env_references(raw, env)?;
    if references.is_empty() {
        return Ok(true);
    }
    println!("Referenced environment variables:");
    for (var, set) in &references {
        if *set {
            println!("  🟢 {var}");
        } else {
            println!("  🔴 {var} is not set");
        }
    }
    Ok(references.iter().all(|(_, set)| *set))
}

fn check_config_file(path: &Path) {
    println!("Config file:");
    if path.is_file() {
        println!("  🟢 {}", path.display());
    } else {
        println!("  🟡 {} not found (using environment and defaults)", path.display());
    }
}

fn check_credential(config: &ScanConfig) -> bool {
    println!("Vision provider:");
    let provider = config.provider();
    println!("  • kind: {}", provider.kind());
    println!("  • model: {}", provider.model());
    match provider.kind() {
        "openai" if provider.api_key().is_some() => {
            println!("  🟢 API key is set");
            true
        }
        "openai" => {
            println!("  🔴 {OPENAI_API_KEY_VAR} is missing (REQUIRED)");
            false
        }
        _ => {
            println!("  🟢 no credential needed");
            true
        }
    }
}

fn print_report(report: &ValidationReport) -> bool {
    println!("Validation:");
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("  🟢 no findings");
    }
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }
    report.is_valid()
}

fn print_effective_config(config: &ScanConfig) -> Result<()> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    let yaml = serde_yaml::to_string(&redact(&value)).context("Failed to render config")?;
    println!("Effective config (secrets masked):");
    for line in yaml.lines() {
        println!("  {line}");
    }
    Ok(())
}
