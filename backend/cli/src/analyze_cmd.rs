//! `objscan analyze <FILE>`

use std::path::Path;

use anyhow::{bail, Context, Result};
use objscan_config::{ScanConfig, ValidationReport};
use objscan_detection::Detector;

use crate::config::build_detector;

pub async fn run(config: &ScanConfig, report: ValidationReport, file: &Path) -> Result<()> {
    ensure_file(file)?;
    report.log();
    report.into_result()?;

    let detector = build_detector(&config.provider())?;
    let text = analyze_file(&detector, file).await?;
    println!("{text}");
    Ok(())
}

fn ensure_file(file: &Path) -> Result<()> {
    if !file.is_file() {
        bail!("File not found: {}", file.display());
    }
    Ok(())
}

/// Read `file` and run it through the pipeline.
pub async fn analyze_file(detector: &Detector, file: &Path) -> Result<String> {
    ensure_file(file)?;
    let jpeg = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if jpeg.is_empty() {
        bail!("File is empty: {}", file.display());
    }
    Ok(detector.analyze(&jpeg).await?)
}
