use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use super::model::ScanResults;

pub fn load_scan_results(path: &Path) -> Result<ScanResults> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read scan results from {}", path.display()))?;

    let results = parse_scan_results(&raw)
        .with_context(|| format!("failed to parse scan results in {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        range = %results.network_range,
        hosts = results.hosts.as_ref().map_or(0, Vec::len),
        "loaded scan results"
    );
    Ok(results)
}

pub fn parse_scan_results(raw: &str) -> Result<ScanResults> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in scan results")?;
    if !parsed.is_object() {
        return Err(anyhow!("unexpected JSON type for scan results; expected an object"));
    }

    serde_json::from_value(parsed).context("scan results do not match the expected shape")
}
