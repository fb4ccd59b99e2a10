use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::ReportFormat;

/// Root configuration structure, deserialized from `.license-grouper/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Which dependencies to collect.
    #[serde(default)]
    pub scan: ScanConfig,
    /// How to render the grouped licenses.
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Packages left out of every report, by `name` or `name@version`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Format used when `--report` is not given.
    pub format: Option<ReportFormat>,
    /// File to write `json`/`text` reports to when `--output` is not given.
    pub output: Option<PathBuf>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-grouper/config.toml`
/// 3. `~/.config/license-grouper/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-grouper").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-grouper")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
