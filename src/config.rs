use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Default relative-intensity threshold applied on load.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Viewer and report settings.
///
/// Read from an optional JSON file, then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Minimum relative intensity at the apex for a transition to be kept.
    pub threshold: f64,
    /// Whether the threshold filter is applied at all.
    pub apply_filter: bool,
    /// Overlay the total intensity curve on the plot.
    pub show_tic: bool,
    /// Plot each trace divided by its own maximum.
    pub relative_scaling: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            apply_filter: true,
            show_tic: false,
            relative_scaling: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Build the effective configuration for this run.
    pub fn with_cli_args(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        if let Some(threshold) = cli.threshold {
            config.threshold = threshold;
        }
        if cli.no_filter {
            config.apply_filter = false;
        }
        if cli.show_tic {
            config.show_tic = true;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{ "threshold": 0.25 }"#).unwrap();
        assert_eq!(config.threshold, 0.25);
        assert!(config.apply_filter);
        assert!(!config.show_tic);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<ViewerConfig>(r#"{ "treshold": 0.25 }"#).is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from(["rusty-chroma", "--threshold", "0.4", "--show-tic"]);
        let config = ViewerConfig::with_cli_args(&cli).unwrap();
        assert_eq!(config.threshold, 0.4);
        assert!(config.show_tic);
        assert!(config.apply_filter);

        let cli = Cli::parse_from(["rusty-chroma", "--no-filter"]);
        assert!(!ViewerConfig::with_cli_args(&cli).unwrap().apply_filter);
    }
}
