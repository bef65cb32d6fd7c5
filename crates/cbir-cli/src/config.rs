//! Configuration file support for cbir.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/cbir/config.toml` (lowest priority)
//! - Project-local: `.cbir.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use cbir_core::features::HistogramSpec;
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Baseline color histogram settings.
    pub histogram: BinsConfig,
    /// Multi-region color histogram settings.
    pub multi_region: MultiRegionConfig,
    /// Sobel texture histogram settings.
    pub texture: BinsConfig,
    /// HSV color histogram settings.
    pub hsv: BinsConfig,
    /// Gradient orientation histogram settings.
    pub orientation: BinsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of ranked results to report.
    pub top_k: Option<usize>,
}

/// Histogram section with a single bin count.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BinsConfig {
    /// Number of histogram bins.
    pub bins: Option<usize>,
}

/// Multi-region histogram configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MultiRegionConfig {
    /// Number of bins per channel and cell.
    pub bins: Option<usize>,
    /// Grid rows.
    pub rows: Option<u32>,
    /// Grid columns.
    pub cols: Option<u32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "jsonl", "json" or "table".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/cbir/config.toml`
    /// 2. Project-local: `.cbir.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as a
    /// warning and dropped so the built-in defaults apply instead.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Check configuration values without modifying them.
    fn validate(&self) -> Result<(), String> {
        if self.general.top_k == Some(0) {
            return Err("general.top_k must be greater than 0".to_string());
        }
        let bins = [
            ("histogram.bins", self.histogram.bins),
            ("multi_region.bins", self.multi_region.bins),
            ("texture.bins", self.texture.bins),
            ("hsv.bins", self.hsv.bins),
            ("orientation.bins", self.orientation.bins),
        ];
        for (name, value) in bins {
            if value.is_some_and(|bins| bins < HistogramSpec::MIN_BINS) {
                return Err(format!("{name} must be at least {}", HistogramSpec::MIN_BINS));
            }
        }
        for (name, value) in [
            ("multi_region.rows", self.multi_region.rows),
            ("multi_region.cols", self.multi_region.cols),
        ] {
            if value == Some(0) {
                return Err(format!("{name} must be greater than 0"));
            }
        }

        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "jsonl" | "json" | "table") {
                return Err(format!(
                    "output.format must be 'jsonl', 'json' or 'table', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Drop invalid values one at a time, returning what was dropped.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();
        while let Err(problem) = self.validate() {
            let field = problem.split_whitespace().next().unwrap_or_default();
            match field {
                "general.top_k" => self.general.top_k = None,
                "histogram.bins" => self.histogram.bins = None,
                "multi_region.bins" => self.multi_region.bins = None,
                "multi_region.rows" => self.multi_region.rows = None,
                "multi_region.cols" => self.multi_region.cols = None,
                "texture.bins" => self.texture.bins = None,
                "hsv.bins" => self.hsv.bins = None,
                "orientation.bins" => self.orientation.bins = None,
                "output.format" => self.output.format = None,
                _ => {
                    problems.push(problem);
                    break;
                }
            }
            problems.push(problem);
        }
        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.top_k = other.general.top_k.or(self.general.top_k);

        self.histogram.bins = other.histogram.bins.or(self.histogram.bins);

        self.multi_region.bins = other.multi_region.bins.or(self.multi_region.bins);
        self.multi_region.rows = other.multi_region.rows.or(self.multi_region.rows);
        self.multi_region.cols = other.multi_region.cols.or(self.multi_region.cols);

        self.texture.bins = other.texture.bins.or(self.texture.bins);
        self.hsv.bins = other.hsv.bins.or(self.hsv.bins);
        self.orientation.bins = other.orientation.bins.or(self.orientation.bins);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cbir").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.cbir.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".cbir.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
