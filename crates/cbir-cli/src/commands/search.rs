//! Search command - rank a directory of images against a query.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cbir_adapters::{load_image, FsImageSource};
use cbir_core::features::HistogramSpec;
use cbir_core::{
    rank_with_progress, ImageSource, MetricRegistry, MetricSettings, Ranking, ResultOutput,
};
use clap::{Args, ValueEnum};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar, TableOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// Aligned text table
    Table,
}

impl OutputFormat {
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "jsonl" => Some(Self::Jsonl),
            "json" => Some(Self::Json),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

/// Parse a count that must be at least `min`.
fn parse_at_least(s: &str, min: usize) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;
    if value < min {
        Err(format!("must be at least {min}"))
    } else {
        Ok(value)
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    parse_at_least(s, 1)
}

fn parse_bins(s: &str) -> Result<usize, String> {
    parse_at_least(s, HistogramSpec::MIN_BINS)
}

/// Arguments for a ranking run.
#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Directory holding the image database (write ./metrics for a directory named metrics)
    #[arg(value_name = "DIR", required = true)]
    pub dir: Option<PathBuf>,

    /// Query image (a path, or a file name inside DIR)
    #[arg(value_name = "QUERY", required = true)]
    pub query: Option<PathBuf>,

    /// Metric key, e.g. SSD, HIST, MULTIHIST, TEXTURE, TEXCOL, CUSTOM, GRADORIENT
    #[arg(value_name = "METRIC", required = true)]
    pub metric: Option<String>,

    /// Report only the K most similar images
    #[arg(short = 'n', long, value_name = "K", value_parser = parse_positive)]
    pub top_k: Option<usize>,

    /// Bins per channel for the baseline color histogram
    #[arg(long, value_parser = parse_bins)]
    pub bins: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl SearchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (metric configs and accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.top_k = args.top_k.or(config.general.top_k);
        args.bins = args.bins.or(config.histogram.bins);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Metric parameters from the merged config and flags.
    fn settings(&self) -> MetricSettings {
        let mut settings = MetricSettings::default();

        if let Some(config) = &self.config {
            if let Some(bins) = config.multi_region.bins {
                settings.multi_region.bins = bins;
            }
            if let Some(rows) = config.multi_region.rows {
                settings.multi_region.rows = rows;
            }
            if let Some(cols) = config.multi_region.cols {
                settings.multi_region.cols = cols;
            }
            if let Some(bins) = config.texture.bins {
                settings.texture.bins = bins;
            }
            if let Some(bins) = config.hsv.bins {
                settings.hsv.bins = bins;
            }
            if let Some(bins) = config.orientation.bins {
                settings.orientation.bins = bins;
            }
        }
        if let Some(bins) = self.bins {
            settings.histogram.bins = bins;
        }

        settings
    }
}

/// Resolve the query argument: an existing path wins, otherwise it is
/// looked up inside the database directory.
fn resolve_query(dir: &Path, query: &Path) -> PathBuf {
    if query.exists() {
        query.to_path_buf()
    } else {
        dir.join(query)
    }
}

/// Run the search command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &SearchArgs) -> Result<Ranking> {
    let (dir, query, metric_key) = match (&args.dir, &args.query, &args.metric) {
        (Some(dir), Some(query), Some(metric)) => (dir, query, metric),
        _ => anyhow::bail!("DIR, QUERY and METRIC are required"),
    };

    let settings = args.settings();
    debug!("Metric settings: {settings:?}");
    let registry = MetricRegistry::with_defaults(&settings)?;

    // Reject unknown keys before touching the filesystem
    let metric = registry.get(metric_key)?;

    let query_path = resolve_query(dir, query);
    info!("Loading query {}", query_path.display());
    let query = load_image(&query_path)?;

    let source = FsImageSource::new(dir.clone());
    let database = source
        .candidates()
        .with_context(|| format!("failed to load image database {}", dir.display()))?;

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(Some(database.len() as u64), args.quiet, show_progress);

    let ranking = rank_with_progress(&query.image, &database, metric, args.top_k, &progress);

    match args.format() {
        OutputFormat::Jsonl => write_all(&JsonOutput::stdout(), &ranking)?,
        OutputFormat::Json => {
            let output = JsonOutput::stdout();
            output.write_array(&ranking.results, args.pretty)?;
            output.flush()?;
        }
        OutputFormat::Table => write_all(&TableOutput::stdout(), &ranking)?,
    }

    info!(
        "Ranked {} candidates ({} skipped)",
        ranking.results.len(),
        ranking.failures.len()
    );

    Ok(ranking)
}

fn write_all(output: &dyn ResultOutput, ranking: &Ranking) -> Result<()> {
    for result in &ranking.results {
        output.write(result)?;
    }
    output.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::Cli;
    use cbir_core::ScoredCandidate;
    use cbir_test_support::MockResultOutput;
    use clap::Parser;

    fn parse(argv: &[&str]) -> SearchArgs {
        let mut full = vec!["cbir"];
        full.extend_from_slice(argv);
        Cli::try_parse_from(full).unwrap().search
    }

    fn config(toml: &str) -> AppConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let args = SearchArgs::with_config(parse(&["db", "q.png", "HIST"]), &AppConfig::default());
        assert_eq!(args.format(), OutputFormat::Jsonl);
        assert_eq!(args.top_k, None);
        assert_eq!(args.settings(), MetricSettings::default());
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config = config(
            r"
[general]
top_k = 4

[histogram]
bins = 16

[multi_region]
rows = 3

[output]
format = 'table'
pretty = true
",
        );
        let args = SearchArgs::with_config(parse(&["db", "q.png", "HIST"]), &config);

        assert_eq!(args.top_k, Some(4));
        assert_eq!(args.format(), OutputFormat::Table);
        assert!(args.pretty);
        let settings = args.settings();
        assert_eq!(settings.histogram.bins, 16);
        assert_eq!(settings.multi_region.rows, 3);
        assert_eq!(settings.multi_region.cols, 2);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = config(
            r"
[general]
top_k = 4

[histogram]
bins = 16

[output]
format = 'table'
",
        );
        let args = SearchArgs::with_config(
            parse(&["-n1", "--bins=8", "--format=json", "db", "q.png", "HIST"]),
            &config,
        );

        assert_eq!(args.top_k, Some(1));
        assert_eq!(args.format(), OutputFormat::Json);
        assert_eq!(args.settings().histogram.bins, 8);
    }

    #[test]
    fn test_resolve_query_falls_back_to_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let resolved = resolve_query(temp_dir.path(), Path::new("no-such-query.png"));
        assert_eq!(resolved, temp_dir.path().join("no-such-query.png"));

        let existing = temp_dir.path().join("q.png");
        std::fs::write(&existing, b"x").unwrap();
        assert_eq!(resolve_query(Path::new("elsewhere"), &existing), existing);
    }

    #[test]
    fn test_unknown_metric_fails_before_loading() {
        let args = SearchArgs::with_config(
            parse(&["/nonexistent/db", "q.png", "BOGUS"]),
            &AppConfig::default(),
        );
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("unknown metric"));
    }

    #[test]
    fn test_bins_below_two_rejected() {
        let mut argv = vec!["cbir", "--bins", "1", "db", "q.png", "HIST"];
        let err = Cli::try_parse_from(&argv).err().unwrap();
        assert_eq!(err.exit_code(), 2);

        argv[2] = "2";
        assert_eq!(Cli::try_parse_from(&argv).unwrap().search.bins, Some(2));
    }

    #[test]
    fn test_write_all_keeps_rank_order_and_flushes() {
        let scored = |rank: usize, id: &str, score: f64| ScoredCandidate {
            rank,
            index: rank - 1,
            id: id.to_string(),
            score,
        };
        let ranking = Ranking {
            results: vec![scored(1, "a.png", 0.0), scored(2, "b.png", 0.5)],
            failures: Vec::new(),
        };

        let output = MockResultOutput::new();
        write_all(&output, &ranking).unwrap();

        let ids: Vec<_> = output.results().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a.png", "b.png"]);
        assert_eq!(output.flush_count(), 1);
    }
}
