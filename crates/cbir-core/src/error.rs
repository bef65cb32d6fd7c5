//! Error kinds raised by ingestion, registry lookup and metric evaluation.

use std::path::PathBuf;

/// Errors produced by the retrieval pipeline.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database directory could not be opened.
    #[error("cannot open image directory {}: {reason}", path.display())]
    DirectoryNotFound {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// An image file could not be decoded.
    #[error("cannot read image {}: {reason}", path.display())]
    ImageReadFailure {
        /// File that failed to decode.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// No metric is registered under the requested key.
    #[error("unknown metric '{name}' (available: {})", available.join(", "))]
    UnknownMetric {
        /// Key that was looked up.
        name: String,
        /// Keys the registry does know.
        available: Vec<String>,
    },

    /// An image is smaller than the region a metric needs.
    #[error("{metric} needs {min_width}x{min_height}, got {width}x{height}")]
    DegenerateImage {
        /// Metric that rejected the image.
        metric: &'static str,
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Required width.
        min_width: u32,
        /// Required height.
        min_height: u32,
    },

    /// A numeric step inside a metric failed.
    #[error("metric computation failed: {0}")]
    MetricComputation(String),

    /// A configuration value is outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
