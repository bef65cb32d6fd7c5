//! CBIR Core - feature extraction, distance metrics and ranking
//!
//! This crate contains the image model, histogram and gradient feature
//! extractors, the pluggable distance metrics, the metric registry and the
//! ranking engine for content-based image retrieval.

pub mod domain;
pub mod error;
pub mod features;
pub mod metrics;
pub mod ports;
pub mod ranking;
pub mod registry;

pub use domain::{Candidate, CandidateFailure, Channel, Image, Metric, Ranking, ScoredCandidate};
pub use error::{Error, Result};
pub use ports::{ImageSource, NoProgress, ProgressEvent, ProgressSink, ResultOutput};
pub use ranking::{rank, rank_with_progress};
pub use registry::{MetricRegistry, MetricSettings};
