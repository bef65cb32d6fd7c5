//! Metric trait for pluggable dissimilarity functions.

use super::Image;
use crate::error::Result;

/// A named, stateless dissimilarity function over two images.
///
/// Scores are non-negative and lower means more similar. Symmetry is not
/// part of the contract: some metrics index sub-regions of each image
/// independently.
pub trait Metric: Send + Sync {
    /// Returns the name of this metric.
    fn name(&self) -> &'static str;

    /// Scores `query` against `candidate`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DegenerateImage`] if either image is too small
    /// for the metric, or [`crate::Error::MetricComputation`] on numeric
    /// failure.
    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64>;
}
