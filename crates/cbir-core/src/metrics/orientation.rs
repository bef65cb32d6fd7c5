//! Gradient orientation plus colour metric.

use crate::domain::{Image, Metric};
use crate::error::Result;
use crate::features::{correlation_distance, smoothed_gradients, Histogram, HistogramSpec};

use super::{ensure_min_size, BaselineHistogram};

/// Configuration for [`GradientOrientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientOrientationConfig {
    /// Bins over `[0, 360)` degrees.
    pub bins: usize,
}

impl Default for GradientOrientationConfig {
    fn default() -> Self {
        Self { bins: 24 }
    }
}

/// Normalised histogram of gradient direction compared by correlation,
/// plus the [`BaselineHistogram`] colour score.
#[derive(Debug, Clone)]
pub struct GradientOrientation {
    spec: HistogramSpec,
    color: BaselineHistogram,
}

impl GradientOrientation {
    /// Creates the metric.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `bins` is below two.
    pub fn new(config: GradientOrientationConfig, color: BaselineHistogram) -> Result<Self> {
        Ok(Self {
            spec: HistogramSpec::new(config.bins, 0.0, 360.0)?,
            color,
        })
    }

    /// Normalised orientation histogram of one image.
    #[must_use]
    pub fn orientation_histogram(&self, image: &Image) -> Histogram {
        let orientation = smoothed_gradients(image.pixels()).orientation();
        Histogram::from_values(orientation.iter_f64(), &self.spec).normalized()
    }
}

impl Default for GradientOrientation {
    fn default() -> Self {
        Self {
            spec: HistogramSpec {
                bins: GradientOrientationConfig::default().bins,
                min: 0.0,
                max: 360.0,
            },
            color: BaselineHistogram::default(),
        }
    }
}

impl Metric for GradientOrientation {
    fn name(&self) -> &'static str {
        "gradient_orientation"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], 1, 1)?;
        let q = self.orientation_histogram(query);
        let c = self.orientation_histogram(candidate);
        Ok(correlation_distance(&q, &c)? + self.color.compute(query, candidate)?)
    }
}
