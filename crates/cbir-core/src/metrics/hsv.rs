//! HSV colour plus texture metric.

use crate::domain::{Image, Metric};
use crate::error::Result;
use crate::features::{correlation_distance, to_hsv, Histogram, HistogramSpec};

use super::{ensure_min_size, SobelTextureHistogram};

/// Configuration for [`HsvCustom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvCustomConfig {
    /// Bins per HSV plane over `[0, 256)`.
    pub bins: usize,
}

impl Default for HsvCustomConfig {
    fn default() -> Self {
        Self { bins: 256 }
    }
}

/// Normalised H, S and V histograms compared by correlation and summed
/// over the three planes, plus the [`SobelTextureHistogram`] score.
#[derive(Debug, Clone)]
pub struct HsvCustom {
    spec: HistogramSpec,
    texture: SobelTextureHistogram,
}

impl HsvCustom {
    /// Creates the metric.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `bins` is below two.
    pub fn new(config: HsvCustomConfig, texture: SobelTextureHistogram) -> Result<Self> {
        Ok(Self {
            spec: HistogramSpec::intensity(config.bins)?,
            texture,
        })
    }

    fn plane_histograms(&self, image: &Image) -> [Histogram; 3] {
        to_hsv(image.pixels())
            .planes()
            .map(|plane| Histogram::from_values(plane.iter_f64(), &self.spec).normalized())
    }

    /// Colour part of the score alone.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MetricComputation`] if a histogram comparison fails.
    pub fn color_distance(&self, query: &Image, candidate: &Image) -> Result<f64> {
        let q = self.plane_histograms(query);
        let c = self.plane_histograms(candidate);
        q.iter()
            .zip(&c)
            .map(|(a, b)| correlation_distance(a, b))
            .sum()
    }
}

impl Default for HsvCustom {
    fn default() -> Self {
        Self {
            spec: HistogramSpec {
                bins: HsvCustomConfig::default().bins,
                min: 0.0,
                max: 256.0,
            },
            texture: SobelTextureHistogram::default(),
        }
    }
}

impl Metric for HsvCustom {
    fn name(&self) -> &'static str {
        "hsv_custom"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], 1, 1)?;
        Ok(self.color_distance(query, candidate)? + self.texture.compute(query, candidate)?)
    }
}
