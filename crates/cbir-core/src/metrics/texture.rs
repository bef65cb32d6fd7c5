//! Gradient-magnitude texture metrics.

use crate::domain::{Image, Metric};
use crate::error::Result;
use crate::features::{
    abs_saturated, correlation_distance, smoothed_gradients, Histogram, HistogramSpec,
};

use super::{ensure_min_size, BaselineHistogram};

/// Configuration for [`SobelTextureHistogram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SobelTextureHistogramConfig {
    /// Bins per axis over `[0, 256)`.
    pub bins: usize,
}

impl Default for SobelTextureHistogramConfig {
    fn default() -> Self {
        Self { bins: 8 }
    }
}

/// Texture descriptor: blurred grayscale Sobel responses, one histogram per
/// axis of the saturated absolute derivative, compared by correlation and
/// averaged over the two axes.
#[derive(Debug, Clone)]
pub struct SobelTextureHistogram {
    spec: HistogramSpec,
}

impl SobelTextureHistogram {
    /// Creates the metric.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `bins` is below two.
    pub fn new(config: SobelTextureHistogramConfig) -> Result<Self> {
        Ok(Self {
            spec: HistogramSpec::intensity(config.bins)?,
        })
    }

    /// Normalised per-axis histograms of one image.
    fn axis_histograms(&self, image: &Image) -> [Histogram; 2] {
        let gradients = smoothed_gradients(image.pixels());
        [&gradients.gx, &gradients.gy].map(|axis| {
            Histogram::from_values(abs_saturated(axis).iter_f64(), &self.spec).normalized()
        })
    }
}

impl Default for SobelTextureHistogram {
    fn default() -> Self {
        Self {
            spec: HistogramSpec {
                bins: SobelTextureHistogramConfig::default().bins,
                min: 0.0,
                max: 256.0,
            },
        }
    }
}

impl Metric for SobelTextureHistogram {
    fn name(&self) -> &'static str {
        "sobel_texture_histogram"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], 1, 1)?;

        let [qx, qy] = self.axis_histograms(query);
        let [cx, cy] = self.axis_histograms(candidate);
        let dx = correlation_distance(&qx, &cx)?;
        let dy = correlation_distance(&qy, &cy)?;
        Ok((dx + dy) / 2.0)
    }
}

/// Unweighted sum of the colour score ([`BaselineHistogram`]) and the
/// texture score ([`SobelTextureHistogram`]).
#[derive(Debug, Clone, Default)]
pub struct TextureColor {
    color: BaselineHistogram,
    texture: SobelTextureHistogram,
}

impl TextureColor {
    /// Creates the metric from its two components.
    #[must_use]
    pub const fn new(color: BaselineHistogram, texture: SobelTextureHistogram) -> Self {
        Self { color, texture }
    }
}

impl Metric for TextureColor {
    fn name(&self) -> &'static str {
        "texture_color"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        Ok(self.color.compute(query, candidate)? + self.texture.compute(query, candidate)?)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn stripes(width: u32, height: u32, period: u32, vertical: bool) -> Image {
        Image::from_fn(width, height, |x, y| {
            let t = if vertical { x } else { y };
            if (t / period) % 2 == 0 {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        })
    }

    #[test]
    fn test_module_names() {
        assert_eq!(
            SobelTextureHistogram::default().name(),
            "sobel_texture_histogram"
        );
        assert_eq!(TextureColor::default().name(), "texture_color");
    }

    #[test]
    fn test_default_config() {
        assert_eq!(SobelTextureHistogramConfig::default().bins, 8);
        assert!(SobelTextureHistogram::new(SobelTextureHistogramConfig { bins: 1 }).is_err());
    }

    #[test]
    fn test_texture_self_distance_is_zero() {
        let img = stripes(32, 32, 4, true);
        let d = SobelTextureHistogram::default()
            .compute(&img, &img)
            .expect("valid");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_flat_images_have_equal_texture() {
        // No edges at all: both histograms pile into bin 0
        let a = Image::from_fn(16, 16, |_, _| [200, 10, 10]);
        let b = Image::from_fn(20, 12, |_, _| [5, 5, 90]);
        let d = SobelTextureHistogram::default()
            .compute(&a, &b)
            .expect("valid");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_orientation_of_stripes_matters() {
        let vertical = stripes(32, 32, 4, true);
        let horizontal = stripes(32, 32, 4, false);
        let flat = Image::from_fn(32, 32, |_, _| [128, 128, 128]);
        let metric = SobelTextureHistogram::default();

        let rotated = metric.compute(&vertical, &horizontal).expect("valid");
        let same = metric.compute(&vertical, &vertical).expect("valid");
        let vs_flat = metric.compute(&vertical, &flat).expect("valid");
        assert!(rotated > same, "rotated = {rotated}");
        assert!(vs_flat > same, "vs_flat = {vs_flat}");
    }

    #[test]
    fn test_texture_color_is_sum() {
        let a = stripes(24, 24, 3, true);
        let b = Image::from_fn(24, 24, |x, _| {
            if x < 12 {
                [255, 0, 0]
            } else {
                [0, 0, 255]
            }
        });
        let metric = TextureColor::default();
        let color = BaselineHistogram::default()
            .compute(&a, &b)
            .expect("valid images");
        let texture = SobelTextureHistogram::default()
            .compute(&a, &b)
            .expect("valid");
        let sum = metric.compute(&a, &b).expect("valid");
        assert!((sum - (color + texture)).abs() < 1e-12);
        assert!(metric.compute(&a, &a).expect("valid").abs() < 1e-9);
    }
}
