//! Name-to-metric lookup.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::Metric;
use crate::error::{Error, Result};
use crate::metrics::{
    BaselineHistogram, BaselineHistogramConfig, BlockSsd, GradientOrientation,
    GradientOrientationConfig, HsvCustom, HsvCustomConfig, MultiRegionHistogram,
    MultiRegionHistogramConfig, SobelTextureHistogram, SobelTextureHistogramConfig, TextureColor,
};

/// Parameters for the built-in metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricSettings {
    /// Colour histogram used by `HIST` and as the colour term of composites.
    pub histogram: BaselineHistogramConfig,
    /// `MULTIHIST` grid and bins.
    pub multi_region: MultiRegionHistogramConfig,
    /// Texture histogram used by `TEXTURE` and as the texture term of composites.
    pub texture: SobelTextureHistogramConfig,
    /// `CUSTOM` HSV bins.
    pub hsv: HsvCustomConfig,
    /// `GRADORIENT` orientation bins.
    pub orientation: GradientOrientationConfig,
}

/// Keys of the built-in metrics.
pub mod keys {
    /// Central block sum of squared differences.
    pub const SSD: &str = "SSD";
    /// Whole-image colour histogram.
    pub const HIST: &str = "HIST";
    /// Colour histogram per grid cell.
    pub const MULTIHIST: &str = "MULTIHIST";
    /// Sobel texture histogram.
    pub const TEXTURE: &str = "TEXTURE";
    /// Colour plus texture.
    pub const TEXCOL: &str = "TEXCOL";
    /// HSV colour plus texture.
    pub const CUSTOM: &str = "CUSTOM";
    /// Gradient orientation plus colour.
    pub const GRADORIENT: &str = "GRADORIENT";
}

/// Maps symbolic keys to metrics.
///
/// Keys are matched ASCII case-insensitively.
#[derive(Default)]
pub struct MetricRegistry {
    metrics: BTreeMap<String, Box<dyn Metric>>,
}

impl MetricRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in metric.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a setting is out of range.
    pub fn with_defaults(settings: &MetricSettings) -> Result<Self> {
        let color = BaselineHistogram::new(settings.histogram)?;
        let texture = SobelTextureHistogram::new(settings.texture)?;

        let mut registry = Self::new();
        registry.register(keys::SSD, BlockSsd::new());
        registry.register(keys::HIST, color.clone());
        registry.register(
            keys::MULTIHIST,
            MultiRegionHistogram::new(settings.multi_region)?,
        );
        registry.register(keys::TEXTURE, texture.clone());
        registry.register(
            keys::TEXCOL,
            TextureColor::new(color.clone(), texture.clone()),
        );
        registry.register(keys::CUSTOM, HsvCustom::new(settings.hsv, texture)?);
        registry.register(
            keys::GRADORIENT,
            GradientOrientation::new(settings.orientation, color)?,
        );
        Ok(registry)
    }

    /// Adds a metric, replacing any previous entry under the same key.
    pub fn register(&mut self, key: &str, metric: impl Metric + 'static) {
        let key = key.to_ascii_uppercase();
        debug!("Registering metric {key} ({})", metric.name());
        self.metrics.insert(key, Box::new(metric));
    }

    /// Looks up a metric by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMetric`] if no metric is registered under `key`.
    pub fn get(&self, key: &str) -> Result<&dyn Metric> {
        self.metrics
            .get(&key.to_ascii_uppercase())
            .map(|metric| &**metric)
            .ok_or_else(|| Error::UnknownMetric {
                name: key.to_string(),
                available: self.keys().map(str::to_string).collect(),
            })
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Iterates over `(key, metric)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Metric)> {
        self.metrics
            .iter()
            .map(|(key, metric)| (key.as_str(), &**metric))
    }

    /// Number of registered metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true if no metric is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
