//! Colour histogram metrics, whole-image and per region.

use image::{GenericImageView, Rgb};

use crate::domain::{Channel, Image, Metric};
use crate::error::Result;
use crate::features::{correlation_distance, grid_cells, Histogram, HistogramSpec};

use super::ensure_min_size;

/// Mean per-channel correlation distance between two views.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn channel_distance<A, B>(a: &A, b: &B, spec: &HistogramSpec) -> Result<f64>
where
    A: GenericImageView<Pixel = Rgb<u8>>,
    B: GenericImageView<Pixel = Rgb<u8>>,
{
    let mut total = 0.0;
    for channel in Channel::ALL {
        let ha = Histogram::from_channel(a, channel, spec);
        let hb = Histogram::from_channel(b, channel, spec);
        total += correlation_distance(&ha, &hb)?;
    }
    Ok(total / Channel::ALL.len() as f64)
}

/// Configuration for [`BaselineHistogram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineHistogramConfig {
    /// Bins per channel over `[0, 256)`.
    pub bins: usize,
}

impl Default for BaselineHistogramConfig {
    fn default() -> Self {
        Self { bins: 32 }
    }
}

/// Per-channel colour histograms compared by correlation, averaged over
/// the three channels.
#[derive(Debug, Clone)]
pub struct BaselineHistogram {
    spec: HistogramSpec,
}

impl BaselineHistogram {
    /// Creates the metric.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `bins` is below two.
    pub fn new(config: BaselineHistogramConfig) -> Result<Self> {
        Ok(Self {
            spec: HistogramSpec::intensity(config.bins)?,
        })
    }
}

impl Default for BaselineHistogram {
    fn default() -> Self {
        Self {
            spec: HistogramSpec {
                bins: BaselineHistogramConfig::default().bins,
                min: 0.0,
                max: 256.0,
            },
        }
    }
}

impl Metric for BaselineHistogram {
    fn name(&self) -> &'static str {
        "baseline_histogram"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], 1, 1)?;
        channel_distance(query.pixels(), candidate.pixels(), &self.spec)
    }
}

/// Configuration for [`MultiRegionHistogram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiRegionHistogramConfig {
    /// Bins per channel over `[0, 256)`.
    pub bins: usize,
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
}

impl Default for MultiRegionHistogramConfig {
    fn default() -> Self {
        Self {
            bins: 32,
            rows: 2,
            cols: 2,
        }
    }
}

/// [`BaselineHistogram`] applied cell by cell over a grid partition,
/// averaged over the cells.
///
/// Each image is partitioned by its own dimensions, so corresponding cells
/// need not have the same pixel size.
#[derive(Debug, Clone)]
pub struct MultiRegionHistogram {
    spec: HistogramSpec,
    rows: u32,
    cols: u32,
}

impl MultiRegionHistogram {
    /// Creates the metric.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `bins` is below two
    /// or the grid has no cells.
    pub fn new(config: MultiRegionHistogramConfig) -> Result<Self> {
        if config.rows == 0 || config.cols == 0 {
            return Err(crate::Error::InvalidParameter {
                name: "grid",
                reason: format!("{}x{} grid has no cells", config.rows, config.cols),
            });
        }
        Ok(Self {
            spec: HistogramSpec::intensity(config.bins)?,
            rows: config.rows,
            cols: config.cols,
        })
    }
}

impl Default for MultiRegionHistogram {
    fn default() -> Self {
        let config = MultiRegionHistogramConfig::default();
        Self {
            spec: HistogramSpec {
                bins: config.bins,
                min: 0.0,
                max: 256.0,
            },
            rows: config.rows,
            cols: config.cols,
        }
    }
}

impl Metric for MultiRegionHistogram {
    fn name(&self) -> &'static str {
        "multi_region_histogram"
    }

    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], self.cols, self.rows)?;

        let (qw, qh) = query.dimensions();
        let (cw, ch) = candidate.dimensions();
        let cells = grid_cells(qw, qh, self.rows, self.cols)
            .zip(grid_cells(cw, ch, self.rows, self.cols));
        let Some((query_cells, candidate_cells)) = cells else {
            return Err(crate::Error::MetricComputation(
                "grid partition produced empty cells".into(),
            ));
        };

        let mut total = 0.0;
        for (q, c) in query_cells.iter().zip(&candidate_cells) {
            let qv = query.view(q.x, q.y, q.width, q.height)?;
            let cv = candidate.view(c.x, c.y, c.width, c.height)?;
            total += channel_distance(&*qv, &*cv, &self.spec)?;
        }
        Ok(total / query_cells.len() as f64)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::Error;

    fn solid(rgb: [u8; 3]) -> Image {
        Image::from_fn(10, 10, |_, _| rgb)
    }

    fn quadrants(colours: [[u8; 3]; 4], width: u32, height: u32) -> Image {
        Image::from_fn(width, height, |x, y| {
            let col = usize::from(x >= width / 2);
            let row = usize::from(y >= height / 2);
            colours[row * 2 + col]
        })
    }

    #[test]
    fn test_module_names() {
        assert_eq!(BaselineHistogram::default().name(), "baseline_histogram");
        assert_eq!(
            MultiRegionHistogram::default().name(),
            "multi_region_histogram"
        );
    }

    #[test]
    fn test_default_config() {
        assert_eq!(BaselineHistogramConfig::default().bins, 32);
        let multi = MultiRegionHistogramConfig::default();
        assert_eq!((multi.bins, multi.rows, multi.cols), (32, 2, 2));
    }

    #[test]
    fn test_invalid_config() {
        assert!(BaselineHistogram::new(BaselineHistogramConfig { bins: 1 }).is_err());
        let no_rows = MultiRegionHistogramConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(MultiRegionHistogram::new(no_rows).is_err());
    }

    #[test]
    fn test_baseline_self_distance_is_zero() {
        let img = Image::from_fn(16, 12, |x, y| [(x * 16) as u8, (y * 20) as u8, 90]);
        let d = BaselineHistogram::default()
            .compute(&img, &img)
            .expect("valid images");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_baseline_solid_colours() {
        let metric = BaselineHistogram::default();
        let red = solid([255, 0, 0]);
        let blue = solid([0, 0, 255]);
        let green = solid([0, 255, 0]);

        let red_red = metric.compute(&red, &red).expect("valid");
        let red_blue = metric.compute(&red, &blue).expect("valid");
        let red_green = metric.compute(&red, &green).expect("valid");

        assert!(red_red.abs() < 1e-9);
        assert!(red_blue > 0.5, "red_blue = {red_blue}");
        assert!((red_blue - red_green).abs() < 1e-12);
    }

    #[test]
    fn test_baseline_ignores_layout() {
        // Same pixels, different arrangement: global histograms agree
        let a = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 10, 10);
        let b = quadrants([[9, 9, 9], [0, 255, 0], [0, 0, 255], [255, 0, 0]], 10, 10);
        let metric = BaselineHistogram::default();
        let d = metric.compute(&a, &b).expect("valid");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_multi_region_sees_layout() {
        let a = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 10, 10);
        let b = quadrants([[9, 9, 9], [0, 255, 0], [0, 0, 255], [255, 0, 0]], 10, 10);
        let metric = MultiRegionHistogram::default();
        assert!(metric.compute(&a, &a).expect("valid").abs() < 1e-9);
        assert!(metric.compute(&a, &b).expect("valid") > 0.5);
    }

    #[test]
    fn test_multi_region_cells_sized_per_image() {
        let a = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 10, 10);
        let b = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 40, 6);
        let d = MultiRegionHistogram::default()
            .compute(&a, &b)
            .expect("valid");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_channel_distance_over_views() {
        let img = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 10, 10);
        let spec = HistogramSpec::intensity(8).expect("valid bins");
        let red = img.view(0, 0, 5, 5).expect("region fits");
        let blue = img.view(5, 0, 5, 5).expect("region fits");

        let same = channel_distance(&*red, solid([255, 0, 0]).pixels(), &spec).expect("valid");
        assert!(same.abs() < 1e-9, "same = {same}");
        let different = channel_distance(&*red, &*blue, &spec).expect("valid");
        assert!(different > 0.5, "different = {different}");
    }

    #[test]
    fn test_multi_region_drops_remainder() {
        // The odd last column is outside every cell, so its colour is ignored
        let base = quadrants([[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]], 10, 10);
        let padded = Image::from_fn(11, 10, |x, y| {
            if x == 10 {
                [123, 45, 67]
            } else {
                let px = base.pixels().get_pixel(x, y).0;
                [px[0], px[1], px[2]]
            }
        });
        let d = MultiRegionHistogram::default()
            .compute(&base, &padded)
            .expect("valid");
        assert!(d.abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn test_multi_region_degenerate() {
        let tiny = Image::from_fn(1, 1, |_, _| [0, 0, 0]);
        let ok = solid([0, 0, 0]);
        assert!(matches!(
            MultiRegionHistogram::default().compute(&ok, &tiny),
            Err(Error::DegenerateImage { .. })
        ));
    }
}
