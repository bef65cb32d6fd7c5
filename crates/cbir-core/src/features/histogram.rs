//! Binned histograms and Pearson correlation.

use image::{GenericImageView, Rgb};

use crate::domain::Channel;
use crate::error::{Error, Result};

/// Bin layout of a histogram: `bins` equal-width bins over `[min, max)`,
/// with `max` itself folded into the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSpec {
    /// Number of bins.
    pub bins: usize,
    /// Lower edge of the first bin.
    pub min: f64,
    /// Upper edge of the last bin.
    pub max: f64,
}

impl HistogramSpec {
    /// Fewest bins a correlation can tell apart; one bin is constant for
    /// every input.
    pub const MIN_BINS: usize = 2;

    /// Creates a validated bin layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if there are fewer than
    /// [`Self::MIN_BINS`] bins or the range is empty or not finite.
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self> {
        if bins < Self::MIN_BINS {
            return Err(Error::InvalidParameter {
                name: "bins",
                reason: format!("must be at least {}, got {bins}", Self::MIN_BINS),
            });
        }
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(Error::InvalidParameter {
                name: "range",
                reason: format!("[{min}, {max}) is empty"),
            });
        }
        Ok(Self { bins, min, max })
    }

    /// `bins` bins over the 8-bit intensity range `[0, 256)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bins` is below [`Self::MIN_BINS`].
    pub fn intensity(bins: usize) -> Result<Self> {
        Self::new(bins, 0.0, 256.0)
    }

    /// Width of one bin.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Bin index for `value`, or `None` if it lies outside the range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !(self.min..=self.max).contains(&value) {
            return None;
        }
        // Safe: value >= min so the quotient is non-negative
        let index = ((value - self.min) / self.bin_width()).floor() as usize;
        Some(index.min(self.bins - 1))
    }
}

/// Ordered sequence of non-negative bin weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<f64>,
}

impl Histogram {
    /// Creates an all-zero histogram with the given layout.
    #[must_use]
    pub fn empty(spec: &HistogramSpec) -> Self {
        Self {
            bins: vec![0.0; spec.bins],
        }
    }

    /// Wraps precomputed bin weights.
    #[must_use]
    pub const fn from_bins(bins: Vec<f64>) -> Self {
        Self { bins }
    }

    /// Counts one channel of every pixel in `view`.
    pub fn from_channel<V>(view: &V, channel: Channel, spec: &HistogramSpec) -> Self
    where
        V: GenericImageView<Pixel = Rgb<u8>>,
    {
        Self::from_values(
            view.pixels()
                .map(|(_, _, pixel)| f64::from(channel.sample(&pixel))),
            spec,
        )
    }

    /// Counts every value of a derived scalar field.
    pub fn from_values(values: impl IntoIterator<Item = f64>, spec: &HistogramSpec) -> Self {
        let mut hist = Self::empty(spec);
        for value in values {
            if let Some(bin) = spec.bin_of(value) {
                hist.bins[bin] += 1.0;
            }
        }
        hist
    }

    /// Bin weights.
    #[must_use]
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if there are no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all bin weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Min-max rescales the bins onto `[0, 1]`.
    ///
    /// A constant histogram maps to all zeros.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let lo = self.bins.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.bins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;
        if self.bins.is_empty() || span <= 0.0 {
            return Self {
                bins: vec![0.0; self.bins.len()],
            };
        }
        Self {
            bins: self.bins.iter().map(|&b| (b - lo) / span).collect(),
        }
    }
}

/// Pearson correlation of two histograms, in `[-1, 1]` (1 = identical shape).
///
/// If either histogram has zero variance the correlation is 0, unless the
/// two are equal bin for bin, which gives 1.
///
/// # Errors
///
/// Returns [`Error::MetricComputation`] if the histograms are empty or have
/// different bin counts.
#[allow(clippy::cast_precision_loss)]
pub fn correlation(a: &Histogram, b: &Histogram) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::MetricComputation(format!(
            "histogram bin counts differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(Error::MetricComputation("empty histogram".into()));
    }

    let n = a.len() as f64;
    let mean_a = a.total() / n;
    let mean_b = b.total() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.bins.iter().zip(&b.bins) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return Ok(if a == b { 1.0 } else { 0.0 });
    }

    let r = cov / (var_a * var_b).sqrt();
    if r.is_finite() {
        Ok(r.clamp(-1.0, 1.0))
    } else {
        let reason = format!("correlation is not finite ({r})");
        Err(Error::MetricComputation(reason))
    }
}

/// Correlation turned into a dissimilarity: `1 - r`, in `[0, 2]`.
///
/// # Errors
///
/// See [`correlation`].
pub fn correlation_distance(a: &Histogram, b: &Histogram) -> Result<f64> {
    correlation(a, b).map(|r| 1.0 - r)
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn spec(bins: usize) -> HistogramSpec {
        HistogramSpec::intensity(bins).expect("valid spec")
    }

    #[test]
    fn test_spec_rejects_too_few_bins() {
        assert!(HistogramSpec::intensity(0).is_err());
        assert!(HistogramSpec::intensity(1).is_err());
        assert!(HistogramSpec::intensity(2).is_ok());
        assert!(HistogramSpec::new(8, 5.0, 5.0).is_err());
        assert!(HistogramSpec::new(8, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_bin_of_edges() {
        let s = spec(32);
        assert_eq!(s.bin_of(0.0), Some(0));
        assert_eq!(s.bin_of(7.999), Some(0));
        assert_eq!(s.bin_of(8.0), Some(1));
        assert_eq!(s.bin_of(255.0), Some(31));
        // Top edge is inclusive
        assert_eq!(s.bin_of(256.0), Some(31));
        assert_eq!(s.bin_of(-1.0), None);
        assert_eq!(s.bin_of(256.5), None);
    }

    #[test]
    fn test_channel_counts_sum_to_pixel_count() {
        let img = RgbImage::from_fn(17, 9, |x, y| {
            image::Rgb([(x * 13) as u8, (y * 29) as u8, 7])
        });
        for bins in [2, 8, 32, 256] {
            for channel in Channel::ALL {
                let hist = Histogram::from_channel(&img, channel, &spec(bins));
                assert_eq!(hist.len(), bins);
                assert_eq!(hist.total(), 17.0 * 9.0);
            }
        }
    }

    #[test]
    fn test_channel_histogram_uses_bgr_order() {
        let img = RgbImage::from_fn(4, 4, |_, _| image::Rgb([255, 0, 0]));
        let red = Histogram::from_channel(&img, Channel::Red, &spec(256));
        let blue = Histogram::from_channel(&img, Channel::Blue, &spec(256));
        assert_eq!(red.bins()[255], 16.0);
        assert_eq!(blue.bins()[0], 16.0);
    }

    #[test]
    fn test_normalized_range() {
        let hist = Histogram::from_bins(vec![2.0, 4.0, 6.0]);
        assert_eq!(hist.normalized().bins(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalized_constant_is_zero() {
        let hist = Histogram::from_bins(vec![3.0, 3.0, 3.0]);
        assert_eq!(hist.normalized().bins(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_correlation_identical() {
        let hist = Histogram::from_bins(vec![1.0, 5.0, 2.0, 0.0]);
        let r = correlation(&hist, &hist).expect("same length");
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_inverse() {
        let a = Histogram::from_bins(vec![1.0, 0.0]);
        let b = Histogram::from_bins(vec![0.0, 1.0]);
        let r = correlation(&a, &b).expect("same length");
        assert!((r + 1.0).abs() < 1e-12);
        assert!((correlation_distance(&a, &b).expect("same length") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_zero_variance_sentinel() {
        let flat = Histogram::from_bins(vec![1.0, 1.0, 1.0]);
        let peaked = Histogram::from_bins(vec![0.0, 3.0, 0.0]);
        assert_eq!(correlation(&flat, &peaked).expect("same length"), 0.0);
        assert_eq!(correlation(&flat, &flat).expect("same length"), 1.0);
    }

    #[test]
    fn test_correlation_length_mismatch() {
        let a = Histogram::from_bins(vec![1.0, 2.0]);
        let b = Histogram::from_bins(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            correlation(&a, &b),
            Err(Error::MetricComputation(_))
        ));
        let empty = Histogram::from_bins(vec![]);
        assert!(correlation(&empty, &empty).is_err());
    }

    #[test]
    fn test_from_values_skips_out_of_range() {
        let s = HistogramSpec::new(4, 0.0, 360.0).expect("valid");
        let hist = Histogram::from_values([0.0, 90.0, 359.9, 360.0, 400.0], &s);
        assert_eq!(hist.bins(), &[1.0, 1.0, 0.0, 2.0]);
    }
}
