//! Distance metric implementations.
//!
//! Each metric implements the [`Metric`](crate::domain::Metric) trait and
//! returns a dissimilarity where lower means more similar. Correlation
//! terms enter as `1 - r`, so every metric scores an image against itself
//! as 0.

mod block_ssd;
mod color_histogram;
mod hsv;
mod orientation;
mod texture;

pub use block_ssd::BlockSsd;
pub use color_histogram::{
    BaselineHistogram, BaselineHistogramConfig, MultiRegionHistogram, MultiRegionHistogramConfig,
};
pub use hsv::{HsvCustom, HsvCustomConfig};
pub use orientation::{GradientOrientation, GradientOrientationConfig};
pub use texture::{SobelTextureHistogram, SobelTextureHistogramConfig, TextureColor};

use crate::domain::Image;
use crate::error::{Error, Result};

/// Fails with [`Error::DegenerateImage`] unless both images are at least
/// `min_width` x `min_height`.
pub(crate) fn ensure_min_size(
    metric: &'static str,
    images: [&Image; 2],
    min_width: u32,
    min_height: u32,
) -> Result<()> {
    for image in images {
        let (width, height) = image.dimensions();
        if width < min_width || height < min_height {
            return Err(Error::DegenerateImage {
                metric,
                width,
                height,
                min_width,
                min_height,
            });
        }
    }
    Ok(())
}
