//! Decoded raster image model.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, SubImage};

use crate::error::{Error, Result};

/// Colour channel of an [`Image`], indexed in B/G/R order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel 0.
    Blue,
    /// Channel 1.
    Green,
    /// Channel 2.
    Red,
}

impl Channel {
    /// All channels in B/G/R order.
    pub const ALL: [Self; 3] = [Self::Blue, Self::Green, Self::Red];

    /// Position of the channel in B/G/R order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Blue => 0,
            Self::Green => 1,
            Self::Red => 2,
        }
    }

    /// Reads this channel from an RGB-ordered pixel.
    #[must_use]
    pub const fn sample(self, pixel: &Rgb<u8>) -> u8 {
        pixel.0[2 - self.index()]
    }
}

/// Immutable 8-bit, 3-channel raster.
///
/// Metrics borrow images and never mutate them; any blurred or converted
/// working copy is derived per call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: RgbImage,
}

impl Image {
    /// Number of channels per pixel.
    pub const CHANNELS: usize = 3;

    /// Wraps an RGB buffer.
    #[must_use]
    pub const fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Converts any decoded image to 8-bit RGB.
    #[must_use]
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgb8())
    }

    /// Builds an image from a function returning `[r, g, b]` per pixel.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        Self::new(RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Number of pixels.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Underlying RGB buffer.
    #[must_use]
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Channel intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn sample(&self, x: u32, y: u32, channel: Channel) -> u8 {
        channel.sample(self.pixels.get_pixel(x, y))
    }

    /// Borrows a rectangular region without copying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the region is empty or extends
    /// past the image bounds.
    pub fn view(&self, x: u32, y: u32, width: u32, height: u32) -> Result<SubImage<&RgbImage>> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height());
        if width == 0 || height == 0 || !fits_x || !fits_y {
            return Err(Error::InvalidParameter {
                name: "region",
                reason: format!(
                    "{width}x{height}+{x}+{y} does not fit in {}x{}",
                    self.width(),
                    self.height()
                ),
            });
        }
        Ok(self.pixels.view(x, y, width, height))
    }
}
