//! Raw-pixel comparison of the central block.

use crate::domain::{Channel, Image, Metric};
use crate::error::Result;

use super::ensure_min_size;

/// Side length of the compared block.
const BLOCK: u32 = 5;

/// Sum of squared channel differences over the 5x5 block centred on each
/// image's own midpoint.
///
/// The two blocks are located independently, so images of different
/// aspect ratio are compared at their respective centres rather than at
/// aligned coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSsd;

impl BlockSsd {
    /// Creates the metric.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Top-left corner of the central block.
fn block_origin(image: &Image) -> (u32, u32) {
    let (width, height) = (image.pixels().width(), image.pixels().height());
    (width / 2 - BLOCK / 2, height / 2 - BLOCK / 2)
}

impl Metric for BlockSsd {
    fn name(&self) -> &'static str {
        "block_ssd"
    }

    fn compute(&self, query: &Image, candidate: &Image) -> Result<f64> {
        ensure_min_size(self.name(), [query, candidate], BLOCK, BLOCK)?;

        let (qx, qy) = block_origin(query);
        let (cx, cy) = block_origin(candidate);

        let mut sum = 0.0;
        for dy in 0..BLOCK {
            for dx in 0..BLOCK {
                for channel in Channel::ALL {
                    let a = f64::from(query.sample(qx + dx, qy + dy, channel));
                    let b = f64::from(candidate.sample(cx + dx, cy + dy, channel));
                    sum += (a - b) * (a - b);
                }
            }
        }
        Ok(sum)
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use crate::Error;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Image {
        Image::from_fn(width, height, |_, _| rgb)
    }

    #[test]
    fn test_module_name() {
        assert_eq!(BlockSsd.name(), "block_ssd");
    }

    #[test]
    fn test_self_distance_is_zero() {
        let img = Image::from_fn(13, 8, |x, y| [(x * 17) as u8, (y * 31) as u8, 3]);
        assert_eq!(BlockSsd.compute(&img, &img).expect("large enough"), 0.0);
    }

    #[test]
    fn test_solid_colours() {
        let black = solid(5, 5, [0, 0, 0]);
        let gray = solid(5, 5, [0, 0, 10]);
        // 25 pixels, one channel differs by 10
        assert_eq!(BlockSsd.compute(&black, &gray).expect("5x5"), 2500.0);
    }

    #[test]
    fn test_only_central_block_matters() {
        // Different sizes and surroundings, identical centre blocks
        let centre = |x: u32, y: u32, cx: u32, cy: u32| x.abs_diff(cx) <= 2 && y.abs_diff(cy) <= 2;
        let a = Image::from_fn(20, 20, |x, y| {
            if centre(x, y, 10, 10) {
                [((x - 8) * 40) as u8, ((y - 8) * 40) as u8, 200]
            } else {
                [255, 0, 0]
            }
        });
        let b = Image::from_fn(9, 7, |x, y| {
            if centre(x, y, 4, 3) {
                [((x - 2) * 40) as u8, ((y - 1) * 40) as u8, 200]
            } else {
                [0, 255, 7]
            }
        });
        assert_eq!(BlockSsd.compute(&a, &b).expect("large enough"), 0.0);
    }

    #[test]
    fn test_block_origin_uses_integer_midpoint() {
        assert_eq!(block_origin(&solid(5, 5, [0; 3])), (0, 0));
        assert_eq!(block_origin(&solid(6, 9, [0; 3])), (1, 2));
    }

    #[test]
    fn test_too_small() {
        let small = solid(4, 10, [0, 0, 0]);
        let ok = solid(10, 10, [0, 0, 0]);
        assert!(matches!(
            BlockSsd.compute(&ok, &small),
            Err(Error::DegenerateImage { .. })
        ));
        assert!(matches!(
            BlockSsd.compute(&small, &ok),
            Err(Error::DegenerateImage { .. })
        ));
    }
}
