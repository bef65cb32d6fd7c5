//! Synthetic image builders for testing.

use cbir_core::domain::{Candidate, Image};

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating candidates with specific
/// colour and texture characteristics.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Colour ===

    /// Creates a single-colour image.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Candidate {
        Candidate::new(
            "synthetic://solid",
            Image::from_fn(width, height, |_, _| rgb),
        )
    }

    /// Solid red 10x10.
    #[must_use]
    pub fn red() -> Candidate {
        Self::named("red", Self::solid(10, 10, [255, 0, 0]))
    }

    /// Solid green 10x10.
    #[must_use]
    pub fn green() -> Candidate {
        Self::named("green", Self::solid(10, 10, [0, 255, 0]))
    }

    /// Solid blue 10x10.
    #[must_use]
    pub fn blue() -> Candidate {
        Self::named("blue", Self::solid(10, 10, [0, 0, 255]))
    }

    /// Four solid quadrants, in row-major order (top-left, top-right,
    /// bottom-left, bottom-right).
    #[must_use]
    pub fn quadrants(width: u32, height: u32, colours: [[u8; 3]; 4]) -> Candidate {
        let img = Image::from_fn(width, height, |x, y| {
            let col = usize::from(x >= width / 2);
            let row = usize::from(y >= height / 2);
            colours[row * 2 + col]
        });
        Candidate::new("synthetic://quadrants", img)
    }

    // === Texture ===

    /// Black and white checkerboard with 8-pixel cells.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> Candidate {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Checkerboard with a custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> Candidate {
        let cell = cell_size.max(1);
        let img = Image::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        });
        Candidate::new("synthetic://checkerboard", img)
    }

    /// Alternating black and white vertical bars.
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32) -> Candidate {
        let bar = bar_width.max(1);
        let img = Image::from_fn(width, height, |x, _| {
            if (x / bar) % 2 == 0 {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        });
        Candidate::new("synthetic://vertical_bars", img)
    }

    /// Alternating black and white horizontal bars.
    #[must_use]
    pub fn horizontal_bars(width: u32, height: u32, bar_height: u32) -> Candidate {
        let bar = bar_height.max(1);
        let img = Image::from_fn(width, height, |_, y| {
            if (y / bar) % 2 == 0 {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        });
        Candidate::new("synthetic://horizontal_bars", img)
    }

    /// Smooth left-to-right gray ramp.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> Candidate {
        let img = Image::from_fn(width, height, |x, _| {
            let v = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            [v, v, v]
        });
        Candidate::new("synthetic://horizontal_gradient", img)
    }

    /// Deterministic pseudo-random colour noise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn noise(width: u32, height: u32, seed: u32) -> Candidate {
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        let img = Image::from_fn(width, height, |_, _| {
            let mut next = || {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            };
            [next(), next(), next()]
        });
        Candidate::new("synthetic://noise", img)
    }

    // === Edge cases ===

    /// A 1x1 image.
    #[must_use]
    pub fn single_pixel(rgb: [u8; 3]) -> Candidate {
        Self::solid(1, 1, rgb)
    }

    /// Gives a candidate a new identifier.
    #[must_use]
    pub fn named(id: &str, candidate: Candidate) -> Candidate {
        Candidate::new(id, candidate.image)
    }
}
