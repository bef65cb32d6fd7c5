//! Smoothing, grayscale conversion and Sobel gradients.

use image::{GenericImageView, Rgb, RgbImage};

/// Dense single-channel `f32` field over an image grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ScalarField {
    /// Builds a field from a function of pixel coordinates.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// 8-bit luma (`0.299 R + 0.587 G + 0.114 B`, rounded).
    pub fn luma<V>(view: &V) -> Self
    where
        V: GenericImageView<Pixel = Rgb<u8>>,
    {
        let (width, height) = view.dimensions();
        Self::from_fn(width, height, |x, y| {
            let [r, g, b] = view.get_pixel(x, y).0;
            (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)).round()
        })
    }

    /// Width of the field.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the field.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Applies `f` to every value.
    #[must_use]
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Values widened to `f64`, for histogramming.
    pub fn iter_f64(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|&v| f64::from(v))
    }

    /// Value at a neighbour offset, mirrored at the border.
    fn neighbour(&self, x: u32, y: u32, dx: i64, dy: i64) -> f32 {
        let nx = reflect101(i64::from(x) + dx, self.width);
        let ny = reflect101(i64::from(y) + dy, self.height);
        self.get(nx, ny)
    }
}

/// Mirrors an out-of-range index without repeating the edge sample
/// (`-1 -> 1`, `n -> n - 2`). Only valid for offsets of one pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn reflect101(i: i64, n: u32) -> u32 {
    let n = i64::from(n);
    if n <= 1 {
        return 0;
    }
    let mirrored = if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    };
    // Safe: mirrored lies in 0..n for offsets of one pixel
    mirrored.clamp(0, n - 1) as u32
}

/// 3x3 mean filter over each channel, mirrored at the border.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn box_blur3(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let channels: Vec<ScalarField> = (0..3)
        .map(|c| ScalarField::from_fn(width, height, |x, y| f32::from(image.get_pixel(x, y).0[c])))
        .collect();

    RgbImage::from_fn(width, height, |x, y| {
        let mut out = [0u8; 3];
        for (slot, field) in out.iter_mut().zip(&channels) {
            let mut sum = 0.0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    sum += field.neighbour(x, y, dx, dy);
                }
            }
            // Safe: mean of 8-bit samples stays in 0..=255
            *slot = (sum / 9.0).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    })
}

/// Horizontal and vertical first derivatives of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    /// d/dx.
    pub gx: ScalarField,
    /// d/dy.
    pub gy: ScalarField,
}

impl Gradients {
    /// Euclidean gradient magnitude.
    #[must_use]
    pub fn magnitude(&self) -> ScalarField {
        ScalarField::from_fn(self.gx.width, self.gx.height, |x, y| {
            self.gx.get(x, y).hypot(self.gy.get(x, y))
        })
    }

    /// Gradient direction in degrees, in `[0, 360)`.
    #[must_use]
    pub fn orientation(&self) -> ScalarField {
        ScalarField::from_fn(self.gx.width, self.gx.height, |x, y| {
            let deg = self.gy.get(x, y).atan2(self.gx.get(x, y)).to_degrees();
            let deg = if deg < 0.0 { deg + 360.0 } else { deg };
            if deg >= 360.0 {
                0.0
            } else {
                deg
            }
        })
    }
}

/// 3x3 Sobel operator, mirrored at the border.
#[must_use]
pub fn sobel(field: &ScalarField) -> Gradients {
    let at = |x, y, dx, dy| field.neighbour(x, y, dx, dy);
    let gx = ScalarField::from_fn(field.width, field.height, |x, y| {
        (at(x, y, 1, -1) + 2.0 * at(x, y, 1, 0) + at(x, y, 1, 1))
            - (at(x, y, -1, -1) + 2.0 * at(x, y, -1, 0) + at(x, y, -1, 1))
    });
    let gy = ScalarField::from_fn(field.width, field.height, |x, y| {
        (at(x, y, -1, 1) + 2.0 * at(x, y, 0, 1) + at(x, y, 1, 1))
            - (at(x, y, -1, -1) + 2.0 * at(x, y, 0, -1) + at(x, y, 1, -1))
    });
    Gradients { gx, gy }
}

/// Blur, grayscale and Sobel in one step.
#[must_use]
pub fn smoothed_gradients(image: &RgbImage) -> Gradients {
    sobel(&ScalarField::luma(&box_blur3(image)))
}

/// `|v|` saturated to the 8-bit range.
#[must_use]
pub fn abs_saturated(field: &ScalarField) -> ScalarField {
    field.map(|v| v.abs().round().min(255.0))
}

#[cfg(test)]
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(2, 5), 2);
        assert_eq!(reflect101(-1, 1), 0);
        assert_eq!(reflect101(1, 1), 0);
    }

    #[test]
    fn test_luma_weights() {
        let img = RgbImage::from_fn(1, 1, |_, _| Rgb([255, 0, 0]));
        assert_eq!(ScalarField::luma(&img).get(0, 0), 76.0);
        let img = RgbImage::from_fn(1, 1, |_, _| Rgb([200, 200, 200]));
        assert_eq!(ScalarField::luma(&img).get(0, 0), 200.0);
    }

    #[test]
    fn test_blur_preserves_constant() {
        let img = RgbImage::from_fn(6, 4, |_, _| Rgb([10, 120, 250]));
        assert_eq!(box_blur3(&img), img);
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let img = RgbImage::from_fn(5, 5, |x, y| {
            if (x, y) == (2, 2) {
                Rgb([90, 90, 90])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let blurred = box_blur3(&img);
        assert_eq!(blurred.get_pixel(2, 2).0[0], 10);
        assert_eq!(blurred.get_pixel(1, 1).0[0], 10);
        assert_eq!(blurred.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_sobel_flat_field_is_zero() {
        let field = ScalarField::from_fn(8, 8, |_, _| 42.0);
        let g = sobel(&field);
        assert!(g.gx.values().iter().all(|&v| v == 0.0));
        assert!(g.gy.values().iter().all(|&v| v == 0.0));
        assert!(g.orientation().values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_sobel_horizontal_ramp() {
        let field = ScalarField::from_fn(8, 8, |x, _| x as f32 * 10.0);
        let g = sobel(&field);
        // Interior: (10 * 2) * (1 + 2 + 1) = 80
        assert_eq!(g.gx.get(3, 3), 80.0);
        assert_eq!(g.gy.get(3, 3), 0.0);
        // Mirrored border cancels the derivative
        assert_eq!(g.gx.get(0, 3), 0.0);
        assert_eq!(g.magnitude().get(3, 3), 80.0);
        assert_eq!(g.orientation().get(3, 3), 0.0);
    }

    #[test]
    fn test_orientation_quadrants() {
        let g = Gradients {
            gx: ScalarField::from_fn(4, 1, |x, _| [0.0, -1.0, 0.0, 1.0][x as usize]),
            gy: ScalarField::from_fn(4, 1, |x, _| [1.0, 0.0, -1.0, 1.0][x as usize]),
        };
        let o = g.orientation();
        assert!((o.get(0, 0) - 90.0).abs() < 1e-4);
        assert!((o.get(1, 0) - 180.0).abs() < 1e-4);
        assert!((o.get(2, 0) - 270.0).abs() < 1e-4);
        assert!((o.get(3, 0) - 45.0).abs() < 1e-4);
        assert!(o.values().iter().all(|&v| (0.0..360.0).contains(&v)));
    }

    #[test]
    fn test_abs_saturated() {
        let field = ScalarField::from_fn(3, 1, |x, _| [-300.0, -12.4, 99.6][x as usize]);
        assert_eq!(abs_saturated(&field).values(), &[255.0, 12.0, 100.0]);
    }
}
