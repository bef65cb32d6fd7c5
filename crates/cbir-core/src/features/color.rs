//! Colour space conversion.

use image::{GenericImageView, Rgb};

use super::gradient::ScalarField;

/// HSV planes of an image, in 8-bit units.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvPlanes {
    /// Hue in half-degrees, `[0, 180)`.
    pub hue: ScalarField,
    /// Saturation, `[0, 255]`.
    pub saturation: ScalarField,
    /// Value, `[0, 255]`.
    pub value: ScalarField,
}

impl HsvPlanes {
    /// The three planes in H, S, V order.
    #[must_use]
    pub const fn planes(&self) -> [&ScalarField; 3] {
        [&self.hue, &self.saturation, &self.value]
    }
}

/// Converts one RGB pixel to 8-bit `(h, s, v)`.
#[must_use]
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> (f32, f32, f32) {
    let [r, g, b] = pixel.0.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let h = if delta <= 0.0 {
        0.0
    } else if (v - r).abs() < f32::EPSILON {
        60.0 * (g - b) / delta
    } else if (v - g).abs() < f32::EPSILON {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let half = (h / 2.0).round();
    let half = if half >= 180.0 { 0.0 } else { half };
    (half, s.round(), v)
}

/// Splits an image into HSV planes.
pub fn to_hsv<V>(view: &V) -> HsvPlanes
where
    V: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = view.dimensions();
    let converted: Vec<(f32, f32, f32)> = view.pixels().map(|(_, _, p)| rgb_to_hsv(p)).collect();
    let plane = |pick: fn(&(f32, f32, f32)) -> f32| {
        let mut values = converted.iter().map(pick);
        ScalarField::from_fn(width, height, |_, _| values.next().unwrap_or(0.0))
    };
    HsvPlanes {
        hue: plane(|p| p.0),
        saturation: plane(|p| p.1),
        value: plane(|p| p.2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 0])), (0.0, 255.0, 255.0));
        assert_eq!(rgb_to_hsv(Rgb([0, 255, 0])), (60.0, 255.0, 255.0));
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 255])), (120.0, 255.0, 255.0));
    }

    #[test]
    fn test_gray_has_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv(Rgb([128, 128, 128])), (0.0, 0.0, 128.0));
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 0])), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_hue_wraps_below_180() {
        // Magenta-ish red: hue just under 360 degrees
        let (h, _, _) = rgb_to_hsv(Rgb([255, 0, 1]));
        assert!((0.0..180.0).contains(&h), "h = {h}");
    }

    #[test]
    fn test_planes_follow_pixel_order() {
        let img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let hsv = to_hsv(&img);
        assert_eq!(hsv.hue.values(), &[0.0, 120.0]);
        assert_eq!(hsv.value.values(), &[255.0, 255.0]);
    }
}
