use crate::color::{Hsl, LinearRgb, Oklab, Oklch, Rgb8};
use crate::Float;

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert an 8-bit sRGB channel to linear light using sRGB's gamma.
pub fn srgb_to_linear(channel: u8) -> Float {
    let value = channel as Float / 255.0;
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear light value back to an 8-bit sRGB channel.
///
/// The value is clamped to `0..=1` before gamma encoding, and the encoded
/// result is rounded to the nearest integer. Not-a-number becomes zero.
pub fn linear_to_srgb(value: Float) -> u8 {
    if value.is_nan() {
        return 0;
    }

    let value = value.clamp(0.0, 1.0);
    let encoded = if value <= 0.0031308 {
        value * 12.92
    } else {
        value.powf(1.0 / 2.4).mul_add(1.055, -0.055)
    };

    (encoded.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert a 24-bit color to linear sRGB. This is a one-hop, direct conversion.
pub fn rgb8_to_linear_rgb(color: Rgb8) -> LinearRgb {
    let [r, g, b] = color.coordinates();
    LinearRgb::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// Convert linear sRGB to a 24-bit color, clamping each channel into gamut.
/// This is a one-hop, direct conversion.
pub fn linear_rgb_to_rgb8(value: LinearRgb) -> Rgb8 {
    let [r, g, b] = value.0;
    Rgb8::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

// --------------------------------------------------------------------------------------------------------------------
// https://bottosson.github.io/posts/oklab/#converting-from-linear-srgb-to-oklab

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_LMS: [[Float; 3]; 3] = [
    [ 0.4122214708, 0.5363325363, 0.0514459929 ],
    [ 0.2119034982, 0.6806995451, 0.1073969566 ],
    [ 0.0883024619, 0.2817188376, 0.6299787005 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542553,  0.7936177850, -0.0040720468 ],
    [ 1.9779984951, -2.4285922050,  0.4505937099 ],
    [ 0.0259040371,  0.7827717662, -0.8086757660 ],
];

/// Convert linear sRGB to Oklab. This is a one-hop, direct conversion, even
/// though it requires two matrix multiplications and a coordinate-wise cube
/// root.
pub fn linear_rgb_to_oklab(value: LinearRgb) -> Oklab {
    let [l, m, s] = multiply(&LINEAR_SRGB_TO_LMS, &value.0);
    let [l, a, b] = multiply(&LMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()]);
    Oklab::new(l, a, b)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_LMS: [[Float; 3]; 3] = [
    [ 1.0,  0.3963377774,  0.2158037573 ],
    [ 1.0, -0.1055613458, -0.0638541728 ],
    [ 1.0, -0.0894841775, -1.2914855480 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  4.0767416621, -3.3077115913,  0.2309699292 ],
    [ -1.2684380046,  2.6097574011, -0.3413193965 ],
    [ -0.0041960863, -0.7034186147,  1.7076147010 ],
];

/// Convert Oklab to linear sRGB. This is a one-hop, direct conversion, even
/// though it requires two matrix multiplications and a coordinate-wise cube.
/// The result may be out of gamut.
pub fn oklab_to_linear_rgb(value: Oklab) -> LinearRgb {
    let [l, m, s] = multiply(&OKLAB_TO_LMS, &[value.l, value.a, value.b]);
    LinearRgb(multiply(
        &LMS_TO_LINEAR_SRGB,
        &[l.powi(3), m.powi(3), s.powi(3)],
    ))
}

// --------------------------------------------------------------------------------------------------------------------

/// The chroma below which a color is treated as achromatic.
const EPSILON: Float = 0.0002;

/// Convert Oklab to Oklch. This is a one-hop, direct conversion.
///
/// Achromatic colors have a powerless hue, which this function reports as 0.
#[allow(non_snake_case)]
pub fn oklab_to_oklch(value: Oklab) -> Oklch {
    let Oklab { l: L, a, b } = value;

    let a_m = a.abs();
    if a_m < EPSILON && b.abs() < EPSILON {
        return Oklch::new(L, 0.0, 0.0);
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    let h = b.atan2(a).to_degrees();
    let h = if h.is_sign_negative() { h + 360.0 } else { h };
    // Adding 360 to a tiny negative angle rounds to 360.
    let h = if h >= 360.0 { 0.0 } else { h };

    Oklch::new(L, C, h)
}

/// Convert Oklch to Oklab. This is a one-hop, direct conversion.
#[allow(non_snake_case)]
pub fn oklch_to_oklab(value: Oklch) -> Oklab {
    let Oklch { l: L, c: C, h } = value;

    if h.is_nan() {
        Oklab::new(L, 0.0, 0.0)
    } else {
        let hue_radian = h.to_radians();
        Oklab::new(L, C * hue_radian.cos(), C * hue_radian.sin())
    }
}

/// Convert a 24-bit color to Oklch. This is a three-hop conversion that rounds
/// nothing.
#[inline]
pub fn rgb8_to_oklch(color: Rgb8) -> Oklch {
    oklab_to_oklch(linear_rgb_to_oklab(rgb8_to_linear_rgb(color)))
}

/// Convert Oklch to a 24-bit color. This is a three-hop conversion that
/// clamps out-of-gamut colors in linear sRGB.
#[inline]
pub fn oklch_to_rgb8(value: Oklch) -> Rgb8 {
    linear_rgb_to_rgb8(oklab_to_linear_rgb(oklch_to_oklab(value)))
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert a 24-bit color to HSL.
///
/// The result is not rounded. Achromatic colors have zero hue and zero
/// saturation.
pub fn rgb8_to_hsl(color: Rgb8) -> Hsl {
    let [r8, g8, b8] = color.coordinates();
    let max8 = r8.max(g8).max(b8);
    let min8 = r8.min(g8).min(b8);

    let [r, g, b] = [r8, g8, b8].map(|c| c as Float / 255.0);
    let max = max8 as Float / 255.0;
    let min = min8 as Float / 255.0;
    let l = (max + min) / 2.0;

    if max8 == min8 {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max8 == r8 {
        (g - b) / d + if g8 < b8 { 6.0 } else { 0.0 }
    } else if max8 == g8 {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert HSL to a 24-bit color.
///
/// Hue is normalized into `0..360`, while saturation and lightness are
/// clamped to `0..=100`.
pub fn hsl_to_rgb8(value: Hsl) -> Rgb8 {
    let h = if value.h.is_finite() {
        value.h.rem_euclid(360.0)
    } else {
        0.0
    };
    let s = (value.s / 100.0).clamp(0.0, 1.0);
    let l = (value.l / 100.0).clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = l - chroma / 2.0;

    let [r, g, b] = match sector as u8 {
        0 => [chroma, x, 0.0],
        1 => [x, chroma, 0.0],
        2 => [0.0, chroma, x],
        3 => [0.0, x, chroma],
        4 => [x, 0.0, chroma],
        _ => [chroma, 0.0, x],
    };

    Rgb8::from_channels((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
}

#[cfg(test)]
#[allow(clippy::excessive_precision)]
mod test {
    use super::*;
    use crate::core::{assert_same_coordinates, assert_within_one};

    struct Representations {
        rgb: Rgb8,
        linear: [Float; 3],
        oklab: [Float; 3],
        oklch: [Float; 3],
    }

    const RED: Representations = Representations {
        rgb: Rgb8::new(255, 0, 0),
        linear: [1.0, 0.0, 0.0],
        oklab: [0.6279553606145516, 0.22486306106597398, 0.1258462985307351],
        oklch: [0.6279553606145516, 0.2576833077361567, 29.233885192342633],
    };

    const BLUE: Representations = Representations {
        // #3178ea
        rgb: Rgb8::new(49, 120, 234),
        linear: [
            0.030713443732993635,
            0.18782077230067787,
            0.8227857543962835,
        ],
        oklab: [
            0.5909012924179691,
            -0.03348086723185095,
            -0.18362872721112256,
        ],
        oklch: [0.5909012924179691, 0.1866560417660615, 259.66681736368537],
    };

    const YELLOW: Representations = Representations {
        // #ffca00
        rgb: Rgb8::new(255, 202, 0),
        linear: [1.0, 0.5906188409193369, 0.0],
        oklab: [
            0.8613332017060554,
            0.0017175727276264596,
            0.1760014260192715,
        ],
        oklch: [0.8613332017060554, 0.1760098065929617, 89.4408764367447],
    };

    #[test]
    fn test_conversions() {
        for color in [&RED, &BLUE, &YELLOW] {
            let linear = rgb8_to_linear_rgb(color.rgb);
            assert_same_coordinates!(linear.0, color.linear);

            let oklab = linear_rgb_to_oklab(linear);
            assert_same_coordinates!([oklab.l, oklab.a, oklab.b], color.oklab);

            let oklch = oklab_to_oklch(oklab);
            assert_same_coordinates!([oklch.l, oklch.c, oklch.h], color.oklch);

            let also_oklab = oklch_to_oklab(oklch);
            assert_same_coordinates!([also_oklab.l, also_oklab.a, also_oklab.b], color.oklab);

            let also_linear = oklab_to_linear_rgb(also_oklab);
            assert_eq!(linear_rgb_to_rgb8(also_linear), color.rgb);
        }
    }

    #[test]
    fn test_gamma() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert_eq!(srgb_to_linear(255), 1.0);
        // Linear segment
        crate::assert_close_enough!(srgb_to_linear(10), 10.0 / 255.0 / 12.92);

        for channel in 0..=255 {
            assert_eq!(linear_to_srgb(srgb_to_linear(channel)), channel);
        }

        assert_eq!(linear_to_srgb(-0.5), 0);
        assert_eq!(linear_to_srgb(1.5), 255);
        assert_eq!(linear_to_srgb(Float::NAN), 0);
    }

    #[test]
    fn test_achromatic() {
        for level in [0, 1, 77, 128, 254, 255] {
            let oklch = rgb8_to_oklch(Rgb8::new(level, level, level));
            assert_eq!(oklch.c, 0.0);
            assert_eq!(oklch.h, 0.0);
        }

        let white = rgb8_to_oklch(Rgb8::new(255, 255, 255));
        crate::assert_close_enough!(white.l, 1.0);

        let hsl = rgb8_to_hsl(Rgb8::new(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.to_integers(), [0, 0, 50]);
    }

    #[test]
    fn test_hue_range() {
        for (hue, expected) in [(-30.0, 330.0), (390.0, 30.0), (0.0, 0.0)] {
            let oklch = Oklch::normalized(0.6, 0.1, hue);
            let again = rgb8_to_oklch(oklch_to_rgb8(oklch));
            assert!((0.0..360.0).contains(&again.h));
            assert!((again.h - expected).abs() < 2.0 || (again.h - expected).abs() > 358.0);
        }
    }

    #[test]
    fn test_gamut_clamping() {
        // Far outside sRGB's gamut, yet every channel stays in range.
        let color = oklch_to_rgb8(Oklch::new(0.7, 0.4, 150.0));
        assert_eq!(color, Rgb8::new(0, 214, 0));

        let color = oklch_to_rgb8(Oklch::new(1.0, 0.5, 300.0));
        assert_eq!(color.b(), 255);
    }

    #[test]
    fn test_oklch_round_trip() {
        for r in (0..=255).step_by(3) {
            for g in (0..=255).step_by(3) {
                for b in (0..=255).step_by(3) {
                    let color = Rgb8::new(r, g, b);
                    assert_within_one!(oklch_to_rgb8(rgb8_to_oklch(color)), color);
                }
            }
        }
    }

    #[test]
    fn test_hsl() {
        let hsl = rgb8_to_hsl(BLUE.rgb);
        assert_eq!(hsl.to_integers(), [217, 81, 55]);

        assert_eq!(hsl_to_rgb8(Hsl::new(0.0, 100.0, 50.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsl_to_rgb8(Hsl::new(120.0, 100.0, 50.0)), Rgb8::new(0, 255, 0));
        assert_eq!(hsl_to_rgb8(Hsl::new(240.0, 100.0, 50.0)), Rgb8::new(0, 0, 255));
        assert_eq!(hsl_to_rgb8(Hsl::new(600.0, 100.0, 50.0)), Rgb8::new(0, 0, 255));
        assert_eq!(hsl_to_rgb8(Hsl::new(0.0, 0.0, 100.0)), Rgb8::new(255, 255, 255));
    }

    #[test]
    fn test_hsl_round_trip() {
        for r in (0..=255).step_by(3) {
            for g in (0..=255).step_by(3) {
                for b in (0..=255).step_by(3) {
                    let color = Rgb8::new(r, g, b);
                    assert_eq!(hsl_to_rgb8(rgb8_to_hsl(color)), color);
                }
            }
        }
    }
}
