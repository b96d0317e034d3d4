//! The color representations.
//!
//! [`Rgb8`] is the canonical representation of a resolved color token. The
//! other types are the coordinates of the color spaces that
//! [`space`](crate::space) converts between. Only Rgb8, [`Hsl`], and
//! [`Oklch`] ever show up in formatted output, and only after rounding.

use crate::Float;

/// A 24-bit sRGB color.
///
/// Once a token has been resolved, this is the color's ground truth. Its
/// channels are integral and within `0..=255` by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8([u8; 3]);

impl Rgb8 {
    /// Create a new 24-bit color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Create a new 24-bit color from floating point channels in `0..=255`.
    ///
    /// This function rounds each channel to the nearest integer and clamps
    /// the result to `0..=255`. Not-a-number becomes zero.
    pub fn from_channels(r: Float, g: Float, b: Float) -> Self {
        #[inline]
        fn channel(value: Float) -> u8 {
            if value.is_nan() {
                0
            } else {
                value.round().clamp(0.0, 255.0) as u8
            }
        }

        Self([channel(r), channel(g), channel(b)])
    }

    /// Get the red channel.
    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    /// Get the green channel.
    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    /// Get the blue channel.
    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    /// Get the three channels.
    pub const fn coordinates(&self) -> [u8; 3] {
        self.0
    }

    /// Determine whether red, green, and blue are the same.
    pub fn is_gray(&self) -> bool {
        let [r, g, b] = self.0;
        r == g && g == b
    }
}

impl AsRef<[u8; 3]> for Rgb8 {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl std::ops::Index<usize> for Rgb8 {
    type Output = u8;

    /// Access the channel with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(value: Rgb8) -> Self {
        value.0
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        f.write_fmt(format_args!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

// ====================================================================================================================

/// Gamma-decoded sRGB.
///
/// In-gamut coordinates range `0..=1`. Conversions from Oklab may produce
/// coordinates outside that range, which are clamped when converting back to
/// [`Rgb8`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearRgb(pub [Float; 3]);

impl LinearRgb {
    /// Create new linear sRGB coordinates.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self([r, g, b])
    }
}

impl AsRef<[Float; 3]> for LinearRgb {
    fn as_ref(&self) -> &[Float; 3] {
        &self.0
    }
}

/// Oklab coordinates: lightness `l` and the two chroma axes `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklab {
    pub l: Float,
    pub a: Float,
    pub b: Float,
}

impl Oklab {
    /// Create new Oklab coordinates.
    pub const fn new(l: Float, a: Float, b: Float) -> Self {
        Self { l, a, b }
    }
}

/// Oklch coordinates: lightness `l`, chroma `c`, and hue `h` in degrees.
///
/// Colors produced by this crate have `l` in `0..=1`, `c` non-negative, and
/// `h` in `0..360`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub l: Float,
    pub c: Float,
    pub h: Float,
}

impl Oklch {
    /// The largest chroma retained by [`Oklch::normalized`]. It is far outside
    /// the sRGB gamut, yet small enough for its cube to stay finite.
    pub const MAX_CHROMA: Float = 1_000.0;

    /// Create new Oklch coordinates.
    pub const fn new(l: Float, c: Float, h: Float) -> Self {
        Self { l, c, h }
    }

    /// Create new Oklch coordinates from possibly out-of-range values.
    ///
    /// This function clamps lightness to `0..=1` and chroma to
    /// `0..=MAX_CHROMA` and normalizes the hue into `0..360`. Not-a-number
    /// coordinates become zero.
    pub fn normalized(l: Float, c: Float, h: Float) -> Self {
        let l = if l.is_nan() { 0.0 } else { l.clamp(0.0, 1.0) };
        let c = if c.is_nan() {
            0.0
        } else {
            c.clamp(0.0, Self::MAX_CHROMA)
        };
        let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
        // rem_euclid may round up to exactly 360 for tiny negative hues.
        let h = if h >= 360.0 { 0.0 } else { h };
        Self { l, c, h }
    }
}

/// HSL coordinates: hue `h` in degrees and saturation `s` as well as lightness
/// `l` in percent.
///
/// The coordinates are not rounded, which makes the conversion from
/// [`Rgb8`] and back exact. [`Hsl::to_integers`] produces the rounded
/// version used by the `hsl` notation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: Float,
    pub s: Float,
    pub l: Float,
}

impl Hsl {
    /// Create new HSL coordinates.
    pub const fn new(h: Float, s: Float, l: Float) -> Self {
        Self { h, s, l }
    }

    /// Round hue, saturation, and lightness to integers.
    ///
    /// A hue that rounds up to 360 wraps around to 0. Saturation and
    /// lightness are clamped to `0..=100`.
    pub fn to_integers(&self) -> [u16; 3] {
        #[inline]
        fn round(value: Float, max: Float) -> u16 {
            if value.is_nan() {
                0
            } else {
                value.round().clamp(0.0, max) as u16
            }
        }

        [
            round(self.h, 360.0) % 360,
            round(self.s, 100.0),
            round(self.l, 100.0),
        ]
    }
}
