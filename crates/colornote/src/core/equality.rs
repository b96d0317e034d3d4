use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the tolerance for
/// equality comparisons, which depends on the floating point representation.
pub(crate) trait FloatExt {
    /// The largest absolute difference between two numbers that are still
    /// considered the same.
    const TOLERANCE: Self;

    /// The factor for rounding to two digits after the decimal.
    const HUNDREDTHS: Self;
}

impl FloatExt for f64 {
    const TOLERANCE: f64 = 1e-9;
    const HUNDREDTHS: f64 = 100.0;
}

impl FloatExt for f32 {
    const TOLERANCE: f32 = 1e-4;
    const HUNDREDTHS: f32 = 100.0;
}

/// Determine whether the two floats are close enough to be considered equal.
///
/// Not-a-number is treated as zero, which mirrors how the converters treat
/// powerless or undefined coordinates.
#[inline]
pub fn close_enough(f1: Float, f2: Float) -> bool {
    let f1 = if f1.is_nan() { 0.0 } else { f1 };
    let f2 = if f2.is_nan() { 0.0 } else { f2 };
    (f1 - f2).abs() <= <Float as FloatExt>::TOLERANCE
}

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`close_enough`] for comparing the two numbers.
///
/// # Panics
///
/// This macro panics if the two numbers differ by more than the tolerance.
/// Its message places the numbers below each other at the beginning of
/// subsequent lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        assert!(
            $crate::close_enough(f1, f2),
            "quantities differ:\n{:?}\n{:?}",
            f1,
            f2
        );
    };
}

/// Test macro for asserting that two coordinate triples are the same.
///
/// # Panics
///
/// This macro panics if any pair of coordinates differs by more than the
/// tolerance. Its message places the coordinates below each other at the
/// beginning of subsequent lines for easy comparability.
#[cfg(test)]
macro_rules! assert_same_coordinates {
    ($cs1:expr , $cs2:expr $(,)?) => {
        let (cs1, cs2): ([$crate::Float; 3], [$crate::Float; 3]) = ($cs1, $cs2);
        assert!(
            cs1.iter()
                .zip(cs2.iter())
                .all(|(c1, c2)| $crate::close_enough(*c1, *c2)),
            "color coordinates differ:\n{:?}\n{:?}",
            cs1,
            cs2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_same_coordinates;

/// Test macro for asserting that two 24-bit colors differ by at most one
/// per channel.
///
/// # Panics
///
/// This macro panics if any channel differs by more than one.
#[cfg(test)]
macro_rules! assert_within_one {
    ($c1:expr , $c2:expr $(,)?) => {
        let (c1, c2): ($crate::Rgb8, $crate::Rgb8) = ($c1, $c2);
        assert!(
            c1.coordinates()
                .iter()
                .zip(c2.coordinates().iter())
                .all(|(x1, x2)| x1.abs_diff(*x2) <= 1),
            "colors differ by more than one:\n{:?}\n{:?}",
            c1,
            c2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_within_one;
