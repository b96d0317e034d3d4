mod conversion;
mod equality;
mod string;

// conversion
pub use conversion::{
    hsl_to_rgb8, linear_rgb_to_oklab, linear_rgb_to_rgb8, linear_to_srgb, oklab_to_linear_rgb,
    oklab_to_oklch, oklch_to_oklab, oklch_to_rgb8, rgb8_to_hsl, rgb8_to_linear_rgb,
    rgb8_to_oklch, srgb_to_linear,
};

// equality
#[cfg(test)]
pub(crate) use equality::{assert_same_coordinates, assert_within_one};
pub use equality::close_enough;
pub(crate) use equality::FloatExt;

// string
pub(crate) use string::{format, parse};
