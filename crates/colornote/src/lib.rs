//! # Colornote
//!
//! Colornote parses the color notations found in style sheets and design
//! tokens and re-emits them in another notation. It understands hexadecimal
//! colors with three or six digits, the `rgb()`, `rgba()`, `hsl()`, `hsla()`,
//! and `oklch()` functions, as well as the bare `R G B` and `H S% L%` triples
//! it produces itself. Everything else, such as the name of a styling
//! variable, is a reference that passes through unchanged.
//!
//!
//! ## 1. Overview
//!
//! Colornote's main abstractions are:
//!
//!   * [`Engine`] resolves **color tokens** to 24-bit [`Rgb8`] colors and
//!     formats them in one of five [`Notation`]s. Its options are
//!     [`EngineOptions`], configured through an [`EngineOptionsBuilder`].
//!   * [`Token`] is the **result of resolving** a string. It either carries a
//!     color or is a reference, and only the former can be formatted in a
//!     numeric notation.
//!   * The [`space`] module provides the **color space conversions** between
//!     [`Rgb8`], [`LinearRgb`], [`Oklab`], [`Oklch`], and [`Hsl`]. They are
//!     pure functions that never round, except when producing [`Rgb8`].
//!   * [`Cache`] abstracts over the **memoization** of resolved tokens, with
//!     [`MemoCache`] remembering every successfully resolved token and
//!     [`NoCache`] remembering nothing.
//!
//!
//! ## 2. Converting Tokens
//!
//! [`convert`] uses a process-wide engine and falls back to the original
//! token whenever that token cannot be converted:
//!
//! ```
//! # use colornote::{convert, Notation};
//! assert_eq!(convert("#ff0000", Notation::Oklch), "oklch(0.63 0.26 29)");
//! assert_eq!(convert("rgb(255 0 0 / 50%)", Notation::Hex), "#ff0000");
//! assert_eq!(convert("#808080", Notation::Hsl), "0 0% 50%");
//! assert_eq!(convert("hsl(120deg 100% 25%)", Notation::Rgb), "0 128 0");
//! assert_eq!(convert("--accent", Notation::Hex), "--accent");
//! ```
//!
//! Use [`Engine::try_convert`] to learn why a token could not be converted:
//!
//! ```
//! # use colornote::{Engine, Notation, ParseError};
//! let engine = Engine::new();
//! assert_eq!(engine.try_convert("#12", Notation::Rgb), Err(ParseError::MalformedHex));
//! assert_eq!(
//!     engine.try_convert("var(--accent)", Notation::Rgb),
//!     Err(ParseError::UnresolvedReference)
//! );
//! ```
//!
//!
//! ## 3. Feature Flags
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     instead of `f32`. This feature is enabled by default.
//!   - **`pyffi`** enables the Python extension module with a single
//!     `convert(token, notation)` function, which takes the notation's name.
//!
//!
//! ## 4. Diagnostics
//!
//! Colornote logs cache hits and misses as well as fallbacks at debug level
//! and resolved tokens at trace level through the [`log`] facade. It never
//! installs a logger itself.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

mod cache;
mod color;
mod core;
mod engine;
pub mod error;
mod notation;

/// Conversions between color spaces.
///
/// All conversions are pure functions of their inputs. Conversions to
/// [`Rgb8`](crate::Rgb8) clamp each channel into gamut in linear space and
/// then round to the nearest integer.
pub mod space {
    pub use crate::core::{
        hsl_to_rgb8, linear_rgb_to_oklab, linear_rgb_to_rgb8, linear_to_srgb, oklab_to_linear_rgb,
        oklab_to_oklch, oklch_to_oklab, oklch_to_rgb8, rgb8_to_hsl, rgb8_to_linear_rgb,
        rgb8_to_oklch, srgb_to_linear,
    };
}

#[doc(hidden)]
pub use core::close_enough;

pub use cache::{Cache, MemoCache, NoCache};
pub use color::{Hsl, LinearRgb, Oklab, Oklch, Rgb8};
pub use engine::{Engine, EngineOptions, EngineOptionsBuilder};
pub use error::{ParseError, UnknownNotation};
pub use notation::{Notation, Token};

/// Convert the token to the given notation with the process-wide engine.
///
/// The engine is created on first use and memoizes resolved tokens for the
/// lifetime of the process. If the token cannot be converted, this function
/// returns it unchanged.
pub fn convert(token: &str, notation: Notation) -> String {
    static ENGINE: std::sync::OnceLock<Engine> = std::sync::OnceLock::new();
    ENGINE.get_or_init(Engine::new).convert(token, notation)
}

#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(name = "convert")]
fn py_convert(token: &str, notation: &str) -> PyResult<String> {
    let notation: Notation = notation.parse()?;
    Ok(convert(token, notation))
}

/// Colornote's Python extension module.
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn colornote(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_convert, m)?)?;
    m.add("NOTATIONS", Notation::ALL.map(|notation| notation.name()))?;
    Ok(())
}
