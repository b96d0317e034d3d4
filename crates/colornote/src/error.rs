//! Utility module with colornote's errors.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An erroneous color token.
///
/// All variants are local, recoverable conditions. The convention is for the
/// caller to fall back onto displaying the original token unchanged, which is
/// exactly what [`Engine::convert`](crate::Engine::convert) does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A hexadecimal color with the wrong number of digits or with characters
    /// that are not hexadecimal digits. For example, `#ff` is missing a digit,
    /// whereas `#00g` has the correct length but an unsuitable character.
    MalformedHex,

    /// An `rgb()`, `rgba()`, `hsl()`, `hsla()`, or `oklch()` function with the
    /// wrong number of channels, a channel that is not a number, mixed
    /// separators, or no closing parenthesis. For example, `rgb(1, 2)` is
    /// missing a channel, whereas `oklch(0.5 x 30)` has a malformed chroma.
    MalformedFunctional,

    /// A token that is none of the numeric notations, such as the name of a
    /// styling variable, while a numeric notation was requested.
    UnresolvedReference,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ParseError::*;

        match self {
            MalformedHex => f.write_str("hexadecimal color should have 3 or 6 hex digits but has not"),
            MalformedFunctional => f.write_str(
                "color function should have 3 numeric channels, an optional alpha, and a closing parenthesis",
            ),
            UnresolvedReference => {
                f.write_str("color token is a reference and cannot be resolved to a numeric color")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "pyffi")]
impl From<ParseError> for PyErr {
    fn from(value: ParseError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An unknown notation name.
///
/// Requesting a notation other than `var`, `reference`, `hex`, `rgb`, `hsl`,
/// or `oklch` is a programming error on the caller's side. It is signaled
/// rather than silently replaced with a default notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownNotation(pub String);

impl UnknownNotation {
    /// Create a new unknown notation error.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Get the offending name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnknownNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "notation `{}` should be one of var, hex, rgb, hsl, or oklch",
            self.0
        ))
    }
}

impl std::error::Error for UnknownNotation {}

#[cfg(feature = "pyffi")]
impl From<UnknownNotation> for PyErr {
    fn from(value: UnknownNotation) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
