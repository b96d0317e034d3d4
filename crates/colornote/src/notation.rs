//! Output notations and resolved tokens.

use crate::core::format;
use crate::error::{ParseError, UnknownNotation};
use crate::Rgb8;

/// An output notation.
///
/// The names of the variants as strings are `var`, `hex`, `rgb`, `hsl`, and
/// `oklch`, which is also their order in [`Notation::ALL`]. When parsing names,
/// `reference` is accepted as an alias for `var`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Notation {
    /// The original token, verbatim.
    Reference,
    /// Lowercase `#rrggbb`.
    Hex,
    /// A bare `R G B` triple of integers.
    Rgb,
    /// A bare `H S% L%` triple of integers.
    Hsl,
    /// `oklch(L C H)` with two digits after the decimal for lightness and
    /// chroma and an integral hue.
    #[default]
    Oklch,
}

impl Notation {
    /// All notations in order.
    pub const ALL: [Notation; 5] = [
        Notation::Reference,
        Notation::Hex,
        Notation::Rgb,
        Notation::Hsl,
        Notation::Oklch,
    ];

    /// Get this notation's name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reference => "var",
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Oklch => "oklch",
        }
    }

    /// Determine whether this notation passes tokens through unchanged.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference)
    }
}

impl std::str::FromStr for Notation {
    type Err = UnknownNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "var" | "reference" => Ok(Self::Reference),
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            "oklch" => Ok(Self::Oklch),
            _ => Err(UnknownNotation::new(s)),
        }
    }
}

impl TryFrom<&str> for Notation {
    type Error = UnknownNotation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

// ====================================================================================================================

/// A resolved color token.
///
/// A token either resolves to a 24-bit color or it is a reference, e.g., the
/// name of a styling variable. Only the former carries a color, which makes
/// it impossible to format a reference in a numeric notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A token in one of the numeric notations.
    Color { color: Rgb8, source: &'a str },
    /// A token that is not a recognized numeric notation.
    Reference(&'a str),
}

impl<'a> Token<'a> {
    /// Get the original string.
    pub const fn source(&self) -> &'a str {
        match self {
            Self::Color { source, .. } => *source,
            Self::Reference(source) => *source,
        }
    }

    /// Get the resolved color, if any.
    pub const fn color(&self) -> Option<Rgb8> {
        match self {
            Self::Color { color, .. } => Some(*color),
            Self::Reference(_) => None,
        }
    }

    /// Determine whether this token is a reference.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Format this token in the given notation.
    ///
    /// Every token can be formatted in the reference notation. A reference
    /// cannot be formatted in any other notation and results in
    /// [`ParseError::UnresolvedReference`].
    pub fn format(&self, notation: Notation) -> Result<String, ParseError> {
        match (self, notation) {
            (Self::Color { color, source }, _) => Ok(format(*color, notation, source)),
            (Self::Reference(source), Notation::Reference) => Ok((*source).to_owned()),
            (Self::Reference(_), _) => Err(ParseError::UnresolvedReference),
        }
    }
}

impl std::fmt::Display for Token<'_> {
    /// Display the original string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source())
    }
}

#[cfg(test)]
mod test {
    use super::{Notation, Token};
    use crate::error::{ParseError, UnknownNotation};
    use crate::Rgb8;

    #[test]
    fn test_names() -> Result<(), UnknownNotation> {
        for notation in Notation::ALL {
            assert_eq!(notation.name().parse::<Notation>()?, notation);
            assert_eq!(notation.to_string(), notation.name());
        }

        assert_eq!("reference".parse::<Notation>()?, Notation::Reference);
        assert_eq!(" OKLCH ".parse::<Notation>()?, Notation::Oklch);
        assert_eq!(Notation::try_from("hex")?, Notation::Hex);
        assert_eq!(
            "cmyk".parse::<Notation>(),
            Err(UnknownNotation::new("cmyk"))
        );
        assert_eq!(Notation::default(), Notation::Oklch);
        assert!(Notation::Reference.is_reference());
        assert!(!Notation::Hex.is_reference());
        Ok(())
    }

    #[test]
    fn test_token() {
        let red = Token::Color {
            color: Rgb8::new(255, 0, 0),
            source: "rgb(255 0 0)",
        };
        assert_eq!(red.color(), Some(Rgb8::new(255, 0, 0)));
        assert_eq!(red.format(Notation::Hex), Ok("#ff0000".to_string()));
        assert_eq!(
            red.format(Notation::Reference),
            Ok("rgb(255 0 0)".to_string())
        );
        assert_eq!(red.to_string(), "rgb(255 0 0)");

        let var = Token::Reference("--color-red-500");
        assert!(var.is_reference());
        assert_eq!(var.color(), None);
        assert_eq!(
            var.format(Notation::Reference),
            Ok("--color-red-500".to_string())
        );
        for notation in [Notation::Hex, Notation::Rgb, Notation::Hsl, Notation::Oklch] {
            assert_eq!(var.format(notation), Err(ParseError::UnresolvedReference));
        }
    }
}
