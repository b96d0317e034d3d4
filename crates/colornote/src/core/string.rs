use super::{hsl_to_rgb8, oklch_to_rgb8, rgb8_to_hsl, rgb8_to_oklch, FloatExt};
use crate::color::{Hsl, Oklch, Rgb8};
use crate::error::ParseError;
use crate::{Float, Notation};

/// A scanner over the characters of a color token.
///
/// The scanner only ever moves forward. Its methods either consume what they
/// are looking for and report success or leave the position untouched.
struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        let input = self.input;
        &input[self.position..]
    }

    fn is_done(&self) -> bool {
        self.position == self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Skip white space, returning whether there was any.
    fn skip_whitespace(&mut self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
        rest.len() != trimmed.len()
    }

    /// Consume the literal if it comes next.
    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.position += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume an optionally signed decimal number with optional fraction and
    /// exponent.
    fn number(&mut self) -> Option<Float> {
        let bytes = self.rest().as_bytes();
        let mut index = 0;

        if matches!(bytes.first(), Some(b'+' | b'-')) {
            index += 1;
        }

        let integral = bytes[index..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        index += integral;

        let mut fractional = 0;
        if bytes.get(index) == Some(&b'.') {
            fractional = bytes[index + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if 0 < fractional {
                index += 1 + fractional;
            }
        }

        if integral == 0 && fractional == 0 {
            return None;
        }

        if matches!(bytes.get(index), Some(b'e' | b'E')) {
            let mut end = index + 1;
            if matches!(bytes.get(end), Some(b'+' | b'-')) {
                end += 1;
            }
            let digits = bytes[end..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if 0 < digits {
                index = end + digits;
            }
        }

        let text = &self.rest()[..index];
        let value = text.parse::<Float>().ok()?;
        self.position += index;
        Some(value)
    }

    /// Consume a number followed by a mandatory unit.
    fn number_with(&mut self, unit: &str) -> Option<Float> {
        let start = self.position;
        let value = self.number()?;
        if self.eat(unit) {
            Some(value)
        } else {
            self.position = start;
            None
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse a 24-bit color in hexadecimal format, with the leading `#` already
/// stripped. It transparently handles single-digit channels.
fn parse_hex(digits: &str) -> Result<Rgb8, ParseError> {
    if digits.len() != 3 && digits.len() != 6 {
        return Err(ParseError::MalformedHex);
    }

    fn parse_channel(s: &str, index: usize) -> Result<u8, ParseError> {
        let factor = s.len() / 3;
        let t = s
            .get(factor * index..factor * (index + 1))
            .ok_or(ParseError::MalformedHex)?;
        if !t.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::MalformedHex);
        }
        let n = u8::from_str_radix(t, 16).map_err(|_| ParseError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let r = parse_channel(digits, 0)?;
    let g = parse_channel(digits, 1)?;
    let b = parse_channel(digits, 2)?;
    Ok(Rgb8::new(r, g, b))
}

// --------------------------------------------------------------------------------------------------------------------

/// The separators between channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Syntax {
    /// The legacy syntax: `rgb(1, 2, 3)`.
    Comma,
    /// The modern syntax: `rgb(1 2 3 / 0.5)`.
    Space,
}

/// Determine the separator style after the first channel and consume the
/// first separator.
fn first_separator(scanner: &mut Scanner) -> Option<Syntax> {
    let had_space = scanner.skip_whitespace();
    if scanner.eat(",") {
        scanner.skip_whitespace();
        Some(Syntax::Comma)
    } else if had_space {
        Some(Syntax::Space)
    } else {
        None
    }
}

/// Consume a separator of the given style.
fn separator(scanner: &mut Scanner, syntax: Syntax) -> Option<()> {
    let had_space = scanner.skip_whitespace();
    match syntax {
        Syntax::Comma => {
            if !scanner.eat(",") {
                return None;
            }
            scanner.skip_whitespace();
        }
        Syntax::Space => {
            if !had_space || scanner.peek() == Some(',') {
                return None;
            }
        }
    }
    Some(())
}

/// Consume the optional alpha component, the closing parenthesis, and make
/// sure that nothing follows. Alpha is recognized but discarded. It is
/// introduced by `/` and, if `comma_alpha` holds, also by `,` independent of
/// the separators between channels.
fn finish(scanner: &mut Scanner, comma_alpha: bool) -> Option<()> {
    scanner.skip_whitespace();

    let has_alpha = (comma_alpha && scanner.eat(",")) || scanner.eat("/");

    if has_alpha {
        scanner.skip_whitespace();
        scanner.number()?;
        scanner.eat("%");
        scanner.skip_whitespace();
    }

    if scanner.eat(")") && scanner.is_done() {
        Some(())
    } else {
        None
    }
}

/// Parse the body of an `rgb()` or `rgba()` function.
fn parse_rgb_body(scanner: &mut Scanner) -> Option<Rgb8> {
    scanner.skip_whitespace();
    let r = scanner.number()?;
    let syntax = first_separator(scanner)?;
    let g = scanner.number()?;
    separator(scanner, syntax)?;
    let b = scanner.number()?;
    finish(scanner, true)?;

    Some(Rgb8::from_channels(r, g, b))
}

/// Parse a hue with optional `deg` unit.
fn hue(scanner: &mut Scanner) -> Option<Float> {
    let h = scanner.number()?;
    scanner.eat("deg");
    Some(h)
}

/// Parse the body of an `hsl()` or `hsla()` function.
fn parse_hsl_body(scanner: &mut Scanner) -> Option<Rgb8> {
    scanner.skip_whitespace();
    let h = hue(scanner)?;
    let syntax = first_separator(scanner)?;
    let s = scanner.number_with("%")?;
    separator(scanner, syntax)?;
    let l = scanner.number_with("%")?;
    finish(scanner, true)?;

    Some(hsl_to_rgb8(Hsl::new(h, s, l)))
}

/// Parse the body of an `oklch()` function.
fn parse_oklch_body(scanner: &mut Scanner) -> Option<Rgb8> {
    scanner.skip_whitespace();
    let mut l = scanner.number()?;
    if scanner.eat("%") {
        l /= 100.0;
    }
    separator(scanner, Syntax::Space)?;
    let c = scanner.number()?;
    separator(scanner, Syntax::Space)?;
    let h = hue(scanner)?;
    finish(scanner, false)?;

    Some(oklch_to_rgb8(Oklch::normalized(l, c, h)))
}

/// Parse a bare triple, i.e., the output of the `rgb` or `hsl` notations.
fn parse_bare(scanner: &mut Scanner) -> Option<Rgb8> {
    let first = scanner.number()?;
    separator(scanner, Syntax::Space)?;

    if let Some(s) = scanner.number_with("%") {
        separator(scanner, Syntax::Space)?;
        let l = scanner.number_with("%")?;
        scanner.is_done().then(|| hsl_to_rgb8(Hsl::new(first, s, l)))
    } else {
        let g = scanner.number()?;
        separator(scanner, Syntax::Space)?;
        let b = scanner.number()?;
        scanner.is_done().then(|| Rgb8::from_channels(first, g, b))
    }
}

type BodyParser = fn(&mut Scanner) -> Option<Rgb8>;

const FUNCTIONS: [(&str, BodyParser); 5] = [
    ("rgba", parse_rgb_body),
    ("rgb", parse_rgb_body),
    ("hsla", parse_hsl_body),
    ("hsl", parse_hsl_body),
    ("oklch", parse_oklch_body),
];

/// Match a known function name followed by an opening parenthesis.
fn function(s: &str) -> Option<(BodyParser, &str)> {
    FUNCTIONS.iter().find_map(|(name, parser)| {
        s.strip_prefix(name)
            .and_then(|rest| rest.trim_start().strip_prefix('('))
            .map(|body| (*parser, body))
    })
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into a 24-bit color.
///
/// This function recognizes the three and six digit hexadecimal formats with
/// or without leading `#`, the `rgb()` and `rgba()` functions with
/// comma-separated or space-separated channels, the `hsl()` and `hsla()`
/// functions, the `oklch()` function, as well as the bare triples produced by
/// the `rgb` and `hsl` notations. Alpha is always ignored. Before trying to
/// parse either of these formats, this function trims leading and trailing
/// white space and converts ASCII letters to lowercase.
pub(crate) fn parse(s: &str) -> Result<Rgb8, ParseError> {
    let lowercase = s.trim().to_ascii_lowercase(); // Keep around for fn scope
    let s = lowercase.as_str();

    if let Some(digits) = s.strip_prefix('#') {
        return parse_hex(digits);
    } else if !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return parse_hex(s);
    }

    if let Some((parser, body)) = function(s) {
        return parser(&mut Scanner::new(body)).ok_or(ParseError::MalformedFunctional);
    }

    parse_bare(&mut Scanner::new(s)).ok_or(ParseError::UnresolvedReference)
}

// --------------------------------------------------------------------------------------------------------------------

/// Round to two digits after the decimal and drop the sign of negative zero.
#[inline]
fn hundredths(value: Float) -> Float {
    let factor = <Float as FloatExt>::HUNDREDTHS;
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Write a number without trailing zeros.
fn write_number(f: &mut std::fmt::Formatter<'_>, value: Float) -> std::fmt::Result {
    // Formatting with a precision produces trailing zeros; an integral value
    // needs an explicit precision of zero.
    if value == value.trunc() {
        f.write_fmt(format_args!("{:.0}", value))
    } else {
        f.write_fmt(format_args!("{}", value))
    }
}

/// A color formatted in some notation.
///
/// The display of this struct is the canonical output string for the notation.
pub(crate) struct Formatted<'a> {
    pub color: Rgb8,
    pub notation: Notation,
    pub original: &'a str,
}

impl std::fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.notation {
            Notation::Reference => f.write_str(self.original),
            Notation::Hex => std::fmt::Display::fmt(&self.color, f),
            Notation::Rgb => {
                let [r, g, b] = self.color.coordinates();
                f.write_fmt(format_args!("{} {} {}", r, g, b))
            }
            Notation::Hsl => {
                let [h, s, l] = rgb8_to_hsl(self.color).to_integers();
                f.write_fmt(format_args!("{} {}% {}%", h, s, l))
            }
            Notation::Oklch => {
                let Oklch { l, c, h } = rgb8_to_oklch(self.color);
                f.write_str("oklch(")?;
                write_number(f, hundredths(l))?;
                f.write_str(" ")?;
                write_number(f, hundredths(c))?;
                f.write_fmt(format_args!(" {})", (h.round() as u16) % 360))
            }
        }
    }
}

/// Format the color in the given notation.
///
/// For the reference notation, this function returns the original token
/// verbatim. Otherwise, it ignores the original token. Formatting never fails.
pub(crate) fn format(color: Rgb8, notation: Notation, original: &str) -> String {
    Formatted {
        color,
        notation,
        original,
    }
    .to_string()
}

// ====================================================================================================================
