//! The conversion engine and its options.
//!
//! # Example
//!
//! ```
//! # use colornote::{Engine, EngineOptions, Notation};
//! let options = EngineOptions::builder()
//!     .capacity(16)
//!     .build();
//! let engine = Engine::with_options(&options);
//!
//! assert_eq!(engine.convert("#f00", Notation::Rgb), "255 0 0");
//! assert_eq!(engine.convert("--brand", Notation::Hex), "--brand");
//! ```

use log::{debug, trace};

use crate::cache::{Cache, MemoCache, NoCache};
use crate::core::{format, parse};
use crate::error::ParseError;
use crate::{Notation, Token};

#[derive(Clone, Debug)]
struct OptionData {
    caching: bool,
    capacity: usize,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            caching: true,
            capacity: 64,
        }
    }
}

/// A builder of engine options.
#[derive(Debug)]
pub struct EngineOptionsBuilder(OptionData);

impl EngineOptionsBuilder {
    /// Enable or disable memoization of resolved tokens.
    pub fn caching(&mut self, caching: bool) -> &mut Self {
        self.0.caching = caching;
        self
    }

    /// Set the initial capacity of the memo.
    ///
    /// The memo grows as needed, so this is merely a hint. It has no effect
    /// when caching is disabled.
    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.0.capacity = capacity;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> EngineOptions {
        EngineOptions(self.0.clone())
    }
}

/// An engine options object.
#[derive(Clone, Debug)]
pub struct EngineOptions(OptionData);

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions(OptionData::new())
    }
}

impl EngineOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder(OptionData::new())
    }

    /// Determine whether resolved tokens are memoized.
    pub fn caching(&self) -> bool {
        self.0.caching
    }

    /// Get the initial capacity of the memo.
    pub fn capacity(&self) -> usize {
        self.0.capacity
    }
}

// ====================================================================================================================

/// A color notation conversion engine.
///
/// An engine resolves color tokens, i.e., hexadecimal colors, the `rgb()`,
/// `hsl()`, and `oklch()` functions, and bare triples, to 24-bit colors and
/// formats them in a requested [`Notation`]. Anything else is a reference,
/// e.g., the name of a styling variable, and passes through unchanged.
///
/// The engine owns a [`Cache`] that memoizes successfully resolved tokens. The
/// cache does not affect results. Since the cache is synchronized, an engine
/// can be shared between threads.
pub struct Engine {
    cache: Box<dyn Cache + Send + Sync>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new engine with the default options.
    pub fn new() -> Self {
        Self::with_options(&EngineOptions::default())
    }

    /// Create a new engine that parses every token every time.
    pub fn uncached() -> Self {
        Self::with_cache(NoCache)
    }

    /// Create a new engine with the given options.
    pub fn with_options(options: &EngineOptions) -> Self {
        if options.caching() {
            Self::with_cache(MemoCache::with_capacity(options.capacity()))
        } else {
            Self::uncached()
        }
    }

    /// Create a new engine with the given cache.
    pub fn with_cache<C>(cache: C) -> Self
    where
        C: Cache + Send + Sync + 'static,
    {
        Self {
            cache: Box::new(cache),
        }
    }

    /// Resolve the token.
    ///
    /// This method first looks up the token in the cache and, upon a miss,
    /// parses the token. Only tokens that parse successfully are recorded in
    /// the cache. If the token is not written in a numeric notation, this
    /// method returns a [`Token::Reference`]. If the token names a numeric
    /// notation but is malformed, this method returns the error.
    pub fn resolve<'a>(&self, token: &'a str) -> Result<Token<'a>, ParseError> {
        if let Some(color) = self.cache.get(token) {
            debug!("cache hit for {:?}", token);
            return Ok(Token::Color {
                color,
                source: token,
            });
        }

        debug!("cache miss for {:?}", token);
        match parse(token) {
            Ok(color) => {
                trace!("resolved {:?} to {}", token, color);
                self.cache.put(token, color);
                Ok(Token::Color {
                    color,
                    source: token,
                })
            }
            Err(ParseError::UnresolvedReference) => {
                trace!("resolved {:?} to reference", token);
                Ok(Token::Reference(token))
            }
            Err(error) => Err(error),
        }
    }

    /// Convert the token to the given notation.
    ///
    /// The reference notation returns the token as is, without parsing it.
    /// Any other notation requires a color token, with references resulting
    /// in [`ParseError::UnresolvedReference`].
    pub fn try_convert(&self, token: &str, notation: Notation) -> Result<String, ParseError> {
        if notation.is_reference() {
            return Ok(token.to_owned());
        }

        match self.resolve(token)? {
            Token::Color { color, source } => Ok(format(color, notation, source)),
            Token::Reference(_) => Err(ParseError::UnresolvedReference),
        }
    }

    /// Convert the token to the given notation.
    ///
    /// Unlike [`Engine::try_convert`], this method never fails. If the token
    /// cannot be converted, it returns the token unchanged.
    pub fn convert(&self, token: &str, notation: Notation) -> String {
        self.try_convert(token, notation).unwrap_or_else(|error| {
            debug!("falling back to {:?} for {}: {}", token, notation, error);
            token.to_owned()
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::{Engine, EngineOptions};
    use crate::cache::CountingCache;
    use crate::error::ParseError;
    use crate::{Notation, Rgb8, Token};
    use std::sync::Arc;

    const SAMPLES: [&str; 12] = [
        "#000000",
        "#ffffff",
        "#f0a",
        "#3178EA",
        "rgb(255, 0, 0)",
        "rgb(255 0 0 / 1)",
        "rgba(49, 120, 234, 0.5)",
        "hsl(120deg 100% 25%)",
        "oklch(0.63 0.26 29)",
        "oklch(70% 0.1 200 / 50%)",
        "128 128 128",
        "217 81% 55%",
    ];

    const FAILURES: [&str; 6] = [
        "not-a-color",
        "--color-red-500",
        "#ff",
        "rgb(1, 2)",
        "rgb(1, 2 3)",
        "oklch(0.5, 0.1, 20)",
    ];

    #[test]
    fn test_options() {
        let options = EngineOptions::default();
        assert!(options.caching());
        assert_eq!(options.capacity(), 64);

        let options = EngineOptions::builder().caching(false).capacity(3).build();
        assert!(!options.caching());
        assert_eq!(options.capacity(), 3);
    }

    #[test]
    fn test_known_values() -> Result<(), ParseError> {
        let engine = Engine::new();

        assert_eq!(engine.try_convert("#000000", Notation::Rgb)?, "0 0 0");
        assert_eq!(engine.try_convert("#ffffff", Notation::Rgb)?, "255 255 255");
        assert_eq!(engine.try_convert("#f0a", Notation::Hex)?, "#ff00aa");
        assert_eq!(engine.try_convert("rgb(255, 0, 0)", Notation::Hex)?, "#ff0000");
        assert_eq!(engine.try_convert("rgb(255 0 0 / 1)", Notation::Hex)?, "#ff0000");
        assert_eq!(engine.try_convert("#808080", Notation::Hsl)?, "0 0% 50%");
        assert_eq!(
            engine.try_convert("#ff0000", Notation::Oklch)?,
            "oklch(0.63 0.26 29)"
        );
        assert_eq!(engine.try_convert("#3178ea", Notation::Hsl)?, "217 81% 55%");
        assert_eq!(
            engine.try_convert(" RGB(255,0,0) ", Notation::Reference)?,
            " RGB(255,0,0) "
        );
        Ok(())
    }

    #[test]
    fn test_fallback() {
        let engine = Engine::new();

        assert_eq!(
            engine.try_convert("not-a-color", Notation::Hex),
            Err(ParseError::UnresolvedReference)
        );
        assert_eq!(engine.convert("not-a-color", Notation::Hex), "not-a-color");
        assert_eq!(
            engine.try_convert("not-a-color", Notation::Reference),
            Ok("not-a-color".to_string())
        );

        assert_eq!(engine.try_convert("#ff", Notation::Rgb), Err(ParseError::MalformedHex));
        assert_eq!(engine.convert("#ff", Notation::Rgb), "#ff");
        assert_eq!(
            engine.try_convert("rgb(1, 2 3)", Notation::Hex),
            Err(ParseError::MalformedFunctional)
        );
        assert_eq!(engine.convert("rgb(1, 2 3)", Notation::Oklch), "rgb(1, 2 3)");
    }

    #[test]
    fn test_resolve() -> Result<(), ParseError> {
        let engine = Engine::uncached();

        assert_eq!(
            engine.resolve("#f00")?,
            Token::Color {
                color: Rgb8::new(255, 0, 0),
                source: "#f00"
            }
        );
        assert_eq!(engine.resolve("--accent")?, Token::Reference("--accent"));
        assert_eq!(engine.resolve("rgb(1)"), Err(ParseError::MalformedFunctional));
        Ok(())
    }

    #[test]
    fn test_caching() {
        let cache = Arc::new(CountingCache::default());
        let engine = Engine::with_cache(Arc::clone(&cache));

        assert_eq!(engine.convert("#f00", Notation::Rgb), "255 0 0");
        assert_eq!((cache.hits(), cache.misses(), cache.puts()), (0, 1, 1));

        assert_eq!(engine.convert("#f00", Notation::Hex), "#ff0000");
        assert_eq!((cache.hits(), cache.misses(), cache.puts()), (1, 1, 1));

        // Keys are exact, failures are not recorded, and the reference
        // notation does not consult the cache.
        assert_eq!(engine.convert("#F00", Notation::Hex), "#ff0000");
        assert_eq!(engine.convert("nope", Notation::Hex), "nope");
        assert_eq!(engine.convert("nope", Notation::Hex), "nope");
        assert_eq!(engine.convert("#f00", Notation::Reference), "#f00");
        assert_eq!((cache.hits(), cache.misses(), cache.puts()), (1, 4, 2));
    }

    #[test]
    fn test_cache_transparency() {
        let cached = Engine::new();
        let uncached = Engine::uncached();

        // Go around twice, so that the second round hits the memo.
        for _ in 0..2 {
            for token in SAMPLES.iter().chain(FAILURES.iter()) {
                for notation in Notation::ALL {
                    assert_eq!(
                        cached.try_convert(token, notation),
                        uncached.try_convert(token, notation),
                        "engines disagree on {:?} in {}",
                        token,
                        notation
                    );
                }
            }
        }
    }

    #[test]
    fn test_idempotence() -> Result<(), ParseError> {
        let engine = Engine::uncached();

        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let color = Rgb8::new(r, g, b);
                    let hex = color.to_string();
                    for notation in [Notation::Hex, Notation::Rgb] {
                        let once = engine.try_convert(&hex, notation)?;
                        let twice = engine.try_convert(&once, notation)?;
                        assert_eq!(once, twice, "{} is not stable in {}", hex, notation);
                    }
                }
            }
        }

        // The hsl and oklch notations round to integers and hundredths, so
        // re-parsing their output may land on a neighboring color that rounds
        // differently. Sampling every 7th color, about 214k hsl and 203k oklch
        // outputs out of 2.4M are not fixed points, e.g., #000062 becomes
        // oklch(0.22 0.16 264) and then oklch(0.23 0.16 264). Grays and the
        // primary and secondary colors are.
        let mut robust = Vec::new();
        for level in 0..=255 {
            robust.push(Rgb8::new(level, level, level));
        }
        for [r, g, b] in [
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [0, 255, 255],
            [255, 0, 255],
        ] {
            robust.push(Rgb8::new(r, g, b));
        }

        for color in robust {
            let hex = color.to_string();
            for notation in [Notation::Hsl, Notation::Oklch] {
                let once = engine.try_convert(&hex, notation)?;
                let twice = engine.try_convert(&once, notation)?;
                assert_eq!(once, twice, "{} is not stable in {}", hex, notation);
            }
        }

        Ok(())
    }

    #[test]
    fn test_shared_engine() {
        let engine = Arc::new(Engine::new());
        let handles: Vec<_> = (0..4)
            .map(|index| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.convert(SAMPLES[index], Notation::Hex))
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_default())
            .collect();
        assert_eq!(results, ["#000000", "#ffffff", "#ff00aa", "#3178ea"]);
    }
}
