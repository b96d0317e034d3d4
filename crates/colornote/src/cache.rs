//! Memoization of resolved color tokens.
//!
//! An [`Engine`](crate::Engine) consults its cache before parsing a token and
//! records every successfully resolved token afterwards. Tokens are stable
//! color values, so entries are never invalidated. The cache is purely an
//! optimization: [`NoCache`] makes the engine parse every token every time,
//! with the exact same results.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::Rgb8;

/// A trait to abstract over the memoization of resolved tokens.
///
/// Keys are the tokens exactly as passed to the engine, without trimming or
/// case folding. Since an engine may be shared between threads,
/// implementations use interior mutability.
pub trait Cache {
    /// Look up the color for the given token.
    fn get(&self, token: &str) -> Option<Rgb8>;

    /// Record the color for the given token.
    fn put(&self, token: &str, color: Rgb8);
}

/// An unbounded memo of resolved tokens.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: Mutex<HashMap<String, Rgb8>>,
}

impl MemoCache {
    /// Create a new, empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty memo with room for the given number of tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Determine the number of memoized tokens.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Determine whether the memo is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are immutable values, so a panic while holding the lock cannot
    // leave them inconsistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Rgb8>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Cache for MemoCache {
    fn get(&self, token: &str) -> Option<Rgb8> {
        self.lock().get(token).copied()
    }

    fn put(&self, token: &str, color: Rgb8) {
        let mut entries = self.lock();
        if !entries.contains_key(token) {
            entries.insert(token.to_owned(), color);
        }
    }
}

/// A cache that never remembers anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _: &str) -> Option<Rgb8> {
        None
    }

    fn put(&self, _: &str, _: Rgb8) {}
}

impl<C: Cache + ?Sized> Cache for std::sync::Arc<C> {
    fn get(&self, token: &str) -> Option<Rgb8> {
        (**self).get(token)
    }

    fn put(&self, token: &str, color: Rgb8) {
        (**self).put(token, color)
    }
}


#[cfg(test)]
pub(crate) use test::CountingCache;
