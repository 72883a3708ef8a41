//! Identifier types.
//!
//! ## TokenId
//!
//! Every pog gets a `TokenId` when its round is set up. Ids come from a
//! monotonic [`TokenIdAllocator`] owned by the match controller and are
//! never reused within one controller's lifetime, across rounds and matches.
//!
//! ## RoundGeneration
//!
//! Bumped every time a round begins. Deferred computer throws carry the
//! generation they were scheduled in, so a throw that outlives its round
//! can recognise itself as stale.
//!
//! ```
//! use rust_pogs::core::{RoundGeneration, TokenIdAllocator};
//!
//! let mut ids = TokenIdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//! assert_ne!(first, second);
//!
//! let gen = RoundGeneration::default();
//! assert!(gen.next() > gen);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a pog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Create a token ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pog({})", self.0)
    }
}

/// Monotonic token ID source.
///
/// The 64-bit counter cannot realistically wrap, so ids are never reused.
#[derive(Clone, Debug, Default)]
pub struct TokenIdAllocator {
    next: u64,
}

impl TokenIdAllocator {
    /// Create an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new token ID.
    pub fn alloc(&mut self) -> TokenId {
        let id = TokenId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// Round marker used to detect stale deferred throws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundGeneration(pub u64);

impl RoundGeneration {
    /// The generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RoundGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}
