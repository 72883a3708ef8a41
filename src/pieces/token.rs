//! Pogs - the wagered tokens.
//!
//! A `Token` has a fixed identity and one piece of mutable state: whether
//! it is lying face-up. Only the flip resolver changes orientation, and
//! only while a throw is in progress. Once a round ends the winner keeps
//! copies; the originals are never touched again.

use serde::{Deserialize, Serialize};

use crate::core::ids::{TokenId, TokenIdAllocator};

/// A single wagered pog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    face_up: bool,
}

impl Token {
    /// Create a face-down pog.
    #[must_use]
    pub const fn new(id: TokenId) -> Self {
        Self { id, face_up: false }
    }

    /// Allocate `count` fresh face-down pogs.
    pub fn batch(count: usize, ids: &mut TokenIdAllocator) -> Vec<Token> {
        (0..count).map(|_| Token::new(ids.alloc())).collect()
    }

    /// Identity, fixed at creation.
    #[must_use]
    pub const fn id(&self) -> TokenId {
        self.id
    }

    /// Check if the pog landed face-up on the last throw.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub(crate) fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}
