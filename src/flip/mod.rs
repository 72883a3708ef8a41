//! Flip resolution.
//!
//! A throw is a set of independent Bernoulli trials, one per pog in the
//! stack. The resolver reads randomness through [`FlipSource`] so the
//! engine can run on the seeded [`GameRng`] in play and on scripted draws
//! in tests.

mod resolver;

pub use resolver::FlipResolver;

use crate::core::GameRng;

/// Randomness consumed by a throw.
pub trait FlipSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Reorder the pogs left in the stack after a throw.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl FlipSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.gen_unit()
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        GameRng::shuffle(self, items);
    }
}
