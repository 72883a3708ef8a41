//! Per-pog flip decisions.

use crate::pieces::Token;

use super::FlipSource;

/// Decides which pogs land face-up on a throw.
pub struct FlipResolver;

impl FlipResolver {
    /// Set every token's orientation for one throw.
    ///
    /// Each token independently lands face-up iff its draw is strictly
    /// below `probability`. One draw is taken per token even at the
    /// extremes, so the stream position depends only on the stack size.
    /// Returns the number of face-up tokens.
    pub fn resolve<S: FlipSource>(tokens: &mut [Token], probability: f64, source: &mut S) -> usize {
        let mut face_up = 0;

        for token in tokens.iter_mut() {
            let flipped = source.next_unit() < probability;
            token.set_face_up(flipped);
            if flipped {
                face_up += 1;
            }
        }

        face_up
    }
}
