//! Physical game pieces: pogs and strikers.

mod striker;
mod token;

pub use striker::{Material, Striker};
pub use token::Token;
