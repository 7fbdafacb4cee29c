//! Environment supplied to the engine from outside the battle.
//!
//! Randomness is the only environmental input: the engine never reads a
//! global generator, it draws from an injected [`RngOracle`].

pub mod rng;

pub use rng::{PcgRng, RngOracle, RollContext, RollStream, compute_seed};
