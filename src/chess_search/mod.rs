//! Chess-specific implementation of the alpha-beta search traits.

pub mod implementation;

#[cfg(test)]
mod tests;

pub use implementation::{choose_move, search_best_move, MaterialEvaluator};
