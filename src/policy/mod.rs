//! Policies plugged into the search recursion
//!
//! This module contains:
//! - Adversary policies: how an adversary's child values combine
//! - Bounds: the optional alpha-beta window carried by the maximizing step

pub mod adversary;
pub mod bounds;

pub use adversary::{AdversaryPolicy, AlphaBetaPolicy, ExpectationPolicy, Fold, MinimizePolicy};
pub use bounds::Bounds;
