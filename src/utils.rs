//! Utility functions shared by the evaluation functions

use crate::game_state::Position;

/// Manhattan (taxicab) distance between two board positions
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Distance from `from` to the closest of `targets`
///
/// Returns `None` when there are no targets.
pub fn nearest_distance(from: Position, targets: &[Position]) -> Option<u32> {
    targets
        .iter()
        .map(|&target| manhattan_distance(from, target))
        .min()
}

/// Arithmetic mean of the values, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
