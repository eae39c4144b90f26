//! Statistics collection for searches
//!
//! This module provides structures for collecting and reporting statistics
//! about a single root search.

use std::time::Duration;

/// Statistics collected during one root search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of successor states generated
    pub nodes_expanded: usize,

    /// Number of evaluation function calls
    pub evaluations: usize,

    /// Number of times the remaining children of a node were skipped
    pub cutoffs: usize,

    /// Deepest ply at which a maximizing step was entered
    pub max_ply: usize,

    /// Total time spent searching
    pub total_time: Duration,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            nodes_expanded: 0,
            evaluations: 0,
            cutoffs: 0,
            max_ply: 0,
            total_time: Duration::from_secs(0),
        }
    }

    /// Returns the number of generated nodes per second
    pub fn nodes_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.nodes_expanded as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             - Nodes expanded: {}\n\
             - Evaluations: {}\n\
             - Cutoffs: {}\n\
             - Max ply: {}\n\
             - Total time: {:.3} seconds\n\
             - Nodes per second: {:.1}",
            self.nodes_expanded,
            self.evaluations,
            self.cutoffs,
            self.max_ply,
            self.total_time.as_secs_f64(),
            self.nodes_per_second()
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
