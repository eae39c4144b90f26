//! Configuration options for the search agents
//!
//! This module defines the parameters fixed when a search agent is built.

use crate::{SearchError, Result};

/// Default number of plies searched
pub const DEFAULT_DEPTH: usize = 2;

/// Name of the evaluation function used when none is configured
pub const DEFAULT_EVALUATION: &str = "score";

/// How the root picks between actions whose utilities are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the first action reaching the maximum
    ///
    /// The best action is only replaced on a strictly greater utility, so the
    /// order of the legal actions decides ties.
    FirstMax,

    /// Pick uniformly at random among all maximal actions
    ///
    /// The draw uses the agent's random source, so a seeded configuration
    /// stays reproducible.
    Random,
}

/// Configuration for the search agents
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use pursuit_search::{SearchConfig, config::TieBreak};
///
/// let config = SearchConfig::default()
///     .with_depth(3)
///     .with_evaluation_function("better")
///     .with_tie_break(TieBreak::Random)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of plies to search
    ///
    /// One ply is a move by the searching agent followed by one move from
    /// every adversary. Must be at least 1.
    pub depth: usize,

    /// Name of the evaluation function, resolved once when the agent is built
    pub evaluation_function: String,

    /// Tie-break rule applied at the root
    pub tie_break: TieBreak,

    /// Seed for the agent's random source
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            evaluation_function: DEFAULT_EVALUATION.to_string(),
            tie_break: TieBreak::FirstMax,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the search depth in plies
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the name of the evaluation function
    pub fn with_evaluation_function(mut self, name: impl Into<String>) -> Self {
        self.evaluation_function = name.into();
        self
    }

    /// Sets the root tie-break rule
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Seeds the agent's random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration before any search begins
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(SearchError::InvalidConfiguration(
                "depth must be a positive number of plies".to_string(),
            ));
        }
        if self.evaluation_function.trim().is_empty() {
            return Err(SearchError::InvalidConfiguration(
                "evaluation function name is empty".to_string(),
            ));
        }
        Ok(())
    }
}
