//! # pursuit-search
//!
//! Depth-bounded game-tree search for grid pursuit games: one searching agent
//! (index 0) chooses moves against any number of adversaries.
//!
//! This crate provides a single recursive engine with three adversary models
//! plugged into it:
//!
//! - **Minimax**: every adversary plays the move that is worst for the
//!   searching agent.
//! - **Alpha-beta**: minimax with pruning. It returns the same values and the
//!   same decisions while exploring fewer nodes.
//! - **Expectimax**: every adversary picks uniformly at random among its legal
//!   moves, and its node is worth the mean of its children.
//!
//! The game itself is an external oracle described by the [`GameState`]
//! trait. Evaluation functions used at cutoffs and terminal states are
//! pluggable through the [`Evaluation`] trait, either by name via an
//! [`EvaluationRegistry`] or as a closure.
//!
//! ## Basic Usage
//!
//! ```
//! use pursuit_search::{AgentKind, GameState, SearchAgent, SearchConfig, SearchError};
//! use pursuit_search::evaluation::FnEvaluation;
//!
//! // A counter game: agent 0 adds, agent 1 subtracts, ten moves in total.
//! #[derive(Clone)]
//! struct Counter {
//!     value: i32,
//!     moves: u32,
//! }
//!
//! impl GameState for Counter {
//!     type Action = u8;
//!
//!     fn is_win(&self) -> bool { false }
//!     fn is_lose(&self) -> bool { false }
//!
//!     fn legal_actions(&self, _agent: usize) -> Vec<u8> {
//!         if self.moves >= 10 { vec![] } else { vec![1, 2] }
//!     }
//!
//!     fn generate_successor(&self, agent: usize, action: &u8) -> pursuit_search::Result<Self> {
//!         if !self.legal_actions(agent).contains(action) {
//!             return Err(SearchError::IllegalAction { agent, action: format!("{:?}", action) });
//!         }
//!         let delta = i32::from(*action);
//!         Ok(Counter {
//!             value: if agent == 0 { self.value + delta } else { self.value - delta },
//!             moves: self.moves + 1,
//!         })
//!     }
//!
//!     fn num_agents(&self) -> usize { 2 }
//!     fn score(&self) -> f64 { f64::from(self.value) }
//! }
//!
//! fn main() -> Result<(), SearchError> {
//!     let config = SearchConfig::default().with_depth(2).with_seed(7);
//!     let evaluation = FnEvaluation::new(|state: &Counter| state.score());
//!
//!     let mut agent = SearchAgent::with_evaluation(AgentKind::AlphaBeta, config, evaluation)?;
//!     let action = agent.get_action(&Counter { value: 0, moves: 0 })?;
//!     assert_eq!(action, 2);
//!
//!     println!("{}", agent.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! A ply is one move by the searching agent followed by one move from each
//! adversary, in index order. The search recurses until the configured number
//! of plies has elapsed or a state is won or lost, then calls the evaluation
//! function. An agent without legal moves at a non-terminal state is evaluated
//! in place.

pub mod agent;
pub mod config;
pub mod evaluation;
pub mod game_state;
pub mod policy;
pub mod search;
pub mod stats;
pub mod turn;
pub mod utils;

pub use agent::{AgentKind, ReflexAgent, SearchAgent};
pub use config::{SearchConfig, TieBreak};
pub use evaluation::{
    ActionEvaluation, BetterEvaluation, Evaluation, EvaluationRegistry, FnEvaluation,
    ReflexEvaluation, ScoreEvaluation,
};
pub use game_state::{Action, Direction, GameState, GhostState, Position, PursuitState};
pub use policy::{AdversaryPolicy, AlphaBetaPolicy, Bounds, ExpectationPolicy, MinimizePolicy};
pub use search::{AdversarialSearch, RootDecision};
pub use stats::SearchStatistics;
pub use turn::TurnOrder;

/// Error types for the search
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// An action outside the legal set was applied
    #[error("Illegal action {action} for agent {agent}")]
    IllegalAction {
        /// Agent that attempted the move
        agent: usize,
        /// Debug rendering of the rejected action
        action: String,
    },

    /// The searching agent has no move to return
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// The named evaluation function is not registered
    #[error("Unknown evaluation function: {0}")]
    UnconfiguredEvaluation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
