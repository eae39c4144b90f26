//! Traits defining the game state oracle consumed by the search.
//!
//! The search never looks inside a game state. Everything it needs is expressed
//! through [`GameState`], and the pursuit-specific evaluation functions need the
//! extra accessors of [`PursuitState`].

use std::fmt::{self, Debug};

use crate::Result;

/// A board coordinate `(x, y)`.
pub type Position = (i32, i32);

/// Trait for actions that can be taken in a game
///
/// Actions are opaque tokens. They are only meaningful relative to the state and
/// agent index they were generated for.
pub trait Action: Clone + Debug + PartialEq + Send + Sync {}

/// Trait defining the game state interface required by the search
///
/// Agent index 0 is always the searching (maximizing) agent. Indices
/// `1..num_agents()` are the adversaries.
pub trait GameState: Clone + Send + Sync {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// Returns true if the searching agent has won
    fn is_win(&self) -> bool;

    /// Returns true if the searching agent has lost
    fn is_lose(&self) -> bool;

    /// Returns the legal actions for `agent` in this state
    ///
    /// Should be empty if the agent is stuck or the state is terminal.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// Applies `action` for `agent`, returning the successor state
    ///
    /// This must be pure: the original state is left untouched. Implementations
    /// must return [`SearchError::IllegalAction`](crate::SearchError::IllegalAction)
    /// when `action` is not in `legal_actions(agent)`.
    fn generate_successor(&self, agent: usize, action: &Self::Action) -> Result<Self>;

    /// Total number of agents, searching agent included. Always at least 1.
    fn num_agents(&self) -> usize;

    /// The cumulative game score
    fn score(&self) -> f64;

    /// Returns true if the game is over
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// One adversary as seen by the evaluation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostState {
    /// Where the adversary currently stands
    pub position: Position,

    /// Moves left during which this adversary is harmless
    pub scared_timer: u32,
}

impl GhostState {
    /// Creates a new adversary descriptor
    pub fn new(position: Position, scared_timer: u32) -> Self {
        GhostState {
            position,
            scared_timer,
        }
    }

    /// An adversary counts as dangerous once its cooldown no longer covers the
    /// distance separating it from the searching agent.
    pub fn is_dangerous_at(&self, distance: u32) -> bool {
        self.scared_timer <= distance
    }
}

/// Game states that expose the board features used by the pursuit heuristics
pub trait PursuitState: GameState {
    /// Position of the searching agent
    fn pacman_position(&self) -> Position;

    /// Positions of every remaining consumable item
    fn food(&self) -> Vec<Position>;

    /// One descriptor per adversary, in agent-index order
    fn ghost_states(&self) -> Vec<GhostState>;
}

/// The standard action set of grid pursuit games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// All five actions, in the order engines usually enumerate them
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The `(dx, dy)` displacement of this move, with north pointing up
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// Applies this move to `position`
    pub fn apply(self, position: Position) -> Position {
        let (dx, dy) = self.delta();
        (position.0 + dx, position.1 + dy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };
        f.write_str(name)
    }
}

impl Action for Direction {}

/// Simplified implementation of Action for common types
impl Action for usize {}
impl Action for u8 {}
impl Action for char {}
impl Action for String {}
