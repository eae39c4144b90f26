//! Evaluation functions scoring states at terminal nodes and cutoffs
//!
//! Evaluation functions are advisory: they only order states. Terminal
//! conditions always come from the game state itself.

use std::collections::HashMap;
use std::fmt;

use rand::{Rng, RngCore};

use crate::{
    game_state::{GameState, PursuitState},
    utils::{manhattan_distance, mean, nearest_distance},
    Result, SearchError,
};

/// Trait for functions that score a single state
pub trait Evaluation<S: GameState>: Send + Sync {
    /// Scores `state` from the searching agent's point of view
    ///
    /// `rng` is the agent's random source, for evaluations that add noise.
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> f64;

    /// Name used in logs
    fn name(&self) -> &str {
        "custom"
    }

    /// Create a boxed clone of this evaluation
    fn clone_box(&self) -> Box<dyn Evaluation<S>>;
}

impl<S: GameState> Evaluation<S> for Box<dyn Evaluation<S>> {
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> f64 {
        (**self).evaluate(state, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn clone_box(&self) -> Box<dyn Evaluation<S>> {
        (**self).clone_box()
    }
}

/// Returns the raw game score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl ScoreEvaluation {
    /// Creates the score evaluation
    pub fn new() -> Self {
        ScoreEvaluation
    }
}

impl<S: GameState> Evaluation<S> for ScoreEvaluation {
    fn evaluate(&self, state: &S, _rng: &mut dyn RngCore) -> f64 {
        state.score()
    }

    fn name(&self) -> &str {
        "score"
    }

    fn clone_box(&self) -> Box<dyn Evaluation<S>> {
        Box::new(*self)
    }
}

/// Positional evaluation for deeper searches
///
/// Losses score 0 and wins score +infinity. Any other state starts from the
/// distance to the nearest dangerous adversary (zeroed when that adversary is
/// closer than `threat_radius`), is penalized by the distance to the nearest
/// consumable, rewarded by the average consumable distance, reduced by a small
/// random jitter, multiplied by `on_food_multiplier` when the searching agent
/// stands on a consumable, and finally offset by the game score.
#[derive(Debug, Clone, PartialEq)]
pub struct BetterEvaluation {
    /// Weight of the distance to the nearest consumable
    pub nearest_food_weight: f64,

    /// Weight of the average distance to all consumables
    pub average_food_weight: f64,

    /// Dangerous adversaries closer than this contribute nothing
    pub threat_radius: u32,

    /// Applied when the searching agent occupies a consumable cell
    pub on_food_multiplier: f64,

    /// Inclusive range of the tie-breaking jitter, `None` to disable it
    pub jitter: Option<(i32, i32)>,
}

impl Default for BetterEvaluation {
    fn default() -> Self {
        BetterEvaluation {
            nearest_food_weight: 3.0,
            average_food_weight: 1.0,
            threat_radius: 2,
            on_food_multiplier: 1.2,
            jitter: Some((1, 3)),
        }
    }
}

impl BetterEvaluation {
    /// Creates the evaluation with its standard weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables the random jitter term, making the evaluation deterministic
    pub fn without_jitter(mut self) -> Self {
        self.jitter = None;
        self
    }
}

impl<S: PursuitState> Evaluation<S> for BetterEvaluation {
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> f64 {
        if state.is_lose() {
            return 0.0;
        }
        if state.is_win() {
            return f64::INFINITY;
        }

        let position = state.pacman_position();
        let food = state.food();
        let food_distances: Vec<f64> = food
            .iter()
            .map(|&cell| f64::from(manhattan_distance(position, cell)))
            .collect();
        let nearest_food = nearest_distance(position, &food).map_or(0.0, f64::from);
        let average_food = mean(&food_distances);

        let nearest_threat = state
            .ghost_states()
            .iter()
            .map(|ghost| (ghost, manhattan_distance(position, ghost.position)))
            .filter(|(ghost, distance)| ghost.is_dangerous_at(*distance))
            .map(|(_, distance)| distance)
            .min();

        let mut value = match nearest_threat {
            Some(distance) if distance >= self.threat_radius => f64::from(distance),
            _ => 0.0,
        };

        let jitter = match self.jitter {
            Some((low, high)) => f64::from(rng.gen_range(low..=high)),
            None => 0.0,
        };
        value -= self.nearest_food_weight * nearest_food - self.average_food_weight * average_food
            + jitter;

        if food.contains(&position) {
            value *= self.on_food_multiplier;
        }

        value + state.score()
    }

    fn name(&self) -> &str {
        "better"
    }

    fn clone_box(&self) -> Box<dyn Evaluation<S>> {
        Box::new(self.clone())
    }
}

/// Evaluation backed by a plain function or closure
#[derive(Clone)]
pub struct FnEvaluation<F> {
    function: F,
    name: String,
}

impl<F> FnEvaluation<F> {
    /// Wraps `function` as an evaluation
    pub fn new(function: F) -> Self {
        FnEvaluation {
            function,
            name: "custom".to_string(),
        }
    }

    /// Sets the name used in logs
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> fmt::Debug for FnEvaluation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvaluation")
            .field("name", &self.name)
            .finish()
    }
}

impl<S, F> Evaluation<S> for FnEvaluation<F>
where
    S: GameState,
    F: Fn(&S) -> f64 + Clone + Send + Sync + 'static,
{
    fn evaluate(&self, state: &S, _rng: &mut dyn RngCore) -> f64 {
        (self.function)(state)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn clone_box(&self) -> Box<dyn Evaluation<S>> {
        Box::new(self.clone())
    }
}

/// Named evaluation functions an agent configuration can refer to
pub struct EvaluationRegistry<S: GameState> {
    entries: HashMap<String, Box<dyn Evaluation<S>>>,
}

impl<S: GameState> fmt::Debug for EvaluationRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("EvaluationRegistry")
            .field("names", &names)
            .finish()
    }
}

impl<S: GameState + 'static> EvaluationRegistry<S> {
    /// Creates a registry holding the score evaluation
    pub fn new() -> Self {
        EvaluationRegistry {
            entries: HashMap::new(),
        }
        .register("score", ScoreEvaluation)
        .register("scoreEvaluationFunction", ScoreEvaluation)
    }

    /// Adds (or replaces) an evaluation under `name`
    pub fn register<E: Evaluation<S> + 'static>(mut self, name: impl Into<String>, evaluation: E) -> Self {
        self.entries.insert(name.into(), Box::new(evaluation));
        self
    }

    /// True if `name` resolves to an evaluation
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up the evaluation registered under `name`
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Evaluation<S>>> {
        self.entries
            .get(name)
            .map(|evaluation| evaluation.clone_box())
            .ok_or_else(|| SearchError::UnconfiguredEvaluation(name.to_string()))
    }
}

impl<S: PursuitState + 'static> EvaluationRegistry<S> {
    /// Creates a registry holding the score and pursuit evaluations
    pub fn pursuit() -> Self {
        Self::new()
            .register("better", BetterEvaluation::new())
            .register("betterEvaluationFunction", BetterEvaluation::new())
    }
}

impl<S: GameState + 'static> Default for EvaluationRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for functions that score one candidate action of the searching agent
pub trait ActionEvaluation<S: GameState>: Send + Sync {
    /// Scores playing `action` as agent 0 from `state`
    fn evaluate_action(&self, state: &S, action: &S::Action) -> Result<f64>;
}

impl<S, F> ActionEvaluation<S> for F
where
    S: GameState,
    F: Fn(&S, &S::Action) -> Result<f64> + Send + Sync,
{
    fn evaluate_action(&self, state: &S, action: &S::Action) -> Result<f64> {
        self(state, action)
    }
}

/// One-move lookahead used by the reflex agent
///
/// Any adversary standing on the searching agent's new cell scores 0, whatever
/// its cooldown. Otherwise the distance to the nearest consumable is
/// subtracted and the distance to every dangerous adversary is added on top of
/// the successor's score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexEvaluation;

impl ReflexEvaluation {
    /// Creates the reflex evaluation
    pub fn new() -> Self {
        ReflexEvaluation
    }
}

impl<S: PursuitState> ActionEvaluation<S> for ReflexEvaluation {
    fn evaluate_action(&self, state: &S, action: &S::Action) -> Result<f64> {
        let successor = state.generate_successor(0, action)?;
        let position = successor.pacman_position();
        let ghosts = successor.ghost_states();

        if ghosts.iter().any(|ghost| ghost.position == position) {
            return Ok(0.0);
        }

        let mut value = 0.0;
        if let Some(distance) = nearest_distance(position, &successor.food()) {
            value -= f64::from(distance);
        }
        for ghost in &ghosts {
            let distance = manhattan_distance(position, ghost.position);
            if ghost.is_dangerous_at(distance) {
                value += f64::from(distance);
            }
        }

        Ok(value + successor.score())
    }
}
