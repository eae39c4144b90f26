//! Agents exposing a single `get_action` entry point
//!
//! [`SearchAgent`] wraps the adversarial search with one of the three
//! adversary models. [`ReflexAgent`] looks a single move ahead.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    config::SearchConfig,
    evaluation::{ActionEvaluation, Evaluation, EvaluationRegistry, ReflexEvaluation},
    game_state::{GameState, PursuitState},
    policy::{AdversaryPolicy, AlphaBetaPolicy, ExpectationPolicy, MinimizePolicy},
    search::AdversarialSearch,
    stats::SearchStatistics,
    turn::SEARCHING_AGENT,
    Result, SearchError,
};

/// How a search agent models its adversaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Adversaries play the worst move for the searching agent
    Minimax,

    /// Same as minimax, pruning branches that cannot matter
    AlphaBeta,

    /// Adversaries pick uniformly at random among their legal moves
    Expectimax,
}

impl AgentKind {
    /// The adversary policy implementing this model
    pub fn adversary_policy(self) -> Box<dyn AdversaryPolicy> {
        match self {
            AgentKind::Minimax => Box::new(MinimizePolicy::new()),
            AgentKind::AlphaBeta => Box::new(AlphaBetaPolicy::new()),
            AgentKind::Expectimax => Box::new(ExpectationPolicy::new()),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Expectimax => "expectimax",
        };
        f.write_str(name)
    }
}

impl FromStr for AgentKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minimaxagent" => Ok(AgentKind::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" | "alphabetaagent" => Ok(AgentKind::AlphaBeta),
            "expectimax" | "expectimaxagent" => Ok(AgentKind::Expectimax),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown agent kind '{}'",
                other
            ))),
        }
    }
}

/// A searching agent for pursuit games
///
/// The evaluation function and depth are fixed at construction.
///
/// # Example
///
/// ```no_run
/// # use pursuit_search::{AgentKind, SearchAgent, SearchConfig, PursuitState};
/// # fn pick<S: PursuitState + 'static>(state: &S) -> pursuit_search::Result<S::Action> {
/// let config = SearchConfig::default()
///     .with_depth(3)
///     .with_evaluation_function("better");
/// let mut agent = SearchAgent::new(AgentKind::AlphaBeta, config)?;
/// agent.get_action(state)
/// # }
/// ```
pub struct SearchAgent<S: GameState> {
    kind: AgentKind,
    search: AdversarialSearch<S>,
}

impl<S: PursuitState + 'static> SearchAgent<S> {
    /// Builds an agent, resolving the configured evaluation among the
    /// built-in pursuit evaluations
    pub fn new(kind: AgentKind, config: SearchConfig) -> Result<Self> {
        Self::with_registry(kind, config, &EvaluationRegistry::pursuit())
    }
}

impl<S: GameState + 'static> SearchAgent<S> {
    /// Builds an agent, resolving the configured evaluation in `registry`
    ///
    /// Fails with [`SearchError::UnconfiguredEvaluation`] when the name is
    /// not registered.
    pub fn with_registry(
        kind: AgentKind,
        config: SearchConfig,
        registry: &EvaluationRegistry<S>,
    ) -> Result<Self> {
        config.validate()?;
        let evaluation = registry.resolve(&config.evaluation_function)?;
        Self::with_evaluation(kind, config, evaluation)
    }

    /// Builds an agent around an evaluation given directly
    ///
    /// The configured evaluation name is not looked up.
    pub fn with_evaluation<E: Evaluation<S> + 'static>(
        kind: AgentKind,
        config: SearchConfig,
        evaluation: E,
    ) -> Result<Self> {
        debug!(
            "building {} agent: depth {}, evaluation '{}'",
            kind,
            config.depth,
            evaluation.name()
        );
        let search =
            AdversarialSearch::new(config, evaluation)?.with_adversary_policy(kind.adversary_policy());
        Ok(SearchAgent { kind, search })
    }

    /// Replaces the random source used for tie-breaks and evaluation noise
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.search = self.search.with_rng(rng);
        self
    }

    /// The adversary model of this agent
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    /// The search depth in plies
    pub fn depth(&self) -> usize {
        self.search.config().depth
    }

    /// Returns a legal action for agent 0 in `state`
    pub fn get_action(&mut self, state: &S) -> Result<S::Action> {
        self.search.choose_action(state)
    }

    /// Returns the utility the search assigns to `state`
    pub fn value(&mut self, state: &S) -> Result<f64> {
        self.search.root_value(state)
    }

    /// Returns the statistics of the latest search
    pub fn get_statistics(&self) -> &SearchStatistics {
        self.search.get_statistics()
    }
}

/// Agent choosing among the best one-move lookaheads
///
/// Ties are broken uniformly at random.
pub struct ReflexAgent<S: GameState> {
    evaluation: Box<dyn ActionEvaluation<S>>,
    rng: StdRng,
}

impl<S: PursuitState + 'static> ReflexAgent<S> {
    /// Creates a reflex agent using [`ReflexEvaluation`]
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_evaluation(ReflexEvaluation::new(), seed)
    }
}

impl<S: GameState + 'static> ReflexAgent<S> {
    /// Creates a reflex agent scoring moves with `evaluation`
    pub fn with_evaluation<E: ActionEvaluation<S> + 'static>(evaluation: E, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ReflexAgent {
            evaluation: Box::new(evaluation),
            rng,
        }
    }

    /// Returns one of the best-scoring legal actions for agent 0
    pub fn get_action(&mut self, state: &S) -> Result<S::Action> {
        let actions = state.legal_actions(SEARCHING_AGENT);
        let scores = actions
            .iter()
            .map(|action| self.evaluation.evaluate_action(state, action))
            .collect::<Result<Vec<f64>>>()?;

        let best_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, &score)| score == best_score)
            .map(|(index, _)| index)
            .collect();

        let chosen = *best_indices
            .choose(&mut self.rng)
            .ok_or(SearchError::NoLegalActions)?;
        Ok(actions[chosen].clone())
    }
}
