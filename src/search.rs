//! The depth-bounded adversarial search engine
//!
//! One recursion serves minimax, alpha-beta and expectimax. The searching
//! agent always maximizes; adversaries are handled by the configured
//! [`AdversaryPolicy`], and the alpha-beta window is only active when that
//! policy prunes.

use std::time::Instant;

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    config::{SearchConfig, TieBreak},
    evaluation::Evaluation,
    game_state::GameState,
    policy::{
        adversary::{AdversaryPolicy, Fold, MinimizePolicy},
        bounds::Bounds,
    },
    stats::SearchStatistics,
    turn::{TurnOrder, SEARCHING_AGENT},
    Result, SearchError,
};

/// The action picked at the root together with its utility
#[derive(Debug, Clone, PartialEq)]
pub struct RootDecision<A> {
    /// Chosen action for the searching agent
    pub action: A,

    /// Utility of the chosen action
    pub value: f64,
}

/// Depth-bounded search over a multi-agent game
///
/// The searching agent (index 0) maximizes. Every adversary in turn combines
/// its children through the adversary policy. Recursion stops at terminal
/// states and after `config.depth` full plies, where the evaluation function
/// takes over.
pub struct AdversarialSearch<S: GameState> {
    /// Configuration for the search
    config: SearchConfig,

    /// Scores terminal states and cutoffs
    evaluation: Box<dyn Evaluation<S>>,

    /// Combines the values of adversary moves
    adversary_policy: Box<dyn AdversaryPolicy>,

    /// Source of randomness for tie-breaks and noisy evaluations
    rng: StdRng,

    /// Statistics of the latest root search
    statistics: SearchStatistics,
}

impl<S: GameState + 'static> AdversarialSearch<S> {
    /// Creates a minimax search with the given configuration and evaluation
    ///
    /// Fails with [`SearchError::InvalidConfiguration`] when the configuration
    /// does not validate.
    pub fn new<E: Evaluation<S> + 'static>(config: SearchConfig, evaluation: E) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(AdversarialSearch {
            config,
            evaluation: Box::new(evaluation),
            adversary_policy: Box::new(MinimizePolicy::new()),
            rng,
            statistics: SearchStatistics::new(),
        })
    }

    /// Sets the adversary policy to use
    pub fn with_adversary_policy<P: AdversaryPolicy + 'static>(mut self, policy: P) -> Self {
        self.adversary_policy = Box::new(policy);
        self
    }

    /// Replaces the random source
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Returns the configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the adversary policy in use
    pub fn adversary_policy(&self) -> &dyn AdversaryPolicy {
        self.adversary_policy.as_ref()
    }

    /// Returns the statistics of the latest search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the best action for the searching agent in `state`
    pub fn choose_action(&mut self, state: &S) -> Result<S::Action> {
        self.search(state).map(|decision| decision.action)
    }

    /// Returns the utility of `state` for the searching agent
    ///
    /// Unlike [`choose_action`](Self::choose_action) this accepts terminal
    /// states and states where agent 0 cannot move; both evaluate directly.
    pub fn root_value(&mut self, state: &S) -> Result<f64> {
        self.statistics = SearchStatistics::new();
        let start_time = Instant::now();
        let turn = TurnOrder::new(state.num_agents());
        let value = self.max_value(state, 0, &turn, self.root_bounds());
        self.statistics.total_time = start_time.elapsed();
        value
    }

    /// Runs the search from `state` and returns the decision at the root
    pub fn search(&mut self, state: &S) -> Result<RootDecision<S::Action>> {
        self.statistics = SearchStatistics::new();
        let start_time = Instant::now();

        if state.is_terminal() {
            return Err(SearchError::NoLegalActions);
        }
        let actions = state.legal_actions(SEARCHING_AGENT);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let turn = TurnOrder::new(state.num_agents());
        let mut bounds = self.root_bounds();
        let mut best_value = f64::NEG_INFINITY;
        let mut best_indices: Vec<usize> = Vec::new();

        for (index, action) in actions.iter().enumerate() {
            let successor = state.generate_successor(SEARCHING_AGENT, action)?;
            self.statistics.nodes_expanded += 1;

            let value = self.child_value(&successor, 0, SEARCHING_AGENT, &turn, bounds)?;
            trace!("root action {:?} -> {}", action, value);

            if best_indices.is_empty() || value > best_value {
                best_value = value;
                best_indices.clear();
                best_indices.push(index);
            } else if value == best_value {
                best_indices.push(index);
            }

            if bounds.fail_high(best_value) {
                self.statistics.cutoffs += 1;
                break;
            }
        }

        let chosen = match self.config.tie_break {
            TieBreak::FirstMax => best_indices.first().copied(),
            TieBreak::Random => best_indices.choose(&mut self.rng).copied(),
        }
        .ok_or(SearchError::NoLegalActions)?;

        self.statistics.total_time = start_time.elapsed();
        debug!(
            "{} search chose {:?} (value {}, {} tied) after {} nodes",
            self.adversary_policy.name(),
            actions[chosen],
            best_value,
            best_indices.len(),
            self.statistics.nodes_expanded
        );

        Ok(RootDecision {
            action: actions[chosen].clone(),
            value: best_value,
        })
    }

    fn root_bounds(&self) -> Bounds {
        if self.adversary_policy.prunes() {
            Bounds::full_window()
        } else {
            Bounds::open()
        }
    }

    /// Value of `successor`, reached by a move of `mover` during `ply`
    ///
    /// When that move hands control back to the searching agent the ply is
    /// complete: the successor is either searched at the next ply or, once
    /// the depth budget is spent, evaluated directly.
    fn child_value(
        &mut self,
        successor: &S,
        ply: usize,
        mover: usize,
        turn: &TurnOrder,
        bounds: Bounds,
    ) -> Result<f64> {
        if turn.completes_ply(mover) {
            if ply + 1 >= self.config.depth {
                return Ok(self.evaluate(successor));
            }
            return self.max_value(successor, ply + 1, turn, bounds);
        }
        self.adversary_value(successor, ply, turn.next(mover), turn, bounds)
    }

    /// Maximizing step of the searching agent
    fn max_value(&mut self, state: &S, ply: usize, turn: &TurnOrder, mut bounds: Bounds) -> Result<f64> {
        self.statistics.max_ply = self.statistics.max_ply.max(ply);

        if state.is_terminal() {
            return Ok(self.evaluate(state));
        }
        let actions = state.legal_actions(SEARCHING_AGENT);
        if actions.is_empty() {
            return Ok(self.evaluate(state));
        }

        let mut best = f64::NEG_INFINITY;
        for action in &actions {
            let successor = state.generate_successor(SEARCHING_AGENT, action)?;
            self.statistics.nodes_expanded += 1;

            let value = self.child_value(&successor, ply, SEARCHING_AGENT, turn, bounds)?;
            if value > best {
                best = value;
            }
            if bounds.fail_high(best) {
                self.statistics.cutoffs += 1;
                return Ok(best);
            }
        }
        Ok(best)
    }

    /// Combining step of adversary `agent`
    fn adversary_value(
        &mut self,
        state: &S,
        ply: usize,
        agent: usize,
        turn: &TurnOrder,
        mut bounds: Bounds,
    ) -> Result<f64> {
        if state.is_terminal() {
            return Ok(self.evaluate(state));
        }
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Ok(self.evaluate(state));
        }

        let mut acc = self.adversary_policy.initial();
        for action in &actions {
            let successor = state.generate_successor(agent, action)?;
            self.statistics.nodes_expanded += 1;

            let value = self.child_value(&successor, ply, agent, turn, bounds)?;
            match self.adversary_policy.fold(acc, value, &mut bounds) {
                Fold::Continue(next) => acc = next,
                Fold::Cutoff(cut) => {
                    self.statistics.cutoffs += 1;
                    return Ok(cut);
                }
            }
        }
        Ok(self.adversary_policy.finish(acc, actions.len()))
    }

    fn evaluate(&mut self, state: &S) -> f64 {
        self.statistics.evaluations += 1;
        self.evaluation.evaluate(state, &mut self.rng)
    }
}
