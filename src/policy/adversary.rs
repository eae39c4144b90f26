//! Adversary policies for the search
//!
//! An adversary policy decides how the values of an adversary's moves are
//! combined into the value of the adversary's node: worst case for the
//! searching agent, worst case with alpha-beta pruning, or the expected value
//! under uniformly random play.

use std::fmt::Debug;

use crate::policy::bounds::Bounds;

/// Outcome of folding one child value into an adversary node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fold {
    /// Keep iterating with the updated accumulator
    Continue(f64),

    /// Stop iterating and report this value for the node
    Cutoff(f64),
}

/// Trait for policies that combine an adversary's child values
pub trait AdversaryPolicy: Debug + Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether the search should run with an alpha-beta window
    fn prunes(&self) -> bool {
        false
    }

    /// Accumulator value before any child has been seen
    fn initial(&self) -> f64;

    /// Folds `child` into `acc`, possibly tightening `bounds`
    fn fold(&self, acc: f64, child: f64, bounds: &mut Bounds) -> Fold;

    /// Turns the accumulator into the node value once every child was folded
    fn finish(&self, acc: f64, action_count: usize) -> f64;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn AdversaryPolicy>;
}

impl AdversaryPolicy for Box<dyn AdversaryPolicy> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn prunes(&self) -> bool {
        (**self).prunes()
    }

    fn initial(&self) -> f64 {
        (**self).initial()
    }

    fn fold(&self, acc: f64, child: f64, bounds: &mut Bounds) -> Fold {
        (**self).fold(acc, child, bounds)
    }

    fn finish(&self, acc: f64, action_count: usize) -> f64 {
        (**self).finish(acc, action_count)
    }

    fn clone_box(&self) -> Box<dyn AdversaryPolicy> {
        (**self).clone_box()
    }
}

/// Minimax adversary
///
/// The adversary always picks the move that is worst for the searching agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimizePolicy;

impl MinimizePolicy {
    /// Creates a new minimizing policy
    pub fn new() -> Self {
        MinimizePolicy
    }
}

impl AdversaryPolicy for MinimizePolicy {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn initial(&self) -> f64 {
        f64::INFINITY
    }

    fn fold(&self, acc: f64, child: f64, _bounds: &mut Bounds) -> Fold {
        Fold::Continue(acc.min(child))
    }

    fn finish(&self, acc: f64, _action_count: usize) -> f64 {
        acc
    }

    fn clone_box(&self) -> Box<dyn AdversaryPolicy> {
        Box::new(*self)
    }
}

/// Minimax adversary with alpha-beta pruning
///
/// Produces the same node values as [`MinimizePolicy`] while skipping the
/// moves that cannot change the decision at the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBetaPolicy;

impl AlphaBetaPolicy {
    /// Creates a new alpha-beta policy
    pub fn new() -> Self {
        AlphaBetaPolicy
    }
}

impl AdversaryPolicy for AlphaBetaPolicy {
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn prunes(&self) -> bool {
        true
    }

    fn initial(&self) -> f64 {
        f64::INFINITY
    }

    fn fold(&self, acc: f64, child: f64, bounds: &mut Bounds) -> Fold {
        let best = acc.min(child);
        if bounds.fail_low(best) {
            Fold::Cutoff(best)
        } else {
            Fold::Continue(best)
        }
    }

    fn finish(&self, acc: f64, _action_count: usize) -> f64 {
        acc
    }

    fn clone_box(&self) -> Box<dyn AdversaryPolicy> {
        Box::new(*self)
    }
}

/// Expectimax adversary
///
/// Every legal move is equally likely, so the node value is the arithmetic
/// mean of the child values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectationPolicy;

impl ExpectationPolicy {
    /// Creates a new expectation policy
    pub fn new() -> Self {
        ExpectationPolicy
    }
}

impl AdversaryPolicy for ExpectationPolicy {
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn initial(&self) -> f64 {
        0.0
    }

    fn fold(&self, acc: f64, child: f64, _bounds: &mut Bounds) -> Fold {
        Fold::Continue(acc + child)
    }

    fn finish(&self, acc: f64, action_count: usize) -> f64 {
        acc / action_count as f64
    }

    fn clone_box(&self) -> Box<dyn AdversaryPolicy> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_all(policy: &dyn AdversaryPolicy, children: &[f64], mut bounds: Bounds) -> f64 {
        let mut acc = policy.initial();
        for &child in children {
            match policy.fold(acc, child, &mut bounds) {
                Fold::Continue(value) => acc = value,
                Fold::Cutoff(value) => return value,
            }
        }
        policy.finish(acc, children.len())
    }

    #[test]
    fn test_minimize_policy() {
        let value = fold_all(&MinimizePolicy::new(), &[3.0, 12.0, 8.0], Bounds::open());
        assert_eq!(value, 3.0);
    }

    #[test]
    fn test_expectation_policy_is_mean() {
        let value = fold_all(&ExpectationPolicy::new(), &[3.0, 12.0, 8.0], Bounds::open());
        assert!((value - 23.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_beta_policy_cuts_below_alpha() {
        let policy = AlphaBetaPolicy::new();
        let mut bounds = Bounds::full_window();
        bounds.alpha = 5.0;

        assert_eq!(policy.fold(f64::INFINITY, 7.0, &mut bounds), Fold::Continue(7.0));
        assert_eq!(bounds.beta, 7.0);
        assert_eq!(policy.fold(7.0, 2.0, &mut bounds), Fold::Cutoff(2.0));
    }

    #[test]
    fn test_policy_cloning() {
        let boxed: Box<dyn AdversaryPolicy> = Box::new(AlphaBetaPolicy::new());
        let cloned = boxed.clone_box();
        assert_eq!(cloned.name(), "alphabeta");
        assert!(cloned.prunes());
        assert!(!ExpectationPolicy::new().prunes());
    }
}
