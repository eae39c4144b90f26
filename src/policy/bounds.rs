//! The alpha-beta window threaded through the recursion
//!
//! Bounds are copied into every recursive call. Tightening them in one call
//! only affects that call's remaining children.

/// Alpha-beta window used by the maximizing step and pruning adversaries
///
/// An open window never prunes and never tightens, which turns the shared
/// recursion into plain minimax or expectimax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Best value the maximizer can already guarantee on the current path
    pub alpha: f64,

    /// Best value the minimizer can already guarantee on the current path
    pub beta: f64,

    pruning: bool,
}

impl Bounds {
    /// A window that never prunes
    pub fn open() -> Self {
        Bounds {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
            pruning: false,
        }
    }

    /// The initial alpha-beta window `(-inf, +inf)`
    pub fn full_window() -> Self {
        Bounds {
            pruning: true,
            ..Self::open()
        }
    }

    /// Whether this window prunes at all
    pub fn is_pruning(&self) -> bool {
        self.pruning
    }

    /// Called by the maximizing step after each child
    ///
    /// Returns true when `best` strictly exceeds beta, meaning the remaining
    /// children can be skipped. Otherwise raises alpha to `best`.
    pub fn fail_high(&mut self, best: f64) -> bool {
        if !self.pruning {
            return false;
        }
        if best > self.beta {
            return true;
        }
        self.alpha = self.alpha.max(best);
        false
    }

    /// Called by a minimizing adversary after each child
    ///
    /// Returns true when `best` strictly falls below alpha. Otherwise lowers
    /// beta to `best`.
    pub fn fail_low(&mut self, best: f64) -> bool {
        if !self.pruning {
            return false;
        }
        if best < self.alpha {
            return true;
        }
        self.beta = self.beta.min(best);
        false
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::open()
    }
}
