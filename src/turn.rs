//! Round-robin turn order
//!
//! Agent 0 moves first, then every adversary in index order. A ply is complete
//! when control comes back to agent 0.

/// Index of the searching (maximizing) agent
pub const SEARCHING_AGENT: usize = 0;

/// Maps agent indices to whoever acts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    agent_count: usize,
}

impl TurnOrder {
    /// Creates the turn order for a game with `agent_count` agents
    ///
    /// A count of 0 is treated as a single-agent game.
    pub fn new(agent_count: usize) -> Self {
        TurnOrder {
            agent_count: agent_count.max(1),
        }
    }

    /// Total number of agents taking turns
    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    /// The agent acting after `agent`
    pub fn next(&self, agent: usize) -> usize {
        (agent + 1) % self.agent_count
    }

    /// True when the move by `agent` hands control back to the searching agent,
    /// i.e. when that move completes a ply.
    pub fn completes_ply(&self, agent: usize) -> bool {
        self.next(agent) == SEARCHING_AGENT
    }

    /// The first agent to move after the searching agent
    pub fn first_adversary(&self) -> usize {
        self.next(SEARCHING_AGENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin() {
        let order = TurnOrder::new(3);
        assert_eq!(order.next(0), 1);
        assert_eq!(order.next(1), 2);
        assert_eq!(order.next(2), 0);
        assert!(order.completes_ply(2));
        assert!(!order.completes_ply(0));
        assert_eq!(order.first_adversary(), 1);
    }

    #[test]
    fn test_single_agent_wraps_immediately() {
        let order = TurnOrder::new(1);
        assert_eq!(order.next(0), 0);
        assert!(order.completes_ply(0));

        let degenerate = TurnOrder::new(0);
        assert_eq!(degenerate.agent_count(), 1);
        assert_eq!(degenerate.next(0), 0);
    }
}
