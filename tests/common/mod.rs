#![allow(dead_code)]

use std::sync::Arc;

use pursuit_search::{
    Direction, GameState, GhostState, Position, PursuitState, Result, SearchError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A node of a hand-built game tree
///
/// Actions are child indices. The tree itself encodes whose turn it is, so
/// `legal_actions` ignores the agent index.
#[derive(Debug)]
pub struct TreeNode {
    pub score: f64,
    pub win: bool,
    pub lose: bool,
    pub children: Vec<Arc<TreeNode>>,
}

pub fn leaf(score: f64) -> TreeNode {
    TreeNode {
        score,
        win: false,
        lose: false,
        children: Vec::new(),
    }
}

pub fn branch(children: Vec<TreeNode>) -> TreeNode {
    scored_branch(0.0, children)
}

pub fn scored_branch(score: f64, children: Vec<TreeNode>) -> TreeNode {
    TreeNode {
        score,
        win: false,
        lose: false,
        children: children.into_iter().map(Arc::new).collect(),
    }
}

pub fn win(score: f64) -> TreeNode {
    TreeNode {
        win: true,
        ..leaf(score)
    }
}

pub fn lose(score: f64) -> TreeNode {
    TreeNode {
        lose: true,
        ..leaf(score)
    }
}

/// Game state walking a [`TreeNode`] tree
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub node: Arc<TreeNode>,
    pub agents: usize,
    /// When set, this action is listed as legal but refused on application
    pub refuse: Option<usize>,
}

impl TreeGame {
    pub fn new(root: TreeNode, agents: usize) -> Self {
        TreeGame {
            node: Arc::new(root),
            agents,
            refuse: None,
        }
    }

    pub fn refusing(mut self, action: usize) -> Self {
        self.refuse = Some(action);
        self
    }
}

impl GameState for TreeGame {
    type Action = usize;

    fn is_win(&self) -> bool {
        self.node.win
    }

    fn is_lose(&self) -> bool {
        self.node.lose
    }

    fn legal_actions(&self, _agent: usize) -> Vec<usize> {
        (0..self.node.children.len()).collect()
    }

    fn generate_successor(&self, agent: usize, action: &usize) -> Result<Self> {
        let child = self
            .node
            .children
            .get(*action)
            .filter(|_| self.refuse != Some(*action))
            .ok_or_else(|| SearchError::IllegalAction {
                agent,
                action: format!("{:?}", action),
            })?;
        Ok(TreeGame {
            node: Arc::clone(child),
            agents: self.agents,
            refuse: self.refuse,
        })
    }

    fn num_agents(&self) -> usize {
        self.agents
    }

    fn score(&self) -> f64 {
        self.node.score
    }
}

/// The textbook two-agent tree: three adversary nodes over nine leaves
///
/// Minimax value 3 via action 0; expectimax values 7.667, 4 and 7.
pub fn textbook_tree() -> TreeGame {
    TreeGame::new(
        branch(vec![
            branch(vec![leaf(3.0), leaf(12.0), leaf(8.0)]),
            branch(vec![leaf(2.0), leaf(4.0), leaf(6.0)]),
            branch(vec![leaf(14.0), leaf(5.0), leaf(2.0)]),
        ]),
        2,
    )
}

/// Builds a uniform random tree with `levels` levels of moves
///
/// Leaf scores are small integers so ties are common. With
/// `single_adversary_moves` set, adversary levels have a single child.
pub fn random_tree(
    rng: &mut StdRng,
    levels: usize,
    branching: usize,
    single_adversary_moves: bool,
    agents: usize,
) -> TreeGame {
    fn build(
        rng: &mut StdRng,
        level: usize,
        levels: usize,
        branching: usize,
        single_adversary_moves: bool,
        agents: usize,
    ) -> TreeNode {
        if level == levels {
            return leaf(f64::from(rng.gen_range(0..20)));
        }
        let adversary_turn = level % agents != 0;
        let width = if adversary_turn && single_adversary_moves {
            1
        } else {
            rng.gen_range(1..=branching)
        };
        let children = (0..width)
            .map(|_| build(rng, level + 1, levels, branching, single_adversary_moves, agents))
            .collect();
        scored_branch(f64::from(rng.gen_range(0..20)), children)
    }

    TreeGame::new(
        build(rng, 0, levels, branching, single_adversary_moves, agents),
        agents,
    )
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub const FOOD_REWARD: f64 = 10.0;
pub const MOVE_COST: f64 = 1.0;
pub const WIN_REWARD: f64 = 500.0;
pub const LOSE_PENALTY: f64 = 500.0;
pub const GHOST_REWARD: f64 = 200.0;

/// A small open grid pursuit game
///
/// The searching agent pays one point per move and earns points for eating
/// food. Clearing the board wins; meeting a dangerous ghost loses; meeting a
/// scared ghost sends it back to its start.
#[derive(Debug, Clone)]
pub struct GridGame {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Position>,
    pub pacman: Position,
    pub ghosts: Vec<GhostState>,
    pub ghost_starts: Vec<Position>,
    pub food: Vec<Position>,
    pub score: f64,
    pub win: bool,
    pub lose: bool,
}

impl GridGame {
    pub fn new(width: i32, height: i32, pacman: Position) -> Self {
        GridGame {
            width,
            height,
            walls: Vec::new(),
            pacman,
            ghosts: Vec::new(),
            ghost_starts: Vec::new(),
            food: Vec::new(),
            score: 0.0,
            win: false,
            lose: false,
        }
    }

    pub fn with_ghost(mut self, position: Position, scared_timer: u32) -> Self {
        self.ghosts.push(GhostState::new(position, scared_timer));
        self.ghost_starts.push(position);
        self
    }

    pub fn with_food(mut self, position: Position) -> Self {
        self.food.push(position);
        self
    }

    pub fn with_walls(mut self, walls: &[Position]) -> Self {
        self.walls.extend_from_slice(walls);
        self
    }

    fn is_open(&self, position: Position) -> bool {
        position.0 >= 0
            && position.1 >= 0
            && position.0 < self.width
            && position.1 < self.height
            && !self.walls.contains(&position)
    }

    fn resolve_collisions(&mut self) {
        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            if ghost.position != self.pacman {
                continue;
            }
            if ghost.scared_timer > 0 {
                self.score += GHOST_REWARD;
                ghost.position = self.ghost_starts[index];
                ghost.scared_timer = 0;
            } else {
                self.score -= LOSE_PENALTY;
                self.lose = true;
            }
        }
    }
}

impl GameState for GridGame {
    type Action = Direction;

    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }
        if agent == 0 {
            return Direction::ALL
                .iter()
                .copied()
                .filter(|direction| self.is_open(direction.apply(self.pacman)))
                .collect();
        }
        let Some(ghost) = self.ghosts.get(agent - 1) else {
            return Vec::new();
        };
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| direction != Direction::Stop)
            .filter(|direction| self.is_open(direction.apply(ghost.position)))
            .collect()
    }

    fn generate_successor(&self, agent: usize, action: &Direction) -> Result<Self> {
        if !self.legal_actions(agent).contains(action) {
            return Err(SearchError::IllegalAction {
                agent,
                action: action.to_string(),
            });
        }

        let mut next = self.clone();
        if agent == 0 {
            next.pacman = action.apply(self.pacman);
            next.score -= MOVE_COST;
            if let Some(index) = next.food.iter().position(|&cell| cell == next.pacman) {
                next.food.remove(index);
                next.score += FOOD_REWARD;
                if next.food.is_empty() {
                    next.score += WIN_REWARD;
                    next.win = true;
                }
            }
        } else {
            let ghost = &mut next.ghosts[agent - 1];
            ghost.position = action.apply(ghost.position);
            ghost.scared_timer = ghost.scared_timer.saturating_sub(1);
        }
        if !next.win {
            next.resolve_collisions();
        }
        Ok(next)
    }

    fn num_agents(&self) -> usize {
        self.ghosts.len() + 1
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl PursuitState for GridGame {
    fn pacman_position(&self) -> Position {
        self.pacman
    }

    fn food(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn ghost_states(&self) -> Vec<GhostState> {
        self.ghosts.clone()
    }
}
