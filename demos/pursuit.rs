//! Pursuit game demo
//!
//! Plays a small maze with a search agent against randomly moving ghosts.
//!
//! ```text
//! cargo run --example pursuit -- [minimax|alphabeta|expectimax|reflex] [depth] [seed]
//! ```

use std::env;
use std::fmt;

use pursuit_search::{
    AgentKind, Direction, GameState, GhostState, Position, PursuitState, ReflexAgent, Result,
    SearchAgent, SearchConfig, SearchError,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

const LAYOUT: &str = "\
%%%%%%%%%%%%%%%%%%%%
%o....%......%....o%
%.%%.%%.%%%%.%%.%%.%
%.%..............%.%
%.%.%%%.%GG%.%%%.%.%
%.................P%
%%%%%%%%%%%%%%%%%%%%";

const FOOD_REWARD: f64 = 10.0;
const MOVE_COST: f64 = 1.0;
const WIN_REWARD: f64 = 500.0;
const LOSE_PENALTY: f64 = 500.0;
const GHOST_REWARD: f64 = 200.0;
const SCARED_TIME: u32 = 40;
const MAX_TURNS: usize = 500;

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let agent_name = args.first().map(String::as_str).unwrap_or("expectimax");
    let depth = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2);
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(7);

    println!("Pursuit Search Example");
    println!("======================");
    println!();

    if let Err(e) = run(agent_name, depth, seed) {
        println!("Error: {}", e);
    }
}

fn run(agent_name: &str, depth: usize, seed: u64) -> Result<()> {
    let mut game = Maze::parse(LAYOUT)?;
    let mut ghost_rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let mut choose: Box<dyn FnMut(&Maze) -> Result<Direction>> = if agent_name == "reflex" {
        let mut agent = ReflexAgent::new(Some(seed));
        Box::new(move |state: &Maze| agent.get_action(state))
    } else {
        let kind: AgentKind = agent_name.parse()?;
        let config = SearchConfig::default()
            .with_depth(depth)
            .with_evaluation_function("better")
            .with_seed(seed);
        let mut agent = SearchAgent::new(kind, config)?;
        Box::new(move |state: &Maze| {
            let action = agent.get_action(state)?;
            println!("{}", agent.get_statistics().summary());
            Ok(action)
        })
    };

    let mut turns = 0;
    while !game.is_terminal() && turns < MAX_TURNS {
        println!("{}", game);

        let action = choose(&game)?;
        println!("Agent moves {}", action);
        game = game.generate_successor(0, &action)?;

        for ghost in 1..game.num_agents() {
            if game.is_terminal() {
                break;
            }
            let moves = game.legal_actions(ghost);
            if let Some(step) = moves.choose(&mut ghost_rng) {
                game = game.generate_successor(ghost, step)?;
            }
        }
        turns += 1;
    }

    println!("{}", game);
    if game.is_win() {
        println!("All food eaten after {} turns!", turns);
    } else if game.is_lose() {
        println!("Caught by a ghost after {} turns.", turns);
    } else {
        println!("Gave up after {} turns.", turns);
    }
    println!("Final score: {}", game.score());
    Ok(())
}

/// Maze state for the demo
#[derive(Clone)]
struct Maze {
    width: i32,
    height: i32,
    walls: Vec<Position>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<GhostState>,
    ghost_starts: Vec<Position>,
    score: f64,
    win: bool,
    lose: bool,
}

impl Maze {
    /// Parses a layout where the first line is the top row
    fn parse(layout: &str) -> Result<Self> {
        let rows: Vec<&str> = layout.lines().collect();
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;

        let mut maze = Maze {
            width,
            height,
            walls: Vec::new(),
            food: Vec::new(),
            capsules: Vec::new(),
            pacman: (0, 0),
            ghosts: Vec::new(),
            ghost_starts: Vec::new(),
            score: 0.0,
            win: false,
            lose: false,
        };

        let mut found_pacman = false;
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (x, cell) in line.chars().enumerate() {
                let position = (x as i32, y);
                match cell {
                    '%' => maze.walls.push(position),
                    '.' => maze.food.push(position),
                    'o' => maze.capsules.push(position),
                    'P' => {
                        maze.pacman = position;
                        found_pacman = true;
                    }
                    'G' => {
                        maze.ghosts.push(GhostState::new(position, 0));
                        maze.ghost_starts.push(position);
                    }
                    _ => {}
                }
            }
        }

        if !found_pacman {
            return Err(SearchError::InvalidConfiguration(
                "layout has no agent".to_string(),
            ));
        }
        Ok(maze)
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

impl GameState for Maze {
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
        let (from, can_stop) = match agent {
            0 => (self.pacman, true),
            _ => match self.ghosts.get(agent - 1) {
                Some(ghost) => (ghost.position, false),
                None => return Vec::new(),
            },
        };
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| can_stop || direction != Direction::Stop)
            .filter(|direction| self.is_open(direction.apply(from)))
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
            if let Some(index) = next.capsules.iter().position(|&cell| cell == next.pacman) {
                next.capsules.remove(index);
                for ghost in &mut next.ghosts {
                    ghost.scared_timer = SCARED_TIME;
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

impl PursuitState for Maze {
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

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let position = (x, y);
                let symbol = if position == self.pacman {
                    'P'
                } else if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                    if ghost.scared_timer > 0 {
                        'S'
                    } else {
                        'G'
                    }
                } else if self.walls.contains(&position) {
                    '%'
                } else if self.food.contains(&position) {
                    '.'
                } else if self.capsules.contains(&position) {
                    'o'
                } else {
                    ' '
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Score: {}", self.score)
    }
}
