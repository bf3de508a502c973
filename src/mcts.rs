//! Monte Carlo Tree Search move selection.
//!
//! The engine runs a fixed number of simulations per real move. Each
//! simulation clones the game state, descends the tree by UCT, expands one
//! untried move, finishes the game with a cheap heuristic playout, and
//! backpropagates the result along the path it took.
//!
//! The tree is kept between real turns: when a move is actually played (by
//! this engine or by its opponent), the matching child becomes the new root
//! and everything learned below it is retained; the discarded siblings are
//! simply dropped.

use crate::board::{Color, GameError, Move, Score, StoneGroup};
use crate::game::GameState;
use crate::player::Player;

/// Default simulation budget per real move.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// UCT exploration constant.
const EXPLORATION: f64 = 1.0;

/// Guards divisions by zero-visit counts and seeds the selection jitter.
const EPSILON: f64 = 1e-6;

/// How often the search loop reports progress.
const REPORT_PERIOD: usize = 1000;

/// One node of the search tree.
///
/// A node owns its children; backpropagation follows the path of child
/// indices recorded on the way down, so no parent links exist that could
/// outlive a pruned subtree.
pub struct Node {
    /// The move that led into this node; `None` only for a root built
    /// directly from a game state.
    mv: Option<Move>,
    /// Whose move produced this position; wins are counted for this color.
    player_just_moved: Color,
    wins: u32,
    visits: u32,
    /// Moves not yet expanded from this position, own-eye fills excluded.
    untried: Vec<Move>,
    children: Vec<Node>,
}

impl Node {
    fn new(mv: Option<Move>, state: &GameState) -> Self {
        let to_move = state.next_to_move();
        let untried = state
            .possible_moves(to_move)
            .into_iter()
            .filter(|&m| !state.is_eye(m, to_move))
            .collect();
        Self {
            mv,
            player_just_moved: state.last_moved(),
            wins: 0,
            visits: 0,
            untried,
            children: Vec::new(),
        }
    }

    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn untried(&self) -> &[Move] {
        &self.untried
    }

    /// Pick the child with the best UCT value.
    ///
    /// `value = w/(v+ε) + sqrt(C·ln(parent+1)/(v+ε)) + jitter·ε`. A pass
    /// child never competes on value; it is only the fallback when no other
    /// child exists, so the search does not end games early.
    fn select_child(&self, rng: &mut fastrand::Rng) -> usize {
        let parent_visits = self.visits as f64;
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        let mut pass_fallback = None;
        for (i, child) in self.children.iter().enumerate() {
            if child.mv == Some(Move::Pass) {
                pass_fallback.get_or_insert(i);
                continue;
            }
            let denom = EPSILON + child.visits as f64;
            let ratio = child.wins as f64 / denom;
            let value = ratio
                + (EXPLORATION * (parent_visits + 1.0).ln() / denom).sqrt()
                + rng.f64() * EPSILON;
            if value > best_value {
                best_value = value;
                best = Some(i);
            }
        }
        best.or(pass_fallback).unwrap_or(0)
    }

    /// Record a finished simulation: a win if the color that moved into this
    /// node ends ahead, with ties going to White.
    fn record(&mut self, score: Score) {
        self.visits += 1;
        let own = score.get(self.player_just_moved);
        let rival = score.get(self.player_just_moved.opponent());
        if own > rival || (own == rival && self.player_just_moved == Color::White) {
            self.wins += 1;
        }
    }
}

/// A [`Player`] choosing moves by MCTS.
///
/// The simulation budget is a per-instance field fixed at construction; two
/// engines never share configuration.
pub struct MctsPlayer {
    color: Color,
    iterations: usize,
    rng: fastrand::Rng,
    root: Option<Node>,
}

impl MctsPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_iterations(color, DEFAULT_ITERATIONS)
    }

    pub fn with_iterations(color: Color, iterations: usize) -> Self {
        Self {
            color,
            iterations,
            rng: fastrand::Rng::new(),
            root: None,
        }
    }

    /// Fix the RNG seed, for reproducible searches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// The current tree root, if a search has run.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Re-root the tree at the child for `mv`, a move that was actually
    /// played. The child's whole subtree (and its statistics) survives; its
    /// siblings are dropped. If the move was never expanded, a fresh node is
    /// built from the position after the move.
    pub fn advance(&mut self, mv: Move, state_after: &GameState) {
        let kept = self.root.take().and_then(|mut root| {
            root.children
                .iter()
                .position(|c| c.mv == Some(mv))
                .map(|i| root.children.swap_remove(i))
        });
        self.root = Some(kept.unwrap_or_else(|| Node::new(Some(mv), state_after)));
    }

    /// Run the configured number of simulations and return the most visited
    /// root move. Visit counts are a steadier signal than raw win ratios.
    fn search(&mut self, root_state: &GameState) -> Result<Move, GameError> {
        let Self {
            root,
            rng,
            iterations,
            ..
        } = self;
        let iterations = *iterations;
        let Some(root) = root.as_mut() else {
            return Ok(Move::Pass);
        };

        for i in 0..iterations {
            let mut state = root_state.clone();
            let mut path = Vec::new();
            let mut node = &mut *root;

            // Select: follow UCT while fully expanded.
            while node.untried.is_empty() && !node.children.is_empty() {
                let idx = node.select_child(rng);
                let mv = node.children[idx]
                    .mv
                    .expect("non-root nodes always carry a move");
                state.add_move(mv)?;
                path.push(idx);
                node = &mut node.children[idx];
            }

            // Expand: materialize one untried move.
            if !node.untried.is_empty() {
                let pick = rng.usize(..node.untried.len());
                let mv = node.untried.swap_remove(pick);
                state.add_move(mv)?;
                node.children.push(Node::new(Some(mv), &state));
                path.push(node.children.len() - 1);
            }

            // Simulate to the end, then settle the obvious corpses.
            rollout(&mut state, rng)?;
            state.capture_dead_groups();
            let score = state.score();

            // Backpropagate along the recorded path, root included.
            let mut node = &mut *root;
            node.record(score);
            for idx in path {
                node = &mut node.children[idx];
                node.record(score);
            }

            if (i + 1) % REPORT_PERIOD == 0 {
                log::debug!("simulation {}/{}", i + 1, iterations);
            }
        }

        Ok(root
            .children
            .iter()
            .max_by_key(|c| c.visits)
            .and_then(|c| c.mv)
            .unwrap_or(Move::Pass))
    }
}

impl Player for MctsPlayer {
    fn color(&self) -> Color {
        self.color
    }

    /// Produce a move for the current position.
    ///
    /// Called out of turn (the last mover was this engine), it passes rather
    /// than corrupting its tree. Any illegal-move error surfacing from the
    /// search also degrades to a pass.
    fn get_move(&mut self, state: &GameState) -> Move {
        if state.last_moved() == self.color {
            return Move::Pass;
        }

        // Catch up with the opponent's observed move, keeping whatever part
        // of the tree is still relevant.
        match state.last_move() {
            Some(mv @ Move::Play { .. }) if self.root.is_some() => self.advance(mv, state),
            _ => self.root = Some(Node::new(None, state)),
        }

        let mv = match self.search(state) {
            Ok(mv) => mv,
            Err(err) => {
                log::warn!("search aborted ({err}), passing");
                self.root = None;
                return Move::Pass;
            }
        };

        // Advance past our own reply so the next turn reuses the subtree.
        let mut after = state.clone();
        match after.add_move(mv) {
            Ok(_) => self.advance(mv, &after),
            Err(_) => self.root = None,
        }
        mv
    }
}

/// Play a position out to the end with a cheap heuristic policy.
///
/// Per move, in order: save the mover's just-played group from atari,
/// capture an enemy group in atari (largest first), otherwise play a random
/// legal move that does not fill an own eye; pass when nothing qualifies.
/// The game ends when a color passes twice in a row; a ply cap bounds
/// pathological sequences.
fn rollout(state: &mut GameState, rng: &mut fastrand::Rng) -> Result<(), GameError> {
    let mut just_passed = [false; 2];
    let size = state.board().size();
    let max_plies = 3 * size * size;
    for _ in 0..max_plies {
        let color = state.next_to_move();
        let mv = policy_move(state, color, rng);
        if mv.is_pass() {
            if just_passed[color.index()] {
                break;
            }
            just_passed[color.index()] = true;
        } else {
            just_passed[color.index()] = false;
        }
        state.add_move(mv)?;
    }
    Ok(())
}

fn policy_move(state: &GameState, color: Color, rng: &mut fastrand::Rng) -> Move {
    let mut moves = state.possible_moves(color);
    moves.retain(|&mv| !state.is_eye(mv, color));
    if moves.is_empty() {
        return Move::Pass;
    }

    // Save the group we just extended if it ended up in atari.
    if let Some(last) = state.last_move_by(color) {
        if let Some(group) = state.group_at(last) {
            if group.in_atari() {
                if let Some(mv) = sole_liberty(group) {
                    if moves.contains(&mv) {
                        return mv;
                    }
                }
            }
        }
    }

    // Kill an enemy group in atari, biggest first.
    let mut targets: Vec<&StoneGroup> = state
        .groups_in_atari()
        .filter(|g| g.owner() != color)
        .collect();
    targets.sort_by(|a, b| b.stones().len().cmp(&a.stones().len()));
    for group in targets {
        if let Some(mv) = sole_liberty(group) {
            if moves.contains(&mv) {
                return mv;
            }
        }
    }

    moves[rng.usize(..moves.len())]
}

fn sole_liberty(group: &StoneGroup) -> Option<Move> {
    let &(x, y) = group.liberties().iter().next()?;
    Some(Move::play(x, y))
}
