//! Player capability and the non-searching player kinds.
//!
//! A [`Player`] turns the current game state into a move request. The engine
//! player lives in [`crate::mcts`]; this module holds the trait plus the
//! console-driven human and the uniform-random baseline.

use std::io::{self, BufRead, Write};

use crate::board::{Color, Move};
use crate::game::GameState;

/// Anything that can take a turn.
///
/// `get_move` is called when it is this player's color to move and must
/// return a move request; the caller decides what to do with an illegal one.
pub trait Player {
    fn color(&self) -> Color;
    fn get_move(&mut self, state: &GameState) -> Move;
}

/// Baseline player: a shuffled queue of candidate moves, replayed until one
/// is still legal. Passes once nothing playable remains.
pub struct RandomPlayer {
    color: Color,
    rng: fastrand::Rng,
    queue: Vec<Move>,
}

impl RandomPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: fastrand::Rng::new(),
            queue: Vec::new(),
        }
    }

    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: fastrand::Rng::with_seed(seed),
            queue: Vec::new(),
        }
    }
}

impl Player for RandomPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, state: &GameState) -> Move {
        if self.queue.is_empty() {
            self.queue = state.possible_moves(self.color);
            self.rng.shuffle(&mut self.queue);
        }
        // Queued candidates may have gone stale since the last refill.
        while let Some(mv) = self.queue.pop() {
            if state.is_legal_move(mv, self.color) {
                return mv;
            }
        }
        Move::Pass
    }
}

/// Console player: reads `x,y` coordinates or `pass` from stdin.
pub struct HumanPlayer {
    color: Color,
}

impl HumanPlayer {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    fn parse(line: &str) -> Option<Move> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("pass") {
            return Some(Move::Pass);
        }
        let (x, y) = line.split_once(',')?;
        Some(Move::play(
            x.trim().parse().ok()?,
            y.trim().parse().ok()?,
        ))
    }
}

impl Player for HumanPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, _state: &GameState) -> Move {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{} to move (x,y or pass): ", self.color);
            let _ = io::stdout().flush();
            line.clear();
            match stdin.lock().read_line(&mut line) {
                // On EOF there is nothing more to read; pass forever.
                Ok(0) | Err(_) => return Move::Pass,
                Ok(_) => {}
            }
            match Self::parse(&line) {
                Some(mv) => return mv,
                None => println!("could not read that; use column,row like 2,3 or pass"),
            }
        }
    }
}
