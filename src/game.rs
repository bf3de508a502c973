//! Game state: turn rotation, move history, and the ko rule.
//!
//! [`GameState`] wraps a [`Board`] with the order of play and a record of
//! every move made. The board-level rules know nothing about history; the
//! one-ply ko restriction lives here, layered on top of board legality.
//!
//! Cloning a `GameState` produces a fully independent copy (board, rotation
//! and history), which is what lets search simulations mutate freely.

use std::collections::VecDeque;

use crate::board::{Board, Color, GameError, Move, Point, Score, StoneGroup};

/// One entry of the move history.
#[derive(Clone, Debug)]
pub struct MoveRecord {
    pub mv: Move,
    pub color: Color,
    /// Points of the stones this move captured (empty for a pass).
    pub captured: Vec<Point>,
    /// 1-based ply number.
    pub ply: usize,
}

/// A running game: board, circular turn order, move history.
#[derive(Clone)]
pub struct GameState {
    board: Board,
    rotation: VecDeque<Color>,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// Start a game on an empty board. The first color in `rotation` moves
    /// first.
    pub fn new(size: usize, rotation: impl IntoIterator<Item = Color>) -> Self {
        Self::with_board(Board::new(size), rotation)
    }

    /// Start a game from an existing position.
    pub fn with_board(board: Board, rotation: impl IntoIterator<Item = Color>) -> Self {
        let rotation: VecDeque<Color> = rotation.into_iter().collect();
        assert!(!rotation.is_empty(), "a game needs at least one player");
        Self {
            board,
            rotation,
            history: Vec::new(),
        }
    }

    /// The usual Black-then-White game.
    pub fn two_player(size: usize) -> Self {
        Self::new(size, [Color::Black, Color::White])
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color whose turn it is.
    pub fn next_to_move(&self) -> Color {
        *self.rotation.front().expect("rotation is never empty")
    }

    /// The color that moved last (at game start: the player due last).
    pub fn last_moved(&self) -> Color {
        *self.rotation.back().expect("rotation is never empty")
    }

    /// Apply a move for the color whose turn it is.
    ///
    /// Validates first (including ko); on error nothing changes. On success
    /// the turn rotates and the move is recorded with whatever it captured.
    pub fn add_move(&mut self, mv: Move) -> Result<Vec<Point>, GameError> {
        let color = self.next_to_move();
        if !self.is_legal_move(mv, color) {
            return Err(GameError::IllegalMove(mv));
        }
        let captured = match mv {
            Move::Pass => Vec::new(),
            Move::Play { .. } => self.board.play(mv, color)?,
        };
        self.rotation.rotate_left(1);
        let ply = self.history.len() + 1;
        self.history.push(MoveRecord {
            mv,
            color,
            captured: captured.clone(),
            ply,
        });
        Ok(captured)
    }

    /// Board legality plus the ko rule.
    ///
    /// A move retakes ko iff the previous move captured exactly one stone,
    /// the previous move's own group is down to a single liberty, and the
    /// candidate lands on the captured stone's point. Only one ply of
    /// lookback; this is not a superko check.
    pub fn is_legal_move(&self, mv: Move, color: Color) -> bool {
        if mv.is_pass() {
            return true;
        }
        self.board.is_legal_move(mv, color) && !self.retakes_ko(mv)
    }

    fn retakes_ko(&self, mv: Move) -> bool {
        let Some(last) = self.history.last() else {
            return false;
        };
        let [taken] = last.captured.as_slice() else {
            return false;
        };
        let Some(group) = self.group_at(last.mv) else {
            return false;
        };
        group.in_atari() && mv.coords() == Some(*taken)
    }

    /// The most recent move of any color.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|r| r.mv)
    }

    /// The most recent move played by `color`.
    pub fn last_move_by(&self, color: Color) -> Option<Move> {
        self.history
            .iter()
            .rev()
            .find(|r| r.color == color)
            .map(|r| r.mv)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Every legal placement for `color`. Passing is always available and is
    /// not part of this enumeration.
    pub fn possible_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for y in 0..self.board.size() {
            for x in 0..self.board.size() {
                let mv = Move::play(x, y);
                if self.is_legal_move(mv, color) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    pub fn is_eye(&self, mv: Move, color: Color) -> bool {
        self.board.is_eye(mv, color)
    }

    /// The group occupying a move's target point, if any.
    pub fn group_at(&self, mv: Move) -> Option<&StoneGroup> {
        self.board.group_at(mv.coords()?)
    }

    pub fn groups_in_atari(&self) -> impl Iterator<Item = &StoneGroup> {
        self.board.groups_in_atari()
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn capture_dead_groups(&mut self) {
        self.board.capture_dead_groups();
    }
}
