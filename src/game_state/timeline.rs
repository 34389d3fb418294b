//! One branch's append-only board history.
//!
//! A timeline starts at a `(time, color)` coordinate and holds one board per
//! ply from there on, so the board for any later coordinate sits at
//! `2 * (time - start_time) + (color - start_color)`.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::utils::render_game_state::{render_timeline, RenderOptions};

#[derive(Debug, Clone)]
pub struct Timeline {
    start_time: Time,
    start_color: Color,
    active: bool,
    // Never empty. Each board is owned by exactly this slot.
    boards: Vec<Board>,
}

impl Timeline {
    /// New inactive timeline whose ply 0 is `first_board`.
    pub fn new(start_time: Time, start_color: Color, first_board: Board) -> Self {
        debug_assert_eq!(first_board.side_to_move(), start_color);
        Self {
            start_time,
            start_color,
            active: false,
            boards: vec![first_board],
        }
    }

    #[inline]
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    #[inline]
    pub fn start_color(&self) -> Color {
        self.start_color
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the timeline playable. There is no way back.
    #[inline]
    pub fn activate(&mut self) {
        self.active = true;
    }

    #[inline]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Number of plies stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[inline]
    pub fn first_board(&self) -> &Board {
        &self.boards[0]
    }

    #[inline]
    pub fn last_board(&self) -> &Board {
        &self.boards[self.boards.len() - 1]
    }

    #[inline]
    pub(crate) fn last_board_mut(&mut self) -> &mut Board {
        let last = self.boards.len() - 1;
        &mut self.boards[last]
    }

    /// Append the next ply. The board must match this timeline's width and
    /// have the next ply's color to move.
    pub fn append(&mut self, board: Board) -> Result<(), ChessErrors> {
        let expected_width = self.first_board().width();
        if board.width() != expected_width {
            return Err(ChessErrors::BoardWidthMismatch {
                expected: expected_width,
                found: board.width(),
            });
        }
        let (_, expected_color) = self.coordinate_of_ply(self.boards.len());
        if board.side_to_move() != expected_color {
            return Err(ChessErrors::UnexpectedSideToMove {
                expected: expected_color,
                found: board.side_to_move(),
            });
        }

        self.boards.push(board);
        Ok(())
    }

    /// Ply offset of `(time, color)` from the first board. Negative when the
    /// coordinate precedes this timeline.
    #[inline]
    pub fn ply_index(&self, time: Time, color: Color) -> i64 {
        let dt = i64::from(time) - i64::from(self.start_time);
        let dc = color.index() as i64 - self.start_color.index() as i64;
        2 * dt + dc
    }

    /// Inverse of `ply_index`.
    pub fn coordinate_of_ply(&self, ply: usize) -> (Time, Color) {
        let absolute = self.start_color.index() + ply;
        let time = self.start_time + (absolute / 2) as Time;
        let color = if absolute % 2 == 0 { Color::Light } else { Color::Dark };
        (time, color)
    }

    /// Coordinate of the newest board.
    pub fn last_coordinate(&self) -> (Time, Color) {
        self.coordinate_of_ply(self.boards.len() - 1)
    }

    fn board_slot(&self, time: Time, color: Color) -> Option<usize> {
        let ply = self.ply_index(time, color);
        if ply < 0 || ply >= self.boards.len() as i64 {
            return None;
        }
        Some(ply as usize)
    }

    pub fn has_board_at(&self, time: Time, color: Color) -> bool {
        self.board_slot(time, color).is_some()
    }

    pub fn board_at(&self, time: Time, color: Color) -> Result<&Board, ChessErrors> {
        self.board_slot(time, color)
            .map(|slot| &self.boards[slot])
            .ok_or(ChessErrors::NoBoardOnTurn { time, color })
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_timeline(self, RenderOptions::default()))
    }
}
