//! Errors used throughout the multiverse model.
//!
//! `ChessErrors` is the single error type for the crate. Every variant is a
//! caller-side precondition violation: the failing operation returns before
//! touching any state, so callers can report the error and keep the
//! `Position` they already had.
//!
//! Internal bookkeeping corruption (an already-active balancing timeline,
//! the active counters drifting apart) is not represented here. Those are
//! bugs and are reported with `assert!`.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square, Time, TimelineIndex};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// Board width outside `1..=8`.
    #[error("invalid board width {0}; expected 1..=8")]
    InvalidBoardWidth(u8),

    /// The square lies outside the board's `width x width` region.
    #[error("square {square} is off a board of width {width}")]
    SquareOffBoard { square: Square, width: u8 },

    /// Attempted to place a piece on an occupied square.
    #[error("square {0} is already occupied")]
    BoardLocationOccupied(Square),

    /// Attempted to remove a piece from an empty square.
    #[error("cannot remove a piece from empty square {0}")]
    CannotRemoveFromEmptyLocation(Square),

    /// The timeline holds no board for the requested coordinate.
    #[error("timeline has no board on turn {time} for {color:?}")]
    NoBoardOnTurn { time: Time, color: Color },

    /// Appended board does not have the timeline's width.
    #[error("board width {found} does not match timeline width {expected}")]
    BoardWidthMismatch { expected: u8, found: u8 },

    /// Appended board does not have the next ply's color to move.
    #[error("appended board has {found:?} to move; next ply expects {expected:?}")]
    UnexpectedSideToMove { expected: Color, found: Color },

    /// The timeline index does not exist in this position.
    #[error("timeline {0} does not exist")]
    NoSuchTimeline(TimelineIndex),

    /// A position needs at least the central timeline.
    #[error("position requires a central timeline")]
    MissingCentralTimeline,

    /// The initial timeline lists break the active balance rule.
    #[error("unbalanced timelines: {positive} positive vs {negative} negative")]
    ImbalancedTimelines { positive: usize, negative: usize },

    /// Unexpected character in a board FEN.
    #[error("invalid FEN token '{0}'")]
    InvalidFENtoken(char),

    /// Board FEN has the wrong overall shape.
    #[error("malformed board FEN: {0}")]
    InvalidFENstringForm(String),

    /// Algebraic square text could not be interpreted.
    #[error("invalid algebraic square '{0}'")]
    InvalidAlgebraicString(String),
}
