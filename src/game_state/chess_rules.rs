//! Variant-wide constants.

/// Largest supported board edge. Smaller boards are cut out of the 8x8 grid.
pub const MAX_BOARD_WIDTH: u8 = 8;

/// Every initial timeline starts on this turn.
pub const FIRST_TIME: crate::game_state::chess_types::Time = 1;

/// Small four-by-four puzzle board used by the driver and tests.
pub const SMALL_PUZZLE_FEN: &str = "3k/4/4/KN2 w";

/// Standard chess starting placement, side-to-move only.
pub const STANDARD_BOARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";
