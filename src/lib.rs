//! Crate root module declarations for the Plum Multiverse model.
//!
//! The game state is layered bottom-up: `Board` (one 2D snapshot),
//! `Timeline` (one branch's append-only board history) and `Position` (every
//! timeline plus the active-timeline bookkeeping and the present). The board
//! FEN codec, ASCII rendering and a seeded random branch walk live under
//! `utils` and only consume the game-state API.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod timeline;
}

pub mod utils {
    pub mod algebraic;
    pub mod branch_walk;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
