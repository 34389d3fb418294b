//! Board FEN to `Board` parser.
//!
//! The multiverse boards use a reduced FEN: the piece placement field and the
//! side-to-move field. Board width is taken from the first row, so `3k/4/4/KN2 w`
//! describes a four-by-four board. Any fields after the side to move (castling,
//! en passant, clocks) are accepted and ignored.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::MAX_BOARD_WIDTH;
use crate::game_state::{board::Board, chess_types::*};

pub fn parse_board_fen(fen: &str) -> Result<Board, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidFENstringForm("missing board layout".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidFENstringForm("missing side to move".to_owned()))?;

    let side_to_move = parse_side_to_move(side_part)?;
    let width = infer_width(board_part)?;

    let mut board = Board::new_empty(width, side_to_move)?;
    parse_rows(board_part, width, &mut board)?;

    Ok(board)
}

/// Square count of the first row.
fn infer_width(board_part: &str) -> Result<u8, ChessErrors> {
    let first_row = board_part.split('/').next().unwrap_or_default();
    let mut width = 0u32;

    for ch in first_row.chars() {
        match ch.to_digit(10) {
            Some(run) => width += run,
            None => width += 1,
        }
    }

    if width == 0 || width > u32::from(MAX_BOARD_WIDTH) {
        return Err(ChessErrors::InvalidBoardWidth(width.min(u32::from(u8::MAX)) as u8));
    }

    Ok(width as u8)
}

fn parse_rows(board_part: &str, width: u8, board: &mut Board) -> Result<(), ChessErrors> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != width as usize {
        return Err(ChessErrors::InvalidFENstringForm(format!(
            "expected {width} rows, found {}",
            rows.len()
        )));
    }

    for (fen_row_idx, row) in rows.iter().enumerate() {
        let rank = width - 1 - fen_row_idx as u8;
        let mut file = 0u8;

        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                if run == 0 {
                    return Err(ChessErrors::InvalidFENtoken(ch));
                }
                file += run as u8;
                if file > width {
                    return Err(ChessErrors::InvalidFENstringForm(format!("row '{row}' is too long")));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFENtoken(ch))?;
            if file >= width {
                return Err(ChessErrors::InvalidFENstringForm(format!("row '{row}' is too long")));
            }

            board.place_piece(piece, make_square(file, rank))?;
            file += 1;
        }

        if file != width {
            return Err(ChessErrors::InvalidFENstringForm(format!(
                "row '{row}' does not sum to {width} files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessErrors::InvalidFENstringForm(format!(
            "invalid side to move '{side_part}'"
        ))),
    }
}

pub fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
