use crate::game_state::{board::Board, chess_types::*};

/// Encode `board` as `<rows> <w|b>`, top row first.
pub fn generate_board_fen(board: &Board) -> String {
    let side_to_move = match board.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!("{} {}", generate_board_field(board), side_to_move)
}

fn generate_board_field(board: &Board) -> String {
    let width = board.width();
    let mut out = String::new();

    for rank in (0..width).rev() {
        let mut empty_count = 0u8;

        for file in 0..width {
            match board.piece_at(make_square(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}

#[cfg(test)]
mod tests {
    use super::generate_board_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::{SMALL_PUZZLE_FEN, STANDARD_BOARD_FEN};
    use crate::game_state::chess_types::*;
    use crate::utils::fen_parser::parse_board_fen;

    #[test]
    fn round_trip_small_puzzle_fen() -> Result<(), ChessErrors> {
        let parsed = parse_board_fen(SMALL_PUZZLE_FEN)?;
        let generated = generate_board_fen(&parsed);
        assert_eq!(generated, SMALL_PUZZLE_FEN);

        let reparsed = parse_board_fen(&generated)?;
        assert_eq!(reparsed, parsed);
        assert_eq!(reparsed.width(), 4);
        Ok(())
    }

    #[test]
    fn round_trip_standard_board_fen() -> Result<(), ChessErrors> {
        let parsed = parse_board_fen(STANDARD_BOARD_FEN)?;
        assert_eq!(generate_board_fen(&parsed), STANDARD_BOARD_FEN);
        Ok(())
    }

    #[test]
    fn edited_board_encodes_runs_of_empty_squares() -> Result<(), ChessErrors> {
        let mut board = Board::new_empty(5, Color::Dark)?;
        board.place_piece(Piece::new(Color::Light, PieceKind::Rook), make_square(2, 4))?;
        board.place_piece(Piece::new(Color::Dark, PieceKind::Queen), make_square(4, 0))?;

        let fen = generate_board_fen(&board);
        assert_eq!(fen, "2R2/5/5/5/4q b");
        assert_eq!(parse_board_fen(&fen)?, board);
        Ok(())
    }
}
