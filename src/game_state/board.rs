//! Single 2D board snapshot.
//!
//! `Board` stores the piece placement, side to move and board width of one
//! ply on one timeline. Next to the square array it keeps, for every
//! `(color, kind)` pair, a dense list of occupied squares plus a reverse
//! index (`square -> slot in that list`) so that placing and removing a piece
//! are both O(1).
//!
//! The square array and the location lists are only ever changed together by
//! `place_piece` / `remove_piece`, which keeps
//! `piece_at(sq) == Some(pc)  <=>  sq ∈ squares_of(pc)` at all times.
//!
//! Cloning a board is a deep value copy. Branching relies on that: the new
//! timeline's first board is a clone and must never alias the source.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::MAX_BOARD_WIDTH;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_board_fen;
use crate::utils::fen_parser::parse_board_fen;
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone)]
pub struct Board {
    width: u8,
    squares: [Option<Piece>; SQUARE_COUNT],
    side_to_move: Color,

    // [color][piece_kind] -> occupied squares, unordered.
    piece_list: [[Vec<Square>; 6]; 2],
    // Slot of the piece on this square within its piece list.
    index: [u8; SQUARE_COUNT],
}

impl Board {
    /// Empty board of the given width.
    pub fn new_empty(width: u8, side_to_move: Color) -> Result<Self, ChessErrors> {
        if width == 0 || width > MAX_BOARD_WIDTH {
            return Err(ChessErrors::InvalidBoardWidth(width));
        }

        Ok(Self {
            width,
            squares: [None; SQUARE_COUNT],
            side_to_move,
            piece_list: Default::default(),
            index: [0; SQUARE_COUNT],
        })
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_board_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_board_fen(self)
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hand the move to the other side.
    #[inline]
    pub fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Whether `square` lies within this board's `width x width` region.
    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        (square as usize) < SQUARE_COUNT
            && file_of(square) < self.width
            && rank_of(square) < self.width
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(square as usize).copied().flatten()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Squares currently occupied by `piece`. The order carries no meaning.
    #[inline]
    pub fn squares_of(&self, piece: Piece) -> &[Square] {
        &self.piece_list[piece.color.index()][piece.kind.index()]
    }

    #[inline]
    pub fn piece_count(&self, piece: Piece) -> usize {
        self.squares_of(piece).len()
    }

    /// Total number of pieces `color` has on the board.
    pub fn color_count(&self, color: Color) -> usize {
        self.piece_list[color.index()].iter().map(Vec::len).sum()
    }

    /// Iterate every occupied square with its piece, `a1` first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(sq, pc)| pc.map(|pc| (sq as Square, pc)))
    }

    pub fn place_piece(&mut self, piece: Piece, square: Square) -> Result<(), ChessErrors> {
        if !self.contains(square) {
            return Err(ChessErrors::SquareOffBoard {
                square,
                width: self.width,
            });
        }
        if !self.is_empty(square) {
            return Err(ChessErrors::BoardLocationOccupied(square));
        }

        let list = &mut self.piece_list[piece.color.index()][piece.kind.index()];
        self.index[square as usize] = list.len() as u8;
        list.push(square);
        self.squares[square as usize] = Some(piece);

        Ok(())
    }

    /// Remove and return the piece on `square`.
    ///
    /// The vacated slot in the piece's location list is filled with the list's
    /// last square, so removal is not the exact inverse of placement: the
    /// position is the same but the list order may differ.
    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, ChessErrors> {
        if !self.contains(square) {
            return Err(ChessErrors::SquareOffBoard {
                square,
                width: self.width,
            });
        }
        let piece = self.squares[square as usize]
            .take()
            .ok_or(ChessErrors::CannotRemoveFromEmptyLocation(square))?;

        let list = &mut self.piece_list[piece.color.index()][piece.kind.index()];
        let slot = self.index[square as usize] as usize;
        let last_square = list[list.len() - 1];
        list[slot] = last_square;
        self.index[last_square as usize] = slot as u8;
        list.pop();

        Ok(piece)
    }

    /// Lift the piece on `from` and drop it on `to`, capturing whatever stood there.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Piece>, ChessErrors> {
        if !self.contains(to) {
            return Err(ChessErrors::SquareOffBoard {
                square: to,
                width: self.width,
            });
        }
        let piece = self.remove_piece(from)?;
        let captured = if self.is_empty(to) {
            None
        } else {
            Some(self.remove_piece(to)?)
        };
        self.place_piece(piece, to)?;
        Ok(captured)
    }
}

/// Boards compare by position (width, placement, side to move). Location
/// list order is bookkeeping and is ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.side_to_move == other.side_to_move
            && self.squares == other.squares
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    const LIGHT_PAWN: Piece = Piece::new(Color::Light, PieceKind::Pawn);
    const DARK_KING: Piece = Piece::new(Color::Dark, PieceKind::King);

    fn assert_bookkeeping(board: &Board) {
        for color in [Color::Light, Color::Dark] {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                let mut listed: Vec<Square> = board.squares_of(piece).to_vec();
                listed.sort_unstable();
                let mut on_board: Vec<Square> = board
                    .occupied()
                    .filter(|(_, pc)| *pc == piece)
                    .map(|(sq, _)| sq)
                    .collect();
                on_board.sort_unstable();
                assert_eq!(listed, on_board, "location list drifted for {piece:?}");
                for (slot, sq) in board.squares_of(piece).iter().enumerate() {
                    assert_eq!(board.index[*sq as usize] as usize, slot);
                }
            }
        }
    }

    #[test]
    fn place_then_remove_uses_swap_with_last() -> Result<(), ChessErrors> {
        let mut board = Board::new_empty(8, Color::Light)?;
        board.place_piece(LIGHT_PAWN, make_square(0, 1))?;
        board.place_piece(LIGHT_PAWN, make_square(1, 1))?;
        board.place_piece(LIGHT_PAWN, make_square(2, 1))?;

        let removed = board.remove_piece(make_square(0, 1))?;
        assert_eq!(removed, LIGHT_PAWN);
        assert_eq!(board.piece_count(LIGHT_PAWN), 2);
        assert!(board.is_empty(make_square(0, 1)));
        assert_bookkeeping(&board);
        Ok(())
    }

    #[test]
    fn placing_on_occupied_square_fails() -> Result<(), ChessErrors> {
        let mut board = Board::new_empty(4, Color::Light)?;
        board.place_piece(DARK_KING, make_square(3, 3))?;
        assert_eq!(
            board.place_piece(LIGHT_PAWN, make_square(3, 3)),
            Err(ChessErrors::BoardLocationOccupied(make_square(3, 3)))
        );
        assert_eq!(board.piece_at(make_square(3, 3)), Some(DARK_KING));
        Ok(())
    }

    #[test]
    fn removing_from_empty_square_fails() -> Result<(), ChessErrors> {
        let mut board = Board::new_empty(4, Color::Light)?;
        assert_eq!(
            board.remove_piece(make_square(1, 1)),
            Err(ChessErrors::CannotRemoveFromEmptyLocation(make_square(1, 1)))
        );
        Ok(())
    }

    #[test]
    fn squares_outside_small_board_are_rejected() -> Result<(), ChessErrors> {
        let mut board = Board::new_empty(4, Color::Light)?;
        assert!(matches!(
            board.place_piece(LIGHT_PAWN, make_square(4, 0)),
            Err(ChessErrors::SquareOffBoard { .. })
        ));
        assert!(matches!(
            board.place_piece(LIGHT_PAWN, make_square(0, 4)),
            Err(ChessErrors::SquareOffBoard { .. })
        ));
        assert_eq!(Board::new_empty(9, Color::Light), Err(ChessErrors::InvalidBoardWidth(9)));
        assert_eq!(Board::new_empty(0, Color::Light), Err(ChessErrors::InvalidBoardWidth(0)));
        Ok(())
    }

    #[test]
    fn random_place_remove_sequences_keep_lists_consistent() -> Result<(), ChessErrors> {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new_empty(8, Color::Light)?;

        for _ in 0..2_000 {
            let sq: Square = rng.random_range(0..64);
            if board.is_empty(sq) {
                let color = if rng.random_bool(0.5) { Color::Light } else { Color::Dark };
                let kind = PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())];
                board.place_piece(Piece::new(color, kind), sq)?;
            } else {
                board.remove_piece(sq)?;
            }
            assert_bookkeeping(&board);
        }

        let total: usize = board.color_count(Color::Light) + board.color_count(Color::Dark);
        assert_eq!(total, board.occupied().count());
        Ok(())
    }

    #[test]
    fn cloned_board_is_independent() -> Result<(), ChessErrors> {
        let mut original = Board::new_empty(4, Color::Light)?;
        original.place_piece(DARK_KING, make_square(3, 3))?;
        original.place_piece(LIGHT_PAWN, make_square(0, 1))?;

        let mut copy = original.clone();
        copy.remove_piece(make_square(3, 3))?;
        copy.place_piece(DARK_KING, make_square(2, 3))?;
        copy.place_piece(LIGHT_PAWN, make_square(1, 1))?;
        copy.pass_turn();

        assert_eq!(original.piece_at(make_square(3, 3)), Some(DARK_KING));
        assert!(original.is_empty(make_square(2, 3)));
        assert_eq!(original.squares_of(DARK_KING), &[make_square(3, 3)]);
        assert_eq!(original.squares_of(LIGHT_PAWN), &[make_square(0, 1)]);
        assert_eq!(original.side_to_move(), Color::Light);
        assert_bookkeeping(&original);
        assert_bookkeeping(&copy);
        Ok(())
    }

    #[test]
    fn move_piece_captures() -> Result<(), ChessErrors> {
        let mut board = Board::from_fen("3k/4/4/KN2 w")?;
        let captured = board.move_piece(make_square(1, 0), make_square(3, 3))?;
        assert_eq!(captured, Some(DARK_KING));
        assert_eq!(board.color_count(Color::Dark), 0);
        assert_bookkeeping(&board);
        Ok(())
    }

    #[test]
    fn equality_ignores_location_order() -> Result<(), ChessErrors> {
        let mut a = Board::new_empty(8, Color::Dark)?;
        let mut b = Board::new_empty(8, Color::Dark)?;
        a.place_piece(LIGHT_PAWN, 8)?;
        a.place_piece(LIGHT_PAWN, 9)?;
        b.place_piece(LIGHT_PAWN, 9)?;
        b.place_piece(LIGHT_PAWN, 8)?;
        assert_eq!(a, b);
        b.pass_turn();
        assert_ne!(a, b);
        Ok(())
    }
}
