//! Fixed-width ASCII rendering for boards, timelines and whole positions.
//!
//! Every rendered board of width `w` is `2 * w + 2` lines of `4 * w + 3`
//! columns, which lets a timeline lay its boards out side by side one text
//! line at a time. Output uses LF newlines and always ends with one.

use crate::game_state::chess_types::*;
use crate::utils::fen_generator::piece_to_fen_char;

/// Columns between two boards on the same timeline.
const BOARD_GAP: usize = 5;
const ARROW: &str = "---> ";
const FILE_LABELS: &str = "  a   b   c   d   e   f   g   h   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Shift each timeline right by its starting ply so boards on the same
    /// turn line up vertically.
    pub indent_timelines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_timelines: true,
        }
    }
}

fn row_separator(width: usize) -> String {
    let mut out = String::from("+");
    for _ in 0..width {
        out.push_str("---+");
    }
    out
}

#[inline]
fn board_columns(width: usize) -> usize {
    4 * width + 3
}

/// Render a single board. The top-left corner carries `W` or `B` for the
/// side to move.
pub fn render_board(board: &Board) -> String {
    let width = board.width() as usize;
    let row_sep = row_separator(width);
    let marker = match board.side_to_move() {
        Color::Light => "W",
        Color::Dark => "B",
    };

    let mut out = String::new();
    out.push('+');
    out.push_str(marker);
    out.push_str(&row_sep[2..]);
    out.push_str("  \n");

    for rank in (0..board.width()).rev() {
        for file in 0..board.width() {
            let ch = board
                .piece_at(make_square(file, rank))
                .map(piece_to_fen_char)
                .unwrap_or(' ');
            out.push_str(&format!("| {ch} "));
        }
        out.push_str(&format!("| {}\n", rank + 1));
        out.push_str(&row_sep);
        out.push_str("  \n");
    }

    out.push_str(&FILE_LABELS[..2 + 4 * width]);
    out.push_str(" \n");
    out
}

/// Render every board of a timeline left to right, joined by an arrow on the
/// middle line.
pub fn render_timeline(line: &Timeline, options: RenderOptions) -> String {
    let width = line.first_board().width() as usize;
    let middle_line = width;

    let indent = if options.indent_timelines {
        let starting_ply = 2 * i64::from(line.start_time() - 1) + line.start_color().index() as i64;
        (board_columns(width) + BOARD_GAP) * starting_ply.max(0) as usize
    } else {
        0
    };

    let mut lines: Vec<String> = render_board(line.first_board())
        .lines()
        .map(|text| format!("{}{text}", " ".repeat(indent)))
        .collect();

    for board in &line.boards()[1..] {
        for (idx, text) in render_board(board).lines().enumerate() {
            if idx == middle_line {
                lines[idx].push_str(ARROW);
            } else {
                lines[idx].push_str(&" ".repeat(BOARD_GAP));
            }
            lines[idx].push_str(text);
        }
    }

    let mut out = String::new();
    for text in lines {
        out.push_str(&text);
        out.push('\n');
    }
    out
}

/// Render the whole multiverse, most negative timeline first.
pub fn render_position(position: &Position, options: RenderOptions) -> String {
    let mut out = format!(
        "present T{} {:?} to move, active +{} -{}\n",
        position.time_of_present(),
        position.side_to_move(),
        position.active_positive_count(),
        position.active_negative_count()
    );

    for (index, line) in position.timelines() {
        let status = if line.is_active() { "active" } else { "inactive" };
        out.push_str(&format!("L{index:+} {status}\n"));
        out.push_str(&render_timeline(line, options));
        out.push('\n');
    }

    out
}
