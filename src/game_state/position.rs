//! The multiverse: every timeline of a game plus the global turn state.
//!
//! Timelines are split into two vectors. `positive_lines[0]` is the central
//! timeline and `positive_lines[k]` is timeline `+k`. Negative timeline `-k`
//! lives in `negative_lines[k - 1]`, so both vectors grow outward from the
//! centre as branches are created.
//!
//! The active counters and `time_of_present` are explicit state. Only
//! initialization and `branch_timeline` write them.

use std::fmt;

use tracing::{debug, trace};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::FIRST_TIME;
use crate::game_state::chess_types::*;
use crate::utils::render_game_state::{render_position, RenderOptions};

#[derive(Debug, Clone)]
pub struct Position {
    negative_lines: Vec<Timeline>,
    // positive_lines[0] is the central timeline.
    positive_lines: Vec<Timeline>,

    // Neither counter includes the central timeline.
    active_positive_lines: usize,
    active_negative_lines: usize,

    time_of_present: Time,
    side_to_move: Color,
}

impl Position {
    /// Load a position from board FENs.
    ///
    /// `negative_fens` runs from the outermost negative timeline inward, so the
    /// last entry becomes timeline `-1`. `positive_fens[0]` is the central
    /// timeline. Every timeline starts active; balance is not checked here
    /// (see `from_fens_checked`).
    pub fn from_fens(negative_fens: &[&str], positive_fens: &[&str]) -> Result<Self, ChessErrors> {
        let negative = negative_fens
            .iter()
            .map(|fen| Board::from_fen(fen))
            .collect::<Result<Vec<_>, _>>()?;
        let positive = positive_fens
            .iter()
            .map(|fen| Board::from_fen(fen))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_boards(negative, positive)
    }

    /// Like `from_fens`, but rejects lists whose active counts differ by more
    /// than one.
    pub fn from_fens_checked(negative_fens: &[&str], positive_fens: &[&str]) -> Result<Self, ChessErrors> {
        let positive = positive_fens.len().saturating_sub(1);
        let negative = negative_fens.len();
        if positive.abs_diff(negative) > 1 {
            return Err(ChessErrors::ImbalancedTimelines { positive, negative });
        }
        Self::from_fens(negative_fens, positive_fens)
    }

    /// Same contract as `from_fens`, for already decoded boards.
    pub fn from_boards(negative_boards: Vec<Board>, positive_boards: Vec<Board>) -> Result<Self, ChessErrors> {
        if positive_boards.is_empty() {
            return Err(ChessErrors::MissingCentralTimeline);
        }

        let initial_line = |board: Board| {
            let mut line = Timeline::new(FIRST_TIME, board.side_to_move(), board);
            line.activate();
            line
        };

        let negative_lines: Vec<Timeline> = negative_boards.into_iter().rev().map(initial_line).collect();
        let positive_lines: Vec<Timeline> = positive_boards.into_iter().map(initial_line).collect();

        let position = Self {
            active_positive_lines: positive_lines.len() - 1,
            active_negative_lines: negative_lines.len(),
            time_of_present: FIRST_TIME,
            side_to_move: positive_lines[0].first_board().side_to_move(),
            negative_lines,
            positive_lines,
        };

        debug!(
            negative = position.negative_lines.len(),
            positive = position.positive_timeline_count(),
            side_to_move = ?position.side_to_move,
            "position loaded"
        );

        Ok(position)
    }

    #[inline]
    pub fn negative_timeline_count(&self) -> usize {
        self.negative_lines.len()
    }

    /// Positive branches, not counting the central timeline.
    #[inline]
    pub fn positive_timeline_count(&self) -> usize {
        self.positive_lines.len() - 1
    }

    #[inline]
    pub fn active_positive_count(&self) -> usize {
        self.active_positive_lines
    }

    #[inline]
    pub fn active_negative_count(&self) -> usize {
        self.active_negative_lines
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn time_of_present(&self) -> Time {
        self.time_of_present
    }

    /// Whether the active counts on the two sides differ by at most one.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.active_positive_lines.abs_diff(self.active_negative_lines) <= 1
    }

    /// Lowest and highest existing timeline index.
    pub fn timeline_range(&self) -> (TimelineIndex, TimelineIndex) {
        (
            -(self.negative_timeline_count() as TimelineIndex),
            self.positive_timeline_count() as TimelineIndex,
        )
    }

    fn slot(&self, index: TimelineIndex) -> Option<(bool, usize)> {
        let (lowest, highest) = self.timeline_range();
        if index < lowest || index > highest {
            return None;
        }
        if index >= 0 {
            Some((true, index as usize))
        } else {
            Some((false, (-index - 1) as usize))
        }
    }

    pub fn timeline(&self, index: TimelineIndex) -> Result<&Timeline, ChessErrors> {
        match self.slot(index) {
            Some((true, slot)) => Ok(&self.positive_lines[slot]),
            Some((false, slot)) => Ok(&self.negative_lines[slot]),
            None => Err(ChessErrors::NoSuchTimeline(index)),
        }
    }

    fn timeline_mut(&mut self, index: TimelineIndex) -> Result<&mut Timeline, ChessErrors> {
        match self.slot(index) {
            Some((true, slot)) => Ok(&mut self.positive_lines[slot]),
            Some((false, slot)) => Ok(&mut self.negative_lines[slot]),
            None => Err(ChessErrors::NoSuchTimeline(index)),
        }
    }

    /// Every timeline with its index, most negative first.
    pub fn timelines(&self) -> impl Iterator<Item = (TimelineIndex, &Timeline)> + '_ {
        let negatives = self
            .negative_lines
            .iter()
            .enumerate()
            .rev()
            .map(|(slot, line)| (-(slot as TimelineIndex) - 1, line));
        let positives = self
            .positive_lines
            .iter()
            .enumerate()
            .map(|(slot, line)| (slot as TimelineIndex, line));
        negatives.chain(positives)
    }

    /// Append a played ply to an existing timeline and return it for the
    /// caller to keep editing. The board must match the timeline's width and
    /// the next ply's color; otherwise the timeline is left as it was.
    pub fn extend_timeline(&mut self, index: TimelineIndex, board: Board) -> Result<&mut Board, ChessErrors> {
        let line = self.timeline_mut(index)?;
        line.append(board)?;
        Ok(line.last_board_mut())
    }

    /// Hand the global move to the other side.
    #[inline]
    pub fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Start a new timeline from the board on `branch_line` at `branch_time`
    /// for the side to move.
    ///
    /// The copied board already has the opponent to move; the caller still has
    /// to apply the branching move to the returned board. Light's branches are
    /// appended to the positive side and start on the same turn, Dark's go to
    /// the negative side and start one turn later.
    ///
    /// Activation compares the total number of timelines on each side, active
    /// or not. When the mover's side is two or more behind, the first inactive
    /// timeline of the opponent is activated along with the new one.
    pub fn branch_timeline(&mut self, branch_line: TimelineIndex, branch_time: Time) -> Result<&mut Board, ChessErrors> {
        let mover = self.side_to_move;
        let mut new_board = self.timeline(branch_line)?.board_at(branch_time, mover)?.clone();
        new_board.pass_turn();

        let start_time = branch_time + mover.index() as Time;
        let mut new_line = Timeline::new(start_time, new_board.side_to_move(), new_board);

        let (own_count, opp_count) = match mover {
            Color::Light => (self.positive_timeline_count(), self.negative_timeline_count()),
            Color::Dark => (self.negative_timeline_count(), self.positive_timeline_count()),
        };

        if own_count == opp_count || own_count + 1 == opp_count {
            new_line.activate();
            *self.active_count_mut(mover) += 1;
            self.time_of_present = self.time_of_present.min(start_time);
        } else if own_count + 1 < opp_count {
            // The opponent's timelines up to `own_count` are already active.
            let balancing = own_count + 1;
            let balancing_line = match mover {
                Color::Light => &mut self.negative_lines[balancing],
                Color::Dark => &mut self.positive_lines[balancing + 1],
            };
            assert!(
                !balancing_line.is_active(),
                "balancing timeline {balancing} on the {:?} side is already active",
                mover.opposite()
            );
            balancing_line.activate();
            let balancing_start = balancing_line.start_time();

            new_line.activate();
            *self.active_count_mut(mover) += 1;
            *self.active_count_mut(mover.opposite()) += 1;

            trace!(balancing, start_time = balancing_start, "activated balancing timeline");
            self.time_of_present = self.time_of_present.min(start_time).min(balancing_start);
        }
        // Otherwise the mover already has surplus timelines and the new one waits.

        let active = new_line.is_active();
        let side = match mover {
            Color::Light => &mut self.positive_lines,
            Color::Dark => &mut self.negative_lines,
        };
        side.push(new_line);
        let new_index = match mover {
            Color::Light => (side.len() - 1) as TimelineIndex,
            Color::Dark => -(side.len() as TimelineIndex),
        };

        debug!(
            from = branch_line,
            at = branch_time,
            new_index,
            start_time,
            active,
            active_positive = self.active_positive_lines,
            active_negative = self.active_negative_lines,
            present = self.time_of_present,
            "branched timeline"
        );
        assert!(
            self.is_balanced(),
            "active timelines out of balance: {} positive vs {} negative",
            self.active_positive_lines,
            self.active_negative_lines
        );

        let side = match mover {
            Color::Light => &mut self.positive_lines,
            Color::Dark => &mut self.negative_lines,
        };
        let last = side.len() - 1;
        Ok(side[last].last_board_mut())
    }

    fn active_count_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Light => &mut self.active_positive_lines,
            Color::Dark => &mut self.active_negative_lines,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_position(self, RenderOptions::default()))
    }
}
