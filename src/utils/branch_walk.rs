//! Seeded random walk through the multiverse for smoke testing and benches.
//!
//! Each step picks a random board on which the side to move could play. If it
//! is the newest board of an active timeline the walk may extend that
//! timeline; otherwise it branches a new timeline from it. The "move" is a
//! random piece of the mover relocated to a random empty square. After every
//! step the global turn passes.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone)]
pub struct BranchWalkConfig {
    pub steps: usize,
    pub seed: u64,
    /// Chance of playing on instead of branching when the newest board of an
    /// active timeline is picked.
    pub extend_probability: f64,
}

impl Default for BranchWalkConfig {
    fn default() -> Self {
        Self {
            steps: 32,
            seed: 0,
            extend_probability: 0.3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchWalkStats {
    pub branches: u32,
    pub extensions: u32,
    pub passes: u32,
    pub max_timelines: usize,
}

impl BranchWalkStats {
    pub fn report(&self) -> String {
        format!(
            "branches={} extensions={} passes={} max_timelines={}",
            self.branches, self.extensions, self.passes, self.max_timelines
        )
    }
}

struct Candidate {
    line: TimelineIndex,
    time: Time,
    playable_tip: bool,
}

fn candidates(position: &Position, mover: Color) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (index, line) in position.timelines() {
        for ply in 0..line.len() {
            let (time, color) = line.coordinate_of_ply(ply);
            if color == mover {
                out.push(Candidate {
                    line: index,
                    time,
                    playable_tip: line.is_active() && ply + 1 == line.len(),
                });
            }
        }
    }
    out
}

/// Move a random piece of `mover` to a random empty square, if both exist.
fn play_random_relocation(board: &mut Board, mover: Color, rng: &mut StdRng) -> Result<(), ChessErrors> {
    let own: Vec<Square> = board
        .occupied()
        .filter(|(_, piece)| piece.color == mover)
        .map(|(sq, _)| sq)
        .collect();
    let width = board.width();
    let empty: Vec<Square> = (0..width)
        .flat_map(|rank| (0..width).map(move |file| make_square(file, rank)))
        .filter(|sq| board.is_empty(*sq))
        .collect();

    if own.is_empty() || empty.is_empty() {
        return Ok(());
    }

    let from = own[rng.random_range(0..own.len())];
    let to = empty[rng.random_range(0..empty.len())];
    board.move_piece(from, to)?;
    Ok(())
}

pub fn random_branch_walk(position: &mut Position, config: &BranchWalkConfig) -> Result<BranchWalkStats, ChessErrors> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = BranchWalkStats::default();

    for _ in 0..config.steps {
        let mover = position.side_to_move();
        let options = candidates(position, mover);

        if options.is_empty() {
            position.pass_turn();
            stats.passes += 1;
            continue;
        }

        let pick = &options[rng.random_range(0..options.len())];
        if pick.playable_tip && rng.random_bool(config.extend_probability) {
            let mut board = position.timeline(pick.line)?.last_board().clone();
            board.pass_turn();
            play_random_relocation(&mut board, mover, &mut rng)?;
            position.extend_timeline(pick.line, board)?;
            stats.extensions += 1;
        } else {
            let board = position.branch_timeline(pick.line, pick.time)?;
            play_random_relocation(board, mover, &mut rng)?;
            stats.branches += 1;
        }

        position.pass_turn();
        stats.max_timelines = stats
            .max_timelines
            .max(position.negative_timeline_count() + position.positive_timeline_count() + 1);
    }

    debug!(report = %stats.report(), "branch walk finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{SMALL_PUZZLE_FEN, STANDARD_BOARD_FEN};
    use crate::utils::render_game_state::{render_position, RenderOptions};

    #[test]
    fn walk_keeps_balance_and_board_consistency() -> Result<(), ChessErrors> {
        for seed in 0..8 {
            let mut position = Position::from_fens(&[], &[SMALL_PUZZLE_FEN])?;
            let config = BranchWalkConfig {
                steps: 60,
                seed,
                ..BranchWalkConfig::default()
            };
            let stats = random_branch_walk(&mut position, &config)?;

            assert_eq!(stats.branches + stats.extensions + stats.passes, 60);
            assert!(position.is_balanced());

            let p = position.positive_timeline_count();
            let n = position.negative_timeline_count();
            assert_eq!(position.active_positive_count(), p.min(n + 1));
            assert_eq!(position.active_negative_count(), n.min(p + 1));

            for (_, line) in position.timelines() {
                for board in line.boards() {
                    assert_eq!(
                        board.color_count(Color::Light) + board.color_count(Color::Dark),
                        board.occupied().count()
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn same_seed_reproduces_the_same_multiverse() -> Result<(), ChessErrors> {
        let config = BranchWalkConfig {
            steps: 24,
            seed: 99,
            ..BranchWalkConfig::default()
        };

        let mut first = Position::from_fens(&[], &[STANDARD_BOARD_FEN])?;
        let mut second = Position::from_fens(&[], &[STANDARD_BOARD_FEN])?;
        let first_stats = random_branch_walk(&mut first, &config)?;
        let second_stats = random_branch_walk(&mut second, &config)?;

        assert_eq!(first_stats, second_stats);
        assert_eq!(
            render_position(&first, RenderOptions::default()),
            render_position(&second, RenderOptions::default())
        );
        Ok(())
    }

    #[test]
    fn walk_never_touches_the_initial_central_board() -> Result<(), ChessErrors> {
        let mut position = Position::from_fens(&[], &[SMALL_PUZZLE_FEN])?;
        random_branch_walk(&mut position, &BranchWalkConfig::default())?;
        assert_eq!(position.timeline(0)?.first_board().to_fen(), SMALL_PUZZLE_FEN);
        Ok(())
    }
}
