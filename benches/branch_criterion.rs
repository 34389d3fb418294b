use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_multiverse::game_state::chess_rules::{SMALL_PUZZLE_FEN, STANDARD_BOARD_FEN};
use plum_multiverse::game_state::chess_types::{Board, Position};
use plum_multiverse::utils::branch_walk::{random_branch_walk, BranchWalkConfig};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "small_puzzle",
        fen: SMALL_PUZZLE_FEN,
    },
    BenchCase {
        name: "standard",
        fen: STANDARD_BOARD_FEN,
    },
];

fn walk_steps() -> usize {
    std::env::var("PLUM_MULTIVERSE_BRANCHES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(64)
}

fn bench_board_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_copy");

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &board, |b, board| {
            b.iter(|| {
                let mut copy = black_box(board).clone();
                copy.pass_turn();
                black_box(copy)
            });
        });
    }

    group.finish();
}

fn bench_branch_walk(c: &mut Criterion) {
    let steps = walk_steps();
    let mut group = c.benchmark_group(format!("branch_walk_{steps}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);
    group.throughput(Throughput::Elements(steps as u64));

    for case in CASES {
        let start = Position::from_fens(&[], &[case.fen]).expect("benchmark FEN should load");
        let config = BranchWalkConfig {
            steps,
            seed: 1234,
            ..BranchWalkConfig::default()
        };

        // Correctness guard before benchmarking.
        let mut warmup = start.clone();
        random_branch_walk(&mut warmup, &config).expect("walk should run");
        assert!(warmup.is_balanced());

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &start, |b, start| {
            b.iter(|| {
                let mut position = start.clone();
                let stats = random_branch_walk(&mut position, black_box(&config))
                    .expect("walk benchmark run should succeed");
                black_box(stats.max_timelines)
            });
        });
    }

    group.finish();
}

criterion_group!(branch_benches, bench_board_copy, bench_branch_walk);
criterion_main!(branch_benches);
