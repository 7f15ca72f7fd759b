use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chess_rules::{perft, Board};

const START_EXPECTED_NODES: &[u64] = &[20, 400, 8902];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_start");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let board = Board::new();
    for (depth_idx, expected_nodes) in START_EXPECTED_NODES.iter().enumerate() {
        let depth = (depth_idx + 1) as u32;

        // Correctness guard before benchmarking.
        assert_eq!(perft(&board, depth), *expected_nodes, "node mismatch at depth {}", depth);

        group.throughput(Throughput::Elements(*expected_nodes));
        group.bench_with_input(BenchmarkId::from_parameter(format!("d{}", depth)), expected_nodes, |b, expected| {
            b.iter(|| {
                let nodes = perft(black_box(&board), black_box(depth));
                assert_eq!(nodes, *expected);
                black_box(nodes)
            });
        });
    }

    group.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut middlegame = Board::new();
    for (from, to) in [((1, 4), (3, 4)), ((6, 4), (4, 4)), ((0, 6), (2, 5)), ((7, 1), (5, 2)), ((0, 5), (3, 2))] {
        let from = chess_rules::Square::new(from.0, from.1).expect("on board");
        let to = chess_rules::Square::new(to.0, to.1).expect("on board");
        assert!(middlegame.execute_move(from, to));
    }

    c.bench_function("legal_moves_open_game", |b| {
        b.iter(|| {
            let mut board = middlegame.clone();
            black_box(board.legal_moves().len())
        });
    });
}

criterion_group!(perft_benches, bench_perft, bench_legal_moves);
criterion_main!(perft_benches);
