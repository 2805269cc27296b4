use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

/// Seed whose board has an empty cell in the middle, so the cascade has work to do.
fn board_with_open_center(config: GameConfig) -> (Board, Pos) {
    let center = (config.rows() / 2, config.columns() / 2);
    let mut seed = 0;
    loop {
        let response = GenerateRequest::new(config, center)
            .run(seed)
            .expect("preset configs are valid");
        if let Some(Cell::Empty) = response.minefield.get(center) {
            return (Board::new(&response.minefield), center);
        }
        seed += 1;
    }
}

fn bench_generate(c: &mut Criterion) {
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        c.bench_function(&format!("generate.{difficulty}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(ShuffleMinefieldGenerator::new(seed).generate(config))
            });
        });
    }
}

fn bench_cascade(c: &mut Criterion) {
    for difficulty in Difficulty::ALL {
        let (board, center) = board_with_open_center(difficulty.config());
        c.bench_function(&format!("cascade.{difficulty}"), |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| black_box(board.cascade_reveal(center)),
                BatchSize::SmallInput,
            );
        });
    }

    c.bench_function("cascade.open_255", |b| {
        let board = Board::new(&minefield_from_bombs((255, 255), &[]).expect("empty layout"));
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.cascade_reveal((0, 0))),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(gen_tiers, bench_generate, bench_cascade);
criterion_main!(gen_tiers);
