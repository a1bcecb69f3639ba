use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{Cell, Grid, Heuristic, Pathfinder};
use rand::prelude::*;
use std::hint::black_box;

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> Grid {
    let rows = (0..n)
        .map(|_| {
            (0..n)
                .map(|_| rng.gen_bool(density) as u8)
                .collect::<Vec<u8>>()
        })
        .collect::<Vec<_>>();
    let mut grid = Grid::from_rows(&rows).unwrap();
    grid.set(Cell::new(0, 0), false).unwrap();
    grid.set(Cell::new(n - 1, n - 1), false).unwrap();
    grid.update();
    grid
}

fn random_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [32, 128] {
        let grids = (0..10)
            .map(|_| random_grid(n, 0.3, &mut rng))
            .collect::<Vec<_>>();
        let start = Cell::new(0, 0);
        let end = Cell::new(n - 1, n - 1);
        for (name, heuristic) in [
            ("chebyshev", Heuristic::Chebyshev),
            ("coordinate sum", Heuristic::CoordinateSum),
        ] {
            let finder = Pathfinder::new().with_heuristic(heuristic);
            c.bench_function(format!("{n}x{n} random, {name}").as_str(), |b| {
                b.iter(|| {
                    for grid in &grids {
                        black_box(finder.find_path(grid, start, end).unwrap());
                    }
                })
            });
        }
    }
}

fn empty_bench(c: &mut Criterion) {
    let grid = Grid::new(256, 256, false).unwrap();
    let finder = Pathfinder::new();
    c.bench_function("256x256 empty", |b| {
        b.iter(|| black_box(finder.find_path(&grid, Cell::new(0, 0), Cell::new(255, 200))))
    });
}

criterion_group!(benches, random_bench, empty_bench);
criterion_main!(benches);
