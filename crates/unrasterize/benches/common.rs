#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unrasterize::raster::Grid;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn pixels_throughput(rows: usize, cols: usize) -> Throughput {
    Throughput::Elements((rows * cols).max(1) as u64)
}

/// Population-like grid: mostly empty with a few dense settlements.
pub fn settlement_grid(rows: usize, cols: usize, settlements: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers: Vec<(f32, f32, f32)> = (0..settlements)
        .map(|_| {
            (
                rng.random::<f32>() * rows as f32,
                rng.random::<f32>() * cols as f32,
                2.0 + rng.random::<f32>() * 12.0,
            )
        })
        .collect();
    Grid::from_fn(rows, cols, |r, c| {
        let density: f32 = centers
            .iter()
            .map(|(cr, cc, spread)| {
                let d2 = (r as f32 - cr).powi(2) + (c as f32 - cc).powi(2);
                40.0 * (-d2 / (2.0 * spread * spread)).exp()
            })
            .sum();
        if density < 0.05 {
            0.0
        } else {
            density
        }
    })
}
