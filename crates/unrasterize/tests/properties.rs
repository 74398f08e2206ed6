use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unrasterize::prelude::*;

const SEEDS: [u64; 4] = [0xC0FFEE, 0xBEEF, 42, 7];

/// Integer-valued grid with sparse zeros and occasional no-data, so sums compare exactly.
fn random_grid(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::from_fn(rows, cols, |_, _| {
        let roll = rng.random::<f32>();
        if roll < 0.3 {
            0.0
        } else if roll < 0.35 {
            -9999.0
        } else {
            (rng.random::<u32>() % 20) as f32
        }
    })
    .with_nodata(Some(-9999.0))
}

fn transform() -> GeoTransform {
    GeoTransform::north_up(glam::DVec2::new(-89.25, 18.5), 0.000833)
}

fn chebyshev(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// Reference owner assignment: replays the selection to find which point absorbed each cell.
fn owners(grid: &Grid, points: &[RepresentativePoint], mask_width: usize) -> Vec<Option<usize>> {
    let mut owner = vec![None; grid.rows() * grid.cols()];
    for (i, p) in points.iter().enumerate() {
        for row in p.row.saturating_sub(mask_width)..(p.row + mask_width + 1).min(grid.rows()) {
            for col in p.col.saturating_sub(mask_width)..(p.col + mask_width + 1).min(grid.cols())
            {
                let cell = &mut owner[row * grid.cols() + col];
                if cell.is_none() {
                    *cell = Some(i);
                }
            }
        }
    }
    owner
}

#[test]
fn aggregates_conserve_qualifying_total() {
    for seed in SEEDS {
        let grid = random_grid(40, 30, seed);
        for (mask_width, threshold) in [(0, 1.0), (1, 1.0), (3, 5.0), (7, 0.0)] {
            let points =
                select_representative_pixels(&grid, &transform(), mask_width, threshold).unwrap();
            let total: f64 = points.iter().map(|p| p.value).sum();
            assert_eq!(
                total,
                grid.qualifying_total(threshold),
                "seed {seed}, mask_width {mask_width}, threshold {threshold}"
            );
        }
    }
}

#[test]
fn every_qualifying_cell_has_exactly_one_owner() {
    for seed in SEEDS {
        let grid = random_grid(25, 25, seed);
        let mask_width = 2;
        let threshold = 3.0;
        let points =
            select_representative_pixels(&grid, &transform(), mask_width, threshold).unwrap();
        let owner = owners(&grid, &points, mask_width as usize);

        let mut per_point = vec![0.0f64; points.len()];
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let value = grid.get(row, col).unwrap();
                if grid.qualifies(value, threshold) {
                    let idx = owner[row * grid.cols() + col]
                        .unwrap_or_else(|| panic!("cell ({row}, {col}) has no owner"));
                    per_point[idx] += value as f64;
                }
            }
        }
        for (p, expected) in points.iter().zip(per_point) {
            assert_eq!(p.value, expected, "point {:?}", p.pixel());
        }
    }
}

#[test]
fn selected_points_respect_mask_width() {
    for seed in SEEDS {
        let grid = random_grid(30, 30, seed);
        for mask_width in [1, 2, 4] {
            let points = select_representative_pixels(&grid, &transform(), mask_width, 1.0).unwrap();
            for (i, a) in points.iter().enumerate() {
                for b in &points[i + 1..] {
                    assert!(
                        chebyshev(a.pixel(), b.pixel()) > mask_width as usize,
                        "{:?} and {:?} closer than {mask_width}",
                        a.pixel(),
                        b.pixel()
                    );
                }
            }
        }
    }
}

#[test]
fn selection_is_deterministic() {
    let grid = random_grid(35, 20, 99);
    let first = select_representative_pixels(&grid, &transform(), 2, 2.0).unwrap();
    let second = select_representative_pixels(&grid, &transform(), 2, 2.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_mask_width_makes_every_candidate_a_point() {
    let grid = random_grid(15, 15, 3);
    let points = select_representative_pixels(&grid, &transform(), 0, 1.0).unwrap();
    let candidates = rank_candidates(&grid, 1.0);
    assert_eq!(points.len(), candidates.len());
    for (p, c) in points.iter().zip(&candidates) {
        assert_eq!(p.pixel(), (c.row, c.col));
        assert_eq!(p.value, c.value as f64);
    }
}

#[test]
fn below_threshold_cells_never_become_points() {
    let grid = random_grid(20, 20, 11);
    let threshold = 10.0;
    let points = select_representative_pixels(&grid, &transform(), 1, threshold).unwrap();
    for p in &points {
        let value = grid.get(p.row, p.col).unwrap();
        assert!(value >= threshold, "point at {:?} has value {value}", p.pixel());
    }
    let unique: HashSet<_> = points.iter().map(|p| p.pixel()).collect();
    assert_eq!(unique.len(), points.len());
}

#[test]
fn points_are_emitted_in_rank_order() {
    let grid = random_grid(20, 20, 5);
    let points = select_representative_pixels(&grid, &transform(), 2, 1.0).unwrap();
    for pair in points.windows(2) {
        let a = grid.get(pair[0].row, pair[0].col).unwrap();
        let b = grid.get(pair[1].row, pair[1].col).unwrap();
        assert!(a > b || (a == b && pair[0].pixel() < pair[1].pixel()));
    }
}

#[test]
fn equal_values_break_ties_by_position() {
    let grid = Grid::new(1, 2, vec![5.0, 5.0]).unwrap();
    let points = select_representative_pixels(&grid, &GeoTransform::identity(), 0, 1.0).unwrap();
    let cells: Vec<_> = points.iter().map(|p| p.pixel()).collect();
    assert_eq!(cells, vec![(0, 0), (0, 1)]);
}

#[test]
fn exclusion_only_ever_shrinks_the_eligible_set() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut mask = EligibilityMask::new(20, 20);
    let mut excluded: HashSet<(usize, usize)> = HashSet::new();
    for _ in 0..30 {
        let row = (rng.random::<u32>() % 20) as usize;
        let col = (rng.random::<u32>() % 20) as usize;
        let radius = (rng.random::<u32>() % 3) as usize;
        mask.exclude_square(row, col, radius);
        for r in 0..20usize {
            for c in 0..20usize {
                if chebyshev((r, c), (row, col)) <= radius {
                    excluded.insert((r, c));
                }
            }
        }
        for &(r, c) in &excluded {
            assert!(!mask.is_eligible(r, c));
        }
        assert_eq!(mask.eligible_count(), 400 - excluded.len());
    }
}
