//! Candidate ranking.
//!
//! Candidates are ordered by value descending, then row ascending, then column ascending.
//! The ordering is total, so rankings are reproducible across runs and platforms.
use std::cmp::Ordering;

use crate::raster::Grid;

/// A pixel eligible for selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub value: f32,
}

impl Candidate {
    /// `-0.0` is stored as `0.0` so equal zeros tie-break by position.
    pub fn new(row: usize, col: usize, value: f32) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        Self { row, col, value }
    }
}

/// Ranking order: higher value first, ties broken by `(row, col)` ascending.
#[inline]
pub fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then(a.row.cmp(&b.row))
        .then(a.col.cmp(&b.col))
}

/// Every pixel of `grid` that is not no-data and has `value >= threshold`, in rank order.
pub fn rank_candidates(grid: &Grid, threshold: f32) -> Vec<Candidate> {
    collect_ranked(grid, |v| grid.qualifies(v, threshold))
}

/// Every valid (non-NaN, non-sentinel) pixel of `grid`, in rank order.
pub fn rank_valid_cells(grid: &Grid) -> Vec<Candidate> {
    collect_ranked(grid, |v| grid.is_valid(v))
}

fn collect_ranked(grid: &Grid, keep: impl Fn(f32) -> bool) -> Vec<Candidate> {
    let cols = grid.cols();
    let mut candidates: Vec<Candidate> = grid
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, v)| keep(**v))
        .map(|(i, v)| Candidate::new(i / cols, i % cols, *v))
        .collect();
    candidates.sort_unstable_by(rank_order);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_value_descending() {
        let grid = Grid::new(2, 2, vec![1.0, 4.0, 3.0, 2.0]).unwrap();
        let ranked = rank_candidates(&grid, 0.0);
        let values: Vec<_> = ranked.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![4.0, 3.0, 2.0, 1.0]);
        assert_eq!((ranked[0].row, ranked[0].col), (0, 1));
    }

    #[test]
    fn ties_break_by_row_then_column() {
        let grid = Grid::new(2, 3, vec![5.0, 5.0, 1.0, 5.0, 0.0, 5.0]).unwrap();
        let ranked = rank_candidates(&grid, 1.0);
        let cells: Vec<_> = ranked.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 2), (0, 2)]);
    }

    #[test]
    fn signed_zeros_tie_break_by_position() {
        let grid = Grid::new(1, 3, vec![-0.0, 0.0, -0.0]).unwrap();
        let ranked = rank_candidates(&grid, 0.0);
        let cells: Vec<_> = ranked.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2)]);

        let mut pair = [Candidate::new(0, 1, 0.0), Candidate::new(0, 0, -0.0)];
        pair.sort_unstable_by(rank_order);
        assert_eq!((pair[0].col, pair[1].col), (0, 1));
    }

    #[test]
    fn threshold_is_inclusive() {
        let grid = Grid::new(1, 3, vec![0.999, 1.0, 1.001]).unwrap();
        let ranked = rank_candidates(&grid, 1.0);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.value >= 1.0));
    }

    #[test]
    fn skips_nodata_and_nan() {
        let grid = Grid::new(1, 4, vec![-9999.0, f32::NAN, 2.0, 3.0])
            .unwrap()
            .with_nodata(Some(-9999.0));
        assert_eq!(rank_candidates(&grid, f32::MIN).len(), 2);
        assert_eq!(rank_valid_cells(&grid).len(), 2);
    }

    #[test]
    fn empty_when_nothing_qualifies() {
        let grid = Grid::zeros(3, 3);
        assert!(rank_candidates(&grid, 1.0).is_empty());
        assert!(rank_candidates(&Grid::zeros(0, 0), 0.0).is_empty());
    }
}
