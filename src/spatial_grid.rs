/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It buckets agent indices by square cell so a query only touches the 3x3
 * block of cells around a position instead of scanning every agent.
 *
 * Cells are keyed by integer coordinate and created lazily, so agents that
 * have drifted outside the arena (negative coordinates included) still land
 * in a bucket of their own.
 */

use rustc_hash::FxHashMap;

use crate::error::{SimError, SimResult};
use crate::vector::Vector2;

pub type Cell = (i64, i64);

pub struct SpatialGrid {
    cell_size: f64,
    cells: FxHashMap<Cell, Vec<usize>>,
    // Number of indices currently stored across all buckets
    len: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f64) -> SimResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SimError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            cell_size,
            cells: FxHashMap::default(),
            len: 0,
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    // Convert world coordinates to a cell coordinate
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> Cell {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
        )
    }

    // Insert an agent index into the bucket under its position
    #[inline]
    pub fn insert(&mut self, index: usize, position: Vector2) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push(index);
        self.len += 1;
    }

    // Indices in the cell containing `position` and its 8 neighbours, in
    // cell-scan order then insertion order within a cell
    pub fn neighbors_of(&self, position: Vector2) -> Vec<usize> {
        let (cx, cy) = self.cell_of(position);
        let mut result = Vec::new();

        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    result.extend_from_slice(bucket);
                }
            }
        }

        result
    }

    // Empty every bucket. Bucket allocations are kept for the next rebuild.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_cell_size() {
        assert!(matches!(SpatialGrid::new(0.0), Err(SimError::InvalidCellSize(_))));
        assert!(matches!(SpatialGrid::new(-70.0), Err(SimError::InvalidCellSize(_))));
        assert!(SpatialGrid::new(f64::NAN).is_err());
    }

    #[test]
    fn cell_of_floors_toward_negative_infinity() {
        let grid = SpatialGrid::new(70.0).unwrap();
        assert_eq!(grid.cell_of(Vector2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_of(Vector2::new(69.9, 70.0)), (0, 1));
        assert_eq!(grid.cell_of(Vector2::new(-0.5, -70.5)), (-1, -2));
    }

    #[test]
    fn query_excludes_distant_cells() {
        let mut grid = SpatialGrid::new(70.0).unwrap();
        grid.insert(0, Vector2::new(0.0, 0.0));
        grid.insert(1, Vector2::new(1000.0, 1000.0));

        let near_origin = grid.neighbors_of(Vector2::new(5.0, 5.0));
        assert_eq!(near_origin, vec![0]);

        let near_far = grid.neighbors_of(Vector2::new(990.0, 990.0));
        assert_eq!(near_far, vec![1]);
    }

    #[test]
    fn query_covers_moore_neighbourhood() {
        let mut grid = SpatialGrid::new(10.0).unwrap();
        let mut next = 0;
        for cx in -2..=2 {
            for cy in -2..=2 {
                grid.insert(next, Vector2::new(cx as f64 * 10.0 + 5.0, cy as f64 * 10.0 + 5.0));
                next += 1;
            }
        }
        assert_eq!(grid.len(), 25);

        let mut found = grid.neighbors_of(Vector2::new(5.0, 5.0));
        found.sort_unstable();
        // cells (-1..=1, -1..=1) in a 5x5 block laid out x-major
        assert_eq!(found, vec![6, 7, 8, 11, 12, 13, 16, 17, 18]);
    }

    #[test]
    fn query_preserves_scan_then_insertion_order() {
        let mut grid = SpatialGrid::new(10.0).unwrap();
        grid.insert(3, Vector2::new(15.0, 5.0));
        grid.insert(1, Vector2::new(5.0, 5.0));
        grid.insert(2, Vector2::new(6.0, 6.0));
        grid.insert(0, Vector2::new(-5.0, 5.0));

        assert_eq!(grid.neighbors_of(Vector2::new(5.0, 5.0)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn query_includes_the_querying_agent() {
        let mut grid = SpatialGrid::new(70.0).unwrap();
        grid.insert(7, Vector2::new(100.0, 100.0));
        assert_eq!(grid.neighbors_of(Vector2::new(100.0, 100.0)), vec![7]);
    }

    #[test]
    fn clear_empties_every_bucket() {
        let mut grid = SpatialGrid::new(70.0).unwrap();
        grid.clear();
        assert!(grid.neighbors_of(Vector2::new(0.0, 0.0)).is_empty());

        grid.insert(0, Vector2::new(1.0, 1.0));
        grid.insert(1, Vector2::new(2.0, 2.0));
        assert!(!grid.is_empty());

        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.neighbors_of(Vector2::new(1.0, 1.0)).is_empty());
    }
}
