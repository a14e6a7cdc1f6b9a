// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid partitioner.
//!
//! This partitioner buckets member rectangles into fixed-size grid cells and
//! answers candidate queries by touching only the cells overlapping the query
//! rectangle. It is intended for scenes with:
//! - moderately uniform density of children across their parent,
//! - children that move every tick, and
//! - children that are small compared to the parent.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::partitioner::Partitioner;
use crate::types::Bounds;

type CellCoord = (i32, i32);

/// Uniform grid partitioner with a fixed cell size.
///
/// Rectangles are half-open, so a member occupies the cells containing
/// `x..x + width` and `y..y + height`. Two strictly overlapping rectangles
/// always share an integer point and therefore a cell, which keeps the
/// partitioner free of false negatives. Empty rectangles occupy no cells and
/// are never reported.
pub struct GridPartitioner<K> {
    cell_size: i32,
    origin_x: i32,
    origin_y: i32,
    cells: HashMap<CellCoord, Cell<K>>,
    entries: HashMap<K, Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    bounds: Bounds,
    // Cells currently containing this member.
    cells: SmallVec<[CellCoord; 4]>,
}

struct Cell<K> {
    members: SmallVec<[K; 8]>,
}

impl<K> Default for Cell<K> {
    fn default() -> Self {
        Self {
            members: SmallVec::new(),
        }
    }
}

impl<K> Debug for GridPartitioner<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridPartitioner")
            .field("cell_size", &self.cell_size)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("members", &self.entries.len())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

/// Map a coordinate to a grid coordinate along one axis, rounding toward -∞.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
fn cell_coord(value: i32, origin: i32, cell_size: i32) -> i32 {
    let rel = i64::from(value) - i64::from(origin);
    // Euclidean division rounds toward -∞ for a positive divisor.
    let coord = rel.div_euclid(i64::from(cell_size));
    coord.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl<K: Copy + Eq + Hash> GridPartitioner<K> {
    /// Create a new grid with the given cell size and origin at (0, 0).
    pub fn new(cell_size: i32) -> Self {
        Self::with_origin(cell_size, 0, 0)
    }

    /// Create a new grid with the given cell size and origin.
    ///
    /// A non-positive cell size is a programming error; debug builds assert
    /// and release builds fall back to a cell size of 1.
    pub fn with_origin(cell_size: i32, origin_x: i32, origin_y: i32) -> Self {
        debug_assert!(cell_size > 0, "cell_size must be strictly positive");
        Self {
            cell_size: cell_size.max(1),
            origin_x,
            origin_y,
            cells: HashMap::new(),
            entries: HashMap::new(),
        }
    }

    /// Cell size in pixels.
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no members are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn covered_cells(&self, bounds: &Bounds) -> SmallVec<[CellCoord; 4]> {
        let mut out = SmallVec::new();
        if bounds.is_empty() {
            return out;
        }
        let ix0 = cell_coord(bounds.x, self.origin_x, self.cell_size);
        let ix1 = cell_coord(bounds.right() - 1, self.origin_x, self.cell_size);
        let iy0 = cell_coord(bounds.y, self.origin_y, self.cell_size);
        let iy1 = cell_coord(bounds.bottom() - 1, self.origin_y, self.cell_size);
        for iy in iy0..=iy1 {
            for ix in ix0..=ix1 {
                out.push((ix, iy));
            }
        }
        out
    }

    fn insert_into_cells(&mut self, key: K, cells: &[CellCoord]) {
        for &c in cells {
            self.cells.entry(c).or_default().members.push(key);
        }
    }

    fn remove_from_cells(&mut self, key: K, cells: &[CellCoord]) {
        for c in cells {
            let cell = self
                .cells
                .get_mut(c)
                .expect("grid invariant violated: missing cell while removing member");

            let pos = cell
                .members
                .iter()
                .position(|&k| k == key)
                .expect("grid invariant violated: member not found in expected cell");
            cell.members.swap_remove(pos);

            if cell.members.is_empty() {
                // Dropping empty cells keeps the map compact for sparse grids.
                self.cells.remove(c);
            }
        }
    }
}

impl<K: Copy + Eq + Hash> Partitioner<K> for GridPartitioner<K> {
    fn add(&mut self, key: K, bounds: Bounds) {
        if let Some(old) = self.entries.remove(&key) {
            self.remove_from_cells(key, &old.cells);
        }
        let cells = self.covered_cells(&bounds);
        self.insert_into_cells(key, &cells);
        self.entries.insert(key, Entry { bounds, cells });
    }

    fn remove(&mut self, key: K) {
        if let Some(entry) = self.entries.remove(&key) {
            self.remove_from_cells(key, &entry.cells);
        }
    }

    fn notify_moved(&mut self, key: K, bounds: Bounds) {
        // Take the entry out to avoid aliasing `self` while mutating cells.
        let Some(mut entry) = self.entries.remove(&key) else {
            return;
        };
        if entry.bounds != bounds {
            let cells = self.covered_cells(&bounds);
            if cells != entry.cells {
                self.remove_from_cells(key, &entry.cells);
                self.insert_into_cells(key, &cells);
                entry.cells = cells;
            }
            entry.bounds = bounds;
        }
        self.entries.insert(key, entry);
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.entries.clear();
    }

    fn for_each_candidate(&self, _key: K, bounds: Bounds, visitor: &mut dyn FnMut(K)) {
        let mut seen: HashSet<K> = HashSet::new();
        for c in self.covered_cells(&bounds) {
            let Some(cell) = self.cells.get(&c) else {
                continue;
            };
            for &k in &cell.members {
                if seen.insert(k) {
                    visitor(k);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn far_members_are_not_candidates() {
        let mut grid = GridPartitioner::new(50);
        grid.add(1_u32, Bounds::new(0, 0, 10, 10));
        grid.add(2, Bounds::new(5, 5, 10, 10));
        grid.add(3, Bounds::new(500, 500, 10, 10));

        let c = grid.candidates(1, Bounds::new(0, 0, 10, 10));
        assert!(c.contains(&1));
        assert!(c.contains(&2));
        assert!(!c.contains(&3));
    }

    #[test]
    fn spanning_member_is_reported_once() {
        let mut grid = GridPartitioner::new(5);
        grid.add(9_u32, Bounds::new(0, 0, 20, 20));
        assert_eq!(grid.occupied_cells(), 16);

        let c = grid.candidates(1, Bounds::new(2, 2, 16, 16));
        assert_eq!(c, [9]);
    }

    #[test]
    fn moved_member_follows_its_bounds() {
        let mut grid = GridPartitioner::new(10);
        grid.add(1_u32, Bounds::new(0, 0, 5, 5));
        grid.notify_moved(1, Bounds::new(100, 100, 5, 5));

        assert!(grid.candidates(0, Bounds::new(0, 0, 5, 5)).is_empty());
        assert_eq!(grid.candidates(0, Bounds::new(98, 98, 5, 5)), [1]);

        grid.remove(1);
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn notify_for_unknown_member_is_ignored() {
        let mut grid = GridPartitioner::<u32>::new(10);
        grid.notify_moved(4, Bounds::new(0, 0, 5, 5));
        assert!(grid.is_empty());
    }

    #[test]
    fn edge_neighbours_in_adjacent_cells() {
        // The right edge of `a` is exclusive: it ends in cell 0 and `b` starts in cell 1.
        let mut grid = GridPartitioner::new(10);
        grid.add(1_u32, Bounds::new(0, 0, 10, 10));
        grid.add(2, Bounds::new(10, 0, 10, 10));
        assert_eq!(grid.candidates(1, Bounds::new(0, 0, 10, 10)), [1]);
    }

    #[test]
    fn negative_coordinates_round_down() {
        assert_eq!(cell_coord(-1, 0, 10), -1);
        assert_eq!(cell_coord(-10, 0, 10), -1);
        assert_eq!(cell_coord(-11, 0, 10), -2);
        assert_eq!(cell_coord(9, 0, 10), 0);
        assert_eq!(cell_coord(15, 10, 10), 0);

        let mut grid = GridPartitioner::new(10);
        grid.add(1_u32, Bounds::new(-25, -25, 20, 20));
        assert_eq!(grid.candidates(0, Bounds::new(-10, -10, 2, 2)), [1]);
    }

    #[test]
    fn no_false_negatives_on_a_sweep() {
        let mut grid = GridPartitioner::new(7);
        let members: Vec<(u32, Bounds)> = (0..40)
            .map(|i| {
                let i32_i = i as i32;
                (i, Bounds::new(i32_i * 5 - 60, (i32_i * 13) % 50 - 20, 6 + i32_i % 5, 4 + i32_i % 3))
            })
            .collect();
        for &(k, b) in &members {
            grid.add(k, b);
        }
        for &(k, b) in &members {
            let candidates = grid.candidates(k, b);
            for &(other, ob) in &members {
                if b.overlaps(&ob) {
                    assert!(
                        candidates.contains(&other),
                        "{other} overlaps {k} but was not a candidate"
                    );
                }
            }
        }
    }
}
