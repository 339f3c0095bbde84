//! Cell-state container: a fixed-size binary grid with toroidal topology.
//!
//! The [`Grid`] stores one [`CellState`] per cell in a heap-allocated
//! row-major vector indexed by `y * width + x`, so grid size is bounded by
//! memory rather than stack depth. Dimensions are fixed for the lifetime of
//! the grid.
//!
//! Neighbor queries treat the grid as a torus: every edge is connected to
//! the opposite edge, so every cell has exactly eight neighbor lookups and
//! none of them can go out of bounds. Direct accessors, by contrast, treat
//! an out-of-range coordinate as a caller error and fail with
//! [`GridError::OutOfBounds`] rather than clamping.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or accessing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid was requested with a zero dimension.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// The requested number of columns.
        width: usize,
        /// The requested number of rows.
        height: usize,
    },

    /// The alive probability exceeds 100 percent.
    #[error("alive probability {percent}% out of range: must be 0-100")]
    ProbabilityOutOfRange {
        /// The requested percentage.
        percent: u8,
    },

    /// An accessor was called with a coordinate outside the grid.
    #[error("coordinate ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// The requested column.
        x: usize,
        /// The requested row.
        y: usize,
        /// The grid's number of columns.
        width: usize,
        /// The grid's number of rows.
        height: usize,
    },
}

/// The binary state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// The cell is dead this generation.
    Dead,
    /// The cell is alive this generation.
    Alive,
}

impl CellState {
    /// Whether this state is [`CellState::Alive`].
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Map a boolean draw onto a cell state.
    pub const fn from_alive(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// A fixed-size grid of cell states with toroidal neighbor topology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage, length `width * height`.
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an all-dead grid of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero
    /// or the cell count overflows `usize`.
    pub fn dead(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GridError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Create a randomly seeded grid.
    ///
    /// For every cell, a uniform integer in `[0, 100)` is drawn from an RNG
    /// seeded with `seed`; the cell starts alive when the draw is below
    /// `alive_probability_percent`. Equal seeds produce equal grids, so a
    /// run can be reproduced by pinning the seed in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero,
    /// or [`GridError::ProbabilityOutOfRange`] if the percentage exceeds 100.
    pub fn random(
        width: usize,
        height: usize,
        alive_probability_percent: u8,
        seed: u64,
    ) -> Result<Self, GridError> {
        if alive_probability_percent > 100 {
            return Err(GridError::ProbabilityOutOfRange {
                percent: alive_probability_percent,
            });
        }
        let mut grid = Self::dead(width, height)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        for cell in &mut grid.cells {
            let draw: u8 = rng.random_range(0..100);
            *cell = CellState::from_alive(draw < alive_probability_percent);
        }
        Ok(grid)
    }

    /// Return the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Return the number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Whether this grid has the same dimensions as `other`.
    pub const fn same_dimensions(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Read the state of cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the
    /// grid. Coordinates are never clamped or wrapped here; wraparound is a
    /// neighbor-query concern only.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState, GridError> {
        let idx = self.offset(x, y)?;
        self.cells
            .get(idx)
            .copied()
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    /// Write the state of cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the
    /// grid.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GridError> {
        let idx = self.offset(x, y)?;
        let (width, height) = (self.width, self.height);
        let slot = self
            .cells
            .get_mut(idx)
            .ok_or(GridError::OutOfBounds { x, y, width, height })?;
        *slot = state;
        Ok(())
    }

    /// Count the live cells among the eight neighbors of `(x, y)`.
    ///
    /// Wraparound is unconditional and total: a cell on the left edge has
    /// its "left" neighbors in column `width - 1`, and corner cells combine
    /// two wraps. Every cell therefore resolves exactly eight candidate
    /// lookups. Does not mutate the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the queried coordinate itself
    /// is outside the grid; the neighbor lookups cannot fail once the
    /// center is in range.
    pub fn live_neighbors(&self, x: usize, y: usize) -> Result<u8, GridError> {
        let _ = self.offset(x, y)?;

        let left = wrap_prev(x, self.width);
        let right = wrap_next(x, self.width);
        let above = wrap_prev(y, self.height);
        let below = wrap_next(y, self.height);

        let neighbors = [
            (left, above),
            (x, above),
            (right, above),
            (left, y),
            (right, y),
            (left, below),
            (x, below),
            (right, below),
        ];

        let mut count: u8 = 0;
        for (nx, ny) in neighbors {
            if self.get(nx, ny)?.is_alive() {
                count = count.saturating_add(1);
            }
        }
        Ok(count)
    }

    /// Iterate over all cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &state)| {
            let x = idx.checked_rem(self.width).unwrap_or(0);
            let y = idx.checked_div(self.width).unwrap_or(0);
            (x, y, state)
        })
    }

    /// Compute the row-major storage offset for `(x, y)`.
    fn offset(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        y.checked_mul(self.width)
            .and_then(|row| row.checked_add(x))
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }
}

/// Index of the wraparound predecessor of `i` on an axis of length `len`.
const fn wrap_prev(i: usize, len: usize) -> usize {
    if i == 0 {
        len.saturating_sub(1)
    } else {
        i.saturating_sub(1)
    }
}

/// Index of the wraparound successor of `i` on an axis of length `len`.
const fn wrap_next(i: usize, len: usize) -> usize {
    let next = i.saturating_add(1);
    if next >= len { 0 } else { next }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_grid_with_live(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::dead(width, height).unwrap();
        for &(x, y) in live {
            grid.set(x, y, CellState::Alive).unwrap();
        }
        grid
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::dead(0, 10),
            Err(GridError::InvalidDimensions { width: 0, height: 10 })
        );
        assert_eq!(
            Grid::dead(10, 0),
            Err(GridError::InvalidDimensions { width: 10, height: 0 })
        );
        assert!(Grid::random(0, 0, 50, 42).is_err());
    }

    #[test]
    fn probability_above_100_rejected() {
        assert_eq!(
            Grid::random(4, 4, 101, 42),
            Err(GridError::ProbabilityOutOfRange { percent: 101 })
        );
    }

    #[test]
    fn probability_zero_yields_all_dead() {
        for seed in [0, 1, 42, u64::MAX] {
            let grid = Grid::random(12, 9, 0, seed).unwrap();
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn probability_100_yields_all_alive() {
        for seed in [0, 1, 42, u64::MAX] {
            let grid = Grid::random(12, 9, 100, seed).unwrap();
            assert_eq!(grid.population(), grid.cell_count());
        }
    }

    #[test]
    fn equal_seeds_reproduce_the_grid() {
        let a = Grid::random(32, 24, 50, 7).unwrap();
        let b = Grid::random(32, 24, 50, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = Grid::random(32, 24, 50, 7).unwrap();
        let b = Grid::random(32, 24, 50, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn get_set_roundtrip() {
        let mut grid = Grid::dead(5, 4).unwrap();
        assert_eq!(grid.get(3, 2), Ok(CellState::Dead));
        grid.set(3, 2, CellState::Alive).unwrap();
        assert_eq!(grid.get(3, 2), Ok(CellState::Alive));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn out_of_range_accessors_fail() {
        let mut grid = Grid::dead(5, 4).unwrap();
        assert_eq!(
            grid.get(5, 0),
            Err(GridError::OutOfBounds { x: 5, y: 0, width: 5, height: 4 })
        );
        assert_eq!(
            grid.get(0, 4),
            Err(GridError::OutOfBounds { x: 0, y: 4, width: 5, height: 4 })
        );
        assert!(grid.set(5, 4, CellState::Alive).is_err());
        assert!(grid.live_neighbors(5, 0).is_err());
    }

    #[test]
    fn fully_alive_grid_every_cell_sees_eight() {
        let grid = Grid::random(6, 5, 100, 1).unwrap();
        let mut total: u64 = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let count = grid.live_neighbors(x, y).unwrap();
                assert_eq!(count, 8, "cell ({x}, {y})");
                total += u64::from(count);
            }
        }
        assert_eq!(total, 8 * 6 * 5);
    }

    #[test]
    fn corner_cell_wraps_to_exactly_six_distinct_cells() {
        // A lone live cell at (0, 0) on a 5x5 grid is a neighbor of the
        // three adjacent cells and, via wraparound, of the three cells on
        // the opposite edges and corner. Everything else sees nothing.
        let grid = make_grid_with_live(5, 5, &[(0, 0)]);
        let expected_neighbors = [(4, 4), (0, 4), (4, 0), (1, 0), (0, 1), (1, 1)];

        for y in 0..5 {
            for x in 0..5 {
                let count = grid.live_neighbors(x, y).unwrap();
                if expected_neighbors.contains(&(x, y)) {
                    assert_eq!(count, 1, "cell ({x}, {y}) should see the corner");
                } else {
                    assert_eq!(count, 0, "cell ({x}, {y}) should see nothing");
                }
            }
        }
    }

    #[test]
    fn single_cell_grid_wraps_onto_itself() {
        // On a 1x1 torus all eight neighbor lookups resolve to the cell
        // itself, so a live cell counts eight live neighbors.
        let grid = make_grid_with_live(1, 1, &[(0, 0)]);
        assert_eq!(grid.live_neighbors(0, 0), Ok(8));

        let dead = Grid::dead(1, 1).unwrap();
        assert_eq!(dead.live_neighbors(0, 0), Ok(0));
    }

    #[test]
    fn interior_cell_counts_without_wraparound() {
        let grid = make_grid_with_live(5, 5, &[(1, 1), (2, 1), (3, 1), (2, 3)]);
        assert_eq!(grid.live_neighbors(2, 2).unwrap(), 4);
        assert_eq!(grid.live_neighbors(2, 1).unwrap(), 2);
    }

    #[test]
    fn iter_is_row_major_and_complete() {
        let grid = make_grid_with_live(3, 2, &[(2, 0), (0, 1)]);
        let cells: Vec<(usize, usize, CellState)> = grid.iter().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, CellState::Dead),
                (1, 0, CellState::Dead),
                (2, 0, CellState::Alive),
                (0, 1, CellState::Alive),
                (1, 1, CellState::Dead),
                (2, 1, CellState::Dead),
            ]
        );
    }
}
