//! The Conway generation-transition rule.
//!
//! The next state of a cell is a pure function of its current state and its
//! live-neighbor count. The standard rules:
//!
//! 1. A live cell with fewer than two live neighbors dies (underpopulation).
//! 2. A live cell with two or three live neighbors survives.
//! 3. A live cell with more than three live neighbors dies (overpopulation).
//! 4. A dead cell with exactly three live neighbors becomes alive
//!    (reproduction).

use crate::grid::CellState;

/// Compute the next state of a cell from its current state and the number
/// of live neighbors.
///
/// Pure and total: defined for every `live_neighbors` value, though a
/// toroidal grid only ever produces counts in `0..=8`.
pub const fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2 | 3) | (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}
