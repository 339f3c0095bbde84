//! Double-buffered generation stepping with a per-cell render hook.
//!
//! The [`Driver`] owns exactly two grids: the generation on display
//! (`current`) and a scratch buffer (`next`). One [`Driver::step`] computes
//! every cell of `next` from the unmodified `current` snapshot, reports each
//! result through the [`CellObserver`] hook, and then swaps the buffers.
//! `next` is only written, never read, within a step, so no cell ever sees
//! a half-updated generation.
//!
//! The core performs no drawing: the observer callback is its sole side
//! effect visible to collaborators.

use tracing::debug;

use crate::grid::{CellState, Grid, GridError};
use crate::rules;

/// Errors that can occur when advancing a generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// The two buffers differ in size. No writes are performed.
    #[error(
        "buffer dimension mismatch: current is {current_width}x{current_height}, \
         next is {next_width}x{next_height}"
    )]
    DimensionMismatch {
        /// Columns of the current buffer.
        current_width: usize,
        /// Rows of the current buffer.
        current_height: usize,
        /// Columns of the next buffer.
        next_width: usize,
        /// Rows of the next buffer.
        next_height: usize,
    },

    /// A cell access failed mid-step. Cannot occur once dimensions are
    /// validated, but is propagated rather than swallowed.
    #[error("grid access failed: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Render hook invoked once per computed cell per generation step.
///
/// The driver reports every cell of the new generation in row-major order,
/// exactly once per step. The shell translates these calls into pixel
/// writes; headless runs and tests use [`NoOpObserver`].
pub trait CellObserver {
    /// Called with the resulting state of cell `(x, y)`.
    fn on_cell(&mut self, x: usize, y: usize, state: CellState);
}

/// An observer that ignores every cell.
pub struct NoOpObserver;

impl CellObserver for NoOpObserver {
    fn on_cell(&mut self, _x: usize, _y: usize, _state: CellState) {}
}

/// Summary of a single generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    /// The generation number that was produced (1 after the first step).
    pub generation: u64,
    /// Live cells in the new generation.
    pub population: usize,
    /// Cells that went from dead to alive.
    pub births: usize,
    /// Cells that went from alive to dead.
    pub deaths: usize,
}

/// Advance one generation: compute every cell of `next` from the unmodified
/// `current` snapshot and report each result through the observer.
///
/// Dimensions are validated before anything else; on mismatch neither
/// buffer is touched. Cells are visited in row-major order, each one
/// independently: the neighbor count always comes from `current`, never
/// from cells already written to `next`.
///
/// # Errors
///
/// Returns [`StepError::DimensionMismatch`] if the buffers differ in size.
pub fn advance(
    current: &Grid,
    next: &mut Grid,
    observer: &mut dyn CellObserver,
) -> Result<(), StepError> {
    if !current.same_dimensions(next) {
        return Err(StepError::DimensionMismatch {
            current_width: current.width(),
            current_height: current.height(),
            next_width: next.width(),
            next_height: next.height(),
        });
    }

    for y in 0..current.height() {
        for x in 0..current.width() {
            let live = current.live_neighbors(x, y)?;
            let state = rules::next_state(current.get(x, y)?, live);
            next.set(x, y, state)?;
            observer.on_cell(x, y, state);
        }
    }
    Ok(())
}

/// Owns the two generation buffers and advances the simulation one
/// generation at a time.
///
/// The driver has no state machine beyond "ready to step": every step is
/// atomic and total given its equal-dimension buffers, and stopping the
/// simulation is simply not calling [`Driver::step`] again.
#[derive(Debug)]
pub struct Driver {
    /// The generation currently on display.
    current: Grid,
    /// Scratch buffer receiving the next generation.
    next: Grid,
    /// Number of completed steps.
    generation: u64,
}

impl Driver {
    /// Create a driver around an initial generation.
    ///
    /// The scratch buffer starts all-dead with the same dimensions, so the
    /// two buffers can never disagree in size through this constructor.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if the initial grid's
    /// dimensions cannot back a second buffer (cannot occur for a grid that
    /// was itself constructed normally).
    pub fn new(initial: Grid) -> Result<Self, GridError> {
        let next = Grid::dead(initial.width(), initial.height())?;
        Ok(Self {
            current: initial,
            next,
            generation: 0,
        })
    }

    /// Advance the simulation by exactly one generation.
    ///
    /// Runs [`advance`] over the two owned buffers, swaps them so the new
    /// generation becomes `current`, and returns a summary of what changed.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if the step fails; the owned buffers always
    /// have equal dimensions, so this does not occur in practice.
    pub fn step(&mut self, observer: &mut dyn CellObserver) -> Result<StepSummary, StepError> {
        advance(&self.current, &mut self.next, observer)?;

        let mut births: usize = 0;
        let mut deaths: usize = 0;
        for ((_, _, before), (_, _, after)) in self.current.iter().zip(self.next.iter()) {
            match (before, after) {
                (CellState::Dead, CellState::Alive) => births = births.saturating_add(1),
                (CellState::Alive, CellState::Dead) => deaths = deaths.saturating_add(1),
                _ => {}
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation = self.generation.saturating_add(1);

        let summary = StepSummary {
            generation: self.generation,
            population: self.current.population(),
            births,
            deaths,
        };
        debug!(
            generation = summary.generation,
            population = summary.population,
            births = summary.births,
            deaths = summary.deaths,
            "Generation advanced"
        );
        Ok(summary)
    }

    /// Replay the current generation through the observer without stepping.
    ///
    /// The shell uses this to paint the seeded first generation through the
    /// same per-cell path that [`Driver::step`] uses, so initialization and
    /// stepping share one draw path.
    pub fn emit_current(&self, observer: &mut dyn CellObserver) {
        for (x, y, state) in self.current.iter() {
            observer.on_cell(x, y, state);
        }
    }

    /// Return the generation currently on display.
    pub const fn current(&self) -> &Grid {
        &self.current
    }

    /// Return the number of completed generation steps.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
