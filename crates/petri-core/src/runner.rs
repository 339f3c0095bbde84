//! Bounded headless run loop over the simulation driver.
//!
//! [`run`] drives [`Driver::step`] until a termination condition is met:
//!
//! - **Generation limit**: stop after `max_generations` steps (0 means
//!   unbounded, matching the windowed shell which runs until closed).
//! - **Extinction**: stop when every cell is dead.
//! - **Stagnation** (optional): stop when the grid revisits one of its
//!   recent configurations, which catches still lifes and short-period
//!   oscillators.
//!
//! The loop is synchronous and performs no pacing; real-time pacing is a
//! shell concern.

use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::driver::{CellObserver, Driver, StepError, StepSummary};
use crate::grid::Grid;

/// Number of recent generation hashes kept for stagnation detection.
///
/// Detects oscillators with period up to this window.
const STAGNATION_WINDOW: usize = 10;

/// Errors that can occur during a bounded run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A generation step failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: StepError,
    },
}

/// Why a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured generation limit was reached.
    MaxGenerationsReached,
    /// Every cell died.
    Extinction,
    /// The grid revisited a recent configuration.
    Stagnation,
}

/// Result of a bounded run.
#[derive(Debug)]
pub struct RunResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// Summary of the last completed step, if any step ran.
    pub final_summary: Option<StepSummary>,
    /// Total generations executed.
    pub total_generations: u64,
}

/// Run the simulation until a termination condition from `bounds` is met.
///
/// With `max_generations == 0` and stagnation detection disabled, the loop
/// only ends on extinction; callers wanting a guaranteed-finite run should
/// set at least one bound.
///
/// # Errors
///
/// Returns [`RunnerError`] if a generation step fails.
pub fn run(
    driver: &mut Driver,
    observer: &mut dyn CellObserver,
    bounds: &RunConfig,
) -> Result<RunResult, RunnerError> {
    let mut last_summary: Option<StepSummary> = None;
    let mut total_generations: u64 = 0;
    let mut recent_hashes: VecDeque<u64> = VecDeque::with_capacity(STAGNATION_WINDOW);

    if bounds.detect_stagnation {
        recent_hashes.push_back(grid_hash(driver.current()));
    }

    info!(
        max_generations = bounds.max_generations,
        detect_stagnation = bounds.detect_stagnation,
        population = driver.current().population(),
        "Run starting"
    );

    loop {
        // --- Check generation limit (before stepping) ---
        if bounds.max_generations > 0 && total_generations >= bounds.max_generations {
            info!(max_generations = bounds.max_generations, "Generation limit reached");
            return Ok(RunResult {
                end_reason: EndReason::MaxGenerationsReached,
                final_summary: last_summary,
                total_generations,
            });
        }

        // --- Execute one generation ---
        let summary = driver.step(observer)?;
        total_generations = total_generations.saturating_add(1);

        // --- Check extinction ---
        if summary.population == 0 {
            info!(generation = summary.generation, "All cells dead");
            return Ok(RunResult {
                end_reason: EndReason::Extinction,
                final_summary: Some(summary),
                total_generations,
            });
        }

        // --- Check stagnation ---
        if bounds.detect_stagnation {
            let hash = grid_hash(driver.current());
            if recent_hashes.contains(&hash) {
                info!(
                    generation = summary.generation,
                    "Grid revisited a recent configuration"
                );
                return Ok(RunResult {
                    end_reason: EndReason::Stagnation,
                    final_summary: Some(summary),
                    total_generations,
                });
            }
            recent_hashes.push_back(hash);
            if recent_hashes.len() > STAGNATION_WINDOW {
                let _ = recent_hashes.pop_front();
            }
        }

        last_summary = Some(summary);
    }
}

/// Log the end of a bounded run.
///
/// Call after [`run`] returns to record the outcome.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_generations = result.total_generations,
        final_population = result.final_summary.as_ref().map(|s| s.population),
        "Run ended"
    );

    if result.final_summary.is_none() {
        warn!("Run ended with no generations executed");
    }
}

/// Hash a grid configuration for stagnation comparison.
fn grid_hash(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}
