//! Error types for the viewer binary.
//!
//! [`ViewerError`] is the top-level error type that wraps all possible
//! failure modes during startup and the run itself.

/// Top-level error for the viewer binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: petri_core::config::ConfigError,
    },

    /// Grid construction failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: petri_core::grid::GridError,
    },

    /// A generation step failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: petri_core::driver::StepError,
    },

    /// The bounded run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: petri_core::runner::RunnerError,
    },

    /// Window creation failed.
    #[error("window error: {message}")]
    Window {
        /// Description of the window failure.
        message: String,
    },

    /// Pixel surface creation or rendering failed.
    #[error("surface error: {message}")]
    Surface {
        /// Description of the surface failure.
        message: String,
    },
}
