//! Viewer binary for the Petri simulation.
//!
//! Opens a window sized to the configured grid, seeds a random first
//! generation, and advances the simulation once per interval, painting each
//! computed cell through the frame renderer. The simulation core never
//! draws; this shell owns the window, the event loop, and process exit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `petri-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Derive the grid seed (wall clock when the config leaves it unset)
//! 4. Build the seeded first generation and the driver
//! 5. Headless: run to the configured limits and exit
//! 6. Windowed: open the window and pixel surface, paint the initial
//!    generation, and enter the event loop
//!
//! # Controls
//!
//! - `Escape` or the close button: quit
//! - `P`: pause / resume
//! - `Space`: advance a single generation while paused
//! - `R`: reseed the grid from fresh entropy

mod error;
mod frame;

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use petri_core::config::SimulationConfig;
use petri_core::driver::{Driver, NoOpObserver};
use petri_core::grid::Grid;
use petri_core::runner;
use pixels::{Pixels, SurfaceTexture};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use crate::error::ViewerError;
use crate::frame::FrameRenderer;

/// Application entry point for the viewer.
///
/// Initializes all subsystems and runs either the headless loop or the
/// window event loop until a stop is requested.
///
/// # Errors
///
/// Returns an error if any initialization step fails; startup errors are
/// fatal and abort with a diagnostic.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. It decides the default log level, so it is
    //    loaded before the subscriber comes up; RUST_LOG takes precedence.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("petri-viewer starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        width = config.grid.width,
        height = config.grid.height,
        alive_probability_percent = config.grid.alive_probability_percent,
        cell_size = config.display.cell_size,
        headless = config.run.headless,
        "Configuration loaded"
    );

    // 3. Derive the grid seed.
    let seed = config.grid.seed.unwrap_or_else(seed_from_clock);
    info!(seed, from_config = config.grid.seed.is_some(), "Grid seed selected");

    // 4. Build the first generation and the driver.
    let grid = Grid::random(
        config.grid.width,
        config.grid.height,
        config.grid.alive_probability_percent,
        seed,
    )
    .map_err(ViewerError::from)?;
    info!(population = grid.population(), "First generation seeded");

    let driver = Driver::new(grid).map_err(ViewerError::from)?;

    // 5/6. Run.
    if config.run.headless {
        run_headless(driver, &config)?;
        return Ok(());
    }
    run_windowed(driver, config)?;
    Ok(())
}

/// Run without a window: advance to the configured limits and log the result.
fn run_headless(mut driver: Driver, config: &SimulationConfig) -> Result<(), ViewerError> {
    if config.run.max_generations == 0 && !config.run.detect_stagnation {
        warn!(
            "headless run has no generation limit and no stagnation detection; \
             it will only stop on extinction"
        );
    }

    info!(
        max_generations = config.run.max_generations,
        detect_stagnation = config.run.detect_stagnation,
        "Running headless"
    );

    let result = runner::run(&mut driver, &mut NoOpObserver, &config.run)?;
    runner::log_run_end(&result);
    Ok(())
}

/// Open the window and pixel surface and drive the simulation from the
/// event loop.
///
/// One generation is computed per loop iteration while unpaused and the
/// configured interval has elapsed; stopping is simply not stepping again,
/// so no in-flight generation is ever interrupted.
#[allow(clippy::too_many_lines)]
fn run_windowed(mut driver: Driver, config: SimulationConfig) -> Result<(), ViewerError> {
    let grid_width = driver.current().width();
    let grid_height = driver.current().height();
    let cell_size = config.display.cell_size.max(1);

    let surface_width = surface_extent(grid_width, cell_size)?;
    let surface_height = surface_extent(grid_height, cell_size)?;

    let mut renderer = FrameRenderer::new(grid_width, grid_height, &config.display);

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = WindowBuilder::new()
        .with_title("Game of Life")
        .with_inner_size(LogicalSize::new(
            f64::from(surface_width),
            f64::from(surface_height),
        ))
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|e| ViewerError::Window {
            message: format!("{e}"),
        })?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(surface_width, surface_height, surface_texture).map_err(|e| {
            ViewerError::Surface {
                message: format!("{e}"),
            }
        })?
    };

    // Paint the seeded generation through the same per-cell path the step
    // uses, then show the first frame.
    driver.emit_current(&mut renderer);
    renderer.blit(pixels.frame_mut());
    pixels.render().map_err(|e| ViewerError::Surface {
        message: format!("{e}"),
    })?;

    let interval = Duration::from_millis(config.run.generation_interval_ms);
    let mut last_step = Instant::now();
    let mut paused = false;

    info!(surface_width, surface_height, "Window opened, entering event loop");

    event_loop.run(move |event, _, control_flow| {
        if matches!(event, Event::RedrawRequested(_)) {
            renderer.blit(pixels.frame_mut());
            if let Err(e) = pixels.render() {
                warn!(error = %e, "Surface render failed, shutting down");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                info!(generation = driver.generation(), "Stop requested, shutting down");
                *control_flow = ControlFlow::Exit;
                return;
            }

            if input.key_pressed(VirtualKeyCode::P) {
                paused = !paused;
                info!(paused, "Pause toggled");
            }

            if input.key_pressed(VirtualKeyCode::R) {
                let seed = seed_from_clock();
                match Grid::random(
                    grid_width,
                    grid_height,
                    config.grid.alive_probability_percent,
                    seed,
                )
                .and_then(Driver::new)
                {
                    Ok(fresh) => {
                        driver = fresh;
                        driver.emit_current(&mut renderer);
                        info!(seed, "Grid reseeded");
                    }
                    Err(e) => warn!(error = %e, "Reseed failed"),
                }
            }

            let step_due = !paused && last_step.elapsed() >= interval;
            let single_step = paused && input.key_pressed(VirtualKeyCode::Space);
            if step_due || single_step {
                match driver.step(&mut renderer) {
                    Ok(summary) => {
                        last_step = Instant::now();
                        if summary.population == 0 && summary.deaths > 0 {
                            info!(generation = summary.generation, "All cells dead");
                        }
                        if config.run.max_generations > 0
                            && summary.generation >= config.run.max_generations
                        {
                            info!(
                                generation = summary.generation,
                                "Generation limit reached, shutting down"
                            );
                            *control_flow = ControlFlow::Exit;
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Generation step failed, shutting down");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                }
            }

            window.request_redraw();
        }
    })
}

/// Compute one surface dimension (`cells * cell_size`) as a `u32`.
fn surface_extent(cells: usize, cell_size: u32) -> Result<u32, ViewerError> {
    u32::try_from(cells)
        .ok()
        .and_then(|n| n.checked_mul(cell_size))
        .ok_or_else(|| ViewerError::Window {
            message: format!("surface dimension overflow: {cells} cells at {cell_size} px"),
        })
}

/// Derive a grid seed from wall-clock time.
///
/// Used when the configuration leaves `seed` unset, and for reseeding on
/// `R`. The chosen seed is logged so the run stays reproducible.
fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

/// Load the simulation configuration from `petri-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// Returns the config and whether the file was found.
fn load_config() -> Result<(SimulationConfig, bool), ViewerError> {
    let config_path = Path::new("petri-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
