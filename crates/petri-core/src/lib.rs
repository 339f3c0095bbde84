//! Toroidal grid, Conway rules, and generation driver for the Petri
//! simulation.
//!
//! This crate is the simulation core. It owns the cell grid, the
//! generation-transition rule, the double-buffered driver, and a bounded
//! headless runner. It opens no window and draws nothing: the shell
//! observes each computed cell through the [`CellObserver`] hook and
//! translates the calls into pixel writes.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `petri-config.yaml` into
//!   strongly-typed structs.
//! - [`grid`] -- Fixed-size binary cell grid with toroidal neighbor
//!   counting and randomized seeding.
//! - [`rules`] -- The Conway next-state function.
//! - [`driver`] -- Double-buffered generation stepping with the per-cell
//!   observer hook.
//! - [`runner`] -- Bounded headless run loop (generation limit,
//!   extinction, stagnation).
//!
//! [`CellObserver`]: driver::CellObserver

pub mod config;
pub mod driver;
pub mod grid;
pub mod rules;
pub mod runner;
