//! Prefab Planner Library
//!
//! This library provides the module-placement engine of the Prefab Planner
//! configurator: the catalog, grid geometry, placement validation, the
//! interaction state machine, the configurator store with its persistence,
//! and export. The CLI, terminal UI and web API are thin drivers around it.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod export;
pub mod models;
pub mod persistence;
pub mod store;
#[cfg(feature = "ratatui")]
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
