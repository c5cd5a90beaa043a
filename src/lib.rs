//! Hybrid PV / battery / diesel microgrid dispatch simulator.

/// TOML scenario configuration and presets.
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod logging;
pub mod profile;
/// Simulation driver, dispatch policy, and analyses.
pub mod sim;
