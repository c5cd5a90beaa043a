//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use microgrid_sim::config::ScenarioConfig;
use microgrid_sim::sim::engine::{RunParams, Simulation, SimulationReport};
use microgrid_sim::sim::policy::PolicyParams;
use microgrid_sim::sim::types::ModelConstants;

/// Baseline preset parameters with noise switched off.
pub fn reference_params() -> RunParams {
    RunParams {
        use_noise: false,
        ..ScenarioConfig::baseline().run_params()
    }
}

/// Flat load with no PV plant and a single genset.
///
/// The emergency threshold sits far above the load so only the normal
/// floor applies.
pub fn flat_diesel_params(load_kw: f64, days: usize, units: usize, unit_rated_kw: f64) -> RunParams {
    RunParams {
        days,
        seed: 42,
        use_noise: false,
        hourly_load_kw: vec![load_kw; 24],
        pv_peak_kwp: 0.0,
        irradiance_factor: 1.0,
        battery_capacity_kwh: 750.0,
        battery_max_power_kw: 200.0,
        initial_soc: 0.5,
        genset_units: units,
        genset_rated_kw: unit_rated_kw,
        genset_efficient_loading: 0.8,
        policy: PolicyParams {
            emergency_load_kw: 1000.0,
            ..PolicyParams::default()
        },
    }
}

/// Runs `params` with the default model constants.
pub fn run(params: &RunParams) -> SimulationReport {
    Simulation::new(params, ModelConstants::default()).run()
}

/// Runs `params` with a custom tank size.
pub fn run_with_tank(params: &RunParams, tank_capacity_l: f64) -> SimulationReport {
    let constants = ModelConstants {
        tank_capacity_l,
        ..ModelConstants::default()
    };
    Simulation::new(params, constants).run()
}
