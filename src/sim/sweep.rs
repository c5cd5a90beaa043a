//! Annualized diesel estimate over a grid of PV and battery sizes.

use rayon::prelude::*;
use serde::Serialize;

use super::engine::{RunParams, Simulation};
use super::types::{IrradianceScenario, ModelConstants};

/// Sizes to sweep and the annualization horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSettings {
    /// PV peak sizes (kWp).
    pub pv_sizes_kwp: Vec<f64>,
    /// Battery capacities (kWh).
    pub bess_sizes_kwh: Vec<f64>,
    /// Days per year used to annualize the weighted day.
    pub days_per_year: f64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            pv_sizes_kwp: vec![0.0, 150.0, 300.0, 450.0, 600.0],
            bess_sizes_kwh: vec![0.0, 250.0, 500.0, 750.0, 1000.0],
            days_per_year: 365.0,
        }
    }
}

/// Single-day diesel use of one scenario at one grid point.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioLiters {
    pub scenario: String,
    pub weight: f64,
    pub liters: f64,
}

/// One grid point of the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub pv_kwp: f64,
    pub bess_kwh: f64,
    /// Per-scenario daily liters, in scenario order.
    pub daily: Vec<ScenarioLiters>,
    /// Weighted annual diesel estimate (L).
    pub annual_liters: f64,
}

/// Weighted annual liters from per-scenario daily liters.
///
/// Weights are normalized by their sum; a zero total weight gives zero.
pub fn annualize(daily: &[ScenarioLiters], days_per_year: f64) -> f64 {
    let total_weight: f64 = daily.iter().map(|d| d.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = daily.iter().map(|d| d.weight * d.liters).sum();
    days_per_year * weighted / total_weight
}

/// Diesel used in one noise-free day for the given sizes and scenario.
pub fn single_day_liters(
    base: &RunParams,
    pv_kwp: f64,
    bess_kwh: f64,
    scenario: &IrradianceScenario,
    constants: &ModelConstants,
) -> f64 {
    let params = RunParams {
        days: 1,
        use_noise: false,
        pv_peak_kwp: pv_kwp,
        battery_capacity_kwh: bess_kwh,
        irradiance_factor: scenario.sky_factor(base.irradiance_factor),
        ..base.clone()
    };
    Simulation::new(&params, constants.clone())
        .run()
        .kpi
        .total_diesel_l
}

/// Runs the full grid, evaluating grid points in parallel.
///
/// Results come back PV-major, battery-minor.
pub fn run_sweep(
    base: &RunParams,
    settings: &SweepSettings,
    scenarios: &[IrradianceScenario],
    constants: &ModelConstants,
) -> Vec<SweepPoint> {
    let grid: Vec<(f64, f64)> = settings
        .pv_sizes_kwp
        .iter()
        .flat_map(|&pv| settings.bess_sizes_kwh.iter().map(move |&bess| (pv, bess)))
        .collect();

    grid.into_par_iter()
        .map(|(pv_kwp, bess_kwh)| {
            let daily: Vec<ScenarioLiters> = scenarios
                .iter()
                .map(|scenario| ScenarioLiters {
                    scenario: scenario.name.clone(),
                    weight: scenario.weight,
                    liters: single_day_liters(base, pv_kwp, bess_kwh, scenario, constants),
                })
                .collect();
            let annual_liters = annualize(&daily, settings.days_per_year);
            tracing::debug!(pv_kwp, bess_kwh, annual_liters, "sweep point finished");
            SweepPoint {
                pv_kwp,
                bess_kwh,
                daily,
                annual_liters,
            }
        })
        .collect()
}
