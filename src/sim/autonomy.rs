//! Diesel autonomy comparison across irradiance scenarios.

use rayon::prelude::*;
use serde::Serialize;

use super::engine::{RunParams, Simulation};
use super::types::{IrradianceScenario, ModelConstants};

/// Horizon and starting point for autonomy runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AutonomySettings {
    /// Days to simulate per scenario.
    pub days: usize,
    /// Initial battery SOC as a fraction.
    pub initial_soc: f64,
}

impl Default for AutonomySettings {
    fn default() -> Self {
        Self {
            days: 150,
            initial_soc: 0.9,
        }
    }
}

/// How long a full tank lasted under one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct AutonomyOutcome {
    pub scenario: String,
    /// Sky factor actually simulated.
    pub irradiance_factor: f64,
    /// Day the tank first ran empty, if it did within the horizon.
    pub autonomy_day: Option<f64>,
    /// Diesel burned over the horizon (L).
    pub total_diesel_l: f64,
    /// Tank level after every step (L).
    #[serde(skip)]
    pub fuel_remaining_l: Vec<f64>,
}

/// Runs one full-tank simulation per scenario, in parallel.
///
/// Noise is disabled so results depend only on the scenario. Output order
/// matches `scenarios`.
///
/// # Arguments
///
/// * `base` - Site parameters; days, SOC, noise, and sky factor are overridden
/// * `settings` - Autonomy horizon and initial SOC
/// * `scenarios` - Day types to compare
/// * `constants` - Fixed model constants
pub fn compare_autonomy(
    base: &RunParams,
    settings: &AutonomySettings,
    scenarios: &[IrradianceScenario],
    constants: &ModelConstants,
) -> Vec<AutonomyOutcome> {
    scenarios
        .par_iter()
        .map(|scenario| {
            let params = RunParams {
                days: settings.days,
                use_noise: false,
                initial_soc: settings.initial_soc,
                irradiance_factor: scenario.sky_factor(base.irradiance_factor),
                ..base.clone()
            };
            let report = Simulation::new(&params, constants.clone()).run();
            tracing::debug!(
                scenario = %scenario.name,
                autonomy_day = ?report.kpi.autonomy_day,
                "autonomy scenario finished"
            );
            AutonomyOutcome {
                scenario: scenario.name.clone(),
                irradiance_factor: params.irradiance_factor,
                autonomy_day: report.kpi.autonomy_day,
                total_diesel_l: report.kpi.total_diesel_l,
                fuel_remaining_l: report.steps.iter().map(|s| s.fuel_remaining_l).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::load::REFERENCE_HOURLY_LOAD_KW;
    use crate::sim::policy::PolicyParams;

    fn base() -> RunParams {
        RunParams {
            days: 1,
            seed: 42,
            use_noise: true,
            hourly_load_kw: REFERENCE_HOURLY_LOAD_KW.to_vec(),
            pv_peak_kwp: 450.0,
            irradiance_factor: 1.0,
            battery_capacity_kwh: 750.0,
            battery_max_power_kw: 200.0,
            initial_soc: 0.38,
            genset_units: 10,
            genset_rated_kw: 20.0,
            genset_efficient_loading: 0.8,
            policy: PolicyParams::default(),
        }
    }

    #[test]
    fn results_follow_scenario_order() {
        let settings = AutonomySettings {
            days: 2,
            initial_soc: 0.9,
        };
        let scenarios = IrradianceScenario::reference_set();
        let out = compare_autonomy(&base(), &settings, &scenarios, &ModelConstants::default());
        let names: Vec<&str> = out.iter().map(|o| o.scenario.as_str()).collect();
        assert_eq!(names, vec!["open", "cloudy", "storm", "no_sun"]);
        assert!(out.iter().all(|o| o.fuel_remaining_l.len() == 2 * 288));
    }

    #[test]
    fn less_sun_burns_more_fuel() {
        let settings = AutonomySettings {
            days: 3,
            initial_soc: 0.9,
        };
        let scenarios = IrradianceScenario::reference_set();
        let out = compare_autonomy(&base(), &settings, &scenarios, &ModelConstants::default());
        assert!(out[0].total_diesel_l < out[3].total_diesel_l);
        assert_eq!(out[3].irradiance_factor, 0.0);
    }
}
