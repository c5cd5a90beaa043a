//! Core simulation types: timing, model constants, and per-step records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::devices::solar::IrradianceTable;

/// Centralized simulation timing.
///
/// All devices and the driver reference this struct for the time axis,
/// eliminating duplicated `dt_hours` computations.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(12, 2, 42);
/// assert_eq!(cfg.steps_per_day(), 288);
/// assert_eq!(cfg.total_steps(), 576);
/// assert!((cfg.hour_of_day(300) - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation steps per hour.
    pub steps_per_hour: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one timestep in hours, derived as `1.0 / steps_per_hour`.
    pub dt_hours: f64,
    /// Seed for the run's random generator.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation timing configuration.
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_hour` or `days` is zero.
    pub fn new(steps_per_hour: usize, days: usize, seed: u64) -> Self {
        assert!(steps_per_hour > 0, "steps_per_hour must be > 0");
        assert!(days > 0, "days must be > 0");
        Self {
            steps_per_hour,
            days,
            dt_hours: 1.0 / steps_per_hour as f64,
            seed,
        }
    }

    /// Number of steps in one simulated day.
    pub fn steps_per_day(&self) -> usize {
        self.steps_per_hour * 24
    }

    /// Total number of simulation steps across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day() * self.days
    }

    /// Simulated time in hours at the start of step `t`.
    pub fn time_hr(&self, t: usize) -> f64 {
        t as f64 * self.dt_hours
    }

    /// Hour of day in `[0, 24)` at the start of step `t`.
    pub fn hour_of_day(&self, t: usize) -> f64 {
        self.time_hr(t) % 24.0
    }

    /// Simulated time in (fractional) days at the start of step `t`.
    pub fn day(&self, t: usize) -> f64 {
        self.time_hr(t) / 24.0
    }
}

/// Fixed physical and operating constants of the model.
///
/// Passed explicitly into every component constructor; nothing reads
/// these from global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConstants {
    /// Time resolution (steps per hour).
    pub steps_per_hour: usize,
    /// PV system derate applied to the installed peak.
    pub pv_derate: f64,
    /// Battery round-trip efficiency (charge then discharge).
    pub round_trip_efficiency: f64,
    /// SOC ceiling (%).
    pub soc_max_pct: f64,
    /// SOC at which charge power starts ramping down (%).
    pub soc_ramp_start_pct: f64,
    /// Normal discharge floor (%).
    pub soc_min_normal_pct: f64,
    /// Emergency discharge floor (%).
    pub soc_min_emergency_pct: f64,
    /// Diesel tank capacity (L).
    pub tank_capacity_l: f64,
    /// Specific fuel consumption (L/kWh).
    pub sfc_l_per_kwh: f64,
    /// Fuel level at or below which the tank counts as empty (L).
    pub tank_empty_threshold_l: f64,
    /// PV smoothing moving-average window (minutes).
    pub smoothing_window_min: usize,
    /// Hour of day at which PV ramp smoothing starts (inclusive).
    pub smoothing_start_hour: f64,
    /// Hour of day at which PV ramp smoothing stops (exclusive).
    pub smoothing_end_hour: f64,
    /// Hour of day at which the diurnal dispatch branch starts (inclusive).
    pub daylight_start_hour: f64,
    /// Hour of day at which the diurnal dispatch branch stops (exclusive).
    pub daylight_end_hour: f64,
    /// Fraction of rated battery power available for charging.
    pub charge_budget_fraction: f64,
    /// Standard deviation of the PV noise multiplier.
    pub pv_noise_std: f64,
    /// Absolute clip applied to the PV noise multiplier.
    pub pv_noise_clip: f64,
    /// Hourly irradiance shape.
    pub irradiance: IrradianceTable,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            steps_per_hour: 12,
            pv_derate: 0.75,
            round_trip_efficiency: 0.82,
            soc_max_pct: 90.0,
            soc_ramp_start_pct: 85.0,
            soc_min_normal_pct: 40.0,
            soc_min_emergency_pct: 20.0,
            tank_capacity_l: 12_000.0,
            sfc_l_per_kwh: 0.285,
            tank_empty_threshold_l: 0.1,
            smoothing_window_min: 30,
            smoothing_start_hour: 6.0,
            smoothing_end_hour: 18.0,
            daylight_start_hour: 6.0,
            daylight_end_hour: 17.0,
            charge_budget_fraction: 0.8,
            pv_noise_std: 0.08,
            pv_noise_clip: 0.10,
            irradiance: IrradianceTable::default(),
        }
    }
}

impl ModelConstants {
    /// One-way charge efficiency, `sqrt(round_trip_efficiency)`.
    pub fn charge_efficiency(&self) -> f64 {
        self.round_trip_efficiency.sqrt()
    }

    /// One-way discharge efficiency, `sqrt(round_trip_efficiency)`.
    pub fn discharge_efficiency(&self) -> f64 {
        self.round_trip_efficiency.sqrt()
    }

    /// Smoothing window expressed in steps (truncated).
    pub fn smoothing_window_steps(&self) -> usize {
        let minutes_per_step = 60 / self.steps_per_hour.max(1);
        self.smoothing_window_min / minutes_per_step.max(1)
    }

    /// Timing for a run of `days` using this model's resolution.
    pub fn sim_config(&self, days: usize, seed: u64) -> SimConfig {
        SimConfig::new(self.steps_per_hour, days, seed)
    }
}

/// A day type used by the autonomy comparison and the annual sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IrradianceScenario {
    /// Display name.
    pub name: String,
    /// Multiplier applied to the base sky factor.
    pub irradiance_multiplier: f64,
    /// Relative frequency of this day type over a year.
    pub weight: f64,
}

impl IrradianceScenario {
    /// Creates a scenario.
    pub fn new(name: impl Into<String>, irradiance_multiplier: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            irradiance_multiplier,
            weight,
        }
    }

    /// Open sky, cloudy, storm, and no sun, weighted 40/30/20/10.
    pub fn reference_set() -> Vec<Self> {
        vec![
            Self::new("open", 1.0, 0.4),
            Self::new("cloudy", 0.5, 0.3),
            Self::new("storm", 0.2, 0.2),
            Self::new("no_sun", 0.0, 0.1),
        ]
    }

    /// Sky factor for this scenario given the site's base factor, in `[0, 1]`.
    pub fn sky_factor(&self, base_factor: f64) -> f64 {
        (base_factor * self.irradiance_multiplier).clamp(0.0, 1.0)
    }
}

/// Profile readings and run flags for one timestep, fed to the dispatch policy.
#[derive(Debug, Clone)]
pub struct StepInput {
    /// Current simulation timestep index.
    pub timestep: usize,
    /// Hour of day in `[0, 24)`.
    pub hour_of_day: f64,
    /// Load demand (kW).
    pub load_kw: f64,
    /// Raw PV generation (kW, >= 0).
    pub pv_raw_kw: f64,
    /// Smoothed PV target (kW, >= 0).
    pub pv_target_kw: f64,
    /// Whether a PV plant is installed at all (peak > 0).
    pub pv_installed: bool,
    /// Whether the diesel tank still holds usable fuel.
    pub diesel_available: bool,
}

/// Dispatch decision for one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchDecision {
    /// PV power serving the load (kW), capped at raw PV.
    pub pv_to_load_kw: f64,
    /// Genset power serving the load (kW).
    pub diesel_to_load_kw: f64,
    /// Net battery power over the step (kW; positive=charge, negative=discharge).
    pub bess_net_kw: f64,
    /// Number of genset units committed.
    pub units_committed: usize,
    /// Whether the diurnal branch was taken.
    pub daylight: bool,
    /// Whether the battery was allowed to support the load.
    pub battery_can_help: bool,
}

/// Complete record of one simulation timestep.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Timestep index.
    pub timestep: usize,
    /// Simulation time in hours.
    pub time_hr: f64,
    /// Hour of day in `[0, 24)`.
    pub hour_of_day: f64,
    /// Load demand (kW).
    pub load_kw: f64,
    /// Raw PV generation (kW).
    pub pv_raw_kw: f64,
    /// Smoothed PV target (kW).
    pub pv_target_kw: f64,
    /// PV power serving the load (kW).
    pub pv_to_load_kw: f64,
    /// Genset power dispatched (kW).
    pub diesel_kw: f64,
    /// Genset units committed.
    pub units_committed: usize,
    /// Genset fuel burn rate (L/h).
    pub fuel_rate_lph: f64,
    /// Net battery power (kW; positive=charge, negative=discharge).
    pub battery_kw: f64,
    /// Battery stored energy after this step (kWh).
    pub soc_kwh: f64,
    /// Battery SOC after this step (%).
    pub soc_pct: f64,
    /// Diesel left in the tank after this step (L).
    pub fuel_remaining_l: f64,
    /// Whether the diurnal dispatch branch was taken.
    pub daylight: bool,
    /// Whether the battery was allowed to support the load.
    pub battery_can_help: bool,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({:>6.2}h) | load={:>7.2} kW  pv={:>7.2}/{:>7.2} kW  pv->load={:>7.2} kW | \
             diesel={:>7.2} kW ({} units) | bat={:>8.2} kW (SoC={:.1}%) | fuel={:.1} L",
            self.timestep,
            self.time_hr,
            self.load_kw,
            self.pv_raw_kw,
            self.pv_target_kw,
            self.pv_to_load_kw,
            self.diesel_kw,
            self.units_committed,
            self.battery_kw,
            self.soc_pct,
            self.fuel_remaining_l,
        )
    }
}
