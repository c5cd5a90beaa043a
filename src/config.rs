//! Scenario configuration loaded from TOML or built-in presets.

use std::fs;
use std::path::Path;

use serde::Deserialize;

pub use crate::error::ConfigError;

use crate::devices::load::REFERENCE_HOURLY_LOAD_KW;
use crate::sim::autonomy::AutonomySettings;
use crate::sim::engine::RunParams;
use crate::sim::policy::{PolicyParams, SocTier};
use crate::sim::sweep::SweepSettings;
use crate::sim::types::IrradianceScenario;

/// A complete microgrid scenario as read from a TOML file.
///
/// All fields have defaults matching the reference operating point. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon, seed, and noise.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Site load.
    #[serde(default)]
    pub load: LoadConfig,
    /// PV plant.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery storage.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Genset fleet.
    #[serde(default)]
    pub genset: GensetConfig,
    /// Dispatch policy parameters.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Autonomy comparison settings.
    #[serde(default)]
    pub autonomy: AutonomyConfig,
    /// Sizing sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Irradiance day types for autonomy and sweep runs.
    #[serde(default = "IrradianceScenario::reference_set")]
    pub scenarios: Vec<IrradianceScenario>,
}

/// Simulation horizon and randomness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Simulated horizon in days (must be > 0).
    pub days: usize,
    /// Seed for the run's random generator.
    pub seed: u64,
    /// Whether the PV profile carries bounded noise.
    pub use_noise: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 3,
            seed: 42,
            use_noise: true,
        }
    }
}

/// Site load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// 24 hourly anchors (kW), hour 0 first.
    pub hourly_kw: Vec<f64>,
    /// Load above which the emergency discharge floor applies (kW).
    pub emergency_threshold_kw: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            hourly_kw: REFERENCE_HOURLY_LOAD_KW.to_vec(),
            emergency_threshold_kw: 100.0,
        }
    }
}

/// PV plant parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Installed peak (kWp); zero means no PV plant.
    pub peak_kwp: f64,
    /// Sky openness in `[0, 1]`.
    pub irradiance_factor: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            peak_kwp: 450.0,
            irradiance_factor: 1.0,
        }
    }
}

/// Battery bank sizing and starting charge.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable bank capacity (kWh).
    pub capacity_kwh: f64,
    /// Rated charge/discharge power (kW).
    pub max_power_kw: f64,
    /// Initial state of charge (0.0–1.0).
    pub initial_soc: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 750.0,
            max_power_kw: 200.0,
            initial_soc: 0.38,
        }
    }
}

/// Genset fleet parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GensetConfig {
    /// Installed units.
    pub units: usize,
    /// Rated power per unit (kW).
    pub unit_rated_kw: f64,
    /// Efficient loading as a fraction of rating.
    pub efficient_loading: f64,
}

impl Default for GensetConfig {
    fn default() -> Self {
        Self {
            units: 10,
            unit_rated_kw: 20.0,
            efficient_loading: 0.8,
        }
    }
}

/// Dispatch policy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// PV share of load that holds diesel at its complementary minimum.
    pub diurnal_coverage_threshold: f64,
    /// Night-time `(soc_above_pct, diesel_share)` rows, highest SOC first.
    pub nocturnal_tiers: Vec<SocTier>,
    /// Night-time share when no tier matches.
    pub nocturnal_fallback_share: f64,
    /// SOC (%) above which a partial PV day leans on the battery.
    pub partial_pv_soc_above_pct: f64,
    /// Battery share of the partial-PV deficit.
    pub partial_pv_battery_share: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let p = PolicyParams::default();
        Self {
            diurnal_coverage_threshold: p.diurnal_coverage_threshold,
            nocturnal_tiers: p.nocturnal_tiers,
            nocturnal_fallback_share: p.nocturnal_fallback_share,
            partial_pv_soc_above_pct: p.partial_pv_soc_above_pct,
            partial_pv_battery_share: p.partial_pv_battery_share,
        }
    }
}

/// Autonomy comparison parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutonomyConfig {
    /// Horizon per scenario (days).
    pub days: usize,
    /// Initial SOC fraction.
    pub initial_soc: f64,
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        let s = AutonomySettings::default();
        Self {
            days: s.days,
            initial_soc: s.initial_soc,
        }
    }
}

/// Sizing sweep parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub pv_sizes_kwp: Vec<f64>,
    pub bess_sizes_kwh: Vec<f64>,
    pub days_per_year: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let s = SweepSettings::default();
        Self {
            pv_sizes_kwp: s.pv_sizes_kwp,
            bess_sizes_kwh: s.bess_sizes_kwh,
            days_per_year: s.days_per_year,
        }
    }
}

fn push_if(errors: &mut Vec<ConfigError>, failed: bool, field: &str, message: &str) {
    if failed {
        errors.push(ConfigError::new(field, message));
    }
}

fn in_unit_range(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

/// Finite and `>= 0`; false for NaN.
fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Finite and `> 0`; false for NaN.
fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl ScenarioConfig {
    /// Returns the baseline scenario (reference operating point).
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            load: LoadConfig::default(),
            solar: SolarConfig::default(),
            battery: BatteryConfig::default(),
            genset: GensetConfig::default(),
            policy: PolicyConfig::default(),
            autonomy: AutonomyConfig::default(),
            sweep: SweepConfig::default(),
            scenarios: IrradianceScenario::reference_set(),
        }
    }

    /// Returns the diesel-only preset: no PV plant, battery idle.
    pub fn diesel_only() -> Self {
        Self {
            solar: SolarConfig {
                peak_kwp: 0.0,
                ..SolarConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the high-coverage preset: PV must cover 85% before diesel
    /// drops to its 15% minimum.
    pub fn high_coverage() -> Self {
        Self {
            policy: PolicyConfig {
                diurnal_coverage_threshold: 0.85,
                ..PolicyConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the cloudy-week preset: seven days at half irradiance.
    pub fn cloudy_week() -> Self {
        Self {
            simulation: SimulationConfig {
                days: 7,
                ..SimulationConfig::default()
            },
            solar: SolarConfig {
                irradiance_factor: 0.5,
                ..SolarConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Names accepted by [`ScenarioConfig::from_preset`].
    pub const PRESETS: &[&str] = &["baseline", "diesel_only", "high_coverage", "cloudy_week"];

    /// Looks up a built-in preset by name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "diesel_only" => Ok(Self::diesel_only()),
            "high_coverage" => Ok(Self::high_coverage()),
            "cloudy_week" => Ok(Self::cloudy_week()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses scenario TOML text; omitted sections fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Checks every section and collects all problems found; empty means valid.
    ///
    /// Returns an empty vector if configuration is valid. A zero battery
    /// capacity is accepted; the battery model floors it.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let e = &mut errors;

        push_if(e, self.simulation.days == 0, "simulation.days", "must be > 0");

        let load = &self.load;
        if load.hourly_kw.len() != 24 {
            e.push(ConfigError::new(
                "load.hourly_kw",
                format!("must have 24 values, got {}", load.hourly_kw.len()),
            ));
        }
        push_if(
            e,
            load.hourly_kw.iter().any(|v| !non_negative(*v)),
            "load.hourly_kw",
            "values must be finite and >= 0",
        );
        push_if(
            e,
            !non_negative(load.emergency_threshold_kw),
            "load.emergency_threshold_kw",
            "must be >= 0",
        );

        push_if(e, !non_negative(self.solar.peak_kwp), "solar.peak_kwp", "must be >= 0");
        push_if(
            e,
            !in_unit_range(self.solar.irradiance_factor),
            "solar.irradiance_factor",
            "must be in [0.0, 1.0]",
        );

        let bat = &self.battery;
        push_if(e, !non_negative(bat.capacity_kwh), "battery.capacity_kwh", "must be >= 0");
        push_if(e, !positive(bat.max_power_kw), "battery.max_power_kw", "must be > 0");
        push_if(
            e,
            !in_unit_range(bat.initial_soc),
            "battery.initial_soc",
            "must be in [0.0, 1.0]",
        );

        let genset = &self.genset;
        push_if(e, genset.units == 0, "genset.units", "must be >= 1");
        push_if(e, !positive(genset.unit_rated_kw), "genset.unit_rated_kw", "must be > 0");
        push_if(
            e,
            !(genset.efficient_loading > 0.0 && genset.efficient_loading <= 1.0),
            "genset.efficient_loading",
            "must be in (0.0, 1.0]",
        );

        let pol = &self.policy;
        push_if(
            e,
            !(pol.diurnal_coverage_threshold > 0.0 && pol.diurnal_coverage_threshold <= 1.0),
            "policy.diurnal_coverage_threshold",
            "must be in (0.0, 1.0]",
        );
        push_if(
            e,
            pol.nocturnal_tiers.iter().any(|t| !in_unit_range(t.diesel_share)),
            "policy.nocturnal_tiers",
            "diesel_share must be in [0.0, 1.0]",
        );
        push_if(
            e,
            pol.nocturnal_tiers.iter().any(|t| !t.soc_above_pct.is_finite())
                || pol
                    .nocturnal_tiers
                    .windows(2)
                    .any(|w| w[0].soc_above_pct <= w[1].soc_above_pct),
            "policy.nocturnal_tiers",
            "soc_above_pct must be finite and strictly decreasing",
        );
        push_if(
            e,
            !in_unit_range(pol.nocturnal_fallback_share),
            "policy.nocturnal_fallback_share",
            "must be in [0.0, 1.0]",
        );
        push_if(
            e,
            !(0.0..=100.0).contains(&pol.partial_pv_soc_above_pct),
            "policy.partial_pv_soc_above_pct",
            "must be in [0, 100]",
        );
        push_if(
            e,
            !in_unit_range(pol.partial_pv_battery_share),
            "policy.partial_pv_battery_share",
            "must be in [0.0, 1.0]",
        );

        push_if(e, self.autonomy.days == 0, "autonomy.days", "must be > 0");
        push_if(
            e,
            !in_unit_range(self.autonomy.initial_soc),
            "autonomy.initial_soc",
            "must be in [0.0, 1.0]",
        );

        let sw = &self.sweep;
        push_if(
            e,
            sw.pv_sizes_kwp.iter().any(|v| !non_negative(*v)),
            "sweep.pv_sizes_kwp",
            "values must be >= 0",
        );
        push_if(
            e,
            sw.bess_sizes_kwh.iter().any(|v| !non_negative(*v)),
            "sweep.bess_sizes_kwh",
            "values must be >= 0",
        );
        push_if(e, !positive(sw.days_per_year), "sweep.days_per_year", "must be > 0");

        push_if(e, self.scenarios.is_empty(), "scenarios", "must not be empty");
        for (i, s) in self.scenarios.iter().enumerate() {
            if s.name.trim().is_empty() {
                e.push(ConfigError::new(format!("scenarios[{i}].name"), "must not be empty"));
            }
            if !non_negative(s.irradiance_multiplier) {
                e.push(ConfigError::new(
                    format!("scenarios[{i}].irradiance_multiplier"),
                    "must be >= 0",
                ));
            }
            if !non_negative(s.weight) {
                e.push(ConfigError::new(format!("scenarios[{i}].weight"), "must be >= 0"));
            }
        }
        push_if(
            e,
            !self.scenarios.is_empty() && self.scenarios.iter().map(|s| s.weight).sum::<f64>() <= 0.0,
            "scenarios",
            "weights must sum to > 0",
        );

        errors
    }

    /// Policy parameters for this scenario.
    pub fn policy_params(&self) -> PolicyParams {
        PolicyParams {
            nocturnal_tiers: self.policy.nocturnal_tiers.clone(),
            nocturnal_fallback_share: self.policy.nocturnal_fallback_share,
            diurnal_coverage_threshold: self.policy.diurnal_coverage_threshold,
            partial_pv_soc_above_pct: self.policy.partial_pv_soc_above_pct,
            partial_pv_battery_share: self.policy.partial_pv_battery_share,
            emergency_load_kw: self.load.emergency_threshold_kw,
        }
    }

    /// Run parameters for the main simulation.
    pub fn run_params(&self) -> RunParams {
        RunParams {
            days: self.simulation.days,
            seed: self.simulation.seed,
            use_noise: self.simulation.use_noise,
            hourly_load_kw: self.load.hourly_kw.clone(),
            pv_peak_kwp: self.solar.peak_kwp,
            irradiance_factor: self.solar.irradiance_factor,
            battery_capacity_kwh: self.battery.capacity_kwh,
            battery_max_power_kw: self.battery.max_power_kw,
            initial_soc: self.battery.initial_soc,
            genset_units: self.genset.units,
            genset_rated_kw: self.genset.unit_rated_kw,
            genset_efficient_loading: self.genset.efficient_loading,
            policy: self.policy_params(),
        }
    }

    pub fn autonomy_settings(&self) -> AutonomySettings {
        AutonomySettings {
            days: self.autonomy.days,
            initial_soc: self.autonomy.initial_soc,
        }
    }

    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            pv_sizes_kwp: self.sweep.pv_sizes_kwp.clone(),
            bess_sizes_kwh: self.sweep.bess_sizes_kwh.clone(),
            days_per_year: self.sweep.days_per_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_reference_operating_point() {
        let p = ScenarioConfig::baseline().run_params();
        assert_eq!(p.days, 3);
        assert_eq!(p.pv_peak_kwp, 450.0);
        assert_eq!(p.battery_capacity_kwh, 750.0);
        assert_eq!(p.battery_max_power_kw, 200.0);
        assert_eq!(p.initial_soc, 0.38);
        assert_eq!(p.genset_units, 10);
        assert_eq!(p.hourly_load_kw[18], 150.0);
        assert_eq!(p.policy.emergency_load_kw, 100.0);
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn presets_differ_where_named() {
        assert_eq!(ScenarioConfig::diesel_only().solar.peak_kwp, 0.0);
        assert_eq!(
            ScenarioConfig::high_coverage().policy.diurnal_coverage_threshold,
            0.85
        );
        let cloudy = ScenarioConfig::cloudy_week();
        assert_eq!(cloudy.simulation.days, 7);
        assert_eq!(cloudy.solar.irradiance_factor, 0.5);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
days = 2
seed = 99
use_noise = false

[solar]
peak_kwp = 300.0
irradiance_factor = 0.8

[battery]
capacity_kwh = 500.0
max_power_kw = 150.0
initial_soc = 0.5

[genset]
units = 4
unit_rated_kw = 50.0
efficient_loading = 0.75

[policy]
diurnal_coverage_threshold = 0.85
nocturnal_fallback_share = 0.7
nocturnal_tiers = [
    { soc_above_pct = 70.0, diesel_share = 0.3 },
    { soc_above_pct = 50.0, diesel_share = 0.5 },
]

[[scenarios]]
name = "clear"
irradiance_multiplier = 1.0
weight = 0.4

[[scenarios]]
name = "dark"
irradiance_multiplier = 0.0
weight = 0.2
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.days), Some(2));
        assert_eq!(cfg.as_ref().map(|c| c.genset.units), Some(4));
        assert_eq!(cfg.as_ref().map(|c| c.policy.nocturnal_tiers.len()), Some(2));
        assert_eq!(cfg.as_ref().map(|c| c.scenarios.len()), Some(2));
        assert!(cfg.as_ref().map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 100.0
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.days), Some(3));
        assert_eq!(cfg.as_ref().map(|c| c.solar.peak_kwp), Some(450.0));
        assert_eq!(cfg.as_ref().map(|c| c.scenarios.len()), Some(4));
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = 0;
        cfg.battery.initial_soc = 1.5;
        cfg.genset.units = 0;
        cfg.load.hourly_kw.pop();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        for f in ["simulation.days", "battery.initial_soc", "genset.units", "load.hourly_kw"] {
            assert!(fields.iter().any(|x| x == f), "missing {f}: {fields:?}");
        }
    }

    #[test]
    fn zero_capacity_is_accepted_negative_rejected() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.capacity_kwh = 0.0;
        assert!(cfg.validate().is_empty());
        cfg.battery.capacity_kwh = -1.0;
        assert!(cfg.validate().iter().any(|e| e.field == "battery.capacity_kwh"));
    }

    #[test]
    fn nan_values_are_rejected() {
        let toml = r#"
[load]
emergency_threshold_kw = nan
[solar]
peak_kwp = nan
irradiance_factor = nan
[battery]
capacity_kwh = nan
max_power_kw = nan
initial_soc = nan
[genset]
unit_rated_kw = nan
efficient_loading = nan
[sweep]
days_per_year = nan
pv_sizes_kwp = [0.0, nan]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "nan is valid TOML: {:?}", cfg.err());
        let fields: Vec<String> = cfg
            .as_ref()
            .map(|c| c.validate())
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.field)
            .collect();
        for f in [
            "load.emergency_threshold_kw",
            "solar.peak_kwp",
            "solar.irradiance_factor",
            "battery.capacity_kwh",
            "battery.max_power_kw",
            "battery.initial_soc",
            "genset.unit_rated_kw",
            "genset.efficient_loading",
            "sweep.days_per_year",
            "sweep.pv_sizes_kwp",
        ] {
            assert!(fields.iter().any(|x| x == f), "{f} accepted nan: {fields:?}");
        }
    }

    #[test]
    fn infinite_and_nan_policy_values_are_rejected() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.max_power_kw = f64::INFINITY;
        cfg.load.hourly_kw[3] = f64::NAN;
        cfg.policy.nocturnal_tiers[1].soc_above_pct = f64::NAN;
        cfg.policy.diurnal_coverage_threshold = f64::NAN;
        cfg.scenarios[0].weight = f64::NAN;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        for f in [
            "battery.max_power_kw",
            "load.hourly_kw",
            "policy.nocturnal_tiers",
            "policy.diurnal_coverage_threshold",
            "scenarios[0].weight",
        ] {
            assert!(fields.iter().any(|x| x == f), "missing {f}: {fields:?}");
        }
    }

    #[test]
    fn unordered_tiers_rejected() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.policy.nocturnal_tiers.reverse();
        assert!(cfg.validate().iter().any(|e| e.field == "policy.nocturnal_tiers"));
    }

    #[test]
    fn zero_scenario_weights_rejected() {
        let mut cfg = ScenarioConfig::baseline();
        for s in &mut cfg.scenarios {
            s.weight = 0.0;
        }
        assert!(cfg.validate().iter().any(|e| e.field == "scenarios"));
    }
}
