//! Rule-based PV / battery / diesel dispatch policy.
//!
//! Each step runs in four stages: PV ramp smoothing through the battery,
//! selection of the diesel target, genset commitment with a battery top-up,
//! and accounting. The policy itself is stateless; the only state it touches
//! is the battery passed in by the driver.

use serde::{Deserialize, Serialize};

use crate::devices::{Battery, GensetFleet};

use super::types::{DispatchDecision, ModelConstants, StepInput};

/// One row of the night-time diesel share table.
///
/// The row applies when the battery SOC is strictly above `soc_above_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocTier {
    /// SOC threshold (%), exclusive.
    pub soc_above_pct: f64,
    /// Share of load assigned to diesel when the row applies.
    pub diesel_share: f64,
}

/// Tunable policy parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyParams {
    /// Night-time tiers, evaluated top-down; the first match wins.
    pub nocturnal_tiers: Vec<SocTier>,
    /// Night-time share when no tier matches.
    pub nocturnal_fallback_share: f64,
    /// Fraction of load the PV target must cover to hold diesel at its
    /// complementary minimum share.
    pub diurnal_coverage_threshold: f64,
    /// SOC (%) above which a partial PV day leans on the battery.
    pub partial_pv_soc_above_pct: f64,
    /// Share of the partial-PV deficit assigned to the battery.
    pub partial_pv_battery_share: f64,
    /// Load (kW) above which the emergency discharge floor applies.
    pub emergency_load_kw: f64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            nocturnal_tiers: vec![
                SocTier {
                    soc_above_pct: 75.0,
                    diesel_share: 0.25,
                },
                SocTier {
                    soc_above_pct: 60.0,
                    diesel_share: 0.40,
                },
                SocTier {
                    soc_above_pct: 50.0,
                    diesel_share: 0.50,
                },
            ],
            nocturnal_fallback_share: 0.60,
            diurnal_coverage_threshold: 0.75,
            partial_pv_soc_above_pct: 75.0,
            partial_pv_battery_share: 0.75,
            emergency_load_kw: 100.0,
        }
    }
}

/// Which daytime rule applied to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiurnalRule {
    /// PV target covers the threshold share of load; diesel holds its minimum.
    Covered,
    /// PV is partial and the battery is well charged; split the deficit.
    PartialWithBattery,
    /// Diesel covers whatever PV does not.
    DieselFill,
}

/// Power targets chosen before genset commitment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Targets {
    diesel_kw: f64,
    pv_to_load_kw: f64,
    battery_kw: f64,
    pv_excess_kw: f64,
    allow_full_rating: bool,
}

/// Per-step dispatch decision function.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    params: PolicyParams,
    soc_min_normal_pct: f64,
    soc_min_emergency_pct: f64,
    smoothing_hours: (f64, f64),
    daylight_hours: (f64, f64),
    charge_budget_fraction: f64,
}

impl DispatchPolicy {
    /// Creates a policy from its parameters and the model constants.
    pub fn new(params: PolicyParams, constants: &ModelConstants) -> Self {
        Self {
            params,
            soc_min_normal_pct: constants.soc_min_normal_pct,
            soc_min_emergency_pct: constants.soc_min_emergency_pct,
            smoothing_hours: (constants.smoothing_start_hour, constants.smoothing_end_hour),
            daylight_hours: (constants.daylight_start_hour, constants.daylight_end_hour),
            charge_budget_fraction: constants.charge_budget_fraction,
        }
    }

    fn is_emergency(&self, load_kw: f64) -> bool {
        load_kw > self.params.emergency_load_kw
    }

    /// Discharge floor (%) for ramp smoothing at this load.
    pub fn discharge_floor_pct(&self, load_kw: f64) -> f64 {
        if self.is_emergency(load_kw) {
            self.soc_min_emergency_pct
        } else {
            self.soc_min_normal_pct
        }
    }

    /// Whether the battery may support the load.
    ///
    /// Always false without a PV plant, so the battery never cycles.
    pub fn battery_can_help(&self, load_kw: f64, soc_pct: f64, pv_installed: bool) -> bool {
        if !pv_installed {
            return false;
        }
        soc_pct > self.soc_min_normal_pct
            || (self.is_emergency(load_kw) && soc_pct > self.soc_min_emergency_pct)
    }

    /// Whether the step takes the diurnal branch.
    pub fn is_daylight(&self, hour_of_day: f64, pv_raw_kw: f64) -> bool {
        let (start, end) = self.daylight_hours;
        hour_of_day >= start && hour_of_day < end && pv_raw_kw > 0.0
    }

    fn in_smoothing_window(&self, hour_of_day: f64) -> bool {
        let (start, end) = self.smoothing_hours;
        hour_of_day >= start && hour_of_day < end
    }

    /// Night-time diesel share of load for a battery that can help.
    pub fn nocturnal_diesel_share(&self, soc_pct: f64) -> f64 {
        self.params
            .nocturnal_tiers
            .iter()
            .find(|tier| soc_pct > tier.soc_above_pct)
            .map_or(self.params.nocturnal_fallback_share, |tier| tier.diesel_share)
    }

    /// Daytime rule for the given PV target, load, and SOC.
    pub fn diurnal_rule(&self, pv_target_kw: f64, load_kw: f64, soc_pct: f64) -> DiurnalRule {
        if pv_target_kw >= load_kw * self.params.diurnal_coverage_threshold {
            DiurnalRule::Covered
        } else if pv_target_kw > 0.0 && soc_pct > self.params.partial_pv_soc_above_pct {
            DiurnalRule::PartialWithBattery
        } else {
            DiurnalRule::DieselFill
        }
    }

    fn nocturnal_targets(&self, load_kw: f64, soc_pct: f64, can_help: bool) -> Targets {
        let share = if can_help {
            self.nocturnal_diesel_share(soc_pct)
        } else {
            1.0
        };
        Targets {
            diesel_kw: share * load_kw,
            pv_to_load_kw: 0.0,
            battery_kw: 0.0,
            pv_excess_kw: 0.0,
            allow_full_rating: !can_help,
        }
    }

    fn diurnal_targets(&self, input: &StepInput, soc_pct: f64) -> Targets {
        let load_kw = input.load_kw;
        let pv_target_kw = input.pv_target_kw;
        match self.diurnal_rule(pv_target_kw, load_kw, soc_pct) {
            DiurnalRule::Covered => {
                let coverage = self.params.diurnal_coverage_threshold;
                let pv_to_load_kw = coverage * load_kw;
                Targets {
                    diesel_kw: (1.0 - coverage) * load_kw,
                    pv_to_load_kw,
                    battery_kw: 0.0,
                    pv_excess_kw: (input.pv_raw_kw - pv_to_load_kw).max(0.0),
                    allow_full_rating: false,
                }
            }
            DiurnalRule::PartialWithBattery => {
                let deficit = load_kw - pv_target_kw;
                let battery_share = self.params.partial_pv_battery_share;
                Targets {
                    diesel_kw: (1.0 - battery_share) * deficit,
                    pv_to_load_kw: pv_target_kw,
                    battery_kw: battery_share * deficit,
                    pv_excess_kw: 0.0,
                    allow_full_rating: false,
                }
            }
            DiurnalRule::DieselFill => Targets {
                diesel_kw: load_kw - pv_target_kw,
                pv_to_load_kw: pv_target_kw,
                battery_kw: 0.0,
                pv_excess_kw: 0.0,
                allow_full_rating: false,
            },
        }
    }

    /// Decides one step and applies the battery transactions it implies.
    ///
    /// # Arguments
    ///
    /// * `input` - Load, PV, and run flags for this step
    /// * `battery` - Battery state, mutated by this step's transactions
    /// * `fleet` - Genset fleet used for unit commitment
    pub fn dispatch(
        &self,
        input: &StepInput,
        battery: &mut Battery,
        fleet: &GensetFleet,
    ) -> DispatchDecision {
        let load_kw = input.load_kw;
        let ramp = battery.charge_ramp_factor();
        let mut charge_budget_kw = battery.max_power_kw * self.charge_budget_fraction;
        let mut discharge_budget_kw = battery.max_power_kw;
        let mut bess_net_kw = 0.0;

        // A. PV ramp smoothing
        if self.in_smoothing_window(input.hour_of_day) {
            let diff_kw = input.pv_raw_kw - input.pv_target_kw;
            if diff_kw > 0.0 {
                let drawn = battery.charge_scaled(diff_kw, charge_budget_kw, ramp);
                charge_budget_kw -= drawn;
                bess_net_kw += drawn;
            } else if diff_kw < 0.0 {
                let floor = self.discharge_floor_pct(load_kw);
                let delivered = battery.try_discharge((-diff_kw).min(discharge_budget_kw), floor);
                discharge_budget_kw -= delivered;
                bess_net_kw -= delivered;
            }
        }

        // B. Target selection
        let soc_pct = battery.soc_pct();
        let can_help = self.battery_can_help(load_kw, soc_pct, input.pv_installed);
        let daylight = self.is_daylight(input.hour_of_day, input.pv_raw_kw);
        let mut targets = if daylight {
            self.diurnal_targets(input, soc_pct)
        } else {
            self.nocturnal_targets(load_kw, soc_pct, can_help)
        };
        if !input.diesel_available {
            targets.diesel_kw = 0.0;
        }

        // C. Unit commitment and battery top-up
        let commitment = fleet.commit(targets.diesel_kw, targets.allow_full_rating);
        let diesel_kw = commitment.power_kw;
        let battery_request_kw = if daylight {
            targets
                .battery_kw
                .max(load_kw - targets.pv_to_load_kw - diesel_kw)
        } else if can_help {
            (load_kw - diesel_kw).min(discharge_budget_kw)
        } else {
            0.0
        };

        // D. Accounting
        if targets.pv_excess_kw > 0.0 && input.hour_of_day < self.daylight_hours.1 {
            bess_net_kw += battery.charge_scaled(targets.pv_excess_kw, charge_budget_kw, ramp);
        }
        if battery_request_kw > 0.0 {
            bess_net_kw -= battery.try_discharge(
                battery_request_kw.min(discharge_budget_kw),
                self.soc_min_emergency_pct,
            );
        }

        DispatchDecision {
            pv_to_load_kw: targets.pv_to_load_kw.min(input.pv_raw_kw),
            diesel_to_load_kw: diesel_kw,
            bess_net_kw,
            units_committed: commitment.units,
            daylight,
            battery_can_help: can_help,
        }
    }
}
