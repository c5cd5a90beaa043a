use crate::sim::types::ModelConstants;

/// Smallest capacity the model accepts, so SOC percentages stay finite.
pub const MIN_CAPACITY_KWH: f64 = 1e-6;

/// A battery energy storage system tracked by stored energy.
///
/// `Battery` owns the state of charge and enforces the charge/discharge
/// power path losses, the SOC ceiling, the discharge floors chosen by the
/// caller, and a charge ramp-down band just below the ceiling.
///
/// # Power Flow Convention
/// - Positive power: Charging (drawn from PV or diesel)
/// - Negative power: Discharging (delivered to the load)
#[derive(Debug, Clone)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Stored energy in kilowatt-hours.
    pub soc_kwh: f64,

    /// Rated charge/discharge power in kilowatts.
    pub max_power_kw: f64,

    /// Charging efficiency (0..1.0).
    pub eta_c: f64,

    /// Discharging efficiency (0..1.0).
    pub eta_d: f64,

    /// SOC ceiling (%).
    soc_max_pct: f64,

    /// SOC at which the charge ramp-down begins (%).
    ramp_start_pct: f64,

    /// Duration of one timestep in hours.
    dt_hours: f64,
}

impl Battery {
    /// Creates a new battery.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Battery capacity in kWh (floored at [`MIN_CAPACITY_KWH`])
    /// * `initial_soc` - Initial state of charge as a fraction (clamped to 0.0..=1.0)
    /// * `max_power_kw` - Rated power in kW (clamped to >= 0)
    /// * `constants` - Model constants (efficiency, ceiling, ramp band, resolution)
    pub fn new(
        capacity_kwh: f64,
        initial_soc: f64,
        max_power_kw: f64,
        constants: &ModelConstants,
    ) -> Self {
        let capacity_kwh = capacity_kwh.max(MIN_CAPACITY_KWH);
        Self {
            capacity_kwh,
            soc_kwh: capacity_kwh * initial_soc.clamp(0.0, 1.0),
            max_power_kw: max_power_kw.max(0.0),
            eta_c: constants.charge_efficiency(),
            eta_d: constants.discharge_efficiency(),
            soc_max_pct: constants.soc_max_pct,
            ramp_start_pct: constants.soc_ramp_start_pct,
            dt_hours: 1.0 / constants.steps_per_hour as f64,
        }
    }

    /// State of charge as a percentage of capacity.
    pub fn soc_pct(&self) -> f64 {
        self.soc_kwh / self.capacity_kwh * 100.0
    }

    /// Stored energy at the SOC ceiling (kWh).
    pub fn ceiling_kwh(&self) -> f64 {
        self.capacity_kwh * self.soc_max_pct / 100.0
    }

    /// Charge throttle in `[0, 1]`.
    ///
    /// 1.0 below the ramp start, decaying linearly to 0.0 at the ceiling.
    pub fn charge_ramp_factor(&self) -> f64 {
        let soc = self.soc_pct();
        if soc <= self.ramp_start_pct {
            return 1.0;
        }
        let band = self.soc_max_pct - self.ramp_start_pct;
        if band <= 0.0 {
            return 0.0;
        }
        ((self.soc_max_pct - soc) / band).clamp(0.0, 1.0)
    }

    /// Charges with the current ramp factor.
    ///
    /// Returns the electrical power drawn from the source (kW, >= 0).
    pub fn try_charge(&mut self, target_kw: f64, budget_kw: f64) -> f64 {
        let ramp = self.charge_ramp_factor();
        self.charge_scaled(target_kw, budget_kw, ramp)
    }

    /// Charges with an explicit ramp factor.
    ///
    /// Stored energy is `min(target, budget) * ramp * dt * eta_c`, capped by
    /// the headroom to the ceiling. Returns the electrical power drawn from
    /// the source (kW, >= 0).
    pub fn charge_scaled(&mut self, target_kw: f64, budget_kw: f64, ramp: f64) -> f64 {
        let power_kw = target_kw.min(budget_kw).max(0.0) * ramp.clamp(0.0, 1.0);
        let headroom_kwh = (self.ceiling_kwh() - self.soc_kwh).max(0.0);
        let added_kwh = (power_kw * self.dt_hours * self.eta_c).min(headroom_kwh);
        if added_kwh <= 0.0 {
            return 0.0;
        }
        self.soc_kwh += added_kwh;
        added_kwh / self.eta_c / self.dt_hours
    }

    /// Discharges toward `target_kw` without going below `floor_pct`.
    ///
    /// Returns the power delivered to the load (kW, >= 0).
    pub fn try_discharge(&mut self, target_kw: f64, floor_pct: f64) -> f64 {
        let floor_kwh = self.capacity_kwh * floor_pct / 100.0;
        let available_kwh = (self.soc_kwh - floor_kwh).max(0.0);
        let removed_kwh = (target_kw.max(0.0) * self.dt_hours / self.eta_d).min(available_kwh);
        if removed_kwh <= 0.0 {
            return 0.0;
        }
        self.soc_kwh = (self.soc_kwh - removed_kwh).max(0.0);
        removed_kwh * self.eta_d / self.dt_hours
    }
}
