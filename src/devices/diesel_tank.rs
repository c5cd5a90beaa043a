use crate::sim::types::ModelConstants;

/// Fuel drawn by one step of genset operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelBurn {
    /// Liters removed from the tank.
    pub liters: f64,
    /// Genset power actually served (kW); zero once the tank is empty.
    pub dispatched_kw: f64,
}

/// A diesel fuel reserve shared by the whole genset fleet.
///
/// The tank starts full. Once the level falls to the empty threshold it
/// serves nothing more, and the simulated day of that first crossing is
/// kept as the autonomy endpoint.
#[derive(Debug, Clone)]
pub struct DieselTank {
    /// Tank capacity (L).
    pub capacity_l: f64,
    /// Fuel left (L), in `[0, capacity_l]`.
    pub liters_remaining: f64,
    sfc_l_per_kwh: f64,
    empty_threshold_l: f64,
    exhausted_at_day: Option<f64>,
}

impl DieselTank {
    /// Creates a full tank from the model constants.
    pub fn new(constants: &ModelConstants) -> Self {
        Self::with_capacity(
            constants.tank_capacity_l,
            constants.sfc_l_per_kwh,
            constants.tank_empty_threshold_l,
        )
    }

    /// Creates a full tank with explicit parameters.
    pub fn with_capacity(capacity_l: f64, sfc_l_per_kwh: f64, empty_threshold_l: f64) -> Self {
        let capacity_l = capacity_l.max(0.0);
        Self {
            capacity_l,
            liters_remaining: capacity_l,
            sfc_l_per_kwh: sfc_l_per_kwh.max(0.0),
            empty_threshold_l: empty_threshold_l.max(0.0),
            exhausted_at_day: None,
        }
    }

    /// Whether the level is at or below the empty threshold.
    pub fn is_exhausted(&self) -> bool {
        self.liters_remaining <= self.empty_threshold_l
    }

    /// Day of the first step that found the tank empty, if any.
    pub fn exhausted_at_day(&self) -> Option<f64> {
        self.exhausted_at_day
    }

    /// Liters burned so far.
    pub fn consumed_l(&self) -> f64 {
        self.capacity_l - self.liters_remaining
    }

    /// Burns fuel for `power_kw` over `dt_hours`.
    ///
    /// An empty tank burns nothing, serves zero power, drops any residue
    /// below the threshold, and records `day` on the first such call.
    pub fn consume(&mut self, power_kw: f64, dt_hours: f64, day: f64) -> FuelBurn {
        if self.is_exhausted() {
            if self.exhausted_at_day.is_none() {
                self.exhausted_at_day = Some(day);
                self.liters_remaining = 0.0;
                tracing::info!(day, "diesel tank exhausted");
            }
            return FuelBurn {
                liters: 0.0,
                dispatched_kw: 0.0,
            };
        }

        let power_kw = power_kw.max(0.0);
        let wanted = power_kw * self.sfc_l_per_kwh * dt_hours;
        let liters = wanted.min(self.liters_remaining);
        self.liters_remaining = (self.liters_remaining - wanted).max(0.0);
        FuelBurn {
            liters,
            dispatched_kw: power_kw,
        }
    }
}
