//! Diesel genset fleet unit commitment.

/// Result of committing gensets against a diesel power target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commitment {
    /// Number of units started.
    pub units: usize,
    /// Per-unit loading used for the commitment (kW).
    pub per_unit_kw: f64,
    /// Power the committed units deliver toward the target (kW).
    pub power_kw: f64,
}

/// A fleet of identical diesel gensets.
///
/// Units are normally loaded at an efficient fraction of their rating. Full
/// rating is only used when the caller allows it and the target exceeds
/// what the whole fleet delivers at efficient loading.
#[derive(Debug, Clone)]
pub struct GensetFleet {
    /// Number of installed units.
    pub units: usize,
    /// Rated power per unit (kW).
    pub unit_rated_kw: f64,
    /// Efficient loading as a fraction of rating, in `(0, 1]`.
    pub efficient_loading: f64,
    /// Specific fuel consumption (L/kWh).
    pub sfc_l_per_kwh: f64,
}

impl GensetFleet {
    /// Creates a fleet.
    ///
    /// # Arguments
    ///
    /// * `units` - Installed units
    /// * `unit_rated_kw` - Rated power per unit (clamped to >= 0)
    /// * `efficient_loading` - Efficient loading fraction (clamped to `[0, 1]`)
    /// * `sfc_l_per_kwh` - Specific fuel consumption
    pub fn new(units: usize, unit_rated_kw: f64, efficient_loading: f64, sfc_l_per_kwh: f64) -> Self {
        Self {
            units,
            unit_rated_kw: unit_rated_kw.max(0.0),
            efficient_loading: efficient_loading.clamp(0.0, 1.0),
            sfc_l_per_kwh,
        }
    }

    /// Per-unit power at efficient loading (kW).
    pub fn efficient_unit_kw(&self) -> f64 {
        self.unit_rated_kw * self.efficient_loading
    }

    /// Whole-fleet power at efficient loading (kW).
    pub fn efficient_capacity_kw(&self) -> f64 {
        self.units as f64 * self.efficient_unit_kw()
    }

    /// Commits units against `target_kw`.
    ///
    /// With `allow_full_rating`, a target above the fleet's efficient capacity
    /// is served at full unit rating. A zero per-unit power commits the whole
    /// fleet.
    pub fn commit(&self, target_kw: f64, allow_full_rating: bool) -> Commitment {
        let target_kw = target_kw.max(0.0);
        let per_unit_kw = if allow_full_rating && target_kw > self.efficient_capacity_kw() {
            self.unit_rated_kw
        } else {
            self.efficient_unit_kw()
        };

        let units = if per_unit_kw > 0.0 {
            let needed = (target_kw / per_unit_kw).ceil();
            if needed >= self.units as f64 {
                self.units
            } else {
                needed as usize
            }
        } else {
            self.units
        };

        Commitment {
            units,
            per_unit_kw,
            power_kw: target_kw.min(units as f64 * per_unit_kw),
        }
    }

    /// Fuel burn rate at `power_kw` output (L/h).
    pub fn fuel_rate_lph(&self, power_kw: f64) -> f64 {
        power_kw.max(0.0) * self.sfc_l_per_kwh
    }
}
