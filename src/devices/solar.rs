use rand::rngs::StdRng;

use crate::devices::types::{ProfileSource, gaussian_noise};
use crate::profile::tile;
use crate::sim::types::{ModelConstants, SimConfig};

/// Hour-of-day irradiance shape, as fractions of the scaled PV peak.
///
/// The table is sparse: only the listed hours are defined. Between two
/// consecutive defined hours the factor is linearly interpolated; within the
/// last defined hour the factor is held; elsewhere it is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IrradianceTable {
    points: Vec<(u32, f64)>,
}

impl IrradianceTable {
    /// Creates a table from `(hour, factor)` points. Points are sorted by hour
    /// and factors clamped to `[0, 1]`.
    pub fn new(mut points: Vec<(u32, f64)>) -> Self {
        points.sort_by_key(|&(hour, _)| hour);
        points.dedup_by_key(|&mut (hour, _)| hour);
        for (_, factor) in &mut points {
            *factor = factor.clamp(0.0, 1.0);
        }
        Self { points }
    }

    fn value_at_hour(&self, hour: u32) -> Option<f64> {
        self.points
            .iter()
            .find_map(|&(h, v)| if h == hour { Some(v) } else { None })
    }

    /// Irradiance factor at `hour_of_day`, or `None` outside the defined range.
    pub fn factor(&self, hour_of_day: f64) -> Option<f64> {
        if hour_of_day < 0.0 {
            return None;
        }
        let base = hour_of_day.floor() as u32;
        let start = self.value_at_hour(base)?;
        match self.value_at_hour(base + 1) {
            Some(end) => Some(start + (end - start) * (hour_of_day - base as f64)),
            None => Some(start),
        }
    }
}

impl Default for IrradianceTable {
    fn default() -> Self {
        Self::new(vec![
            (6, 0.1),
            (7, 0.3),
            (8, 0.5),
            (9, 0.65),
            (10, 0.72),
            (11, 0.75),
            (12, 0.73),
            (13, 0.68),
            (14, 0.58),
            (15, 0.45),
            (16, 0.28),
            (17, 0.1),
            (18, 0.0),
        ])
    }
}

/// Bounded multiplicative noise on the PV shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvNoise {
    /// Standard deviation of the Gaussian multiplier.
    pub std_dev: f64,
    /// Absolute clip on the multiplier offset.
    pub clip: f64,
}

impl PvNoise {
    fn sample(&self, rng: &mut StdRng) -> f64 {
        1.0 + gaussian_noise(rng, self.std_dev).clamp(-self.clip, self.clip)
    }
}

/// A PV generator that shapes a daily profile from an irradiance table.
///
/// The scaled peak is `peak_kwp * derate * irradiance_factor`. One
/// representative day is built at the run's resolution and tiled over the
/// horizon.
#[derive(Debug, Clone)]
pub struct SolarProfileGenerator {
    /// Installed PV peak power (kWp).
    pub peak_kwp: f64,
    /// Sky openness in `[0, 1]` (1 = clear sky, 0 = no sun).
    pub irradiance_factor: f64,
    /// PV system derate.
    pub derate: f64,
    /// Hourly irradiance shape.
    pub table: IrradianceTable,
    /// Optional noise on the shape; `None` gives a smooth profile.
    pub noise: Option<PvNoise>,
}

impl SolarProfileGenerator {
    /// Creates a PV generator.
    ///
    /// # Arguments
    ///
    /// * `peak_kwp` - Installed peak power (kWp, clamped to >= 0)
    /// * `irradiance_factor` - Sky openness (clamped to `[0, 1]`)
    /// * `use_noise` - Whether to perturb the shape with bounded noise
    /// * `constants` - Model constants (derate, table, noise parameters)
    pub fn new(
        peak_kwp: f64,
        irradiance_factor: f64,
        use_noise: bool,
        constants: &ModelConstants,
    ) -> Self {
        let noise = use_noise.then_some(PvNoise {
            std_dev: constants.pv_noise_std,
            clip: constants.pv_noise_clip,
        });
        Self {
            peak_kwp: peak_kwp.max(0.0),
            irradiance_factor: irradiance_factor.clamp(0.0, 1.0),
            derate: constants.pv_derate,
            table: constants.irradiance.clone(),
            noise,
        }
    }

    /// Effective peak after derate and sky factor (kW).
    pub fn scaled_peak_kw(&self) -> f64 {
        self.peak_kwp * self.derate * self.irradiance_factor
    }

    /// Builds one representative day at `steps_per_hour` resolution.
    pub fn one_day_kw(&self, steps_per_hour: usize, rng: &mut StdRng) -> Vec<f64> {
        let scaled_peak = self.scaled_peak_kw();
        let steps = 24 * steps_per_hour;
        (0..steps)
            .map(|i| {
                let hour = i as f64 / steps_per_hour as f64;
                let Some(factor) = self.table.factor(hour) else {
                    return 0.0;
                };
                let mult = self.noise.map_or(1.0, |n| n.sample(rng));
                (factor * mult * scaled_peak).max(0.0)
            })
            .collect()
    }
}

impl ProfileSource for SolarProfileGenerator {
    fn profile_kw(&self, config: &SimConfig, rng: &mut StdRng) -> Vec<f64> {
        let day = self.one_day_kw(config.steps_per_hour, rng);
        tile(&day, config.total_steps())
    }

    fn device_type(&self) -> &'static str {
        "SolarPV"
    }
}
