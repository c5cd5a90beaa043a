use rand::rngs::StdRng;

use crate::devices::types::ProfileSource;
use crate::sim::types::SimConfig;

/// Reference hourly load of the site (kW), hour 0 through hour 23.
pub const REFERENCE_HOURLY_LOAD_KW: [f64; 24] = [
    17.0, 17.0, 17.0, 17.0, 17.0, 20.0, 34.0, 39.0, 45.0, 50.0, 65.0, 85.0, 80.0, 75.0, 60.0, 42.0,
    50.0, 84.0, 150.0, 79.0, 61.0, 45.0, 30.0, 25.0,
];

/// A load model that repeats a fixed 24-hour demand table.
///
/// The hourly values are anchor points; sub-hourly demand is linearly
/// interpolated between consecutive anchors of the table tiled over the
/// horizon. Past the final anchor the last value is held.
///
/// # Examples
///
/// ```
/// use microgrid_sim::devices::load::LoadModel;
///
/// let load = LoadModel::new(vec![10.0; 24]);
/// assert_eq!(load.demand_kw(5.5, 1), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct LoadModel {
    /// Hourly demand anchors (kW), one per hour of day.
    pub hourly_kw: Vec<f64>,
}

impl LoadModel {
    /// Creates a load model from a 24-value hourly table.
    ///
    /// Negative entries are clamped to zero and a table of the wrong length
    /// is truncated or padded with its last value.
    pub fn new(hourly_kw: Vec<f64>) -> Self {
        let last = hourly_kw.last().copied().unwrap_or(0.0);
        let mut table: Vec<f64> = hourly_kw.into_iter().take(24).map(|v| v.max(0.0)).collect();
        table.resize(24, last.max(0.0));
        Self { hourly_kw: table }
    }

    /// Interpolated demand at `time_hr` hours into a horizon of `days` days.
    pub fn demand_kw(&self, time_hr: f64, days: usize) -> f64 {
        let anchors = 24 * days.max(1);
        let hour = time_hr.max(0.0).floor() as usize;
        if hour + 1 >= anchors {
            return self.anchor(anchors - 1);
        }
        let frac = time_hr - hour as f64;
        let start = self.anchor(hour);
        let end = self.anchor(hour + 1);
        start + (end - start) * frac
    }

    fn anchor(&self, hour: usize) -> f64 {
        self.hourly_kw[hour % 24]
    }
}

impl Default for LoadModel {
    fn default() -> Self {
        Self::new(REFERENCE_HOURLY_LOAD_KW.to_vec())
    }
}

impl ProfileSource for LoadModel {
    fn profile_kw(&self, config: &SimConfig, _rng: &mut StdRng) -> Vec<f64> {
        (0..config.total_steps())
            .map(|t| self.demand_kw(config.time_hr(t), config.days))
            .collect()
    }

    fn device_type(&self) -> &'static str {
        "Load"
    }
}
