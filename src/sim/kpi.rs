//! Run-level fuel and energy indicators.

use std::fmt;

use serde::Serialize;

use super::types::StepResult;

/// Aggregate indicators derived from a complete simulation run.
///
/// Derived from the recorded steps only, so the report always agrees with
/// the exported step data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    /// Number of simulated steps.
    pub steps: usize,
    /// Diesel burned over the run (L).
    pub total_diesel_l: f64,
    /// Genset energy delivered (kWh).
    pub diesel_energy_kwh: f64,
    /// PV energy delivered to the load (kWh).
    pub pv_to_load_kwh: f64,
    /// Load energy demanded (kWh).
    pub load_energy_kwh: f64,
    /// Total battery energy throughput (kWh, sum of |power| * dt).
    pub battery_throughput_kwh: f64,
    /// Battery equivalent full cycles (throughput / 2*capacity).
    pub battery_equivalent_full_cycles: f64,
    /// Lowest SOC reached (%).
    pub min_soc_pct: f64,
    /// Highest SOC reached (%).
    pub max_soc_pct: f64,
    /// Most genset units committed in any step.
    pub peak_units_committed: usize,
    /// Genset energy as a share of load energy (%).
    pub diesel_share_pct: f64,
    /// Fuel left at the end of the run (L).
    pub final_fuel_l: f64,
    /// Day the tank first ran empty, if it did.
    pub autonomy_day: Option<f64>,
}

impl KpiReport {
    /// Aggregates a finished run.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `dt_hours` - Timestep duration in hours
    /// * `battery_capacity_kwh` - Battery capacity for cycle calculation
    /// * `initial_fuel_l` - Tank level before the first step
    /// * `autonomy_day` - Day the tank ran empty, if it did
    pub fn from_results(
        results: &[StepResult],
        dt_hours: f64,
        battery_capacity_kwh: f64,
        initial_fuel_l: f64,
        autonomy_day: Option<f64>,
    ) -> Self {
        if results.is_empty() {
            return Self {
                steps: 0,
                total_diesel_l: 0.0,
                diesel_energy_kwh: 0.0,
                pv_to_load_kwh: 0.0,
                load_energy_kwh: 0.0,
                battery_throughput_kwh: 0.0,
                battery_equivalent_full_cycles: 0.0,
                min_soc_pct: 0.0,
                max_soc_pct: 0.0,
                peak_units_committed: 0,
                diesel_share_pct: 0.0,
                final_fuel_l: initial_fuel_l,
                autonomy_day,
            };
        }

        let mut diesel_kwh = 0.0_f64;
        let mut pv_kwh = 0.0_f64;
        let mut load_kwh = 0.0_f64;
        let mut bat_throughput = 0.0_f64;
        let mut min_soc = f64::INFINITY;
        let mut max_soc = f64::NEG_INFINITY;
        let mut peak_units = 0_usize;

        for r in results {
            diesel_kwh += r.diesel_kw * dt_hours;
            pv_kwh += r.pv_to_load_kw * dt_hours;
            load_kwh += r.load_kw * dt_hours;
            bat_throughput += r.battery_kw.abs() * dt_hours;
            min_soc = min_soc.min(r.soc_pct);
            max_soc = max_soc.max(r.soc_pct);
            peak_units = peak_units.max(r.units_committed);
        }

        let final_fuel_l = results
            .last()
            .map_or(initial_fuel_l, |r| r.fuel_remaining_l);

        let cycles = if battery_capacity_kwh > 0.0 {
            bat_throughput / (2.0 * battery_capacity_kwh)
        } else {
            0.0
        };

        let diesel_share_pct = if load_kwh > 0.0 {
            100.0 * diesel_kwh / load_kwh
        } else {
            0.0
        };

        Self {
            steps: results.len(),
            total_diesel_l: (initial_fuel_l - final_fuel_l).max(0.0),
            diesel_energy_kwh: diesel_kwh,
            pv_to_load_kwh: pv_kwh,
            load_energy_kwh: load_kwh,
            battery_throughput_kwh: bat_throughput,
            battery_equivalent_full_cycles: cycles,
            min_soc_pct: min_soc,
            max_soc_pct: max_soc,
            peak_units_committed: peak_units,
            diesel_share_pct,
            final_fuel_l,
            autonomy_day,
        }
    }
}

/// Mean power served in one hour of a day, split by source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyComposition {
    /// Hour of day, 1 through 24.
    pub hour: usize,
    pub load_kw: f64,
    pub pv_to_load_kw: f64,
    pub diesel_kw: f64,
    /// Battery discharge only; charging counts as zero.
    pub battery_discharge_kw: f64,
}

/// Hourly means of load and of each source for day `day` (0-based).
///
/// Returns 24 rows, or none when the run never reaches `day`. Steps missing
/// from a partial final day count as zero, so every mean is taken over a full
/// hour.
pub fn hourly_composition(
    results: &[StepResult],
    steps_per_hour: usize,
    day: usize,
) -> Vec<HourlyComposition> {
    let start = day * 24 * steps_per_hour;
    if steps_per_hour == 0 || start >= results.len() {
        return Vec::new();
    }
    let day_steps = &results[start..results.len().min(start + 24 * steps_per_hour)];
    let n = steps_per_hour as f64;

    (0..24)
        .map(|h| {
            let lo = (h * steps_per_hour).min(day_steps.len());
            let hi = ((h + 1) * steps_per_hour).min(day_steps.len());
            let hour = &day_steps[lo..hi];
            let mean = |f: fn(&StepResult) -> f64| hour.iter().map(f).sum::<f64>() / n;
            HourlyComposition {
                hour: h + 1,
                load_kw: mean(|r| r.load_kw),
                pv_to_load_kw: mean(|r| r.pv_to_load_kw),
                diesel_kw: mean(|r| r.diesel_kw),
                battery_discharge_kw: mean(|r| (-r.battery_kw).max(0.0)),
            }
        })
        .collect()
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Steps simulated:       {}", self.steps)?;
        writeln!(f, "Diesel consumed:       {:.2} L", self.total_diesel_l)?;
        writeln!(
            f,
            "Diesel energy:         {:.2} kWh ({:.1}% of load)",
            self.diesel_energy_kwh, self.diesel_share_pct
        )?;
        writeln!(f, "PV to load:            {:.2} kWh", self.pv_to_load_kwh)?;
        writeln!(f, "Load energy:           {:.2} kWh", self.load_energy_kwh)?;
        writeln!(
            f,
            "Battery throughput:    {:.2} kWh ({:.2} equiv. cycles)",
            self.battery_throughput_kwh, self.battery_equivalent_full_cycles
        )?;
        writeln!(
            f,
            "SOC range:             {:.1}% .. {:.1}%",
            self.min_soc_pct, self.max_soc_pct
        )?;
        writeln!(f, "Peak units committed:  {}", self.peak_units_committed)?;
        writeln!(f, "Fuel remaining:        {:.2} L", self.final_fuel_l)?;
        match self.autonomy_day {
            Some(day) => write!(f, "Tank exhausted:        day {day:.2}"),
            None => write!(f, "Tank exhausted:        not exhausted"),
        }
    }
}
