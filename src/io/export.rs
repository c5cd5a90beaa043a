//! CSV export for step results and analyses; JSON export for summaries.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::sim::autonomy::AutonomyOutcome;
use crate::sim::sweep::SweepPoint;
use crate::sim::types::StepResult;

/// Column header for per-step CSV export.
pub const STEP_HEADER: &str = "timestep,time_hr,hour_of_day,load_kw,pv_raw_kw,pv_target_kw,\
                               pv_to_load_kw,diesel_kw,units_committed,fuel_rate_lph,\
                               battery_kw,soc_kwh,soc_pct,fuel_remaining_l,daylight,\
                               battery_can_help";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(results, io::BufWriter::new(file))
}

/// Writes simulation results as CSV to any writer.
///
/// # Arguments
///
/// * `results` - Complete simulation step results
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(STEP_HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            format!("{:.4}", r.time_hr),
            format!("{:.4}", r.hour_of_day),
            format!("{:.4}", r.load_kw),
            format!("{:.4}", r.pv_raw_kw),
            format!("{:.4}", r.pv_target_kw),
            format!("{:.4}", r.pv_to_load_kw),
            format!("{:.4}", r.diesel_kw),
            r.units_committed.to_string(),
            format!("{:.4}", r.fuel_rate_lph),
            format!("{:.4}", r.battery_kw),
            format!("{:.4}", r.soc_kwh),
            format!("{:.4}", r.soc_pct),
            format!("{:.4}", r.fuel_remaining_l),
            r.daylight.to_string(),
            r.battery_can_help.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes sweep results as CSV, one row per grid point.
///
/// Columns are the sizes, the annual estimate, then one daily-liters column
/// per scenario in scenario order.
pub fn write_sweep_csv(points: &[SweepPoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header = vec![
        "pv_kwp".to_string(),
        "bess_kwh".to_string(),
        "annual_liters".to_string(),
    ];
    if let Some(first) = points.first() {
        header.extend(first.daily.iter().map(|d| format!("{}_daily_l", d.scenario)));
    }
    wtr.write_record(&header)?;

    for p in points {
        let mut row = vec![
            format!("{:.1}", p.pv_kwp),
            format!("{:.1}", p.bess_kwh),
            format!("{:.2}", p.annual_liters),
        ];
        row.extend(p.daily.iter().map(|d| format!("{:.4}", d.liters)));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes autonomy fuel-level series as CSV, one column per scenario.
pub fn write_autonomy_csv(outcomes: &[AutonomyOutcome], dt_hours: f64, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header = vec!["day".to_string()];
    header.extend(outcomes.iter().map(|o| format!("{}_fuel_l", o.scenario)));
    wtr.write_record(&header)?;

    let rows = outcomes
        .iter()
        .map(|o| o.fuel_remaining_l.len())
        .max()
        .unwrap_or(0);
    for t in 0..rows {
        let mut row = vec![format!("{:.4}", t as f64 * dt_hours / 24.0)];
        row.extend(outcomes.iter().map(|o| {
            o.fuel_remaining_l
                .get(t)
                .map_or_else(String::new, |l| format!("{l:.2}"))
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes any summary as pretty-printed JSON.
pub fn write_summary_json<T: Serialize>(summary: &T, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a summary as JSON to a file.
pub fn export_summary_json<T: Serialize>(summary: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_summary_json(summary, io::BufWriter::new(file))
}
