//! Microgrid simulator entry point: CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use serde::Serialize;

use microgrid_sim::config::ScenarioConfig;
use microgrid_sim::error::SimError;
use microgrid_sim::io::export::{
    export_csv, export_summary_json, write_autonomy_csv, write_sweep_csv,
};
use microgrid_sim::logging::init_logging;
use microgrid_sim::sim::autonomy::{AutonomyOutcome, compare_autonomy};
use microgrid_sim::sim::engine::Simulation;
use microgrid_sim::sim::kpi::{HourlyComposition, KpiReport, hourly_composition};
use microgrid_sim::sim::sweep::{SweepPoint, run_sweep};
use microgrid_sim::sim::types::ModelConstants;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    days_override: Option<usize>,
    no_noise: bool,
    telemetry_out: Option<String>,
    summary_out: Option<String>,
    autonomy: bool,
    autonomy_out: Option<String>,
    sweep: bool,
    sweep_out: Option<String>,
    print_steps: bool,
    composition_day: Option<usize>,
    verbose: bool,
}

/// Everything written by `--summary-out`.
#[derive(Serialize)]
struct RunSummary<'a> {
    kpi: &'a KpiReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    composition: Option<&'a [HourlyComposition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    autonomy: Option<&'a [AutonomyOutcome]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sweep: Option<&'a [SweepPoint]>,
}

fn print_help() {
    eprintln!("microgrid-sim: PV / battery / diesel microgrid dispatch simulator");
    eprintln!();
    eprintln!("Usage: microgrid-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --days <n>               Override simulated days");
    eprintln!("  --no-noise               Disable PV noise");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    eprintln!("  --summary-out <path>     Export the run summary to JSON");
    eprintln!("  --autonomy               Compare tank autonomy across irradiance scenarios");
    eprintln!("  --autonomy-out <path>    Export autonomy fuel series to CSV");
    eprintln!("  --sweep                  Estimate annual diesel over PV/battery sizes");
    eprintln!("  --sweep-out <path>       Export sweep results to CSV");
    eprintln!("  --print-steps            Print every step result");
    eprintln!("  --composition-day <n>    Print hourly load composition for day n (1-based)");
    eprintln!("  --verbose                Debug logging (unless RUST_LOG is set)");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

/// Returns the value following flag `args[*i]`, or exits.
fn flag_value(args: &[String], i: &mut usize, what: &str) -> String {
    let flag = args[*i].clone();
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        days_override: None,
        no_noise: false,
        telemetry_out: None,
        summary_out: None,
        autonomy: false,
        autonomy_out: None,
        sweep: false,
        sweep_out: None,
        print_steps: false,
        composition_day: None,
        verbose: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => cli.scenario_path = Some(flag_value(&args, &mut i, "a path argument")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "a name argument")),
            "--seed" => {
                let raw = flag_value(&args, &mut i, "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--days" => {
                let raw = flag_value(&args, &mut i, "a day count");
                match raw.parse::<usize>() {
                    Ok(d) if d > 0 => cli.days_override = Some(d),
                    _ => {
                        eprintln!("error: --days value \"{raw}\" must be a positive integer");
                        process::exit(1);
                    }
                }
            }
            "--no-noise" => cli.no_noise = true,
            "--telemetry-out" => {
                cli.telemetry_out = Some(flag_value(&args, &mut i, "a path argument"));
            }
            "--summary-out" => cli.summary_out = Some(flag_value(&args, &mut i, "a path argument")),
            "--autonomy" => cli.autonomy = true,
            "--autonomy-out" => {
                cli.autonomy = true;
                cli.autonomy_out = Some(flag_value(&args, &mut i, "a path argument"));
            }
            "--sweep" => cli.sweep = true,
            "--sweep-out" => {
                cli.sweep = true;
                cli.sweep_out = Some(flag_value(&args, &mut i, "a path argument"));
            }
            "--print-steps" => cli.print_steps = true,
            "--composition-day" => {
                let raw = flag_value(&args, &mut i, "a day number");
                match raw.parse::<usize>() {
                    Ok(d) if d > 0 => cli.composition_day = Some(d),
                    _ => {
                        eprintln!("error: --composition-day value \"{raw}\" must be a positive integer");
                        process::exit(1);
                    }
                }
            }
            "--verbose" | "-v" => cli.verbose = true,
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Loads config: --scenario takes priority, then --preset, then baseline.
fn load_scenario(cli: &CliArgs) -> Result<ScenarioConfig, SimError> {
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(days) = cli.days_override {
        scenario.simulation.days = days;
    }
    if cli.no_noise {
        scenario.simulation.use_noise = false;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            tracing::error!("{e}");
        }
        return Err(SimError::Validation(errors));
    }
    Ok(scenario)
}

fn run(cli: &CliArgs) -> Result<(), SimError> {
    let scenario = load_scenario(cli)?;
    let constants = ModelConstants::default();
    let params = scenario.run_params();

    let sim = Simulation::new(&params, constants.clone());
    let report = sim.run();

    if cli.print_steps {
        for r in &report.steps {
            println!("{r}");
        }
    }
    println!("\n{}", report.kpi);

    if let Some(ref path) = cli.telemetry_out {
        export_csv(&report.steps, Path::new(path))?;
        tracing::info!(path = %path, "telemetry written");
    }

    let composition = cli.composition_day.map(|day| {
        let rows = hourly_composition(&report.steps, sim.config().steps_per_hour, day - 1);
        if rows.is_empty() {
            tracing::warn!(day, days = sim.config().days, "composition day is beyond the horizon");
        } else {
            println!("\n--- Hourly load composition (day {day}) ---");
            println!("hour   load_kw  diesel_kw  pv_kw  bess_kw");
            for r in &rows {
                println!(
                    "{:>4} {:>9.1} {:>10.1} {:>6.1} {:>8.1}",
                    r.hour, r.load_kw, r.diesel_kw, r.pv_to_load_kw, r.battery_discharge_kw
                );
            }
        }
        rows
    });

    let autonomy = if cli.autonomy {
        let outcomes = compare_autonomy(
            &params,
            &scenario.autonomy_settings(),
            &scenario.scenarios,
            &constants,
        );
        println!("\n--- Autonomy ({} days max) ---", scenario.autonomy.days);
        for o in &outcomes {
            match o.autonomy_day {
                Some(day) => println!("{:<12} tank empty on day {day:.2}", o.scenario),
                None => println!("{:<12} not exhausted ({:.1} L used)", o.scenario, o.total_diesel_l),
            }
        }
        if let Some(ref path) = cli.autonomy_out {
            let file = std::fs::File::create(path)?;
            write_autonomy_csv(&outcomes, sim.config().dt_hours, std::io::BufWriter::new(file))?;
            tracing::info!(path = %path, "autonomy series written");
        }
        Some(outcomes)
    } else {
        None
    };

    let sweep = if cli.sweep {
        let points = run_sweep(
            &params,
            &scenario.sweep_settings(),
            &scenario.scenarios,
            &constants,
        );
        println!("\n--- Annual diesel sweep ---");
        for p in &points {
            println!(
                "PV {:>7.1} kWp  BESS {:>7.1} kWh  -> {:>10.1} L/yr",
                p.pv_kwp, p.bess_kwh, p.annual_liters
            );
        }
        if let Some(ref path) = cli.sweep_out {
            let file = std::fs::File::create(path)?;
            write_sweep_csv(&points, std::io::BufWriter::new(file))?;
            tracing::info!(path = %path, "sweep results written");
        }
        Some(points)
    } else {
        None
    };

    if let Some(ref path) = cli.summary_out {
        let summary = RunSummary {
            kpi: &report.kpi,
            composition: composition.as_deref(),
            autonomy: autonomy.as_deref(),
            sweep: sweep.as_deref(),
        };
        export_summary_json(&summary, Path::new(path))?;
        tracing::info!(path = %path, "summary written");
    }

    Ok(())
}

fn main() {
    let cli = parse_args();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
