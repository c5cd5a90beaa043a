use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microgrid-sim"))
        .args(args)
        .output()
        .expect("microgrid-sim process should run")
}

fn run_and_parse_diesel(args: &[&str]) -> f64 {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_metric(&stdout, "Diesel consumed:", "L")
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing KPI line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid KPI format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from KPI line `{line}`"))
}

#[test]
fn presets_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse_diesel(&["--preset", "baseline", "--no-noise"]);
    let diesel_only = run_and_parse_diesel(&["--preset", "diesel_only", "--no-noise"]);
    let high_coverage = run_and_parse_diesel(&["--preset", "high_coverage", "--no-noise"]);
    let cloudy_week = run_and_parse_diesel(&["--preset", "cloudy_week", "--no-noise"]);

    assert!(
        diesel_only > baseline,
        "expected diesel_only to burn more: baseline={baseline:.2}, diesel_only={diesel_only:.2}"
    );
    assert!(
        (baseline - high_coverage).abs() > 1e-3,
        "expected coverage threshold to matter: baseline={baseline:.2}, high={high_coverage:.2}"
    );
    assert!(cloudy_week > baseline);
}

#[test]
fn scenario_files_run_via_cli() {
    for path in [
        "scenarios/baseline.toml",
        "scenarios/diesel_only.toml",
        "scenarios/cloudy_week.toml",
        "scenarios/high_coverage.toml",
    ] {
        let diesel = run_and_parse_diesel(&["--scenario", path]);
        assert!(diesel > 0.0, "{path} should burn diesel");
    }
}

#[test]
fn unknown_preset_fails() {
    let output = run_cli(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[test]
fn telemetry_and_summary_are_written() {
    let dir = std::env::temp_dir().join(format!("microgrid-sim-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let csv_path = dir.join("steps.csv");
    let json_path = dir.join("summary.json");

    let output = run_cli(&[
        "--preset",
        "baseline",
        "--days",
        "2",
        "--telemetry-out",
        csv_path.to_str().expect("utf-8 path"),
        "--summary-out",
        json_path.to_str().expect("utf-8 path"),
    ]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv = std::fs::read_to_string(&csv_path).expect("csv should exist");
    assert_eq!(csv.lines().count(), 1 + 2 * 288);
    assert!(csv.starts_with("timestep,time_hr,hour_of_day,load_kw"));

    let json = std::fs::read_to_string(&json_path).expect("summary should exist");
    let value: serde_json::Value = serde_json::from_str(&json).expect("summary should be JSON");
    assert_eq!(value["kpi"]["steps"], 576);
    assert!(value.get("sweep").is_none());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn composition_day_is_printed_and_summarized() {
    let dir = std::env::temp_dir().join(format!("microgrid-sim-comp-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let json_path = dir.join("summary.json");

    let output = run_cli(&[
        "--preset",
        "baseline",
        "--no-noise",
        "--days",
        "2",
        "--composition-day",
        "2",
        "--summary-out",
        json_path.to_str().expect("utf-8 path"),
    ]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hourly load composition (day 2)"));

    let json = std::fs::read_to_string(&json_path).expect("summary should exist");
    let value: serde_json::Value = serde_json::from_str(&json).expect("summary should be JSON");
    let rows = value["composition"].as_array().expect("composition rows");
    assert_eq!(rows.len(), 24);
    assert_eq!(rows[18]["hour"], 19);
    // 18:00-19:00 ramps down from the 150 kW evening peak.
    assert!(rows[18]["load_kw"].as_f64().unwrap_or(0.0) > 79.0);

    std::fs::remove_dir_all(&dir).ok();
}
