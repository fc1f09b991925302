//! Integration tests for the envrisk binary
//!
//! These tests verify JSON output, written artifacts and dry-run mode.

use std::path::PathBuf;
use std::process::{Command, Output};

fn envrisk_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("envrisk");
    path
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn run_analyze(extra: &[&str]) -> Output {
    Command::new(envrisk_bin())
        .arg("analyze")
        .arg("--air")
        .arg(fixture("air.geojson"))
        .arg("--water")
        .arg(fixture("water.geojson"))
        .arg("--superfund")
        .arg(fixture("superfund.json"))
        .args(extra)
        .env_remove("ENVRISK_DEMOGRAPHIC_VULNERABILITY")
        .env_remove("ENVRISK_OUTPUT_DIR")
        .env_remove("ENVRISK_REPORT_TOP")
        .output()
        .expect("Failed to execute command")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_analyze_json_output_and_artifacts() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("outputs");
    let out_arg = out_dir.to_string_lossy().to_string();

    let output = run_analyze(&["--json", "-o", &out_arg]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = parse_stdout(&output);
    assert_eq!(parsed["status"], "success");

    let data = &parsed["data"];
    assert_eq!(data["locations_assessed"], 3);
    assert_eq!(data["failures"].as_array().unwrap().len(), 0);

    let top = data["top_priorities"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["rank"], 1);
    assert!(top[0].get("composite_risk").is_some(), "assessment fields are flattened");

    for name in ["risk_assessments.json", "priority_areas.json", "heatmap_data.json"] {
        assert!(out_dir.join(name).exists(), "{} should be written", name);
    }

    let heatmap: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("heatmap_data.json")).unwrap())
            .unwrap();
    assert_eq!(heatmap["type"], "heatmap");
    assert_eq!(heatmap["metadata"]["point_count"], 3);

    let priorities: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out_dir.join("priority_areas.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(priorities.as_array().unwrap().len(), 3);
}

#[test]
fn test_analyze_dry_run_writes_nothing() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("outputs");
    let out_arg = out_dir.to_string_lossy().to_string();

    let output = run_analyze(&["--dry-run", "--json", "-o", &out_arg]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = parse_stdout(&output);
    assert!(parsed["data"]["files"].is_null(), "Dry-run should report no files");
    assert!(!out_dir.exists(), "Dry-run should not create the output directory");
}

#[test]
fn test_analyze_uses_config_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let out_arg = temp_dir.path().to_string_lossy().to_string();
    let config = fixture("envrisk.toml");
    let config_arg = config.to_string_lossy().to_string();

    let output = run_analyze(&["--json", "--config", &config_arg, "-o", &out_arg]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = parse_stdout(&output);
    let top = parsed["data"]["top_priorities"].as_array().unwrap();
    assert_eq!(top.len(), 2, "report_top from the config file limits the summary");
    assert_eq!(top[0]["location"], "Los Angeles");
    assert_eq!(top[0]["risk_factors"]["demographic_vulnerability"], 0.7);
}

#[test]
fn test_analyze_without_survivors_drops_old_heatmap() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("outputs");
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(out_dir.join("heatmap_data.json"), "{}").unwrap();

    let locations = temp_dir.path().join("locations.json");
    std::fs::write(&locations, r#"[{"location": "Nowhere"}, {"location": "Elsewhere"}]"#)
        .unwrap();

    let out_arg = out_dir.to_string_lossy().to_string();
    let locations_arg = locations.to_string_lossy().to_string();
    let output = run_analyze(&["--json", "--locations", &locations_arg, "-o", &out_arg]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = parse_stdout(&output);
    let data = &parsed["data"];
    assert_eq!(data["locations_assessed"], 0);
    assert_eq!(data["failures"].as_array().unwrap().len(), 2);
    assert!(data["files"]["heatmap"].is_null());

    assert!(!out_dir.join("heatmap_data.json").exists(), "old heatmap should be removed");
    let assessments: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out_dir.join("risk_assessments.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(assessments.as_array().unwrap().len(), 0);
}

#[test]
fn test_analyze_rejects_out_of_range_demographic() {
    let output = run_analyze(&["--dry-run", "--demographic", "1.5"]);
    assert!(!output.status.success(), "Out-of-range demographic factor should fail");
}

#[test]
fn test_analyze_missing_input_fails() {
    let output = Command::new(envrisk_bin())
        .args([
            "analyze",
            "--air",
            "/nonexistent/air.geojson",
            "--water",
            "/nonexistent/water.geojson",
            "--superfund",
            "/nonexistent/superfund.json",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("air-quality"), "stderr should name the input: {}", stderr);
}

#[test]
fn test_distance_json_output() {
    let output = Command::new(envrisk_bin())
        .args(["distance", "34.0522", "-118.2437", "32.7157", "-117.1611", "--json"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = parse_stdout(&output);
    let km = parsed["data"]["distance_km"].as_f64().unwrap();
    assert!(km > 179.0 && km < 180.0, "Los Angeles to San Diego was {}", km);
}

#[test]
fn test_distance_rejects_invalid_latitude() {
    let output = Command::new(envrisk_bin())
        .args(["distance", "95.0", "0.0", "0.0", "0.0"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}

#[test]
fn test_config_json_lists_sources() {
    let config = fixture("envrisk.toml");
    let output = Command::new(envrisk_bin())
        .arg("config")
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .env_remove("ENVRISK_DEMOGRAPHIC_VULNERABILITY")
        .env_remove("ENVRISK_OUTPUT_DIR")
        .env_remove("ENVRISK_REPORT_TOP")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = parse_stdout(&output);
    let values = parsed["data"]["values"].as_array().unwrap();

    let entry = |key: &str| values.iter().find(|v| v["key"] == key).cloned().unwrap();
    assert_eq!(entry("report_top")["value"], "2");
    assert_eq!(entry("report_top")["source"], "File");
    assert_eq!(entry("output_dir")["source"], "Default");
    assert_eq!(entry("demographics.Los Angeles")["value"], "0.7");
}
