use guild_mmr::{
    batch::{BatchInput, GuildBatch},
    utils::test_utils::{generate_players, inputs},
    RatingConfig
};
use serde_json::Value;
use serial_test::serial;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::common::write_json;

fn guild_mmr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_guild-mmr"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute guild-mmr")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}\n{}",
            e,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
#[serial]
fn test_validate_accepts_formula() {
    let output = guild_mmr(&["validate", "(ones  +  twos) / 2"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["normalizedFormula"], "(ones + twos) / 2");
}

#[test]
#[serial]
fn test_validate_rejects_unknown_variable() {
    let output = guild_mmr(&["validate", "ones + unknownVar"]);

    assert!(!output.status.success(), "Invalid formula should exit with an error code");
    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("unknownVar"));
}

#[test]
#[serial]
fn test_formula_preview_with_inputs_file() {
    let dir = TempDir::new().unwrap();
    let inputs_path = write_json(
        &dir,
        "inputs.json",
        &inputs([(800.0, 800.0, 1), (1000.0, 1000.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)])
    );

    let output = guild_mmr(&[
        "test-formula",
        "(ones + twos) / 2 * 1.1",
        "--inputs",
        inputs_path.to_str().unwrap()
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert!((json["result"].as_f64().unwrap() - 990.0).abs() < 1e-9);
}

#[test]
#[serial]
fn test_calculate_from_files() {
    let dir = TempDir::new().unwrap();
    let config = write_json(&dir, "config.json", &RatingConfig::ascendancy(None));
    let inputs = write_json(
        &dir,
        "inputs.json",
        &inputs([(1000.0, 1400.0, 10), (900.0, 2000.0, 10), (950.0, 1000.0, 10), (0.0, 0.0, 0)])
    );

    let output = guild_mmr(&[
        "calculate",
        "--config",
        config.to_str().unwrap(),
        "--inputs",
        inputs.to_str().unwrap()
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["algorithm"], "ASCENDANCY");
    assert_eq!(json["rating"], 1300.0);
}

#[test]
#[serial]
fn test_calculate_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write_json(&dir, "config.json", &RatingConfig::custom("ones +"));
    let inputs = write_json(&dir, "inputs.json", &guild_mmr::RatingInputs::default());

    let output = guild_mmr(&[
        "calculate",
        "--config",
        config.to_str().unwrap(),
        "--inputs",
        inputs.to_str().unwrap()
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid configuration"));
}

#[test]
#[serial]
fn test_missing_file_is_reported() {
    let output = guild_mmr(&["calculate", "--config", "does-not-exist.json", "--inputs", "nope.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.json"));
}

#[test]
#[serial]
fn test_batch_writes_report() {
    let dir = TempDir::new().unwrap();
    let batch = BatchInput {
        guilds: vec![
            GuildBatch {
                guild_id: "g1".to_string(),
                config: RatingConfig::peak_mmr(),
                players: generate_players(10, 11)
            },
            GuildBatch {
                guild_id: "g2".to_string(),
                config: RatingConfig::custom("ones * 0.5 + twos * 0.5"),
                players: generate_players(10, 12)
            }
        ]
    };
    let input = write_json(&dir, "batch.json", &batch);
    let report_path = dir.path().join("report.json");

    let output = guild_mmr(&[
        "batch",
        "--input",
        input.to_str().unwrap(),
        "--output",
        report_path.to_str().unwrap()
    ]);

    assert!(output.status.success());
    let report: Value = serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["guilds"]["g1"]["ratings"].as_object().unwrap().len(), 10);
    assert_eq!(report["guilds"]["g2"]["algorithm"], "CUSTOM");
    assert_eq!(report["guilds"]["g2"]["failed"], 0);
}

#[test]
#[serial]
fn test_reference() {
    let output = guild_mmr(&["reference"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["variables"].as_array().unwrap().len(), 9);
    assert!(json["functions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["name"] == "sqrt"));
}
