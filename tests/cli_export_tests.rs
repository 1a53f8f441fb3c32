//! End-to-end tests for `prefab-planner export`, `apply` and `catalog`.

use std::fs;

mod fixtures;
use fixtures::*;

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_json_document() {
    let env = CliEnv::new();
    env.run_ok(&["module", "add", "living-3x2", "0", "0"]);

    let path = env.temp.path().join("out").join("plan.json");
    let stdout = env.run_ok(&["export", "-o", path.to_str().unwrap()]);
    assert!(stdout.contains("Exported 1 module(s)"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["version"], "1.0");
    assert_eq!(document["gridSize"]["cellsX"], 20);
    assert_eq!(document["modules"][0]["preset"]["id"], "living-3x2");
    assert_eq!(document["modules"][0]["position"]["gridX"], 0);
    assert_eq!(document["summary"]["totalPrice"], 42_000);
}

#[test]
fn test_export_markdown() {
    let env = CliEnv::new();
    env.run_ok(&["starter", "monolocale"]);

    let path = env.temp.path().join("plan.md");
    env.run_ok(&["export", "-f", "markdown", "-o", path.to_str().unwrap()]);

    let markdown = fs::read_to_string(&path).unwrap();
    assert!(markdown.starts_with('#'));
    assert!(markdown.contains("Living room"));
}

#[test]
fn test_export_bundle_is_zip() {
    let env = CliEnv::new();
    env.run_ok(&["module", "add", "kitchen-2x2", "2", "2"]);

    let path = env.temp.path().join("plan.zip");
    env.run_ok(&["export", "--format", "bundle", "-o", path.to_str().unwrap()]);

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK", "bundle should be a zip archive");
}

// ============================================================================
// Apply
// ============================================================================

fn write_script(env: &CliEnv, content: &str) -> String {
    let path = env.temp.path().join("script.json");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_apply_script_reports_outcomes() {
    let env = CliEnv::new();
    let script = write_script(
        &env,
        r#"[
            { "type": "addModule", "presetId": "kitchen-2x2", "gridX": 0, "gridZ": 0 },
            { "type": "addModule", "presetId": "kitchen-2x2", "gridX": 1, "gridZ": 1 },
            { "type": "setGridSize", "cellsX": 12, "cellsZ": 12 }
        ]"#,
    );

    let report = env.run_json(&["apply", "-s", &script, "--json"]);
    assert_eq!(report["outcomes"][0]["status"], "created");
    assert_eq!(report["outcomes"][1]["status"], "rejected");
    assert_eq!(report["outcomes"][2]["status"], "applied");
    assert_eq!(report["rejected"], 1);
    assert_eq!(report["moduleCount"], 1);

    let grid = env.run_json(&["grid", "show", "--json"]);
    assert_eq!(grid["cellsX"], 12);
}

#[test]
fn test_apply_strict_fails_on_rejection() {
    let env = CliEnv::new();
    let script = write_script(
        &env,
        r#"[{ "type": "addModule", "presetId": "kitchen-2x2", "gridX": 19, "gridZ": 0 }]"#,
    );

    let output = env
        .command(&["apply", "-s", &script, "--strict"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_apply_invalid_script_fails() {
    let env = CliEnv::new();
    let script = write_script(&env, r#"[{ "type": "teleport" }]"#);

    let output = env
        .command(&["apply", "-s", &script])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid command script"));
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_json_lists_presets_and_starters() {
    let env = CliEnv::new();
    let catalog = env.run_json(&["catalog", "--json"]);

    let modules = catalog["modules"].as_array().unwrap();
    assert!(modules.iter().any(|m| m["id"] == "living-3x2"));
    let starters = catalog["starters"].as_array().unwrap();
    assert!(starters.iter().any(|s| s["id"] == "vuoto"));
}
