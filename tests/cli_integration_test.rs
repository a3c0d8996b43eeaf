//! End-to-end tests running the `grex-extract` binary.

mod common;

use assert_cmd::Command;
use ndarray::{array, Array2};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

fn grex_extract() -> Command {
    Command::cargo_bin("grex-extract").unwrap()
}

#[test]
fn prints_record_as_json() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["g1", "g2"], &["p1"], Some(&array![[1.5], [2.75]]));

    let output = grex_extract().arg(&path).output().unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        json!({
            "gene_ids": ["g1", "g2"],
            "person_ids": ["p1"],
            "expression_matrix": [[1.5], [2.75]]
        })
    );
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with(r#"{"gene_ids":"#));
    assert!(text.find("person_ids") < text.find("expression_matrix"));
}

#[test]
fn dimensions_match_ids() {
    let dir = TempDir::new().unwrap();
    let matrix = Array2::from_shape_fn((4, 3), |(g, p)| g as f64 + p as f64 / 10.0);
    let path = common::write_grex(
        dir.path(),
        &["a", "b", "c", "d"],
        &["x", "y", "z"],
        Some(&matrix),
    );

    let output = grex_extract().arg(&path).output().unwrap();
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["gene_ids"].as_array().unwrap().len(), 4);
    assert_eq!(value["person_ids"].as_array().unwrap().len(), 3);
    let rows = value["expression_matrix"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.as_array().unwrap().len() == 3));
}

#[test]
fn byte_string_ids_come_out_as_plain_text() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["ENSG00000001"], &["SUBJ_0001"], Some(&array![[0.0]]));

    let output = grex_extract().arg(&path).output().unwrap();
    let text = String::from_utf8(output.stdout).unwrap();

    assert!(text.contains(r#""ENSG00000001""#));
    assert!(!text.contains("b'"));
}

#[test]
fn point_one_survives_the_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["g"], &["p"], Some(&array![[0.1]]));

    let output = grex_extract().arg(&path).output().unwrap();
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["expression_matrix"][0][0].as_f64(), Some(0.1));
}

#[test]
fn missing_matrix_fails_with_empty_stdout() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["g"], &["p"], None);

    let output = grex_extract().arg(&path).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pred_expr"), "stderr: {stderr}");
}

#[test]
fn nonexistent_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = grex_extract().arg(dir.path().join("missing.h5")).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn output_flag_writes_file_only() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["g1"], &["p1", "p2"], Some(&array![[1.0, 2.0]]));
    let out = dir.path().join("out.json");

    let output = grex_extract()
        .arg(&path)
        .arg("--output")
        .arg(&out)
        .arg("--pretty")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let value: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["person_ids"], json!(["p1", "p2"]));
}

#[test]
fn layout_flag_transposes() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(
        dir.path(),
        &["g1", "g2"],
        &["p1"],
        Some(&array![[1.0, 2.0]]),
    );

    let output = grex_extract()
        .arg(&path)
        .args(["--layout", "genes-by-samples"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["expression_matrix"], json!([[1.0], [2.0]]));
}

#[test]
fn default_run_ignores_environment() {
    let dir = TempDir::new().unwrap();
    let path = common::write_grex(dir.path(), &["g1"], &["p1"], Some(&array![[4.5]]));

    let output = grex_extract()
        .env("GREX_MATRIX_DATASET", "other")
        .env("GREX_LAYOUT", "genes-by-samples")
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["expression_matrix"], json!([[4.5]]));
}

#[test]
fn generated_sample_is_readable() {
    let dir = TempDir::new().unwrap();
    let sample = dir.path().join("sample_grex.h5");

    let generated = Command::cargo_bin("generate_sample")
        .unwrap()
        .arg(&sample)
        .output()
        .unwrap();
    assert!(generated.status.success());

    let output = grex_extract().arg(&sample).output().unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["gene_ids"].as_array().unwrap().len(), 50);
    assert_eq!(value["person_ids"].as_array().unwrap().len(), 20);
    let rows = value["expression_matrix"].as_array().unwrap();
    assert_eq!(rows.len(), 50);
    assert!(rows.iter().all(|r| r.as_array().unwrap().len() == 20));
    assert_eq!(value["gene_ids"][0], json!("ENSG00000001000"));
    assert_eq!(value["person_ids"][19], json!("SUBJ_0020"));
}
