// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the codexflow CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A small saved analysis, as produced by 'analyze --output'
const ANALYSIS_JSON: &str = r#"{
    "graph": {
        "nodes": [
            {"id": "parse_file", "type": "function", "label": "parse_file"},
            {"id": "Lexer", "type": "class", "label": "Lexer"},
            {"id": "tokenize", "type": "function", "label": "tokenize"}
        ],
        "edges": [
            {"id": "e1", "source": "parse_file", "target": "Lexer", "label": "uses"},
            {"id": "e2", "source": "Lexer", "target": "tokenize", "label": "calls"}
        ]
    },
    "chapters": [
        {"title": "Overview", "content": "This file parses source code."},
        {"title": "The Lexer", "content": "Tokens come from the Lexer class."}
    ],
    "quiz": [
        {
            "question": "What does parse_file use?",
            "options": [
                {"id": "a", "text": "Lexer"},
                {"id": "b", "text": "Nothing"}
            ],
            "answer": "a"
        }
    ]
}"#;

/// Run codexflow isolated from any real user configuration
fn codexflow(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("codexflow").expect("binary builds");
    cmd.env("CODEXFLOW_CONFIG", config_dir.path().join("config.toml"));
    cmd.env_remove("CODEXFLOW_API_URL");
    cmd
}

#[test]
fn test_export_dot_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("analysis.json");
    std::fs::write(&input, ANALYSIS_JSON).unwrap();

    codexflow(&dir)
        .args(["export", "--input"])
        .arg(&input)
        .args(["--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph dependencies"))
        .stdout(predicate::str::contains("\"parse_file\" -> \"Lexer\""))
        .stdout(predicate::str::contains("cluster_classes"));
}

#[test]
fn test_export_json_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("analysis.json");
    let output = dir.path().join("graph.json");
    std::fs::write(&input, ANALYSIS_JSON).unwrap();

    codexflow(&dir)
        .args(["export", "--input"])
        .arg(&input)
        .args(["--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let written = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(value["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn test_export_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("analysis.json");
    std::fs::write(&input, ANALYSIS_JSON).unwrap();

    codexflow(&dir)
        .args(["export", "--input"])
        .arg(&input)
        .args(["--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_export_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    codexflow(&dir)
        .args(["export", "--input"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_analyze_unreachable_service_reports_generic_message() {
    let dir = TempDir::new().unwrap();

    // Port 9 (discard) is closed on any sane machine; the connection is
    // refused immediately, no timeout involved.
    codexflow(&dir)
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "analyze",
            "https://github.com/example/repo",
            "src/main.py",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to analyze repository"));
}

#[test]
fn test_config_set_and_get_roundtrip() {
    let dir = TempDir::new().unwrap();

    codexflow(&dir)
        .args(["config", "endpoint", "http://10.1.2.3:8000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint = http://10.1.2.3:8000"));

    codexflow(&dir)
        .args(["config", "endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://10.1.2.3:8000"));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();

    codexflow(&dir)
        .args(["config", "retries", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();

    codexflow(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codexflow"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();

    codexflow(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("learn"))
        .stdout(predicate::str::contains("export"));
}
