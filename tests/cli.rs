// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! End-to-end CLI checks over temporary YAML files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PIPELINE_YAML: &str = r#"
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: build-and-test
spec:
  tasks:
    - name: git-clone
    - name: build
      runAfter:
        - git-clone
    - name: test
      runAfter:
        - build
  finally:
    - name: cleanup
"#;

const RUN_YAML: &str = r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: build-and-test-run
  namespace: default
  labels:
    tekton.dev/pipeline: build-and-test
spec:
  pipelineSpec:
    tasks:
      - name: git-clone
      - name: build
        runAfter:
          - git-clone
status:
  conditions:
    - type: Succeeded
      status: "Unknown"
      reason: Running
  startTime: "2023-01-01T00:00:00Z"
"#;

const TASKRUN_YAML: &str = r#"
apiVersion: tekton.dev/v1beta1
kind: TaskRun
metadata:
  name: build-and-test-run-git-clone
  labels:
    tekton.dev/pipelineTask: git-clone
status:
  conditions:
    - type: Succeeded
      status: "True"
  startTime: "2023-01-01T00:00:00Z"
  completionTime: "2023-01-01T00:00:30Z"
"#;

const CYCLIC_PIPELINE_YAML: &str = r#"
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: broken
spec:
  tasks:
    - name: a
      runAfter: [b]
    - name: b
      runAfter: [a]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn tekgraph() -> Command {
    let mut cmd = Command::cargo_bin("tekgraph").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_graph_text_lists_levels() {
    let dir = TempDir::new().unwrap();
    let pipeline = write(&dir, "pipeline.yaml", PIPELINE_YAML);

    tekgraph()
        .arg("graph")
        .arg(&pipeline)
        .assert()
        .success()
        .stdout(predicate::str::contains("level 0:"))
        .stdout(predicate::str::contains("level 2:"))
        .stdout(predicate::str::contains("test  [Unknown]  (after: build)"));
}

#[test]
fn test_graph_dot_contains_edges() {
    let dir = TempDir::new().unwrap();
    let pipeline = write(&dir, "pipeline.yaml", PIPELINE_YAML);

    tekgraph()
        .arg("graph")
        .arg(&pipeline)
        .args(["--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph pipeline"))
        .stdout(predicate::str::contains("\"git-clone\" -> \"build\";"))
        .stdout(predicate::str::contains("\"cleanup\";"));
}

#[test]
fn test_graph_json_round_trips() {
    let dir = TempDir::new().unwrap();
    let run = write(&dir, "run.yaml", RUN_YAML);

    let output = tekgraph()
        .arg("graph")
        .arg(&run)
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let model: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(model["graph"]["id"], "pipelinerun-vis-graph");
    assert_eq!(model["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(model["edges"][0]["id"], "git-clone-build");
}

#[test]
fn test_status_resolves_task_runs() {
    let dir = TempDir::new().unwrap();
    let run = write(&dir, "run.yaml", RUN_YAML);
    write(&dir, "taskrun-git-clone.yaml", TASKRUN_YAML);
    let pattern = dir.path().join("taskrun-*.yaml");

    tekgraph()
        .arg("status")
        .arg(&run)
        .args(["--task-runs", pattern.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running"))
        .stdout(predicate::str::contains("git-clone"))
        .stdout(predicate::str::contains("Succeeded"))
        .stdout(predicate::str::contains("30000ms"));
}

#[test]
fn test_validate_rejects_cycle() {
    let dir = TempDir::new().unwrap();
    let pipeline = write(&dir, "broken.yaml", CYCLIC_PIPELINE_YAML);

    tekgraph()
        .arg("validate")
        .arg(&pipeline)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Circular dependency"));
}

#[test]
fn test_validate_accepts_pipeline() {
    let dir = TempDir::new().unwrap();
    let pipeline = write(&dir, "pipeline.yaml", PIPELINE_YAML);

    tekgraph()
        .arg("validate")
        .arg(&pipeline)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline is valid"));
}

#[test]
fn test_unsupported_kind_fails() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "taskrun.yaml",
        "apiVersion: tekton.dev/v1beta1\nkind: ConfigMap\nmetadata:\n  name: x\n",
    );

    tekgraph().arg("graph").arg(&file).assert().failure();
}

#[test]
fn test_missing_file_fails() {
    tekgraph()
        .arg("graph")
        .arg("does-not-exist.yaml")
        .assert()
        .failure();
}
