// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! TaskRun resource
//!
//! The detailed execution record for one task instance: per-step container
//! states, produced results, and retry snapshots.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::common::{Condition, Metadata};
use super::PIPELINE_TASK_LABEL;
use crate::errors::TekgraphResult;

/// Container state of a step that is currently executing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRunning {
    pub started_at: String,
}

/// Container state of a step that finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTerminated {
    pub exit_code: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Container state of a step waiting to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepWaiting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One step of a TaskRun. The three sub-states are mutually exclusive in
/// practice; `running` is checked first when more than one is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepState {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<StepRunning>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated: Option<StepTerminated>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting: Option<StepWaiting>,
}

/// A result value produced by the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunResult {
    pub name: String,

    #[serde(default)]
    pub value: String,
}

/// Observed state of a TaskRun. `retries_status` holds one snapshot of this
/// same shape per retry attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepState>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub task_results: Vec<TaskRunResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retries_status: Vec<TaskRunStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}

/// A Tekton TaskRun resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRun {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,

    /// Opaque to the compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskRunStatus>,
}

impl TaskRun {
    /// Load a TaskRun from a YAML file.
    pub fn from_file(path: &Path) -> TekgraphResult<Self> {
        Self::from_yaml(&super::read_file(path)?)
    }

    /// Parse a TaskRun from a YAML string, verifying kind and apiVersion.
    pub fn from_yaml(yaml: &str) -> TekgraphResult<Self> {
        super::load_resource(yaml, "TaskRun")
    }

    /// Name of the pipeline task this run executes, from its label.
    pub fn pipeline_task(&self) -> Option<&str> {
        self.metadata.label(PIPELINE_TASK_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_run_with_steps() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: TaskRun
metadata:
  name: run-1-build
  labels:
    tekton.dev/pipelineTask: build
status:
  conditions:
    - type: Succeeded
      status: "True"
  startTime: "2023-01-01T00:00:00Z"
  completionTime: "2023-01-01T00:02:00Z"
  steps:
    - name: compile
      terminated:
        exitCode: 0
        reason: Completed
        startedAt: "2023-01-01T00:00:05Z"
        finishedAt: "2023-01-01T00:01:50Z"
  taskResults:
    - name: image-digest
      value: sha256:deadbeef
"#;

        let task_run = TaskRun::from_yaml(yaml).unwrap();
        assert_eq!(task_run.pipeline_task(), Some("build"));

        let status = task_run.status.unwrap();
        assert_eq!(status.steps.len(), 1);
        assert_eq!(status.steps[0].terminated.as_ref().unwrap().exit_code, 0);
        assert_eq!(status.task_results[0].name, "image-digest");
    }

    #[test]
    fn test_retries_status_is_recursive() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: TaskRun
metadata:
  name: flaky
status:
  conditions:
    - type: Succeeded
      status: "True"
  retriesStatus:
    - conditions:
        - type: Succeeded
          status: "False"
          reason: Failed
    - conditions:
        - type: Succeeded
          status: "False"
          reason: Failed
"#;

        let task_run = TaskRun::from_yaml(yaml).unwrap();
        assert_eq!(task_run.status.unwrap().retries_status.len(), 2);
    }
}
