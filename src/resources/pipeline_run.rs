// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! PipelineRun resource
//!
//! One execution record of a Pipeline: run-level conditions and timing,
//! per-task run records keyed by task-run name, the skipped-task list, and
//! optionally the resolved pipeline spec inlined into the status.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::common::{Condition, Metadata, Param};
use super::pipeline::{Pipeline, PipelineSpec};
use super::task_run::TaskRunStatus;
use super::PIPELINE_LABEL;
use crate::errors::TekgraphResult;

/// Reference to a Pipeline by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// PipelineRun spec: either a reference to a Pipeline or an inline spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_ref: Option<PipelineRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_spec: Option<PipelineSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// One entry of the run's `status.taskRuns` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedTaskRun {
    pub pipeline_task_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskRunStatus>,
}

/// A named result value produced by the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub name: String,
    pub value: String,
}

/// A task the run decided not to execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedTask {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Reference to a child TaskRun object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub pipeline_task_name: String,
}

/// Observed state of a PipelineRun.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,

    /// The resolved spec, recorded at execution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_spec: Option<PipelineSpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub task_runs: BTreeMap<String, EmbeddedTaskRun>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipeline_results: Vec<RunResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_tasks: Vec<SkippedTask>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_references: Vec<ChildReference>,
}

/// A Tekton PipelineRun resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,

    #[serde(default)]
    pub spec: PipelineRunSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PipelineRunStatus>,
}

impl PipelineRun {
    /// Load a PipelineRun from a YAML file.
    pub fn from_file(path: &Path) -> TekgraphResult<Self> {
        Self::from_yaml(&super::read_file(path)?)
    }

    /// Parse a PipelineRun from a YAML string, verifying kind and apiVersion.
    pub fn from_yaml(yaml: &str) -> TekgraphResult<Self> {
        super::load_resource(yaml, "PipelineRun")
    }

    /// Recover the Pipeline this run executed.
    ///
    /// The name comes from the `tekton.dev/pipeline` label, falling back to
    /// the run's own name. The spec comes from `status.pipelineSpec` —
    /// authoritative, since it reflects what actually executed — falling
    /// back to the as-submitted `spec.pipelineSpec`. Returns `None` when
    /// either is missing; a partially-populated run is an expected input,
    /// not an error.
    pub fn extract_pipeline(&self) -> Option<Pipeline> {
        let name = self
            .metadata
            .label(PIPELINE_LABEL)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .or_else(|| {
                if self.metadata.name.is_empty() {
                    None
                } else {
                    Some(self.metadata.name.clone())
                }
            })?;

        let spec = self
            .status
            .as_ref()
            .and_then(|s| s.pipeline_spec.clone())
            .or_else(|| self.spec.pipeline_spec.clone())?;

        Some(Pipeline {
            api_version: self.api_version.clone(),
            kind: "Pipeline".into(),
            metadata: Metadata {
                name,
                namespace: self.metadata.namespace.clone(),
                ..Metadata::default()
            },
            spec,
        })
    }

    /// The run's embedded record for `task_name`, if one exists under the
    /// synthesized `<runName>-<taskName>` key.
    pub fn embedded_task_run(&self, task_name: &str) -> Option<&EmbeddedTaskRun> {
        let key = format!("{}-{}", self.metadata.name, task_name);
        self.status.as_ref()?.task_runs.get(&key)
    }

    /// Whether the run recorded `task_name` as skipped.
    pub fn is_task_skipped(&self, task_name: &str) -> bool {
        self.status
            .as_ref()
            .map(|s| s.skipped_tasks.iter().any(|t| t.name == task_name))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_from(yaml: &str) -> PipelineRun {
        PipelineRun::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_extract_pipeline_from_spec() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: test-pipeline-run
  namespace: default
  labels:
    tekton.dev/pipeline: test-pipeline
spec:
  pipelineSpec:
    tasks:
      - name: git-clone
        taskRef:
          name: git-clone
      - name: build
        taskRef:
          name: buildah
        runAfter:
          - git-clone
"#,
        );

        let pipeline = run.extract_pipeline().unwrap();
        assert_eq!(pipeline.kind, "Pipeline");
        assert_eq!(pipeline.metadata.name, "test-pipeline");
        assert_eq!(pipeline.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(pipeline.spec.tasks.len(), 2);
    }

    #[test]
    fn test_extract_prefers_status_spec() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: test-pipeline-run
spec:
  pipelineSpec:
    tasks:
      - name: as-submitted
status:
  pipelineSpec:
    tasks:
      - name: as-executed
"#,
        );

        let pipeline = run.extract_pipeline().unwrap();
        assert_eq!(pipeline.spec.tasks.len(), 1);
        assert_eq!(pipeline.spec.tasks[0].name, "as-executed");
    }

    #[test]
    fn test_extract_falls_back_to_run_name() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: unlabelled-run
spec:
  pipelineSpec:
    tasks:
      - name: build
"#,
        );

        let pipeline = run.extract_pipeline().unwrap();
        assert_eq!(pipeline.metadata.name, "unlabelled-run");
    }

    #[test]
    fn test_extract_returns_none_without_name() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: ""
spec:
  pipelineSpec:
    tasks:
      - name: build
"#,
        );

        assert!(run.extract_pipeline().is_none());
    }

    #[test]
    fn test_extract_returns_none_without_spec() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: test-pipeline-run
  labels:
    tekton.dev/pipeline: test-pipeline
spec: {}
"#,
        );

        assert!(run.extract_pipeline().is_none());
    }

    #[test]
    fn test_embedded_task_run_lookup() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: run-1
spec: {}
status:
  taskRuns:
    run-1-build:
      pipelineTaskName: build
      status:
        conditions:
          - type: Succeeded
            status: "True"
"#,
        );

        let embedded = run.embedded_task_run("build").unwrap();
        assert_eq!(embedded.pipeline_task_name, "build");
        assert!(run.embedded_task_run("deploy").is_none());
    }

    #[test]
    fn test_skipped_task_lookup() {
        let run = run_from(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: run-1
spec: {}
status:
  skippedTasks:
    - name: optional-scan
      reason: When Expressions evaluated to false
"#,
        );

        assert!(run.is_task_skipped("optional-scan"));
        assert!(!run.is_task_skipped("build"));
    }
}
