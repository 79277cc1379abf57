// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Pipeline resource
//!
//! The declarative DAG: named tasks with `runAfter` dependency edges, plus
//! optional `finally` tasks that run after the main DAG regardless of its
//! outcome.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::common::{Metadata, Param, TaskRef, WhenExpression};
use crate::errors::TekgraphResult;

/// One task definition in a pipeline spec.
///
/// `name` is unique within the pipeline; `run_after` lists the task names
/// this task depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ref: Option<TaskRef>,

    /// Inline task definition; opaque to the compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_spec: Option<serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub when: Vec<WhenExpression>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

/// Pipeline spec: ordinary tasks plus finally tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default)]
    pub tasks: Vec<PipelineTask>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "finally")]
    pub finally_tasks: Vec<PipelineTask>,
}

/// A Tekton Pipeline resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: PipelineSpec,
}

impl Pipeline {
    /// Load a Pipeline from a YAML file.
    pub fn from_file(path: &Path) -> TekgraphResult<Self> {
        Self::from_yaml(&super::read_file(path)?)
    }

    /// Parse a Pipeline from a YAML string, verifying kind and apiVersion.
    pub fn from_yaml(yaml: &str) -> TekgraphResult<Self> {
        super::load_resource(yaml, "Pipeline")
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> TekgraphResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Get a task (ordinary or finally) by name.
    pub fn task(&self, name: &str) -> Option<&PipelineTask> {
        self.spec
            .tasks
            .iter()
            .chain(self.spec.finally_tasks.iter())
            .find(|t| t.name == name)
    }

    /// All task names, ordinary then finally, in declaration order.
    pub fn task_names(&self) -> Vec<&str> {
        self.spec
            .tasks
            .iter()
            .chain(self.spec.finally_tasks.iter())
            .map(|t| t.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TekgraphError;

    #[test]
    fn test_parse_simple_pipeline() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: build-and-test
spec:
  tasks:
    - name: git-clone
      taskRef:
        name: git-clone
    - name: build
      taskRef:
        name: buildah
      runAfter:
        - git-clone
"#;

        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        assert_eq!(pipeline.metadata.name, "build-and-test");
        assert_eq!(pipeline.spec.tasks.len(), 2);
        assert_eq!(pipeline.spec.tasks[1].run_after, vec!["git-clone"]);
    }

    #[test]
    fn test_parse_finally_tasks() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: with-cleanup
spec:
  tasks:
    - name: build
      taskRef:
        name: build
  finally:
    - name: cleanup
      taskRef:
        name: cleanup
"#;

        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        assert_eq!(pipeline.spec.finally_tasks.len(), 1);
        assert_eq!(pipeline.spec.finally_tasks[0].name, "cleanup");
        assert_eq!(pipeline.task_names(), vec!["build", "cleanup"]);
    }

    #[test]
    fn test_reject_wrong_kind() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: not-a-pipeline
spec: {}
"#;

        let result = Pipeline::from_yaml(yaml);
        assert!(matches!(result, Err(TekgraphError::InvalidResource { .. })));
    }

    #[test]
    fn test_task_lookup_covers_finally() {
        let yaml = r#"
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: a
  finally:
    - name: z
"#;

        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        assert!(pipeline.task("a").is_some());
        assert!(pipeline.task("z").is_some());
        assert!(pipeline.task("missing").is_none());
    }
}
