// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Tekton resource model
//!
//! Typed, serde-derived structures for the subset of Tekton resources the
//! graph compiler consumes: Pipeline, PipelineRun, and TaskRun. Field names
//! follow the Kubernetes camelCase wire format.

mod common;
mod pipeline;
mod pipeline_run;
mod task_run;

pub use common::{Condition, ConditionStatus, Metadata, Param, TaskRef, WhenExpression};
pub use pipeline::{Pipeline, PipelineSpec, PipelineTask};
pub use pipeline_run::{
    ChildReference, EmbeddedTaskRun, PipelineRef, PipelineRun, PipelineRunSpec,
    PipelineRunStatus, RunResult, SkippedTask,
};
pub use task_run::{
    StepRunning, StepState, StepTerminated, StepWaiting, TaskRun, TaskRunResult, TaskRunStatus,
};

use serde::de::DeserializeOwned;

use crate::errors::{TekgraphError, TekgraphResult};

/// Label a PipelineRun carries to name its Pipeline.
pub const PIPELINE_LABEL: &str = "tekton.dev/pipeline";

/// Label a TaskRun carries to name the pipeline task it executes.
pub const PIPELINE_TASK_LABEL: &str = "tekton.dev/pipelineTask";

/// API group all Tekton resources declare.
pub const TEKTON_API_GROUP: &str = "tekton.dev";

/// Condition type carrying the run outcome.
pub const SUCCEEDED_CONDITION: &str = "Succeeded";

/// Read the `kind` of a YAML document without committing to a schema.
pub fn peek_kind(yaml: &str) -> TekgraphResult<String> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    value
        .get("kind")
        .and_then(|k| k.as_str())
        .map(String::from)
        .ok_or_else(|| TekgraphError::InvalidResource {
            expected: "Tekton".into(),
            reason: "document has no 'kind' field".into(),
        })
}

/// Parse a YAML document into `T`, verifying kind and apiVersion first.
pub(crate) fn load_resource<T: DeserializeOwned>(yaml: &str, expected: &str) -> TekgraphResult<T> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;

    let kind = value.get("kind").and_then(|k| k.as_str()).unwrap_or("");
    if kind != expected {
        return Err(TekgraphError::InvalidResource {
            expected: expected.into(),
            reason: if kind.is_empty() {
                "document has no 'kind' field".into()
            } else {
                format!("found kind '{kind}'")
            },
        });
    }

    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if !api_version.contains(TEKTON_API_GROUP) {
        return Err(TekgraphError::InvalidResource {
            expected: expected.into(),
            reason: format!("apiVersion '{api_version}' is not a tekton.dev version"),
        });
    }

    serde_yaml::from_value(value).map_err(Into::into)
}

/// Read a file into a string with a path-carrying error.
pub(crate) fn read_file(path: &std::path::Path) -> TekgraphResult<String> {
    std::fs::read_to_string(path).map_err(|e| TekgraphError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
