// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Shared input loading for CLI commands.

use std::path::Path;

use crate::errors::{TekgraphError, TekgraphResult};
use crate::resources::{self, Pipeline, PipelineRun, TaskRun};

/// A loaded input document: always a pipeline, plus the run when the input
/// was a PipelineRun.
pub struct LoadedInput {
    pub pipeline: Pipeline,
    pub run: Option<PipelineRun>,
}

/// Load a Pipeline or PipelineRun YAML file, dispatching on its `kind`.
pub fn load_input(path: &Path) -> TekgraphResult<LoadedInput> {
    if !path.exists() {
        return Err(TekgraphError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| TekgraphError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    match resources::peek_kind(&text)?.as_str() {
        "Pipeline" => Ok(LoadedInput {
            pipeline: Pipeline::from_yaml(&text)?,
            run: None,
        }),
        "PipelineRun" => {
            let run = PipelineRun::from_yaml(&text)?;
            let pipeline = run
                .extract_pipeline()
                .ok_or_else(|| TekgraphError::NoPipeline {
                    run: run.metadata.name.clone(),
                })?;
            Ok(LoadedInput {
                pipeline,
                run: Some(run),
            })
        }
        other => Err(TekgraphError::UnsupportedKind { kind: other.into() }),
    }
}

/// Expand a `--task-runs` glob pattern into parsed TaskRun resources.
pub fn load_task_runs(pattern: Option<&str>) -> TekgraphResult<Vec<TaskRun>> {
    let Some(pattern) = pattern else {
        return Ok(vec![]);
    };

    let mut task_runs = Vec::new();
    for entry in glob::glob(pattern)? {
        task_runs.push(TaskRun::from_file(&entry?)?);
    }
    Ok(task_runs)
}
