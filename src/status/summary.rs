// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Run-level status summary.

use serde::Serialize;

use crate::resources::{PipelineRun, RunResult, TaskRun};
use crate::status::resolver::{detail_parts, duration_ms, RunStatus, TaskStatus};

/// Resolved status of a whole PipelineRun, with one entry per recorded
/// task execution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunSummary {
    pub name: String,
    pub status: RunStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<RunResult>,

    pub tasks: Vec<TaskStatus>,
}

/// Summarize a run: its own condition-derived status and timing, plus a
/// resolved status per entry of its embedded task-run map. Detailed
/// TaskRuns contribute steps, results, and retries, matched by task-run
/// name first and by pipeline-task label second.
pub fn run_summary(run: &PipelineRun, task_runs: &[TaskRun]) -> PipelineRunSummary {
    let status = run.status.as_ref();
    let conditions = status.map(|s| s.conditions.as_slice()).unwrap_or_default();
    let start = status.and_then(|s| s.start_time.clone());
    let end = status.and_then(|s| s.completion_time.clone());

    let tasks = status
        .map(|s| {
            s.task_runs
                .iter()
                .map(|(task_run_name, embedded)| {
                    let detail = task_runs
                        .iter()
                        .find(|tr| tr.metadata.name == *task_run_name)
                        .or_else(|| {
                            task_runs.iter().find(|tr| {
                                tr.pipeline_task() == Some(embedded.pipeline_task_name.as_str())
                            })
                        });
                    let (steps, results, retries) = detail_parts(detail);

                    let es = embedded.status.as_ref();
                    TaskStatus::resolve(
                        &embedded.pipeline_task_name,
                        es.map(|s| s.conditions.as_slice()).unwrap_or_default(),
                        es.and_then(|s| s.start_time.as_deref()),
                        es.and_then(|s| s.completion_time.as_deref()),
                        steps,
                        results,
                        retries,
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    PipelineRunSummary {
        name: run.metadata.name.clone(),
        status: RunStatus::from_conditions(conditions).unwrap_or(RunStatus::Unknown),
        duration: duration_ms(start.as_deref(), end.as_deref()),
        start_time: start,
        end_time: end,
        results: status
            .map(|s| s.pipeline_results.clone())
            .unwrap_or_default(),
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary() {
        let run: PipelineRun = serde_yaml::from_str(
            r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  name: run-1
spec: {}
status:
  conditions:
    - type: Succeeded
      status: "True"
      reason: Completed
  startTime: "2023-01-01T00:00:00Z"
  completionTime: "2023-01-01T00:02:00Z"
  pipelineResults:
    - name: digest
      value: sha256:abc
  taskRuns:
    run-1-build:
      pipelineTaskName: build
      status:
        conditions:
          - type: Succeeded
            status: "True"
        startTime: "2023-01-01T00:00:10Z"
        completionTime: "2023-01-01T00:01:10Z"
    run-1-deploy:
      pipelineTaskName: deploy
      status:
        conditions:
          - type: Succeeded
            status: "Unknown"
"#,
        )
        .unwrap();

        let summary = run_summary(&run, &[]);
        assert_eq!(summary.status, RunStatus::Succeeded);
        assert_eq!(summary.duration.as_deref(), Some("120000"));
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.tasks.len(), 2);

        let build = summary.tasks.iter().find(|t| t.name == "build").unwrap();
        assert_eq!(build.status, RunStatus::Succeeded);
        assert_eq!(build.duration.as_deref(), Some("60000"));

        let deploy = summary.tasks.iter().find(|t| t.name == "deploy").unwrap();
        assert_eq!(deploy.status, RunStatus::Running);
    }

    #[test]
    fn test_run_summary_without_status() {
        let run: PipelineRun = serde_yaml::from_str(
            "apiVersion: tekton.dev/v1beta1\nkind: PipelineRun\nmetadata:\n  name: r\nspec: {}\n",
        )
        .unwrap();

        let summary = run_summary(&run, &[]);
        assert_eq!(summary.status, RunStatus::Unknown);
        assert!(summary.tasks.is_empty());
        assert!(summary.duration.is_none());
    }

    #[test]
    fn test_detailed_task_run_contributes_steps_and_retries() {
        let run: PipelineRun = serde_yaml::from_str(
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
        )
        .unwrap();

        let detail: TaskRun = serde_yaml::from_str(
            r#"
apiVersion: tekton.dev/v1beta1
kind: TaskRun
metadata:
  name: run-1-build
status:
  steps:
    - name: compile
      terminated:
        exitCode: 0
  retriesStatus:
    - conditions:
        - type: Succeeded
          status: "False"
"#,
        )
        .unwrap();

        let summary = run_summary(&run, &[detail]);
        let build = &summary.tasks[0];
        assert_eq!(build.steps.len(), 1);
        assert_eq!(build.steps[0].status, RunStatus::Succeeded);
        assert_eq!(build.retries, 1);
    }
}
