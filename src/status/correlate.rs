// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Correlation of pipeline tasks to their execution records.
//!
//! Callers supply run data in two shapes: detailed TaskRun objects labelled
//! with the pipeline task they execute, and the run's embedded
//! `status.taskRuns` map keyed by synthesized task-run names. Both are
//! supported as ordered lookup strategies.

use tracing::debug;

use crate::resources::{PipelineRun, TaskRun, TaskRunStatus};

/// The execution records located for one pipeline task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRunMatch<'a> {
    /// Conditions-and-timing source; from the detailed TaskRun when one
    /// matched, else from the run's embedded record.
    pub status: Option<&'a TaskRunStatus>,

    /// The detailed TaskRun, when one matched. Steps, results, and retries
    /// are only ever read from here.
    pub detail: Option<&'a TaskRun>,
}

impl TaskRunMatch<'_> {
    /// Whether any execution record was located.
    pub fn found(&self) -> bool {
        self.status.is_some() || self.detail.is_some()
    }
}

/// Locate the execution record for `task_name`.
///
/// Strategies, in precedence order:
/// 1. a detailed TaskRun whose `tekton.dev/pipelineTask` label names the
///    task — explicit metadata wins;
/// 2. the run's embedded `status.taskRuns` entry under the synthesized key
///    `<runName>-<taskName>`.
pub fn match_task_run<'a>(
    task_name: &str,
    run: Option<&'a PipelineRun>,
    task_runs: &'a [TaskRun],
) -> TaskRunMatch<'a> {
    let detail = task_runs
        .iter()
        .find(|tr| tr.pipeline_task() == Some(task_name));

    let embedded = run.and_then(|r| r.embedded_task_run(task_name));

    let status = detail
        .and_then(|d| d.status.as_ref())
        .or_else(|| embedded.and_then(|e| e.status.as_ref()));

    if let Some(d) = detail {
        debug!(task = task_name, task_run = %d.metadata.name, "matched detailed TaskRun by label");
    } else if embedded.is_some() {
        debug!(task = task_name, "matched embedded task-run record by synthesized name");
    }

    TaskRunMatch { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ConditionStatus;

    fn run_with_embedded() -> PipelineRun {
        serde_yaml::from_str(
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
            status: "Unknown"
            reason: Running
"#,
        )
        .unwrap()
    }

    fn labelled_task_run() -> TaskRun {
        serde_yaml::from_str(
            r#"
apiVersion: tekton.dev/v1beta1
kind: TaskRun
metadata:
  name: run-1-build-xyz
  labels:
    tekton.dev/pipelineTask: build
status:
  conditions:
    - type: Succeeded
      status: "True"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_label_strategy_takes_precedence() {
        let run = run_with_embedded();
        let task_runs = vec![labelled_task_run()];

        let matched = match_task_run("build", Some(&run), &task_runs);
        assert!(matched.detail.is_some());
        // The detailed record's conditions win over the embedded record's.
        let status = matched.status.unwrap();
        assert_eq!(status.conditions[0].status, ConditionStatus::True);
    }

    #[test]
    fn test_synthesized_name_fallback() {
        let run = run_with_embedded();

        let matched = match_task_run("build", Some(&run), &[]);
        assert!(matched.found());
        assert!(matched.detail.is_none());
        let status = matched.status.unwrap();
        assert_eq!(status.conditions[0].status, ConditionStatus::Unknown);
    }

    #[test]
    fn test_no_record_found() {
        let run = run_with_embedded();
        let matched = match_task_run("deploy", Some(&run), &[]);
        assert!(!matched.found());

        let matched = match_task_run("build", None, &[]);
        assert!(!matched.found());
    }
}
