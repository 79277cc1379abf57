// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Status derivation from conditions, step states, and timestamps.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::{
    Condition, ConditionStatus, PipelineRun, StepState, TaskRun, TaskRunResult,
    SUCCEEDED_CONDITION,
};
use crate::status::correlate::{match_task_run, TaskRunMatch};

/// Normalized run status, shared by runs, tasks, and steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    Succeeded,
    Failed,
    Running,
    Cancelled,
    Pending,
    Skipped,
    #[default]
    Unknown,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Running => "Running",
            Self::Cancelled => "Cancelled",
            Self::Pending => "Pending",
            Self::Skipped => "Skipped",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

impl RunStatus {
    /// Apply the condition table used at every granularity: the `Succeeded`
    /// condition decides the outcome. `None` when no such condition exists;
    /// the caller picks the fallback appropriate to its level.
    pub fn from_conditions(conditions: &[Condition]) -> Option<Self> {
        let condition = succeeded_condition(conditions)?;
        Some(match condition.status {
            ConditionStatus::True => Self::Succeeded,
            ConditionStatus::False => {
                if condition.reason.as_deref() == Some("Cancelled") {
                    Self::Cancelled
                } else {
                    Self::Failed
                }
            }
            ConditionStatus::Unknown => Self::Running,
        })
    }
}

pub(crate) fn succeeded_condition(conditions: &[Condition]) -> Option<&Condition> {
    conditions.iter().find(|c| c.type_ == SUCCEEDED_CONDITION)
}

/// Milliseconds between two RFC 3339 timestamps, rendered as a string.
///
/// `None` unless both timestamps are present and parse. The span is signed:
/// an end before its start passes through as a negative count rather than
/// being clamped or rejected.
pub(crate) fn duration_ms(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = DateTime::parse_from_rfc3339(start?).ok()?;
    let end = DateTime::parse_from_rfc3339(end?).ok()?;
    Some((end - start).num_milliseconds().to_string())
}

/// Resolved status of one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub name: String,
    pub status: RunStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Map a step's container sub-state to a status. Steps carry no conditions;
/// the three observed states stand in for them.
pub fn step_status(step: &StepState) -> StepStatus {
    if let Some(running) = &step.running {
        return StepStatus {
            name: step.name.clone(),
            status: RunStatus::Running,
            start_time: Some(running.started_at.clone()),
            ..StepStatus::default()
        };
    }

    if let Some(terminated) = &step.terminated {
        let status = if terminated.exit_code == 0 {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        };
        return StepStatus {
            name: step.name.clone(),
            status,
            start_time: terminated.started_at.clone(),
            end_time: terminated.finished_at.clone(),
            duration: duration_ms(
                terminated.started_at.as_deref(),
                terminated.finished_at.as_deref(),
            ),
            exit_code: Some(terminated.exit_code),
            reason: terminated.reason.clone(),
            message: terminated.message.clone(),
        };
    }

    if let Some(waiting) = &step.waiting {
        return StepStatus {
            name: step.name.clone(),
            status: RunStatus::Pending,
            reason: waiting.reason.clone(),
            message: waiting.message.clone(),
            ..StepStatus::default()
        };
    }

    StepStatus {
        name: step.name.clone(),
        ..StepStatus::default()
    }
}

/// Resolved status of one pipeline task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub name: String,
    pub status: RunStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepStatus>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<TaskRunResult>,

    #[serde(default)]
    pub retries: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TaskStatus {
    /// Derive a task's status from its execution record.
    ///
    /// Pure: identical inputs yield an identical value, so callers may
    /// memoize on input identity.
    pub fn resolve(
        name: &str,
        conditions: &[Condition],
        start_time: Option<&str>,
        end_time: Option<&str>,
        steps: &[StepState],
        results: &[TaskRunResult],
        retries: usize,
    ) -> Self {
        let condition = succeeded_condition(conditions);
        Self {
            name: name.into(),
            status: RunStatus::from_conditions(conditions).unwrap_or(RunStatus::Unknown),
            start_time: start_time.map(Into::into),
            end_time: end_time.map(Into::into),
            duration: duration_ms(start_time, end_time),
            steps: steps.iter().map(step_status).collect(),
            results: results.to_vec(),
            retries,
            reason: condition.and_then(|c| c.reason.clone()),
            message: condition.and_then(|c| c.message.clone()),
        }
    }

    /// Status for a task with no execution record at all.
    pub fn absent(name: &str, status: RunStatus) -> Self {
        Self {
            name: name.into(),
            status,
            ..Self::default()
        }
    }
}

/// Steps, results, and retry count from a detailed TaskRun, when present.
pub(crate) fn detail_parts(
    detail: Option<&TaskRun>,
) -> (&[StepState], &[TaskRunResult], usize) {
    match detail.and_then(|d| d.status.as_ref()) {
        Some(ds) => (&ds.steps, &ds.task_results, ds.retries_status.len()),
        None => (&[], &[], 0),
    }
}

/// Resolve a task's status from an already-located execution record.
pub(crate) fn resolve_matched(
    task_name: &str,
    matched: &TaskRunMatch<'_>,
    run: Option<&PipelineRun>,
) -> TaskStatus {
    if let Some(status) = matched.status {
        let (steps, results, retries) = detail_parts(matched.detail);
        return TaskStatus::resolve(
            task_name,
            &status.conditions,
            status.start_time.as_deref(),
            status.completion_time.as_deref(),
            steps,
            results,
            retries,
        );
    }

    let status = match run {
        Some(r) if r.is_task_skipped(task_name) => RunStatus::Skipped,
        Some(_) => RunStatus::Pending,
        None => RunStatus::Unknown,
    };
    TaskStatus::absent(task_name, status)
}

/// Resolve the status of the pipeline task `task_name` against a run.
///
/// Conditions and timing come from whichever execution record matched (see
/// [`match_task_run`]); steps, results, and retries only ever come from a
/// detailed TaskRun. With no record at all the task is `Skipped` when the
/// run lists it as skipped, `Pending` when a run exists, and `Unknown` when
/// there is no run to consult.
pub fn resolve_for_task(
    task_name: &str,
    run: Option<&PipelineRun>,
    task_runs: &[TaskRun],
) -> TaskStatus {
    resolve_matched(task_name, &match_task_run(task_name, run, task_runs), run)
}
