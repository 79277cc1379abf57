// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Graph construction from a pipeline spec and run data.

use std::collections::BTreeMap;
use tracing::warn;

use crate::graph::label::{FixedCharMeasure, LabelMeasure};
use crate::graph::model::{
    GraphEdge, GraphMeta, GraphModel, GraphNode, NodeData, NodeKind, DEFAULT_NODE_HEIGHT,
};
use crate::resources::{Pipeline, PipelineRun, TaskRun};
use crate::status::{match_task_run, resolve_matched};

/// Build the topology graph for a pipeline with the default label measure.
pub fn build_graph(
    pipeline: &Pipeline,
    run: Option<&PipelineRun>,
    task_runs: &[TaskRun],
) -> GraphModel {
    build_graph_with(pipeline, run, task_runs, &FixedCharMeasure)
}

/// Build the topology graph with an explicit label measure.
///
/// Never fails: a task with no execution record gets a degraded status, and
/// a `runAfter` reference to an unknown task is ignored for leveling (the
/// node trends toward level 0) while its edge is still emitted so the
/// renderer can show the dangling dependency. [`super::PipelineValidator`]
/// is the loud path for those references.
pub fn build_graph_with(
    pipeline: &Pipeline,
    run: Option<&PipelineRun>,
    task_runs: &[TaskRun],
    measure: &dyn LabelMeasure,
) -> GraphModel {
    let namespace = run
        .and_then(|r| r.metadata.namespace.clone())
        .unwrap_or_default();

    // Ordinary tasks first, then finally tasks, in declaration order.
    let mut nodes: Vec<GraphNode> = pipeline
        .spec
        .tasks
        .iter()
        .map(|t| (t, NodeKind::Task))
        .chain(
            pipeline
                .spec
                .finally_tasks
                .iter()
                .map(|t| (t, NodeKind::Finally)),
        )
        .map(|(task, kind)| {
            let matched = match_task_run(&task.name, run, task_runs);
            let status = resolve_matched(&task.name, &matched, run);
            GraphNode {
                id: task.name.clone(),
                kind,
                label: task.name.clone(),
                level: 0,
                width: measure.node_width(&task.name),
                height: DEFAULT_NODE_HEIGHT,
                run_after: task.run_after.clone(),
                data: NodeData {
                    namespace: namespace.clone(),
                    status,
                    task: task.clone(),
                    task_run: matched.detail.cloned(),
                },
            }
        })
        .collect();

    // Levels: memoized longest path from a root, resolved through a
    // name-keyed lookup so parents may be declared before or after their
    // dependents.
    let index: BTreeMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();
    let deps: Vec<Vec<String>> = nodes.iter().map(|n| n.run_after.clone()).collect();
    let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();

    let mut memo: Vec<Option<usize>> = vec![None; nodes.len()];
    for i in 0..nodes.len() {
        let level = level_of(i, &deps, &index, &ids, &mut memo);
        nodes[i].level = level;
    }

    // Broadcast the per-level maximum width.
    let mut level_width: BTreeMap<usize, f64> = BTreeMap::new();
    for node in &nodes {
        let w = level_width.entry(node.level).or_insert(0.0);
        if node.width > *w {
            *w = node.width;
        }
    }
    for node in &mut nodes {
        node.width = level_width[&node.level];
    }

    // One edge per (parent, task) pair from each task's runAfter list.
    let edges: Vec<GraphEdge> = nodes
        .iter()
        .flat_map(|node| {
            node.run_after
                .iter()
                .map(|parent| GraphEdge::new(parent, &node.id))
        })
        .collect();

    GraphModel {
        graph: GraphMeta::default(),
        nodes,
        edges,
    }
}

fn level_of(
    idx: usize,
    deps: &[Vec<String>],
    index: &BTreeMap<String, usize>,
    ids: &[String],
    memo: &mut [Option<usize>],
) -> usize {
    if let Some(level) = memo[idx] {
        return level;
    }
    // Pre-seed so a cycle terminates at the node already on the stack
    // instead of recursing forever. Cycles are rejected by validation;
    // leveling just has to survive them.
    memo[idx] = Some(0);

    let mut level = 0;
    for parent in &deps[idx] {
        match index.get(parent) {
            Some(&p) => level = level.max(level_of(p, deps, index, ids, memo) + 1),
            None => warn!(
                task = %ids[idx],
                dependency = %parent,
                "runAfter references unknown task; ignored for leveling"
            ),
        }
    }

    memo[idx] = Some(level);
    level
}

/// Build the graph model for a PipelineRun on its own.
///
/// `None` when no pipeline can be recovered from the run — the expected
/// outcome for partially-populated runs, handed to callers as a "no data"
/// state rather than an error.
pub fn run_data_model(run: &PipelineRun, task_runs: &[TaskRun]) -> Option<GraphModel> {
    let pipeline = run.extract_pipeline()?;
    Some(build_graph(&pipeline, Some(run), task_runs))
}
