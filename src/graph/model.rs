// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Graph model structures
//!
//! The output value consumed by rendering layers. Pure data; no identity
//! beyond structural equality for a given input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TekgraphResult;
use crate::resources::{PipelineTask, TaskRun};
use crate::status::TaskStatus;

/// Fixed node height, in pixels.
pub const DEFAULT_NODE_HEIGHT: f64 = 32.0;

/// Stable graph id expected by the downstream renderer.
pub const GRAPH_ID: &str = "pipelinerun-vis-graph";

/// Layout identifier expected by the downstream renderer.
pub const GRAPH_LAYOUT: &str = "pipelinerun-visualization";

/// Coordinate origin of the rendered graph.
pub const GRAPH_ORIGIN_X: f64 = 15.0;
pub const GRAPH_ORIGIN_Y: f64 = 40.0;

/// Whether a node comes from the main task list or the finally list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "task-node")]
    Task,

    #[serde(rename = "finally-node")]
    Finally,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task-node"),
            Self::Finally => write!(f, "finally-node"),
        }
    }
}

/// Payload attached to each node for the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub namespace: String,

    /// The resolved execution status of this task.
    pub status: TaskStatus,

    /// The task definition the node was built from.
    pub task: PipelineTask,

    /// The detailed TaskRun that matched, when one did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_run: Option<TaskRun>,
}

/// One positioned task node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node id; equals the task name, unique within the model.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    pub label: String,

    /// Topological depth: longest path from a root task.
    pub level: usize,

    /// Uniform across all nodes sharing a level.
    pub width: f64,

    pub height: f64,

    /// Names of the tasks this node depends on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,

    pub data: NodeData,
}

/// One dependency edge, drawn from a task's `runAfter` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// `"<source>-<target>"`.
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Root graph metadata consumed only by the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub layout: String,

    pub x: f64,
    pub y: f64,
}

impl Default for GraphMeta {
    fn default() -> Self {
        Self {
            id: GRAPH_ID.into(),
            kind: "graph".into(),
            layout: GRAPH_LAYOUT.into(),
            x: GRAPH_ORIGIN_X,
            y: GRAPH_ORIGIN_Y,
        }
    }
}

/// The positioned graph: metadata plus nodes and edges.
#[derive(Debug, Clone, Serialize)]
pub struct GraphModel {
    pub graph: GraphMeta,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the model as pretty-printed JSON.
    pub fn to_json(&self) -> TekgraphResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_id_format() {
        let edge = GraphEdge::new("git-clone", "build");
        assert_eq!(edge.id, "git-clone-build");
        assert_eq!(edge.source, "git-clone");
        assert_eq!(edge.target, "build");
    }

    #[test]
    fn test_node_kind_wire_names() {
        assert_eq!(serde_json::to_string(&NodeKind::Task).unwrap(), "\"task-node\"");
        assert_eq!(
            serde_json::to_string(&NodeKind::Finally).unwrap(),
            "\"finally-node\""
        );
    }

    #[test]
    fn test_graph_meta_defaults() {
        let meta = GraphMeta::default();
        assert_eq!(meta.id, "pipelinerun-vis-graph");
        assert_eq!(meta.layout, "pipelinerun-visualization");
        assert_eq!((meta.x, meta.y), (15.0, 40.0));
    }
}
