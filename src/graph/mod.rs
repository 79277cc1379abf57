// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Topology graph construction
//!
//! Turns a pipeline spec plus per-task resolved statuses into a positioned
//! node/edge model: one node per task (ordinary and finally), one edge per
//! `runAfter` dependency, a longest-path level per node, and per-level
//! uniform label-driven widths.

mod builder;
mod export;
mod label;
mod model;
mod validation;

pub use builder::{build_graph, build_graph_with, run_data_model};
pub use label::{FixedCharMeasure, LabelMeasure, ProportionalMeasure, LABEL_PADDING};
pub use model::{
    GraphEdge, GraphMeta, GraphModel, GraphNode, NodeData, NodeKind, DEFAULT_NODE_HEIGHT,
    GRAPH_ID, GRAPH_LAYOUT, GRAPH_ORIGIN_X, GRAPH_ORIGIN_Y,
};
pub use validation::{PipelineValidator, ValidationResult};
