// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Pipeline validation
//!
//! The loud counterpart to the builder's graceful degradation: reports the
//! structural problems the builder silently works around.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::TekgraphError;
use crate::resources::Pipeline;

/// Pipeline structure validator
pub struct PipelineValidator;

impl PipelineValidator {
    /// Validate a pipeline's task graph.
    pub fn validate(pipeline: &Pipeline) -> ValidationResult {
        let mut result = ValidationResult::new();

        let all_tasks: Vec<_> = pipeline
            .spec
            .tasks
            .iter()
            .chain(pipeline.spec.finally_tasks.iter())
            .collect();

        if all_tasks.is_empty() {
            result.add_warning("Pipeline has no tasks; the graph will be empty");
            return result;
        }

        // Duplicate task names
        let mut seen = BTreeSet::new();
        for task in &all_tasks {
            if !seen.insert(task.name.as_str()) {
                result.add_error(&format!("Duplicate task name: '{}'", task.name));
            }
        }

        // Dependency edges; unknown references reported here rather than
        // silently leveled to 0 as the builder does.
        let mut graph = DiGraph::<(), ()>::new();
        let mut name_to_index: BTreeMap<&str, NodeIndex> = BTreeMap::new();
        let mut index_to_name: BTreeMap<NodeIndex, &str> = BTreeMap::new();
        for task in &all_tasks {
            let node = graph.add_node(());
            name_to_index.entry(task.name.as_str()).or_insert(node);
            index_to_name.insert(node, task.name.as_str());
        }

        for task in &all_tasks {
            let task_node = name_to_index[task.name.as_str()];
            for dep in &task.run_after {
                match name_to_index.get(dep.as_str()) {
                    Some(dep_node) => {
                        graph.add_edge(*dep_node, task_node, ());
                    }
                    None => result.add_error(
                        &TekgraphError::UnknownDependency {
                            task: task.name.clone(),
                            dependency: dep.clone(),
                        }
                        .to_string(),
                    ),
                }
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            result.add_error(
                &TekgraphError::CircularDependency {
                    task: index_to_name[&cycle.node_id()].to_string(),
                }
                .to_string(),
            );
        }

        // Tekton ignores ordering on finally tasks; the graph renders the
        // edges anyway, so surface the mismatch.
        for task in &pipeline.spec.finally_tasks {
            if !task.run_after.is_empty() {
                result.add_warning(&format!(
                    "Finally task '{}' declares runAfter; Tekton does not order finally tasks",
                    task.name
                ));
            }
        }

        result
    }
}

/// Result of pipeline validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
