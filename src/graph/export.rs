// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Text renderings of the graph model.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::graph::model::GraphModel;

impl GraphModel {
    /// Generate a Mermaid diagram of the graph.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for node in &self.nodes {
            let _ = writeln!(out, "    {}[{}]", node.id, node.label);
        }

        for edge in &self.edges {
            let _ = writeln!(out, "    {} --> {}", edge.source, edge.target);
        }

        out
    }

    /// Generate a DOT diagram of the graph.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for edge in &self.edges {
            let _ = writeln!(out, "    \"{}\" -> \"{}\";", edge.source, edge.target);
        }

        // Nodes that no edge touches would otherwise be invisible.
        let connected: BTreeSet<&str> = self
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        for node in &self.nodes {
            if !connected.contains(node.id.as_str()) {
                let _ = writeln!(out, "    \"{}\";", node.id);
            }
        }

        out.push_str("}\n");
        out
    }

    /// Generate a plain-text listing, grouped by level.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let max_level = self.nodes.iter().map(|n| n.level).max();

        let Some(max_level) = max_level else {
            return "(empty graph)\n".into();
        };

        for level in 0..=max_level {
            let _ = writeln!(out, "level {level}:");
            for node in self.nodes.iter().filter(|n| n.level == level) {
                let after = if node.run_after.is_empty() {
                    String::new()
                } else {
                    format!("  (after: {})", node.run_after.join(", "))
                };
                let _ = writeln!(
                    out,
                    "  {}  [{}]{}",
                    node.id, node.data.status.status, after
                );
            }
        }

        out
    }
}
