// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Graph command - render a pipeline's topology graph

use miette::Result;
use std::path::{Path, PathBuf};

use super::{input, GraphFormat};
use crate::graph::build_graph;

/// Run the graph command
pub async fn run(
    file: PathBuf,
    task_runs: Option<String>,
    format: GraphFormat,
    _verbose: bool,
) -> Result<()> {
    let output = render(&file, task_runs.as_deref(), format)?;
    println!("{}", output);
    Ok(())
}

/// Render the graph for an input file in the requested format. Shared with
/// the watch command.
pub(crate) fn render(
    file: &Path,
    task_runs: Option<&str>,
    format: GraphFormat,
) -> Result<String> {
    let loaded = input::load_input(file)?;
    let task_runs = input::load_task_runs(task_runs)?;
    let model = build_graph(&loaded.pipeline, loaded.run.as_ref(), &task_runs);

    Ok(match format {
        GraphFormat::Text => model.to_text(),
        GraphFormat::Dot => model.to_dot(),
        GraphFormat::Mermaid => model.to_mermaid(),
        GraphFormat::Json => model.to_json()?,
    })
}
