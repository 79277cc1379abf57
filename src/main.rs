// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! tekgraph - Tekton Topology Graph Compiler
//!
//! Compile Tekton Pipeline/PipelineRun YAML into topology graphs.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tekgraph::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tekgraph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Graph {
            file,
            task_runs,
            format,
        } => tekgraph::cli::graph::run(file, task_runs, format, cli.verbose).await,
        Commands::Status { file, task_runs } => {
            tekgraph::cli::status::run(file, task_runs, cli.verbose).await
        }
        Commands::Validate { file } => tekgraph::cli::validate::run(file, cli.verbose).await,
        Commands::Watch {
            file,
            task_runs,
            format,
            debounce,
        } => tekgraph::cli::watch::run(file, task_runs, format, debounce, cli.verbose).await,
    }
}
