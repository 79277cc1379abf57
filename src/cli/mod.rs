// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for tekgraph.

pub mod graph;
pub mod input;
pub mod status;
pub mod validate;
pub mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tekton topology graph compiler
///
/// Compile Pipeline and PipelineRun YAML into positioned task graphs.
#[derive(Parser, Debug)]
#[clap(
    name = "tekgraph",
    version,
    about = "Compile Tekton Pipeline/PipelineRun YAML into topology graphs",
    long_about = None,
    after_help = "Examples:\n\
        tekgraph graph pipeline.yaml            Render the task graph\n\
        tekgraph graph run.yaml --format dot    Render a run's graph as DOT\n\
        tekgraph status run.yaml                Show resolved task statuses\n\
        tekgraph validate pipeline.yaml         Check the task graph structure\n\
        tekgraph watch run.yaml                 Re-render on file changes\n\n\
        See 'tekgraph <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the topology graph for a Pipeline or PipelineRun
    Graph {
        /// Pipeline or PipelineRun YAML file
        file: PathBuf,

        /// Glob pattern of TaskRun YAML files supplying detailed status
        #[clap(short, long, value_name = "GLOB")]
        task_runs: Option<String>,

        /// Output format (text, dot, mermaid, json)
        #[clap(short, long, default_value = "text")]
        format: GraphFormat,
    },

    /// Show resolved statuses for a PipelineRun
    Status {
        /// PipelineRun (or Pipeline) YAML file
        file: PathBuf,

        /// Glob pattern of TaskRun YAML files supplying detailed status
        #[clap(short, long, value_name = "GLOB")]
        task_runs: Option<String>,
    },

    /// Validate a pipeline's task graph
    Validate {
        /// Pipeline or PipelineRun YAML file
        file: PathBuf,
    },

    /// Watch mode - re-render the graph on file changes
    Watch {
        /// Pipeline or PipelineRun YAML file
        file: PathBuf,

        /// Glob pattern of TaskRun YAML files supplying detailed status
        #[clap(short, long, value_name = "GLOB")]
        task_runs: Option<String>,

        /// Output format (text, dot, mermaid, json)
        #[clap(short, long, default_value = "text")]
        format: GraphFormat,

        /// Debounce delay in milliseconds
        #[clap(long, default_value = "500")]
        debounce: u64,
    },
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
    Json,
}

impl std::str::FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "dot" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown graph format: {}", s)),
        }
    }
}
