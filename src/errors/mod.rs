// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Error types for tekgraph
//!
//! Anticipated absences — an in-flight run, a task with no execution record
//! yet, a run without an inline pipeline spec — are modelled as `Option` or
//! a degraded status, never as errors. These types cover genuinely malformed
//! input and CLI-level failures.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for tekgraph operations
pub type TekgraphResult<T> = Result<T, TekgraphError>;

/// Main error type for tekgraph
#[derive(Error, Debug, Diagnostic)]
pub enum TekgraphError {
    // ─────────────────────────────────────────────────────────────────────────
    // Resource Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("File not found: {path}")]
    #[diagnostic(code(tekgraph::file_not_found))]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(tekgraph::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Not a Tekton {expected} resource: {reason}")]
    #[diagnostic(
        code(tekgraph::invalid_resource),
        help("Expected 'kind: {expected}' with an apiVersion under tekton.dev")
    )]
    InvalidResource { expected: String, reason: String },

    #[error("Unsupported resource kind: '{kind}'")]
    #[diagnostic(
        code(tekgraph::unsupported_kind),
        help("Supported kinds: Pipeline, PipelineRun, TaskRun")
    )]
    UnsupportedKind { kind: String },

    #[error("No pipeline could be recovered from PipelineRun '{run}'")]
    #[diagnostic(
        code(tekgraph::no_pipeline),
        help(
            "The run needs a 'tekton.dev/pipeline' label or a metadata name, \
             and an inline pipelineSpec in its status or spec"
        )
    )]
    NoPipeline { run: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Graph Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Circular dependency involving task '{task}'")]
    #[diagnostic(
        code(tekgraph::circular_dependency),
        help("Review the runAfter entries to remove the cycle")
    )]
    CircularDependency { task: String },

    #[error("Task '{task}' runs after unknown task '{dependency}'")]
    #[diagnostic(
        code(tekgraph::unknown_dependency),
        help("Check that '{dependency}' is defined in the pipeline")
    )]
    UnknownDependency { task: String, dependency: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/Format Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(tekgraph::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(tekgraph::yaml_error))]
    Yaml { message: String },

    #[error("JSON serialization error: {message}")]
    #[diagnostic(code(tekgraph::json_error))]
    Json { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(tekgraph::glob_error))]
    GlobPattern { message: String },
}

impl From<std::io::Error> for TekgraphError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for TekgraphError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for TekgraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<glob::PatternError> for TekgraphError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl From<glob::GlobError> for TekgraphError {
    fn from(e: glob::GlobError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}
