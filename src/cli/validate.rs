// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Validate command - check a pipeline's task graph

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::input;
use crate::graph::PipelineValidator;

/// Run the validate command
pub async fn run(file: PathBuf, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipeline...".bold());
    println!();

    let loaded = match input::load_input(&file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("  {} Failed to parse input", "✗".red());
            eprintln!();
            return Err(e.into());
        }
    };

    println!("  {} Input is a valid Tekton resource", "✓".green());
    if loaded.run.is_some() {
        println!("  {} Pipeline recovered from PipelineRun", "✓".green());
    }

    let validation = PipelineValidator::validate(&loaded.pipeline);

    if !validation.errors.is_empty() {
        println!();
        println!("{}:", "Errors".red().bold());
        for error in &validation.errors {
            println!("  {} {}", "✗".red(), error);
        }
    }

    if !validation.warnings.is_empty() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for warning in &validation.warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }

    if verbose {
        println!();
        println!("{}:", "Pipeline summary".bold());
        println!("  Name: {}", loaded.pipeline.metadata.name);
        println!("  Tasks: {}", loaded.pipeline.spec.tasks.len());
        println!("  Finally tasks: {}", loaded.pipeline.spec.finally_tasks.len());
        for task in loaded
            .pipeline
            .spec
            .tasks
            .iter()
            .chain(loaded.pipeline.spec.finally_tasks.iter())
        {
            let deps = if task.run_after.is_empty() {
                String::new()
            } else {
                format!(" [after: {}]", task.run_after.join(", "))
            };
            println!("    - {}{}", task.name, deps.dimmed());
        }
    }

    println!();

    if !validation.is_valid() {
        Err(miette::miette!("Pipeline validation failed"))
    } else if validation.has_warnings() {
        println!("{}", "Pipeline is valid but has warnings.".yellow().bold());
        Ok(())
    } else {
        println!("{}", "Pipeline is valid!".green().bold());
        Ok(())
    }
}
