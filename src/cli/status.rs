// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Status command - show resolved run and task statuses

use colored::{ColoredString, Colorize};
use miette::Result;
use std::path::PathBuf;

use super::input;
use crate::status::{resolve_for_task, run_summary, RunStatus};

/// Run the status command
pub async fn run(file: PathBuf, task_runs: Option<String>, verbose: bool) -> Result<()> {
    let loaded = input::load_input(&file)?;
    let task_runs = input::load_task_runs(task_runs.as_deref())?;

    match &loaded.run {
        Some(run) => {
            let summary = run_summary(run, &task_runs);
            println!("{} {}", "PipelineRun".bold(), summary.name);
            println!("  Status:   {}", paint(summary.status, &summary.status.to_string()));
            if let Some(start) = &summary.start_time {
                println!("  Started:  {}", start);
            }
            if let Some(duration) = &summary.duration {
                println!("  Duration: {}ms", duration);
            }
            for result in &summary.results {
                println!("  Result:   {} = {}", result.name, result.value);
            }
        }
        None => {
            println!(
                "{} {} (no run attached; statuses are unresolved)",
                "Pipeline".bold(),
                loaded.pipeline.metadata.name
            );
        }
    }

    println!();
    println!("{}", "Tasks".bold());

    for name in loaded.pipeline.task_names() {
        let status = resolve_for_task(name, loaded.run.as_ref(), &task_runs);

        let mut extras = Vec::new();
        if let Some(duration) = &status.duration {
            extras.push(format!("{}ms", duration));
        }
        if status.retries > 0 {
            extras.push(format!("{} retries", status.retries));
        }
        if let Some(reason) = &status.reason {
            if *reason != status.status.to_string() {
                extras.push(reason.clone());
            }
        }

        println!(
            "  {:<28} {} {}",
            name,
            paint(status.status, &format!("{:<10}", status.status)),
            extras.join("  ").dimmed()
        );

        if verbose {
            for step in &status.steps {
                let duration = step
                    .duration
                    .as_ref()
                    .map(|d| format!(" ({}ms)", d))
                    .unwrap_or_default();
                println!(
                    "    - {:<24} {}{}",
                    step.name,
                    paint(step.status, &step.status.to_string()),
                    duration.dimmed()
                );
            }
        }
    }

    Ok(())
}

fn paint(status: RunStatus, text: &str) -> ColoredString {
    match status {
        RunStatus::Succeeded => text.green(),
        RunStatus::Failed => text.red(),
        RunStatus::Running => text.cyan(),
        RunStatus::Cancelled => text.magenta(),
        RunStatus::Pending => text.yellow(),
        RunStatus::Skipped => text.dimmed(),
        RunStatus::Unknown => text.normal(),
    }
}
