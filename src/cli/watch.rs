// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Watch command - re-render the graph on file changes

use colored::Colorize;
use miette::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use super::GraphFormat;

/// Run the watch command
pub async fn run(
    file: PathBuf,
    task_runs: Option<String>,
    format: GraphFormat,
    debounce_ms: u64,
    _verbose: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(miette::miette!("File not found: {}", file.display()));
    }

    println!("{}", "Starting watch mode...".bold());
    println!(
        "Watching {} (debounce: {}ms)",
        file.display(),
        debounce_ms
    );
    println!("Press {} to exit.", "Ctrl+C".cyan());
    println!();

    // Create channel for receiving events
    let (tx, rx) = channel();

    // Create debounced watcher over the file's directory; editors replace
    // files on save, so watching the path alone misses changes.
    let mut debouncer = new_debouncer(Duration::from_millis(debounce_ms), tx)
        .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    let watch_root = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    debouncer
        .watcher()
        .watch(watch_root, RecursiveMode::Recursive)
        .map_err(|e| miette::miette!("Failed to start watching: {}", e))?;

    // Initial render
    render_once(&file, task_runs.as_deref(), format);

    // Watch for changes
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events
                    .iter()
                    .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                    .count();

                if relevant > 0 {
                    println!();
                    println!("{}", "─".repeat(50).dimmed());
                    println!(
                        "{}: {} file(s) changed",
                        "Change detected".yellow(),
                        relevant
                    );
                    println!();
                    render_once(&file, task_runs.as_deref(), format);
                }
            }
            Ok(Err(e)) => {
                eprintln!("{}: {:?}", "Watch error".red(), e);
            }
            Err(e) => {
                // Channel closed
                eprintln!("{}: {}", "Channel error".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn render_once(file: &Path, task_runs: Option<&str>, format: GraphFormat) {
    match super::graph::render(file, task_runs, format) {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("{}: {:?}", "Render error".red(), e),
    }
}
