// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analyze command - one-shot analysis with a printed summary

use crate::client::AnalysisClient;
use crate::config::Config;
use crate::graph::DependencyGraph;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the analyze command
pub fn run(
    config: &Config,
    repo_url: &str,
    file_path: &str,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    info!("Analyzing {} from {}", file_path, repo_url);

    let client = AnalysisClient::new(&config.endpoint, config.timeout_secs)?;
    let result = client.analyze(repo_url, file_path).map_err(|err| {
        // Detail goes to the log; the user gets one message and decides
        // whether to resubmit.
        warn!(error = %err, "analysis request failed");
        anyhow::anyhow!("Failed to analyze repository. Check the URL and file path, then try again.")
    })?;

    if let Some(path) = &output {
        let content =
            serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        println!("Analysis saved to {}", path.display());
        return Ok(());
    }

    if json {
        let content =
            serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?;
        println!("{content}");
        return Ok(());
    }

    let graph = DependencyGraph::from_data(result.graph.clone());

    println!("{}", "Analysis complete".green().bold());
    println!("  repository: {repo_url}");
    println!("  file:       {file_path}");
    println!();

    println!(
        "{} {} nodes, {} edges",
        "Graph:".cyan().bold(),
        graph.node_count(),
        graph.edge_count()
    );
    println!(
        "{} {} chapters",
        "Lesson:".cyan().bold(),
        result.chapters.len()
    );
    for (i, chapter) in result.chapters.iter().enumerate() {
        println!("  {}. {}", i + 1, chapter.title);
    }
    println!(
        "{} {} questions",
        "Quiz:".cyan().bold(),
        result.quiz.len()
    );
    println!();
    println!(
        "Run '{}' to study interactively.",
        format!("codexflow learn {repo_url} {file_path}").bold()
    );

    Ok(())
}
