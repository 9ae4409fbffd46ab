// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Codexflow CLI - interactive code onboarding engine

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use codexflow::{commands, config};

#[derive(Parser)]
#[command(name = "codexflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "CODEXFLOW_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Analysis service base URL override
    #[arg(long, env = "CODEXFLOW_API_URL")]
    api_url: Option<String>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository file and print the lesson summary
    Analyze {
        /// Repository URL
        repo_url: String,

        /// File path within the repository
        file_path: String,

        /// Print the raw analysis result as JSON
        #[arg(long)]
        json: bool,

        /// Save the analysis result to a file instead of printing
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Launch the interactive learning session
    Learn {
        /// Repository URL (pre-fills the form)
        repo_url: Option<String>,

        /// File path within the repository (pre-fills the form)
        file_path: Option<String>,
    },

    /// Export a saved analysis graph to various formats
    Export {
        /// Saved analysis JSON (from 'analyze --output')
        #[arg(short, long)]
        input: std::path::PathBuf,

        /// Output format (dot, json)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key
        key: String,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Resolve configuration, with CLI overrides on top
    let mut cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    if let Some(url) = &cli.api_url {
        cfg.endpoint = url.trim_end_matches('/').to_string();
    }

    // Execute command
    match cli.command {
        Commands::Analyze {
            repo_url,
            file_path,
            json,
            output,
        } => commands::analyze::run(&cfg, &repo_url, &file_path, json, output),
        Commands::Learn {
            repo_url,
            file_path,
        } => commands::learn::run(&cfg, repo_url, file_path),
        Commands::Export {
            input,
            format,
            output,
        } => commands::export::run(&input, &format, output),
        Commands::Config { key, value } => commands::config::run(&key, value),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
