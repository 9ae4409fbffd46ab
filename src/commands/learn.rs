// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::config::Config;
use anyhow::Result;

/// Run the learn command - launches the interactive TUI
pub fn run(config: &Config, repo_url: Option<String>, file_path: Option<String>) -> Result<()> {
    tracing::info!("Launching TUI...");
    crate::tui::run(config, repo_url, file_path)
}
