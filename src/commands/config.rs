// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::config;
use anyhow::Result;

/// Run the config command - get or set a configuration key
pub fn run(key: &str, value: Option<String>) -> Result<()> {
    let mut cfg = config::load()?;
    match value {
        Some(v) => {
            tracing::info!("Setting {} = {}", key, v);
            cfg.set(key, &v)?;
            config::save(&cfg)?;
            println!("{key} = {}", cfg.get(key)?);
        }
        None => {
            println!("{}", cfg.get(key)?);
        }
    }
    Ok(())
}
