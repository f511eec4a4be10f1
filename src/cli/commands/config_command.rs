//! Config command feature.
//!
//! This module owns the "duwatch config" command behavior.

use anyhow::Context;
use std::path::Path;

use crate::config::Config;
use crate::theme::Theme;

pub(crate) fn handle_config(init: bool, path: Option<&Path>) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()?,
    };

    if init {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        Config::default()
            .save(&path)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        println!("Wrote default config to {}", Theme::header(&path.display().to_string()));
        return Ok(());
    }

    let config = Config::load(Some(&path)).context("Failed to load configuration")?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    println!("{} {}", Theme::muted("#"), Theme::muted(&source));
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
