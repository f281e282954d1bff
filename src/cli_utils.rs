//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use mdabbr_lib::config::Config;
use std::path::Path;

use crate::cli_types::DocumentArgs;

/// Load the configuration for a command and apply command-line overrides.
///
/// An explicit `--config` must exist. Without it, `.mdabbr.toml` in the
/// working directory is used when present, and defaults otherwise.
pub fn load_config(args: &DocumentArgs) -> Result<Config> {
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load(Path::new(path))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
            Config::discover(&cwd)?.unwrap_or_default()
        }
    };

    apply_overrides(&mut config, args);
    log::debug!("[mdabbr-config] Effective config: {config:?}");
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &DocumentArgs) {
    if let Some(keyword) = &args.keyword {
        config.metadata_keyword = keyword.clone();
    }

    if let Some(affixes) = &args.affixes {
        config.detect_affixes = true;
        config.affixes = affixes.clone();
    }

    if args.non_spaced_script {
        config.detect_non_spaced_script = true;
    }

    if args.no_extra {
        config.use_extra_syntax = false;
    }

    // Command-line abbreviations come after configured ones so they win.
    config.abbreviations.extend(args.abbreviations.iter().cloned());
}
