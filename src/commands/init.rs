//! Handler for the `init` command.

use anyhow::Result;
use mdabbr_lib::config::create_default_config;
use mdabbr_lib::exit_codes::SUCCESS;

use crate::cli_types::InitArgs;

/// Write a default configuration file.
pub fn handle_init(args: &InitArgs) -> Result<i32> {
    create_default_config(&args.path)?;
    println!("Created default configuration file: {}", args.path);
    Ok(SUCCESS)
}
