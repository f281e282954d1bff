//! Handler for the `list` command.

use anyhow::Result;
use mdabbr_lib::conversion::collect_abbreviations;
use mdabbr_lib::exit_codes::SUCCESS;

use crate::cli_types::{ListArgs, OutputFormat};
use crate::cli_utils::load_config;
use crate::file_processor::read_documents;
use crate::formatter::{RegistryReport, format_json, format_registry_text};

/// Print the abbreviation registry assembled for each document.
pub fn handle_list(args: &ListArgs) -> Result<i32> {
    let config = load_config(&args.document)?;
    let options = config.document_options();

    let registries: Vec<_> = read_documents(&args.document.paths)?
        .into_iter()
        .map(|doc| {
            let lines: Vec<&str> = doc.content.lines().collect();
            let abbreviations = collect_abbreviations(&lines, &options);
            (doc.name, abbreviations)
        })
        .collect();

    match args.output {
        OutputFormat::Json => {
            let reports: Vec<_> = registries
                .iter()
                .map(|(name, abbreviations)| (name.clone(), RegistryReport { abbreviations }))
                .collect();
            println!("{}", format_json(&reports)?);
        }
        OutputFormat::Text => {
            for (name, abbreviations) in &registries {
                println!("{}", format_registry_text(abbreviations, name));
            }
        }
    }

    Ok(SUCCESS)
}
