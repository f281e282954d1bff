//! Handler for the `scan` command.

use anyhow::Result;
use colored::*;
use mdabbr_lib::conversion::annotate_document;
use mdabbr_lib::exit_codes::{MATCHES_FOUND, SUCCESS};

use crate::cli_types::{OutputFormat, ScanArgs};
use crate::cli_utils::load_config;
use crate::file_processor::read_documents;
use crate::formatter::{format_json, format_marks_text};

/// Scan documents and print every abbreviation occurrence.
pub fn handle_scan(args: &ScanArgs) -> Result<i32> {
    let config = load_config(&args.document)?;
    let options = config.document_options();

    let annotations: Vec<_> = read_documents(&args.document.paths)?
        .into_iter()
        .map(|doc| {
            let annotation = annotate_document(&doc.content, &options);
            log::debug!("{}: {} abbreviation(s)", doc.name, annotation.mark_count());
            (doc.name, annotation)
        })
        .collect();

    let total: usize = annotations.iter().map(|(_, annotation)| annotation.mark_count()).sum();

    match args.output {
        OutputFormat::Json => println!("{}", format_json(&annotations)?),
        OutputFormat::Text => {
            for (name, annotation) in &annotations {
                let output = format_marks_text(annotation, name);
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            let summary = format!("Found {total} abbreviation(s) in {} file(s)", annotations.len());
            eprintln!("{}", summary.dimmed());
        }
    }

    if args.fail_on_match && total > 0 {
        Ok(MATCHES_FOUND)
    } else {
        Ok(SUCCESS)
    }
}
