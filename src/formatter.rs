//! Output formatting for scan and list results

use colored::*;
use mdabbr_lib::abbreviation::{AbbreviationDefinition, Origin};
use mdabbr_lib::conversion::DocumentAnnotation;
use serde::Serialize;

/// Format: file:line:column: key -> title
pub fn format_marks_text(annotation: &DocumentAnnotation, file_path: &str) -> String {
    annotation
        .marks()
        .map(|(line, mark)| {
            let key = if mark.key == mark.text {
                mark.text.yellow().bold().to_string()
            } else {
                format!("{} ({})", mark.text.yellow().bold(), mark.key)
            };
            format!(
                "{}:{}:{}: {} -> {} {}",
                file_path.blue().underline(),
                line.to_string().cyan(),
                (mark.index + 1).to_string().cyan(),
                key,
                mark.title,
                format!("[{}]", mark.origin.as_str()).dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn origin_label(origin: &Origin) -> String {
    match origin {
        Origin::Extra { position } => format!("extra@{position}"),
        other => other.as_str().to_string(),
    }
}

/// Format: one registry entry per line, `origin key: title`
pub fn format_registry_text(abbreviations: &[AbbreviationDefinition], file_path: &str) -> String {
    let mut output = format!("{}", file_path.blue().underline());

    if abbreviations.is_empty() {
        output.push_str(&format!("\n  {}", "no abbreviations".dimmed()));
        return output;
    }

    for def in abbreviations {
        let title = if def.is_disabled() {
            "(disabled)".red().to_string()
        } else {
            def.title.clone()
        };
        output.push_str(&format!(
            "\n  {} {}: {}",
            format!("{:<12}", origin_label(&def.origin)).dimmed(),
            def.key.yellow().bold(),
            title
        ));
    }

    output
}

#[derive(Serialize)]
struct FileReport<'a, T: Serialize> {
    file: &'a str,
    #[serde(flatten)]
    report: T,
}

/// The registry of one document, as listed by `mdabbr list`
#[derive(Serialize)]
pub struct RegistryReport<'a> {
    pub abbreviations: &'a [AbbreviationDefinition],
}

/// Render per-file results as a JSON array
pub fn format_json<T: Serialize>(reports: &[(String, T)]) -> serde_json::Result<String> {
    let reports: Vec<_> = reports
        .iter()
        .map(|(file, report)| FileReport { file, report })
        .collect();
    serde_json::to_string_pretty(&reports)
}
