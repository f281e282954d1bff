//! Finding and reading the documents named on the command line

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Display name used for content read from stdin
pub const STDIN_NAME: &str = "<stdin>";

/// A document and the name it is reported under
pub struct Document {
    pub name: String,
    pub content: String,
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md" || ext == "markdown")
}

fn clean_path(path: &Path) -> String {
    let file_path = path.to_string_lossy().to_string();
    match file_path.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => file_path,
    }
}

/// Expand the given paths into a sorted list of files.
///
/// Files named explicitly are kept whatever their extension. Directories are
/// walked for Markdown files, honouring `.gitignore`. No paths means the
/// current directory.
pub fn find_markdown_files(paths: &[String]) -> Vec<String> {
    let mut file_paths = Vec::new();
    let mut dirs = Vec::new();

    for path in paths {
        if Path::new(path).is_dir() {
            dirs.push(path.as_str());
        } else {
            file_paths.push(path.clone());
        }
    }

    if paths.is_empty() {
        dirs.push(".");
    }

    for dir in dirs {
        for result in WalkBuilder::new(dir).build() {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_markdown(path) {
                        file_paths.push(clean_path(path));
                    }
                }
                Err(err) => log::warn!("Error walking directory {dir}: {err}"),
            }
        }
    }

    file_paths.sort();
    file_paths.dedup();
    file_paths
}

/// Read every document named by `paths`. A single `-` reads stdin.
pub fn read_documents(paths: &[String]) -> Result<Vec<Document>> {
    if paths.len() == 1 && paths[0] == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        return Ok(vec![Document {
            name: STDIN_NAME.to_string(),
            content,
        }]);
    }

    find_markdown_files(paths)
        .into_iter()
        .map(|name| {
            let content = fs::read_to_string(&name).with_context(|| format!("Failed to read file {name}"))?;
            log::debug!("Read {} ({} bytes)", name, content.len());
            Ok(Document { name, content })
        })
        .collect()
}
