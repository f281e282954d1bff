//!
//! Frontmatter metadata: parsing the raw block and extracting abbreviation
//! definitions stored under a keyword.
//!
//! ```yaml
//! ---
//! abbr:
//!   - HTML: HyperText Markup Language
//!   - "CSS: Cascading Style Sheets"
//! ---
//! ```
//!
//! Parsing never fails loudly. Invalid YAML/JSON, or a block that is not a
//! mapping or sequence, contributes nothing.

use crate::abbreviation::AbbreviationDefinition;
use serde_yml::Value;

/// The literal line that opens and closes a frontmatter block.
pub const METADATA_BORDER: &str = "---";

fn to_metadata(value: Value) -> Option<Value> {
    match value {
        Value::Mapping(_) | Value::Sequence(_) => Some(value),
        _ => None,
    }
}

/// Parse a metadata block, trying YAML first and JSON second.
///
/// Only mappings and sequences are accepted; scalars yield `None`.
pub fn get_metadata(text: &str) -> Option<Value> {
    let from_yaml = match serde_yml::from_str::<Value>(text) {
        Ok(value) => to_metadata(value),
        Err(e) => {
            log::trace!("metadata is not YAML: {e}");
            None
        }
    };

    from_yaml.or_else(|| match serde_json::from_str::<Value>(text) {
        Ok(value) => to_metadata(value),
        Err(e) => {
            log::trace!("metadata is not JSON: {e}");
            None
        }
    })
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build a metadata definition from a single array entry.
///
/// Accepts a `"key: title"` string (split at the first colon, which must not
/// be the first character) or a single-key mapping whose value is a string.
pub fn definition_from_entry(entry: &Value) -> Option<AbbreviationDefinition> {
    match entry {
        Value::String(s) => {
            let val = s.trim();
            match val.find(':') {
                Some(idx) if idx > 0 => Some(AbbreviationDefinition::metadata(
                    val[..idx].trim(),
                    val[idx + 1..].trim(),
                )),
                _ => None,
            }
        }
        Value::Mapping(map) if map.len() == 1 => {
            let (key, title) = map.iter().next()?;
            let title = title.as_str()?;
            Some(AbbreviationDefinition::metadata(key_to_string(key)?, title))
        }
        _ => None,
    }
}

/// Collect metadata definitions from the array stored under `keyword`.
///
/// An empty keyword, a missing key or a non-array value yields nothing.
/// Entries that are neither form are skipped.
pub fn abbreviations_from_frontmatter(frontmatter: Option<&Value>, keyword: &str) -> Vec<AbbreviationDefinition> {
    if keyword.is_empty() {
        return Vec::new();
    }

    let Some(entries) = frontmatter
        .and_then(|fm| fm.get(keyword))
        .and_then(|value| value.as_sequence())
    else {
        return Vec::new();
    };

    entries.iter().filter_map(definition_from_entry).collect()
}
