//! Abbreviation definition lines (`*[KEY]: title`)
//!
//! A definition line declares an abbreviation that applies from the following
//! lines on. Definitions are usually grouped at the bottom of a document,
//! possibly mixed with reference-style link definitions:
//!
//! ```markdown
//! The HTML specification is maintained by the W3C.
//!
//! *[HTML]: Hypertext Markup Language
//! *[W3C]: World Wide Web Consortium
//! ```
//!
//! The key may not contain `[` or `]`. The title is the trimmed remainder and
//! may be empty, which disables the abbreviation from that line on.

use crate::abbreviation::AbbreviationInfo;
use crate::utils::regex_cache;

/// Parse a `*[KEY]: title` line.
pub fn parse_extra_abbreviation(line: &str) -> Option<AbbreviationInfo> {
    let caps = regex_cache::extra_definition(line)?;
    let key = caps.get(1)?.as_str();
    let title = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

    Some(AbbreviationInfo::new(key, title))
}

/// Whether a paragraph consists only of definitions.
///
/// Every line must be an abbreviation definition or a reference definition.
/// A reference definition directly following another reference definition
/// (without an abbreviation definition in between) closes the pair; a lone
/// reference definition after an abbreviation definition does not qualify.
pub fn is_extra_definitions(text: &str) -> bool {
    let mut pending_reference = false;

    for line in text.split('\n') {
        if regex_cache::is_extra_definition(line) {
            pending_reference = false;
        } else if regex_cache::is_reference_definition(line) {
            pending_reference = !pending_reference;
        } else {
            return false;
        }
    }

    !pending_reference
}
