//!
//! Abbreviation definitions and the registry-level helpers that operate on a
//! list of them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A bare key/title pair, as written in configuration or in a definition line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbbreviationInfo {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

impl AbbreviationInfo {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Where a definition came from.
///
/// Global and metadata definitions apply to the whole document. Extra
/// definitions (`*[KEY]: title`) only become visible from the line on which
/// they are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Origin {
    Global,
    Metadata,
    Extra {
        /// 1-based line of the declaration
        position: usize,
    },
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Global => "global",
            Origin::Metadata => "metadata",
            Origin::Extra { .. } => "extra",
        }
    }
}

/// A single abbreviation instance in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbbreviationDefinition {
    pub key: String,
    /// Tooltip text. Empty means the abbreviation is explicitly disabled.
    pub title: String,
    pub origin: Origin,
}

impl AbbreviationDefinition {
    pub fn new(key: impl Into<String>, title: impl Into<String>, origin: Origin) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            origin,
        }
    }

    pub fn global(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(key, title, Origin::Global)
    }

    pub fn metadata(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(key, title, Origin::Metadata)
    }

    pub fn extra(key: impl Into<String>, title: impl Into<String>, position: usize) -> Self {
        Self::new(key, title, Origin::Extra { position })
    }

    pub fn is_disabled(&self) -> bool {
        self.title.is_empty()
    }

    /// Whether the definition may be used on `line_number`.
    pub fn is_visible_at(&self, line_number: usize) -> bool {
        match self.origin {
            Origin::Global | Origin::Metadata => true,
            Origin::Extra { position } => position <= line_number,
        }
    }

    /// Priority used when resolving overlapping substring matches.
    ///
    /// Global and metadata definitions always dominate with `-1`. Extra
    /// definitions get their declaration offset relative to the consuming line.
    pub fn priority_key(&self, line_number: usize) -> isize {
        match self.origin {
            Origin::Global | Origin::Metadata => -1,
            Origin::Extra { position } => position as isize - line_number as isize,
        }
    }
}

impl From<&AbbreviationDefinition> for AbbreviationInfo {
    fn from(def: &AbbreviationDefinition) -> Self {
        AbbreviationInfo::new(def.key.clone(), def.title.clone())
    }
}

/// Whether the registry has nothing worth scanning for.
///
/// Any extra definition makes the list non-empty. Otherwise later definitions
/// override earlier ones for the same key, and an empty title switches a key
/// off. Definitions with an empty key are ignored.
pub fn is_abbreviations_empty(abbreviations: &[AbbreviationDefinition]) -> bool {
    let mut active: HashSet<&str> = HashSet::new();

    for def in abbreviations {
        if def.key.is_empty() {
            continue;
        }

        if matches!(def.origin, Origin::Extra { .. }) {
            return false;
        }

        if def.title.is_empty() {
            active.remove(def.key.as_str());
        } else {
            active.insert(def.key.as_str());
        }
    }

    active.is_empty()
}

/// Parse a comma-separated affix setting such as `"s, es"`.
///
/// Entries are trimmed, empty entries are dropped and duplicates keep their
/// first position.
pub fn parse_affix_list(affixes: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    affixes
        .split(',')
        .map(str::trim)
        .filter(|affix| !affix.is_empty())
        .filter(|affix| seen.insert(*affix))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility() {
        assert!(AbbreviationDefinition::global("HTML", "x").is_visible_at(1));
        assert!(AbbreviationDefinition::metadata("HTML", "x").is_visible_at(1));

        let extra = AbbreviationDefinition::extra("HTML", "x", 10);
        assert!(!extra.is_visible_at(9));
        assert!(extra.is_visible_at(10));
        assert!(extra.is_visible_at(11));
    }

    #[test]
    fn test_priority_key() {
        assert_eq!(AbbreviationDefinition::global("A", "a").priority_key(5), -1);
        assert_eq!(AbbreviationDefinition::metadata("A", "a").priority_key(5), -1);
        assert_eq!(AbbreviationDefinition::extra("A", "a", 3).priority_key(5), -2);
        assert_eq!(AbbreviationDefinition::extra("A", "a", 8).priority_key(5), 3);
    }

    #[test]
    fn test_is_abbreviations_empty() {
        assert!(is_abbreviations_empty(&[]));

        let list = vec![AbbreviationDefinition::global("HTML", "HyperText Markup Language")];
        assert!(!is_abbreviations_empty(&list));

        let list = vec![
            AbbreviationDefinition::global("HTML", "HyperText Markup Language"),
            AbbreviationDefinition::metadata("HTML", ""),
        ];
        assert!(is_abbreviations_empty(&list));

        let list = vec![
            AbbreviationDefinition::global("HTML", "HyperText Markup Language"),
            AbbreviationDefinition::extra("HTML", "", 1),
        ];
        assert!(!is_abbreviations_empty(&list));
    }

    #[test]
    fn test_is_abbreviations_empty_ignores_empty_keys() {
        let list = vec![AbbreviationDefinition::global("", "orphan title")];
        assert!(is_abbreviations_empty(&list));

        let list = vec![
            AbbreviationDefinition::global("CSS", "Cascading Style Sheets"),
            AbbreviationDefinition::metadata("", ""),
        ];
        assert!(!is_abbreviations_empty(&list));
    }

    #[test]
    fn test_reenabled_key_is_active_again() {
        let list = vec![
            AbbreviationDefinition::global("HTML", "A"),
            AbbreviationDefinition::metadata("HTML", ""),
            AbbreviationDefinition::metadata("HTML", "B"),
        ];
        assert!(!is_abbreviations_empty(&list));
    }

    #[test]
    fn test_parse_affix_list() {
        assert_eq!(parse_affix_list("s"), vec!["s"]);
        assert_eq!(parse_affix_list("s,s,es"), vec!["s", "es"]);
        assert_eq!(parse_affix_list("s, es, less"), vec!["s", "es", "less"]);
        assert_eq!(parse_affix_list(" , s, es, less, "), vec!["s", "es", "less"]);
        assert!(parse_affix_list("").is_empty());
        assert!(parse_affix_list("  ").is_empty());
        assert_eq!(parse_affix_list("0"), vec!["0"]);
    }

    #[test]
    fn test_origin_serializes_with_type_tag() {
        let json = serde_json::to_value(Origin::Extra { position: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "extra", "position": 4 }));

        let json = serde_json::to_value(Origin::Global).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "global" }));
    }
}
