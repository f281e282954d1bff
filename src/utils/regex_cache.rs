//!
//! Cached line grammars used by the line classifier and the definition parser.
//!
//! Each grammar is exposed through a small predicate so the patterns can be
//! tested in isolation.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// List item start: `-`, `*`, `+` or `N.` followed by a space or tab,
/// optionally indented or quoted.
pub static LIST_ITEM_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[> \t]*(?:[-*+]|\d+\.)[ \t]").unwrap());

/// Indented code: 4+ spaces, a leading tab, or quote markers followed by 5+
/// spaces or a tab.
pub static INDENTED_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[ ]{4,}|\t|[> ]+(?:[ ]{5,}|\t))").unwrap());

/// Fence line: optional quote prefix, 3+ backticks, then no further backticks.
/// Group 1 is the prefix with the backtick run, group 2 the trailing info.
pub static FENCE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([> ]*`{3,})([^`]*)$").unwrap());

/// Math fence line: optional quote prefix then `$$`. Group 1 is the prefix,
/// group 2 the remainder of the line.
pub static MATH_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([> ]*)\$\$(.*)$").unwrap());

/// Abbreviation definition: `*[KEY]: title`
pub static EXTRA_DEFINITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\[([^\[\]]+?)\]:(\s+.*)?$").unwrap());

/// Reference definition: `[KEY]: target`
pub static REFERENCE_DEFINITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\[\]]+?\]:(\s+.*)?$").unwrap());

/// A single letter, number or ideograph. Combining marks are not included.
pub static WORD_CHAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}\p{Ideographic}]$").unwrap());

#[inline]
pub fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR_REGEX.is_match(c.encode_utf8(&mut buf))
}

#[inline]
pub fn is_list_item_start(line: &str) -> bool {
    LIST_ITEM_START_REGEX.is_match(line)
}

#[inline]
pub fn is_indented_code(line: &str) -> bool {
    INDENTED_CODE_REGEX.is_match(line)
}

#[inline]
pub fn fence_line(line: &str) -> Option<Captures<'_>> {
    if !line.contains("```") {
        return None;
    }
    FENCE_LINE_REGEX.captures(line)
}

#[inline]
pub fn math_line(line: &str) -> Option<Captures<'_>> {
    if !line.contains("$$") {
        return None;
    }
    MATH_LINE_REGEX.captures(line)
}

#[inline]
pub fn extra_definition(line: &str) -> Option<Captures<'_>> {
    if !line.starts_with("*[") {
        return None;
    }
    EXTRA_DEFINITION_REGEX.captures(line)
}

#[inline]
pub fn is_extra_definition(line: &str) -> bool {
    line.starts_with("*[") && EXTRA_DEFINITION_REGEX.is_match(line)
}

#[inline]
pub fn is_reference_definition(line: &str) -> bool {
    line.starts_with('[') && REFERENCE_DEFINITION_REGEX.is_match(line)
}
