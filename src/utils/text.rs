//!
//! Character classification and small string helpers shared by the tokenizer
//! and the matcher.
//!
//! All offsets produced here are code-point offsets, never byte offsets.

use crate::utils::regex_cache::is_word_char;

/// Whether a character is whitespace.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Whether a character is a special character or whitespace.
///
/// Letters, numbers and CJK ideographs are word characters; combining marks
/// are not. `-` and `&` are also treated as word characters so that
/// `Well-being` and `R&D` stay whole.
#[inline]
pub fn is_special_or_whitespace(c: char) -> bool {
    if c == '-' || c == '&' {
        return false;
    }

    if c.is_whitespace() {
        return true;
    }

    !is_word_char(c)
}

/// Whether the text is a single word. The empty string is not a word.
pub fn is_word(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(is_special_or_whitespace)
}

/// Count occurrences of a single character in `source`.
pub fn find_char_count(source: &str, character: char) -> usize {
    source.chars().filter(|&c| c == character).count()
}

/// Length of a string in code points.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// A run of characters that are either all word characters or all special
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRun<'a> {
    pub text: &'a str,
    /// Code-point offset of the run within the source text
    pub position: usize,
    /// The run consists of special or whitespace characters
    pub is_special: bool,
}

/// Split text into alternating word and special runs.
///
/// Unlike the Markdown tokenizer this does not know about code spans, links
/// or tags; it is meant for text that has already been rendered.
pub fn split_words(text: &str) -> Vec<WordRun<'_>> {
    let mut runs = Vec::new();
    let mut run_start_byte = 0;
    let mut run_start_char = 0;
    let mut last_state: Option<bool> = None;

    for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
        let state = is_special_or_whitespace(c);
        match last_state {
            Some(prev) if prev != state => {
                runs.push(WordRun {
                    text: &text[run_start_byte..byte_idx],
                    position: run_start_char,
                    is_special: prev,
                });
                run_start_byte = byte_idx;
                run_start_char = char_idx;
            }
            _ => {}
        }
        last_state = Some(state);
    }

    if let Some(state) = last_state {
        runs.push(WordRun {
            text: &text[run_start_byte..],
            position: run_start_char,
            is_special: state,
        });
    }

    runs
}

/// Find every occurrence of `needle` in `haystack`, advancing one character
/// after each hit so overlapping occurrences are reported too.
///
/// Returns code-point offsets. An empty needle never matches.
pub fn find_all_indexes(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    haystack
        .char_indices()
        .enumerate()
        .filter(|(_, (byte_idx, _))| haystack[*byte_idx..].starts_with(needle))
        .map(|(char_idx, _)| char_idx)
        .collect()
}
