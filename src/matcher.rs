//!
//! Abbreviation lookup for a single word.
//!
//! The registry is scanned from the most recently added definition to the
//! first. An exact match beats an affix match, which beats substring matches
//! found in scripts written without spaces (CJK and similar). Extra
//! definitions only take effect from their declaration line on.

use crate::abbreviation::{AbbreviationDefinition, Origin};
use crate::utils::overlap::{Overlap, TextSpan, query_overlap, select_non_overlapping};
use crate::utils::text::{char_len, find_all_indexes, split_words};
use serde::Serialize;

/// Tuning knobs for a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Suffixes that may follow a key, e.g. `s` so that `APIs` matches `API`
    pub affixes: Vec<String>,
    /// Also look for keys inside words of scripts without word separators
    pub detect_non_spaced_script: bool,
}

/// A matched span within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchItem {
    /// Code-point offset of the span
    pub index: usize,
    /// The matched text as it appears in the line
    pub text: String,
    /// Key of the definition that matched. Differs from `text` for affix
    /// matches.
    pub key: String,
    pub title: String,
    pub origin: Origin,
}

impl MatchItem {
    fn from_definition(index: usize, text: impl Into<String>, def: &AbbreviationDefinition) -> Self {
        Self {
            index,
            text: text.into(),
            key: def.key.clone(),
            title: def.title.clone(),
            origin: def.origin,
        }
    }
}

impl TextSpan for MatchItem {
    fn start(&self) -> usize {
        self.index
    }

    fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// A substring match waiting for overlap resolution.
#[derive(Debug, Clone)]
struct Candidate {
    item: MatchItem,
    /// `-1` for global and metadata definitions, otherwise the declaration
    /// line relative to the consuming line
    priority: isize,
}

impl TextSpan for Candidate {
    fn start(&self) -> usize {
        self.item.index
    }

    fn char_len(&self) -> usize {
        self.item.char_len()
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    NoMatch,
    /// The whole word matched, exactly or with an affix. A definition with an
    /// empty title means the abbreviation is switched off.
    Whole(&'a AbbreviationDefinition),
    /// Non-overlapping substring matches ordered by position. Indexes are
    /// relative to the queried word.
    Fragments(Vec<MatchItem>),
}

impl MatchResult<'_> {
    /// Title of a whole-word match, empty if it is disabled.
    pub fn title(&self) -> Option<&str> {
        match self {
            MatchResult::Whole(def) => Some(def.title.as_str()),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, MatchResult::Whole(def) if def.is_disabled())
    }
}

/// Look up `word` in `abbreviations` as seen from `line_number` (1-based).
pub fn query_abbreviation<'a>(
    word: &str,
    abbreviations: &'a [AbbreviationDefinition],
    line_number: usize,
    options: &MatchOptions,
) -> MatchResult<'a> {
    let mut whole: Option<&AbbreviationDefinition> = None;
    let mut affix_whole: Option<&AbbreviationDefinition> = None;
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut detect_affixes = !options.affixes.is_empty();

    for def in abbreviations.iter().rev() {
        if def.key.is_empty() {
            continue;
        }

        if word == def.key {
            // An invisible extra is remembered but an earlier entry may still
            // replace it.
            whole = Some(def);
            if def.is_visible_at(line_number) {
                break;
            }
            continue;
        }

        if detect_affixes && has_affix(word, &def.key, &options.affixes) {
            affix_whole = Some(def);
            if def.is_visible_at(line_number) {
                detect_affixes = false;
            }
        }

        if options.detect_non_spaced_script && whole.is_none() && affix_whole.is_none() {
            merge_candidates(&mut candidates, word, def, line_number);
        }
    }

    if let Some(def) = whole.or(affix_whole) {
        return MatchResult::Whole(def);
    }

    if candidates.is_empty() {
        return MatchResult::NoMatch;
    }

    let fragments = resolve_candidates(&candidates);
    if fragments.is_empty() {
        MatchResult::NoMatch
    } else {
        MatchResult::Fragments(fragments)
    }
}

fn has_affix(word: &str, key: &str, affixes: &[String]) -> bool {
    word.strip_prefix(key)
        .is_some_and(|rest| affixes.iter().any(|affix| affix == rest))
}

/// Add every occurrence of `def.key` in `word` to the candidate set.
///
/// A span equal to an existing one replaces it only if the existing one comes
/// from a later-declared extra definition. A span inside an existing one is
/// dropped; a span around existing ones replaces them.
fn merge_candidates(candidates: &mut Vec<Candidate>, word: &str, def: &AbbreviationDefinition, line_number: usize) {
    for index in find_all_indexes(word, &def.key) {
        let candidate = Candidate {
            item: MatchItem::from_definition(index, def.key.as_str(), def),
            priority: def.priority_key(line_number),
        };

        let mut add = true;
        candidates.retain(|existing| match query_overlap(existing, &candidate) {
            Overlap::Same if existing.priority > 0 => false,
            Overlap::Same | Overlap::Contain => {
                add = false;
                true
            }
            Overlap::Included => false,
            Overlap::Intersection | Overlap::Unrelated => true,
        });

        if add {
            candidates.push(candidate);
        }
    }
}

fn resolve_candidates(candidates: &[Candidate]) -> Vec<MatchItem> {
    // Sweep outward from the last always-visible candidate.
    let anchor = candidates.iter().rposition(|c| c.priority < 0).unwrap_or(0);

    let mut items: Vec<MatchItem> = select_non_overlapping(candidates, anchor)
        .into_iter()
        .map(|candidate| candidate.item)
        .filter(|item| !item.title.is_empty())
        .collect();
    items.sort_by_key(|item| item.index);
    items
}

/// Match a word that starts at `position` in its line and return the spans
/// to annotate. Disabled and missing abbreviations yield nothing.
pub fn mark_word(
    word: &str,
    position: usize,
    abbreviations: &[AbbreviationDefinition],
    line_number: usize,
    options: &MatchOptions,
) -> Vec<MatchItem> {
    match query_abbreviation(word, abbreviations, line_number, options) {
        MatchResult::Whole(def) if !def.is_disabled() => {
            vec![MatchItem::from_definition(position, word, def)]
        }
        MatchResult::Fragments(items) => items
            .into_iter()
            .map(|mut item| {
                item.index += position;
                item
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Annotate text that has already been rendered, such as a paragraph of a
/// preview, using plain word splitting.
pub fn annotate_plain_text(
    text: &str,
    abbreviations: &[AbbreviationDefinition],
    line_number: usize,
    options: &MatchOptions,
) -> Vec<MatchItem> {
    split_words(text)
        .into_iter()
        .filter(|run| !run.is_special)
        .flat_map(|run| mark_word(run.text, run.position, abbreviations, line_number, options))
        .collect()
}
