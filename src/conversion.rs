//!
//! Scan pass: per-line annotation of a document against a finished registry,
//! and the two-pass driver that runs collection and scanning over a whole
//! document.

use crate::abbreviation::{AbbreviationDefinition, AbbreviationInfo, is_abbreviations_empty};
use crate::classifier::{LineClass, LineClassifier};
use crate::matcher::{MatchItem, MatchOptions, mark_word};
use crate::metadata::METADATA_BORDER;
use crate::parser::{AbbreviationParser, ParseOptions};
use crate::tokenizer::tokenize;
use serde::Serialize;
use serde_yml::Value;

/// Result of scanning one line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineAnnotation {
    /// 1-based line number
    pub line: usize,
    pub marks: Vec<MatchItem>,
    /// Set for `*[KEY]: title` lines when extra syntax is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<AbbreviationInfo>,
    /// The line belongs to the frontmatter block, borders included
    pub metadata: bool,
}

impl LineAnnotation {
    pub fn is_definition(&self) -> bool {
        self.definition.is_some()
    }
}

/// Line-at-a-time scanner for one document.
#[derive(Debug)]
pub struct Conversion {
    abbreviations: Vec<AbbreviationDefinition>,
    classifier: LineClassifier,
    options: MatchOptions,
}

impl Conversion {
    pub fn new(abbreviations: Vec<AbbreviationDefinition>, extra: bool, options: MatchOptions) -> Self {
        Self {
            abbreviations,
            classifier: LineClassifier::new(extra),
            options,
        }
    }

    pub fn abbreviations(&self) -> &[AbbreviationDefinition] {
        &self.abbreviations
    }

    pub fn into_abbreviations(self) -> Vec<AbbreviationDefinition> {
        self.abbreviations
    }

    pub fn is_metadata_state(&self) -> bool {
        self.classifier.is_metadata_state()
    }

    /// Annotate one line. `line_number` is 1-based and lines must arrive in
    /// order.
    pub fn handle_line(&mut self, line: &str, line_number: usize) -> LineAnnotation {
        let mut annotation = LineAnnotation {
            line: line_number,
            ..Default::default()
        };

        match self.classifier.classify(line, line_number) {
            LineClass::Scannable => {
                annotation.marks = tokenize(line)
                    .into_iter()
                    .flat_map(|token| {
                        mark_word(&token.text, token.position, &self.abbreviations, line_number, &self.options)
                    })
                    .collect();
            }
            LineClass::ExtraDefinition(info) => annotation.definition = Some(info),
            LineClass::Metadata(_) => annotation.metadata = true,
            LineClass::Skip => {}
        }

        annotation
    }
}

/// Everything needed to annotate a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    pub globals: Vec<AbbreviationInfo>,
    /// Frontmatter key holding metadata abbreviations; empty disables them
    pub metadata_keyword: String,
    pub use_extra_syntax: bool,
    pub match_options: MatchOptions,
    /// Frontmatter known from elsewhere, used when the document has no
    /// frontmatter block of its own
    pub frontmatter: Option<Value>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            globals: Vec::new(),
            metadata_keyword: "abbr".to_string(),
            use_extra_syntax: true,
            match_options: MatchOptions::default(),
            frontmatter: None,
        }
    }
}

/// Registry and per-line annotations of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentAnnotation {
    pub abbreviations: Vec<AbbreviationDefinition>,
    /// Empty when the registry has nothing to look for
    pub lines: Vec<LineAnnotation>,
}

impl DocumentAnnotation {
    /// All marks with their line numbers, in document order.
    pub fn marks(&self) -> impl Iterator<Item = (usize, &MatchItem)> {
        self.lines
            .iter()
            .flat_map(|annotation| annotation.marks.iter().map(move |mark| (annotation.line, mark)))
    }

    pub fn mark_count(&self) -> usize {
        self.lines.iter().map(|annotation| annotation.marks.len()).sum()
    }
}

/// Run the collection pass over `lines`.
pub fn collect_abbreviations(lines: &[&str], options: &DocumentOptions) -> Vec<AbbreviationDefinition> {
    let mut parser = AbbreviationParser::new(
        &options.globals,
        options.metadata_keyword.as_str(),
        ParseOptions {
            metadata: true,
            extra: options.use_extra_syntax,
        },
    );

    if lines.first() != Some(&METADATA_BORDER) {
        parser.read_abbreviations_from_frontmatter(options.frontmatter.as_ref());
    }

    parser.parse_lines(lines.iter().copied());
    parser.into_abbreviations()
}

/// Collect the registry of `content`, then scan every line against it.
pub fn annotate_document(content: &str, options: &DocumentOptions) -> DocumentAnnotation {
    let lines: Vec<&str> = content.lines().collect();
    let abbreviations = collect_abbreviations(&lines, options);

    if is_abbreviations_empty(&abbreviations) {
        log::debug!("no active abbreviations, skipping scan");
        return DocumentAnnotation {
            abbreviations,
            lines: Vec::new(),
        };
    }

    log::debug!("scanning {} line(s) with {} definition(s)", lines.len(), abbreviations.len());

    let mut conversion = Conversion::new(abbreviations, options.use_extra_syntax, options.match_options.clone());
    let annotations = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| conversion.handle_line(line, idx + 1))
        .collect();

    DocumentAnnotation {
        abbreviations: conversion.into_abbreviations(),
        lines: annotations,
    }
}
