//!
//! Abbreviation matching for Markdown documents.
//!
//! A document is processed in two passes. The collection pass
//! ([`parser::AbbreviationParser`]) assembles the abbreviation registry from
//! global definitions, the frontmatter block and `*[KEY]: title` lines. The
//! scan pass ([`conversion::Conversion`]) classifies each line, tokenizes the
//! scannable ones and reports every word that matches a definition.
//!
//! ```
//! use mdabbr_lib::conversion::{DocumentOptions, annotate_document};
//!
//! let doc = "---\nabbr:\n  - HTML: HyperText Markup Language\n---\nWrite `HTML` or HTML.";
//! let annotation = annotate_document(doc, &DocumentOptions::default());
//!
//! let marks: Vec<_> = annotation.marks().map(|(line, m)| (line, m.index)).collect();
//! assert_eq!(marks, vec![(5, 16)]);
//! ```

pub mod abbreviation;
pub mod classifier;
pub mod config;
pub mod conversion;
pub mod exit_codes;
pub mod extra;
pub mod matcher;
pub mod metadata;
pub mod parser;
pub mod tokenizer;
pub mod utils;

pub use abbreviation::{AbbreviationDefinition, AbbreviationInfo, Origin, is_abbreviations_empty, parse_affix_list};
pub use classifier::{BlockState, LineClass, LineClassifier, MetadataLine};
pub use conversion::{Conversion, DocumentAnnotation, DocumentOptions, LineAnnotation, annotate_document};
pub use matcher::{MatchItem, MatchOptions, MatchResult, annotate_plain_text, query_abbreviation};
pub use parser::{AbbreviationParser, ParseOptions};
pub use tokenizer::{WordToken, tokenize};
