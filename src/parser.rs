//!
//! Collection pass: assembles the abbreviation registry for one document.
//!
//! The registry starts with the global definitions, then receives metadata
//! definitions (from the frontmatter block, or from a frontmatter structure
//! supplied by the caller) and finally `*[KEY]: title` definitions with the
//! line they were declared on.

use crate::abbreviation::{AbbreviationDefinition, AbbreviationInfo, is_abbreviations_empty};
use crate::classifier::{LineClass, LineClassifier, MetadataLine};
use crate::metadata::{abbreviations_from_frontmatter, get_metadata};
use serde_yml::Value;

/// Which document sources contribute definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Read the frontmatter block at the top of the document
    pub metadata: bool,
    /// Read `*[KEY]: title` lines
    pub extra: bool,
}

#[derive(Debug)]
pub struct AbbreviationParser {
    abbreviations: Vec<AbbreviationDefinition>,
    keyword: String,
    options: ParseOptions,
    classifier: LineClassifier,
    metadata_buffer: Vec<String>,
}

impl AbbreviationParser {
    pub fn new(globals: &[AbbreviationInfo], keyword: impl Into<String>, options: ParseOptions) -> Self {
        let abbreviations = globals
            .iter()
            .map(|info| AbbreviationDefinition::global(info.key.clone(), info.title.clone()))
            .collect();

        Self {
            abbreviations,
            keyword: keyword.into(),
            options,
            classifier: LineClassifier::new(options.extra),
            metadata_buffer: Vec::new(),
        }
    }

    /// Merge metadata definitions from an already parsed frontmatter value.
    ///
    /// Used when the frontmatter is known from elsewhere, for example when
    /// the text being parsed is a fragment of a larger document.
    pub fn read_abbreviations_from_frontmatter(&mut self, frontmatter: Option<&Value>) {
        let list = abbreviations_from_frontmatter(frontmatter, &self.keyword);
        log::debug!("{} abbreviation(s) from frontmatter", list.len());
        self.abbreviations.extend(list);
    }

    fn collects_metadata(&self) -> bool {
        self.options.metadata && !self.keyword.is_empty()
    }

    /// Feed one line. `line_number` is 1-based and lines must arrive in order.
    pub fn handle_line(&mut self, line: &str, line_number: usize) {
        match self.classifier.classify(line, line_number) {
            LineClass::Metadata(MetadataLine::Body) => {
                if self.collects_metadata() {
                    self.metadata_buffer.push(line.to_string());
                }
            }
            LineClass::Metadata(MetadataLine::Close) => self.flush_metadata(),
            LineClass::ExtraDefinition(info) => {
                log::trace!("line {line_number}: definition for {:?}", info.key);
                self.abbreviations
                    .push(AbbreviationDefinition::extra(info.key, info.title, line_number));
            }
            LineClass::Metadata(MetadataLine::Open) | LineClass::Skip | LineClass::Scannable => {}
        }
    }

    fn flush_metadata(&mut self) {
        if !self.collects_metadata() || self.metadata_buffer.is_empty() {
            return;
        }

        let text = self.metadata_buffer.join("\n");
        self.metadata_buffer.clear();

        let metadata = get_metadata(&text);
        let list = abbreviations_from_frontmatter(metadata.as_ref(), &self.keyword);
        log::debug!("{} abbreviation(s) under `{}` in metadata", list.len(), self.keyword);
        self.abbreviations.extend(list);
    }

    /// Feed a sequence of lines numbered from 1.
    ///
    /// Without extra syntax nothing can be found after the frontmatter, so
    /// the pass stops as soon as the classifier is outside of it.
    pub fn parse_lines<'l>(&mut self, lines: impl IntoIterator<Item = &'l str>) {
        for (idx, line) in lines.into_iter().enumerate() {
            self.handle_line(line, idx + 1);
            if !self.options.extra && !self.is_metadata_state() {
                break;
            }
        }
    }

    pub fn is_metadata_state(&self) -> bool {
        self.classifier.is_metadata_state()
    }

    pub fn abbreviations(&self) -> &[AbbreviationDefinition] {
        &self.abbreviations
    }

    pub fn into_abbreviations(self) -> Vec<AbbreviationDefinition> {
        self.abbreviations
    }

    pub fn is_abbreviations_empty(&self) -> bool {
        is_abbreviations_empty(&self.abbreviations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: [&str; 5] = [
        "---",
        "abbr:",
        "  - HTML: HyperText Markup Language",
        "---",
        "*[CSS]: Cascading Style Sheets",
    ];

    fn parse(lines: &[&str], keyword: &str, options: ParseOptions) -> Vec<AbbreviationDefinition> {
        let mut parser = AbbreviationParser::new(&[], keyword, options);
        for (idx, line) in lines.iter().enumerate() {
            parser.handle_line(line, idx + 1);
        }
        parser.into_abbreviations()
    }

    fn both() -> ParseOptions {
        ParseOptions {
            metadata: true,
            extra: true,
        }
    }

    #[test]
    fn test_read_abbreviations_from_frontmatter() {
        let mut parser = AbbreviationParser::new(&[], "abbr", ParseOptions::default());
        assert!(parser.abbreviations().is_empty());

        let fm: Value = serde_yml::from_str("abbr: [\"HTML: HyperText Markup Language\"]").unwrap();
        parser.read_abbreviations_from_frontmatter(Some(&fm));
        assert_eq!(
            parser.abbreviations(),
            &[AbbreviationDefinition::metadata("HTML", "HyperText Markup Language")]
        );

        let fm: Value = serde_yml::from_str("tags: [\"CSS: Cascading Style Sheets\"]").unwrap();
        parser.read_abbreviations_from_frontmatter(Some(&fm));
        parser.read_abbreviations_from_frontmatter(None);
        assert_eq!(parser.abbreviations().len(), 1);
    }

    #[test]
    fn test_metadata_only() {
        let options = ParseOptions {
            metadata: true,
            extra: false,
        };
        assert_eq!(
            parse(&CONTENT, "abbr", options),
            vec![AbbreviationDefinition::metadata("HTML", "HyperText Markup Language")]
        );

        let quoted = [
            "---",
            "abbr:",
            "  - \"HTML: HyperText Markup Language\"",
            "---",
            "*[CSS]: Cascading Style Sheets",
        ];
        assert_eq!(
            parse(&quoted, "abbr", options),
            vec![AbbreviationDefinition::metadata("HTML", "HyperText Markup Language")]
        );

        assert!(parse(&CONTENT, "abbrs", options).is_empty());
        assert!(parse(&CONTENT, "", options).is_empty());
    }

    #[test]
    fn test_no_sources() {
        assert!(parse(&CONTENT, "abbr", ParseOptions::default()).is_empty());
    }

    #[test]
    fn test_extra_only() {
        let options = ParseOptions {
            metadata: false,
            extra: true,
        };
        assert_eq!(
            parse(&CONTENT, "abbr", options),
            vec![AbbreviationDefinition::extra("CSS", "Cascading Style Sheets", 5)]
        );
    }

    #[test]
    fn test_metadata_and_extra() {
        assert_eq!(
            parse(&CONTENT, "abbr", both()),
            vec![
                AbbreviationDefinition::metadata("HTML", "HyperText Markup Language"),
                AbbreviationDefinition::extra("CSS", "Cascading Style Sheets", 5),
            ]
        );
    }

    #[test]
    fn test_globals_come_first() {
        let globals = [AbbreviationInfo::new("W3C", "World Wide Web Consortium")];
        let mut parser = AbbreviationParser::new(&globals, "abbr", both());
        parser.parse_lines(CONTENT);
        assert_eq!(parser.abbreviations()[0], AbbreviationDefinition::global("W3C", "World Wide Web Consortium"));
        assert_eq!(parser.abbreviations().len(), 3);
        assert!(!parser.is_abbreviations_empty());
    }

    #[test]
    fn test_definitions_in_code_are_ignored() {
        let lines = ["```", "*[CSS]: Cascading Style Sheets", "```", "*[JS]: JavaScript"];
        assert_eq!(
            parse(&lines, "abbr", both()),
            vec![AbbreviationDefinition::extra("JS", "JavaScript", 4)]
        );
    }

    #[test]
    fn test_invalid_metadata_contributes_nothing() {
        let lines = ["---", "abbr: [", "---", "text"];
        assert!(parse(&lines, "abbr", both()).is_empty());
    }

    #[test]
    fn test_json_metadata() {
        let lines = ["---", "{\"abbr\": [{\"HTML\": \"HyperText Markup Language\"}]}", "---"];
        assert_eq!(
            parse(&lines, "abbr", both()),
            vec![AbbreviationDefinition::metadata("HTML", "HyperText Markup Language")]
        );
    }

    #[test]
    fn test_parse_lines_stops_after_metadata_without_extra() {
        let options = ParseOptions {
            metadata: true,
            extra: false,
        };
        let mut parser = AbbreviationParser::new(&[], "abbr", options);
        parser.parse_lines(CONTENT);
        assert!(!parser.is_metadata_state());
        assert_eq!(parser.abbreviations().len(), 1);
    }
}
