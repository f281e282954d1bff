//!
//! Cross-line block state for a Markdown document.
//!
//! The classifier is fed every line of a document in order and decides, per
//! line, whether its inline content may be scanned for abbreviations. It
//! tracks frontmatter, fenced code, fenced math, the blockquote depth at
//! which a fence was opened and whether the previous line started a list
//! item (so that indented continuation lines are not mistaken for indented
//! code).

use crate::abbreviation::AbbreviationInfo;
use crate::extra::parse_extra_abbreviation;
use crate::metadata::METADATA_BORDER;
use crate::utils::regex_cache;
use crate::utils::text::find_char_count;

/// The block the classifier is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Normal,
    Metadata,
    FencedCode,
    FencedMath,
}

/// Position of a line within the frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataLine {
    /// The opening `---` on line 1
    Open,
    Body,
    /// The closing `---`; the classifier is back in normal state afterwards
    Close,
}

/// What the caller should do with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Inside a suppressed region, or a structural marker of one
    Skip,
    Metadata(MetadataLine),
    /// A `*[KEY]: title` line; never tokenized
    ExtraDefinition(AbbreviationInfo),
    Scannable,
}

impl LineClass {
    pub fn is_scannable(&self) -> bool {
        matches!(self, LineClass::Scannable)
    }
}

/// Line-by-line block state machine.
///
/// Each document needs its own classifier, and lines must be supplied
/// strictly in document order.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    extra: bool,
    state: BlockState,
    blockquote_level: usize,
    fence_grave_count: usize,
    list_continuation: bool,
}

impl LineClassifier {
    /// Create a classifier. With `extra` set, `*[KEY]: title` lines are
    /// reported as definitions instead of being scanned.
    pub fn new(extra: bool) -> Self {
        Self {
            extra,
            ..Default::default()
        }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn is_metadata_state(&self) -> bool {
        self.state == BlockState::Metadata
    }

    pub fn blockquote_level(&self) -> usize {
        self.blockquote_level
    }

    pub fn fence_grave_count(&self) -> usize {
        self.fence_grave_count
    }

    pub fn list_continuation(&self) -> bool {
        self.list_continuation
    }

    /// Classify one line. `line_number` is 1-based.
    pub fn classify(&mut self, line: &str, line_number: usize) -> LineClass {
        if line_number == 1 && line == METADATA_BORDER {
            log::trace!("line 1: entering metadata");
            self.state = BlockState::Metadata;
            return LineClass::Metadata(MetadataLine::Open);
        }

        // A blank line ends a quoted block, except inside math.
        if self.blockquote_level > 0 && self.state != BlockState::FencedMath && line.trim().is_empty() {
            log::trace!("line {line_number}: blank line leaves quoted block");
            self.reset();
            return LineClass::Skip;
        }

        match self.state {
            BlockState::Normal => self.classify_normal(line, line_number),
            BlockState::Metadata => {
                if line == METADATA_BORDER {
                    log::trace!("line {line_number}: leaving metadata");
                    self.state = BlockState::Normal;
                    LineClass::Metadata(MetadataLine::Close)
                } else {
                    LineClass::Metadata(MetadataLine::Body)
                }
            }
            BlockState::FencedCode => {
                self.handle_fence_line(line, line_number);
                LineClass::Skip
            }
            BlockState::FencedMath => {
                self.handle_math_line(line, line_number);
                LineClass::Skip
            }
        }
    }

    fn reset(&mut self) {
        self.state = BlockState::Normal;
        self.blockquote_level = 0;
        self.fence_grave_count = 0;
        self.list_continuation = false;
    }

    fn classify_normal(&mut self, line: &str, line_number: usize) -> LineClass {
        let continues_list = self.list_continuation;
        let indented = regex_cache::is_indented_code(line);

        self.list_continuation = regex_cache::is_list_item_start(line);

        if indented && !continues_list {
            return LineClass::Skip;
        }

        if let Some(caps) = regex_cache::fence_line(line) {
            let marker = &caps[1];
            self.state = BlockState::FencedCode;
            self.fence_grave_count = find_char_count(marker, '`');
            self.blockquote_level = find_char_count(marker, '>');
            log::trace!(
                "line {line_number}: code fence opened ({} backticks, quote level {})",
                self.fence_grave_count,
                self.blockquote_level
            );
            return LineClass::Skip;
        }

        if let Some(caps) = regex_cache::math_line(line)
            && !caps[2].trim().ends_with("$$")
        {
            self.state = BlockState::FencedMath;
            self.blockquote_level = find_char_count(&caps[1], '>');
            log::trace!(
                "line {line_number}: math block opened (quote level {})",
                self.blockquote_level
            );
            return LineClass::Skip;
        }

        if self.extra
            && let Some(info) = parse_extra_abbreviation(line)
        {
            return LineClass::ExtraDefinition(info);
        }

        LineClass::Scannable
    }

    fn handle_fence_line(&mut self, line: &str, line_number: usize) {
        let Some(caps) = regex_cache::fence_line(line) else {
            return;
        };

        let marker = &caps[1];
        let level = find_char_count(marker, '>');
        let graves = find_char_count(marker, '`');

        if level < self.blockquote_level {
            // An outer quote resumed; the fence now lives at that depth.
            self.blockquote_level = level;
            self.fence_grave_count = graves;
        } else if level == self.blockquote_level && graves >= self.fence_grave_count && caps[2].trim().is_empty() {
            log::trace!("line {line_number}: code fence closed");
            self.state = BlockState::Normal;
        }
    }

    fn handle_math_line(&mut self, line: &str, line_number: usize) {
        let Some(caps) = regex_cache::math_line(line) else {
            return;
        };

        let level = find_char_count(&caps[1], '>');
        if level < self.blockquote_level {
            self.blockquote_level = level;
        } else if level == self.blockquote_level {
            log::trace!("line {line_number}: math block closed");
            self.state = BlockState::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(lines: &[&str], extra: bool) -> Vec<LineClass> {
        let mut classifier = LineClassifier::new(extra);
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| classifier.classify(line, idx + 1))
            .collect()
    }

    fn scannable(lines: &[&str]) -> Vec<bool> {
        classify_all(lines, true).iter().map(LineClass::is_scannable).collect()
    }

    #[test]
    fn test_metadata_block() {
        let classes = classify_all(&["---", "abbr:", "  - HTML: x", "---", "HTML"], true);
        assert_eq!(
            classes,
            vec![
                LineClass::Metadata(MetadataLine::Open),
                LineClass::Metadata(MetadataLine::Body),
                LineClass::Metadata(MetadataLine::Body),
                LineClass::Metadata(MetadataLine::Close),
                LineClass::Scannable,
            ]
        );
    }

    #[test]
    fn test_metadata_only_on_first_line() {
        let classes = classify_all(&["text", "---", "HTML"], true);
        assert_eq!(classes, vec![LineClass::Scannable, LineClass::Scannable, LineClass::Scannable]);
    }

    #[test]
    fn test_metadata_state_is_exposed() {
        let mut classifier = LineClassifier::new(false);
        classifier.classify("---", 1);
        assert!(classifier.is_metadata_state());
        classifier.classify("a: b", 2);
        assert!(classifier.is_metadata_state());
        classifier.classify("---", 3);
        assert!(!classifier.is_metadata_state());
    }

    #[test]
    fn test_unclosed_metadata_hides_rest() {
        assert_eq!(scannable(&["---", "a: b", "HTML"]), vec![false, false, false]);
    }

    #[test]
    fn test_extra_definitions() {
        let classes = classify_all(&["*[CSS]: Cascading Style Sheets", "CSS"], true);
        assert_eq!(
            classes,
            vec![
                LineClass::ExtraDefinition(AbbreviationInfo::new("CSS", "Cascading Style Sheets")),
                LineClass::Scannable,
            ]
        );

        let classes = classify_all(&["*[CSS]: Cascading Style Sheets"], false);
        assert_eq!(classes, vec![LineClass::Scannable]);
    }

    #[test]
    fn test_extra_definition_inside_fence_is_skipped() {
        let classes = classify_all(&["```", "*[CSS]: x", "```"], true);
        assert_eq!(classes, vec![LineClass::Skip, LineClass::Skip, LineClass::Skip]);
    }

    #[test]
    fn test_fenced_code() {
        assert_eq!(scannable(&["```", "CSS", "```", "CSS"]), vec![false, false, false, true]);
        assert_eq!(scannable(&["```rust", "CSS", "```", "CSS"]), vec![false, false, false, true]);
        // A closing fence must not carry info text.
        assert_eq!(scannable(&["```", "```js", "CSS", "```"]), vec![false, false, false, false]);
    }

    #[test]
    fn test_unclosed_fence_hides_rest() {
        assert_eq!(scannable(&["```", "CSS", "CSS", "CSS"]), vec![false, false, false, false]);
    }

    #[test]
    fn test_fence_symmetry() {
        for n in 3..8 {
            let fence = "`".repeat(n);
            let longer = "`".repeat(n + 1);

            let lines = [fence.as_str(), "CSS", fence.as_str(), "CSS"];
            assert_eq!(scannable(&lines), vec![false, false, false, true], "n = {n}");

            let lines = [fence.as_str(), "CSS", longer.as_str(), "CSS"];
            assert_eq!(scannable(&lines), vec![false, false, false, true], "n = {n}");

            let lines = [longer.as_str(), fence.as_str(), "CSS", longer.as_str(), "CSS"];
            assert_eq!(scannable(&lines), vec![false, false, false, false, true], "n = {n}");
        }
    }

    #[test]
    fn test_fence_in_blockquote() {
        assert_eq!(
            scannable(&["> ```", "> CSS", "> ```", "> CSS"]),
            vec![false, false, false, true]
        );

        // Deeper fence markers never close a shallower block.
        assert_eq!(
            scannable(&["> ```", "> > ```", "> CSS", "> ```", "CSS"]),
            vec![false, false, false, false, true]
        );
    }

    #[test]
    fn test_fence_quote_level_decrease() {
        let mut classifier = LineClassifier::new(true);
        classifier.classify("> > ````", 1);
        assert_eq!(classifier.blockquote_level(), 2);
        assert_eq!(classifier.fence_grave_count(), 4);

        assert_eq!(classifier.classify("> ```", 2), LineClass::Skip);
        assert_eq!(classifier.state(), BlockState::FencedCode);
        assert_eq!(classifier.blockquote_level(), 1);
        assert_eq!(classifier.fence_grave_count(), 3);

        assert_eq!(classifier.classify("> ```", 3), LineClass::Skip);
        assert_eq!(classifier.state(), BlockState::Normal);
    }

    #[test]
    fn test_blank_line_ends_quoted_fence() {
        assert_eq!(scannable(&["> ```", "> CSS", "", "CSS"]), vec![false, false, false, true]);
        assert_eq!(scannable(&["> ```", "> CSS", "   ", "CSS"]), vec![false, false, false, true]);
    }

    #[test]
    fn test_fenced_math() {
        assert_eq!(scannable(&["$$", "CSS", "$$", "CSS"]), vec![false, false, false, true]);
        assert_eq!(scannable(&["$$ x = 1", "CSS", "$$", "CSS"]), vec![false, false, false, true]);
        // A single-line block does not open anything.
        assert_eq!(scannable(&["$$ x = 1 $$", "CSS"]), vec![true, true]);
        assert_eq!(scannable(&["$$", "", "CSS", "$$"]), vec![false, false, false, false]);
    }

    #[test]
    fn test_quoted_math_survives_blank_line() {
        assert_eq!(
            scannable(&["> $$", "", "> CSS", "> $$", "CSS"]),
            vec![false, false, false, false, true]
        );
        assert_eq!(
            scannable(&["> > $$", "> x", "> $$", "> $$", "CSS"]),
            vec![false, false, false, false, true]
        );
    }

    #[test]
    fn test_indented_code() {
        assert_eq!(scannable(&["    CSS", "\tCSS", "    \tCSS"]), vec![false, false, false]);
        assert_eq!(scannable(&["test\tCSS"]), vec![true]);
        assert_eq!(scannable(&[">      CSS"]), vec![false]);
    }

    #[test]
    fn test_list_continuation() {
        assert_eq!(scannable(&["- CSS", "    + CSS", "        1. CSS"]), vec![true, true, true]);
        assert_eq!(scannable(&["- CSS", "\t+ CSS", "\t* CSS"]), vec![true, true, true]);
        assert_eq!(scannable(&["- CSS", "    more", "    again"]), vec![true, true, false]);
        assert_eq!(scannable(&["- CSS", "", "    HTML code"]), vec![true, true, false]);
        assert_eq!(scannable(&["- CSS", "text", "    code"]), vec![true, true, false]);
    }

    #[test]
    fn test_list_continuation_flag() {
        let mut classifier = LineClassifier::new(true);
        classifier.classify("1. item", 1);
        assert!(classifier.list_continuation());
        classifier.classify("paragraph", 2);
        assert!(!classifier.list_continuation());
    }
}
