//!
//! Inline tokenizer: splits a single line of Markdown into word tokens while
//! discarding inline code, inline math, links, footnotes and tags.
//!
//! The scanner works one code point at a time and switches between modes.
//! Only text gathered in word mode is ever emitted. This is a best-effort
//! heuristic rather than a CommonMark inline parser: brackets are tracked by
//! counting, and a `[text]` not followed by `(` is discarded rather than
//! rescanned.

use crate::utils::text::{is_special_or_whitespace, is_whitespace};
use serde::Serialize;

/// A word found in a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordToken {
    pub text: String,
    /// Code-point offset of the first character within the line
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    Separator,
    Word,
    InlineCode,
    InlineMath,
    Tag,
    Link,
}

/// Backtick bookkeeping for an open code span.
#[derive(Debug, Default)]
struct GraveRun {
    /// Still inside the opening backtick run
    is_start: bool,
    /// Length of the opening run
    start_len: usize,
    /// Length of the current candidate closing run
    count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkPhase {
    Text,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkWait {
    Nothing,
    TextClose,
    UrlOpen,
    UrlClose,
}

#[derive(Debug)]
struct LinkState {
    phase: LinkPhase,
    wait: LinkWait,
    /// 1 for `[text]`, 2 once a nested `[` has been seen (`[[text]]`)
    open_len: u8,
    close_count: usize,
    is_inline_footnote: bool,
}

impl Default for LinkState {
    fn default() -> Self {
        Self {
            phase: LinkPhase::End,
            wait: LinkWait::Nothing,
            open_len: 0,
            close_count: 0,
            is_inline_footnote: false,
        }
    }
}

/// Scanner state for one line.
///
/// A fresh buffer starts in separator mode with an empty buffer, which is
/// what "start of line" means for tag detection.
#[derive(Debug)]
pub struct MarkBuffer {
    marks: Vec<WordToken>,
    buffer: String,
    position: usize,
    mode: ScanMode,
    grave: GraveRun,
    link: LinkState,
}

impl Default for MarkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkBuffer {
    pub fn new() -> Self {
        Self {
            marks: Vec::new(),
            buffer: String::new(),
            position: 0,
            mode: ScanMode::Separator,
            grave: GraveRun::default(),
            link: LinkState::default(),
        }
    }

    /// Scan a whole line and return its words.
    pub fn tokenize(mut self, line: &str) -> Vec<WordToken> {
        for (index, c) in line.chars().enumerate() {
            self.handle_char(index, c);
        }
        self.push_mark();
        self.marks
    }

    fn handle_char(&mut self, index: usize, c: char) {
        match self.mode {
            ScanMode::InlineCode => self.handle_inline_code(index, c),
            ScanMode::InlineMath => self.handle_inline_math(index, c),
            ScanMode::Link if self.link_consumes(c) => self.handle_link(c),
            _ => self.handle_text(index, c),
        }
    }

    fn handle_inline_code(&mut self, index: usize, c: char) {
        if c == '`' {
            if self.grave.is_start {
                self.grave.start_len += 1;
            } else {
                self.grave.count += 1;
            }
            self.buffer.push(c);
            return;
        }

        self.grave.is_start = false;
        if self.grave.start_len == self.grave.count {
            // The span is closed; its content is dropped.
            self.grave = GraveRun::default();
            self.mode = Self::mode_for(c);
            self.restart(index, c);
        } else {
            self.grave.count = 0;
            self.buffer.push(c);
        }
    }

    fn handle_inline_math(&mut self, index: usize, c: char) {
        if c == '$' && self.last_char() != Some('\\') {
            // Word mode, so a `#` right after the closing `$` is not a tag.
            self.mode = ScanMode::Word;
            self.buffer.clear();
            self.position = index + 1;
        } else {
            self.buffer.push(c);
        }
    }

    fn link_consumes(&self, c: char) -> bool {
        self.link.phase == LinkPhase::Text && (self.link.wait != LinkWait::UrlOpen || c == '(')
    }

    fn handle_link(&mut self, c: char) {
        let escaped = self.is_prefix_escape(0);

        if self.link.wait == LinkWait::UrlOpen && c == '(' {
            self.link.wait = LinkWait::UrlClose;
        } else if self.link.wait == LinkWait::TextClose && c == ']' && !escaped {
            self.end_link();
        } else if self.link.wait == LinkWait::UrlClose && c == ')' && !escaped {
            self.end_link();
        } else if c == '[' && !escaped && self.link.open_len == 1 {
            self.link.open_len = 2;
        } else if c == ']' && !escaped {
            self.link.close_count += 1;
            match (self.link.open_len, self.link.close_count) {
                (1, 1) if self.link.is_inline_footnote => self.end_link(),
                (1, 1) => self.link.wait = LinkWait::UrlOpen,
                (2, 1) => self.link.wait = LinkWait::TextClose,
                _ => self.link.phase = LinkPhase::End,
            }
        }

        self.buffer.push(c);
    }

    fn end_link(&mut self) {
        self.link.wait = LinkWait::Nothing;
        self.link.phase = LinkPhase::End;
    }

    fn handle_text(&mut self, index: usize, c: char) {
        let escaped = self.is_prefix_escape(0);

        if c == '`' && !escaped {
            self.push_mark();
            self.mode = ScanMode::InlineCode;
            self.grave = GraveRun {
                is_start: true,
                start_len: 1,
                count: 0,
            };
            self.restart(index, c);
        } else if c == '$' && !escaped {
            self.push_mark();
            self.mode = ScanMode::InlineMath;
            self.restart(index, c);
        } else if c == '[' && !escaped {
            self.push_mark();
            self.mode = ScanMode::Link;
            self.link = LinkState {
                phase: LinkPhase::Text,
                wait: LinkWait::Nothing,
                open_len: 1,
                close_count: 0,
                is_inline_footnote: self.last_char() == Some('^') && !self.is_prefix_escape(1),
            };
            self.restart(index, c);
        } else if self.mode == ScanMode::Tag {
            if matches!(c, '-' | '_' | '/') || !is_special_or_whitespace(c) {
                self.buffer.push(c);
            } else {
                // The tag is dropped.
                self.mode = ScanMode::Separator;
                self.restart(index, c);
            }
        } else if c == '#' && !escaped {
            if self.mode == ScanMode::Separator {
                if self.last_char().is_none_or(is_whitespace) {
                    self.mode = ScanMode::Tag;
                    self.restart(index, c);
                } else {
                    self.buffer.push(c);
                }
            } else {
                self.push_mark();
                self.mode = ScanMode::Separator;
                self.restart(index, c);
            }
        } else {
            let mode = Self::mode_for(c);
            if mode == self.mode {
                self.buffer.push(c);
            } else {
                self.push_mark();
                self.mode = mode;
                self.restart(index, c);
            }
        }
    }

    fn mode_for(c: char) -> ScanMode {
        if is_special_or_whitespace(c) {
            ScanMode::Separator
        } else {
            ScanMode::Word
        }
    }

    fn restart(&mut self, index: usize, c: char) {
        self.buffer.clear();
        self.buffer.push(c);
        self.position = index;
    }

    /// Emit the buffer if it holds a word; anything else is discarded.
    fn push_mark(&mut self) {
        if self.mode == ScanMode::Word && !self.buffer.is_empty() {
            self.marks.push(WordToken {
                text: self.buffer.clone(),
                position: self.position,
            });
        }
    }

    fn char_from_end(&self, n: usize) -> Option<char> {
        self.buffer.chars().rev().nth(n)
    }

    fn last_char(&self) -> Option<char> {
        self.char_from_end(0)
    }

    /// Whether the character `from_end` positions back in the buffer is a
    /// backslash that is not itself escaped.
    fn is_prefix_escape(&self, from_end: usize) -> bool {
        self.char_from_end(from_end) == Some('\\') && self.char_from_end(from_end + 1) != Some('\\')
    }
}

/// Split a line into word tokens with a fresh scanner.
pub fn tokenize(line: &str) -> Vec<WordToken> {
    MarkBuffer::new().tokenize(line)
}
