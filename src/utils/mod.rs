//!
//! Utility modules shared by the classifier, tokenizer and matcher.

pub mod overlap;
pub mod regex_cache;
pub mod text;
