//!
//! Interval relations between text spans and non-overlapping selection.
//!
//! Spans are measured in code points: a span starts at `start()` and covers
//! `char_len()` characters.

/// Anything occupying a contiguous range of characters within a line.
pub trait TextSpan {
    fn start(&self) -> usize;

    fn char_len(&self) -> usize;

    fn end(&self) -> usize {
        self.start() + self.char_len()
    }
}

/// How one span relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Both spans cover exactly the same range
    Same,
    /// The left span contains the right span
    Contain,
    /// The left span is contained by the right span
    Included,
    /// The spans partially overlap
    Intersection,
    /// The spans do not share any character
    Unrelated,
}

/// Classify `left` against `right`.
///
/// `Contain` and `Included` are inclusive of shared edges, so a span that
/// shares its start with a longer span is still contained by it.
pub fn query_overlap<L, R>(left: &L, right: &R) -> Overlap
where
    L: TextSpan + ?Sized,
    R: TextSpan + ?Sized,
{
    let (left_start, left_end) = (left.start(), left.end());
    let (right_start, right_end) = (right.start(), right.end());

    if left_start == right_start && left_end == right_end {
        Overlap::Same
    } else if left_start <= right_start && left_end >= right_end {
        Overlap::Contain
    } else if left_start >= right_start && left_end <= right_end {
        Overlap::Included
    } else if left_end > right_start && left_start < right_end {
        Overlap::Intersection
    } else {
        Overlap::Unrelated
    }
}

/// Pick a pairwise non-overlapping subset of `candidates`.
///
/// Candidates are swept outward from `anchor`: first from `anchor` down to the
/// first element, then from `anchor + 1` to the last. Each candidate is
/// accepted only if it is unrelated to every span accepted so far, so
/// earlier-swept candidates always win a conflict.
pub fn select_non_overlapping<T>(candidates: &[T], anchor: usize) -> Vec<T>
where
    T: TextSpan + Clone,
{
    if candidates.is_empty() {
        return Vec::new();
    }

    let anchor = anchor.min(candidates.len() - 1);
    let sweep = (0..=anchor).rev().chain(anchor + 1..candidates.len());

    let mut accepted: Vec<T> = Vec::new();
    for idx in sweep {
        let candidate = &candidates[idx];
        let conflicts = accepted
            .iter()
            .any(|kept| query_overlap(kept, candidate) != Overlap::Unrelated);
        if !conflicts {
            accepted.push(candidate.clone());
        }
    }

    accepted
}
