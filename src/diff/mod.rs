//! Word-level diff between an original and an optimized prompt.
//!
//! The text is split into tokens that are maximal runs of a single character
//! class (whitespace, alphanumeric, or other). Every byte of the input lands
//! in exactly one token, so concatenating the tokens reproduces the input
//! byte for byte. Punctuation is its own token, which lets a trailing "."
//! stay unchanged when only the words before it were rewritten.
//!
//! The token sequences are aligned with Myers diff and adjacent tokens with
//! the same classification are merged into maximal [`DiffSegment`]s.

use similar::{DiffTag, TextDiff};

/// Classification of one diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

impl SegmentKind {
    /// Whether a segment of this kind is part of the original text.
    pub fn in_original(self) -> bool {
        matches!(self, SegmentKind::Unchanged | SegmentKind::Removed)
    }

    /// Whether a segment of this kind is part of the optimized text.
    pub fn in_optimized(self) -> bool {
        matches!(self, SegmentKind::Unchanged | SegmentKind::Added)
    }
}

/// A maximal run of tokens sharing one classification, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Word counts over the Added and Removed segments of a diff.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub added_words: usize,
    pub removed_words: usize,
}

impl DiffStats {
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        let mut stats = DiffStats::default();
        for segment in segments {
            let words = segment.text.split_whitespace().count();
            match segment.kind {
                SegmentKind::Added => stats.added_words += words,
                SegmentKind::Removed => stats.removed_words += words,
                SegmentKind::Unchanged => {}
            }
        }
        stats
    }
}

/// Display preference for the diff view. Freely togglable, no effect on the
/// underlying segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffViewMode {
    #[default]
    Split,
    Unified,
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphanumeric() {
        1
    } else {
        2
    }
}

/// Split text into maximal same-class runs. Lossless: the runs concatenate
/// back to the input.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_class = None;

    for (i, c) in text.char_indices() {
        let class = char_class(c);
        if let Some(prev) = prev_class {
            if class != prev {
                tokens.push(&text[start..i]);
                start = i;
            }
        }
        prev_class = Some(class);
    }
    if prev_class.is_some() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn push_segment(segments: &mut Vec<DiffSegment>, kind: SegmentKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => segments.push(DiffSegment {
            kind,
            text: text.to_string(),
        }),
    }
}

/// Compute the word-level diff between `original` and `optimized`.
///
/// Total over all string inputs and pure; repeated calls on the same pair
/// yield the same segments. A replacement emits its Removed segment
/// immediately followed by the Added segment that took its place.
pub fn diff(original: &str, optimized: &str) -> Vec<DiffSegment> {
    let old_tokens = tokenize(original);
    let new_tokens = tokenize(optimized);

    let token_diff = TextDiff::from_slices(&old_tokens, &new_tokens);
    let mut segments = Vec::new();

    for op in token_diff.ops() {
        match op.tag() {
            DiffTag::Equal => {
                push_segment(
                    &mut segments,
                    SegmentKind::Unchanged,
                    &old_tokens[op.old_range()].concat(),
                );
            }
            DiffTag::Delete => {
                push_segment(
                    &mut segments,
                    SegmentKind::Removed,
                    &old_tokens[op.old_range()].concat(),
                );
            }
            DiffTag::Insert => {
                push_segment(
                    &mut segments,
                    SegmentKind::Added,
                    &new_tokens[op.new_range()].concat(),
                );
            }
            DiffTag::Replace => {
                push_segment(
                    &mut segments,
                    SegmentKind::Removed,
                    &old_tokens[op.old_range()].concat(),
                );
                push_segment(
                    &mut segments,
                    SegmentKind::Added,
                    &new_tokens[op.new_range()].concat(),
                );
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Concatenation of the segments that belong to the original text.
    fn reconstruct_original(segments: &[DiffSegment]) -> String {
        segments
            .iter()
            .filter(|s| s.kind.in_original())
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Concatenation of the segments that belong to the optimized text.
    fn reconstruct_optimized(segments: &[DiffSegment]) -> String {
        segments
            .iter()
            .filter(|s| s.kind.in_optimized())
            .map(|s| s.text.as_str())
            .collect()
    }

    const PAIRS: &[(&str, &str)] = &[
        ("", ""),
        ("", "hello"),
        ("hello", ""),
        ("hello world", "hello world"),
        ("Hello world", "Goodbye world"),
        ("The cat sat.", "The cat sat on the mat."),
        ("Summarize this.", "Summarize this in 3 bullet points."),
        ("  leading  spaces", "leading spaces  "),
        ("tabs\tand\nnewlines", "tabs and newlines"),
        ("我爱你", "我不爱你"),
        ("punctuation, everywhere!", "punctuation... everywhere?"),
    ];

    #[test]
    fn tokenize_is_lossless() {
        for (a, b) in PAIRS {
            for text in [a, b] {
                assert_eq!(tokenize(text).concat(), *text);
            }
        }
    }

    #[test]
    fn tokenize_splits_on_class_boundaries() {
        assert_eq!(tokenize("this."), vec!["this", "."]);
        assert_eq!(tokenize("a  b"), vec!["a", "  ", "b"]);
        assert_eq!(tokenize("3 bullets"), vec!["3", " ", "bullets"]);
    }

    #[test]
    fn round_trip_both_sides() {
        for (original, optimized) in PAIRS {
            let segments = diff(original, optimized);
            assert_eq!(
                reconstruct_original(&segments),
                *original,
                "original round trip for {:?}",
                (original, optimized)
            );
            assert_eq!(
                reconstruct_optimized(&segments),
                *optimized,
                "optimized round trip for {:?}",
                (original, optimized)
            );
        }
    }

    #[test]
    fn identical_inputs_yield_single_unchanged_segment() {
        let segments = diff("same text here", "same text here");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Unchanged);
        assert_eq!(segments[0].text, "same text here");

        assert!(diff("", "").is_empty());
    }

    #[test]
    fn total_replacement() {
        let added = diff("", "brand new");
        assert_eq!(
            added,
            vec![DiffSegment {
                kind: SegmentKind::Added,
                text: "brand new".to_string()
            }]
        );

        let removed = diff("all gone", "");
        assert_eq!(
            removed,
            vec![DiffSegment {
                kind: SegmentKind::Removed,
                text: "all gone".to_string()
            }]
        );
    }

    #[test]
    fn deterministic_across_calls() {
        for (original, optimized) in PAIRS {
            assert_eq!(diff(original, optimized), diff(original, optimized));
        }
    }

    #[test]
    fn segments_are_maximal() {
        for (original, optimized) in PAIRS {
            let segments = diff(original, optimized);
            for pair in segments.windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind, "adjacent segments merged");
            }
        }
    }

    #[test]
    fn replacement_keeps_added_next_to_removed() {
        let segments = diff("Hello world", "Goodbye world");
        assert_eq!(
            segments,
            vec![
                DiffSegment {
                    kind: SegmentKind::Removed,
                    text: "Hello".to_string()
                },
                DiffSegment {
                    kind: SegmentKind::Added,
                    text: "Goodbye".to_string()
                },
                DiffSegment {
                    kind: SegmentKind::Unchanged,
                    text: " world".to_string()
                },
            ]
        );
    }

    #[test]
    fn trailing_punctuation_survives_insertion() {
        let segments = diff("Summarize this.", "Summarize this in 3 bullet points.");
        // The final "." is its own token and stays unchanged.
        assert_eq!(
            segments.last().map(|s| s.kind),
            Some(SegmentKind::Unchanged)
        );
        assert!(segments.last().map(|s| s.text.ends_with('.')).unwrap());

        let stats = DiffStats::from_segments(&segments);
        assert_eq!(stats.added_words, 4);
        assert_eq!(stats.removed_words, 0);
    }

    #[test]
    fn stats_count_whitespace_delimited_words() {
        for (original, optimized) in PAIRS {
            let segments = diff(original, optimized);
            let stats = DiffStats::from_segments(&segments);

            let expected_added: usize = segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Added)
                .map(|s| s.text.split_whitespace().count())
                .sum();
            let expected_removed: usize = segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Removed)
                .map(|s| s.text.split_whitespace().count())
                .sum();

            assert_eq!(stats.added_words, expected_added);
            assert_eq!(stats.removed_words, expected_removed);
        }
    }

    #[test]
    fn stats_of_pure_whitespace_changes_are_zero() {
        let segments = diff("a b", "a  b");
        let stats = DiffStats::from_segments(&segments);
        assert_eq!(stats, DiffStats::default());
    }
}
