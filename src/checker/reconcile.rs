//! Merges replacement-bearing issues into one corrected text.

use std::ops::Range;

use tracing::debug;

use super::tokenizer::{segment_sentences, sentence_spans};
use crate::{CorrectionResult, Issue, SentenceReplacement, SentenceReplacementKind};

/// Apply every issue's replacement to `original` and derive sentence-level
/// correction records.
///
/// Replacements are applied from the highest start offset to the lowest, so
/// lower ranges are still valid in the working copy when their turn comes.
/// A replacement that is out of bounds or overlaps an edit already applied
/// is not applied; its issue is kept with the replacement removed.
pub fn reconcile(original: &str, mut issues: Vec<Issue>) -> CorrectionResult {
    let mut order: Vec<usize> = (0..issues.len())
        .filter(|&i| issues[i].replacement.is_some())
        .collect();
    order.sort_by(|&a, &b| {
        issues[b]
            .start
            .cmp(&issues[a].start)
            .then(issues[b].end.cmp(&issues[a].end))
    });

    let mut working = original.to_string();
    // Everything below `floor` is still byte-identical to `original`.
    let mut floor = original.len();
    let mut applied = 0;

    for index in order {
        let issue = &mut issues[index];
        let (start, end) = (issue.start, issue.end);

        if start >= end
            || end > floor
            || !original.is_char_boundary(start)
            || !original.is_char_boundary(end)
        {
            debug!(
                "Skipping conflicting replacement [{}..{}] for {} (floor {})",
                start, end, issue.kind, floor
            );
            issue.replacement = None;
            continue;
        }

        let Some(replacement) = issue.replacement.as_deref() else {
            continue;
        };

        debug!("Applying replacement [{}..{}] with '{}'", start, end, replacement);
        floor = if replacement.is_empty() {
            delete_range(&mut working, start, end)
        } else {
            working.replace_range(start..end, replacement);
            start
        };
        applied += 1;
    }

    if applied == 0 {
        return CorrectionResult {
            issues,
            corrected_text: None,
            original_text: original.to_string(),
            sentence_replacements: Vec::new(),
        };
    }

    let corrected = collapse_whitespace(&working);
    let sentence_replacements = if corrected != original {
        sentence_replacements(original, &corrected)
    } else {
        Vec::new()
    };

    CorrectionResult {
        issues,
        corrected_text: Some(corrected),
        original_text: original.to_string(),
        sentence_replacements,
    }
}

/// The range a deletion of `start..end` really removes: the word plus the
/// whitespace that would otherwise be left doubled, or dangling before
/// punctuation.
pub fn deletion_range(text: &str, start: usize, end: usize) -> Range<usize> {
    let space_before = text[..start].ends_with(' ');
    let after = &text[end..];
    let space_after = after.starts_with(' ');
    let punct_after = after.starts_with(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'));

    if space_after && (space_before || start == 0) {
        start..end + 1
    } else if space_before && punct_after {
        start - 1..end
    } else {
        start..end
    }
}

/// Delete `start..end` and the whitespace around the hole. Returns the
/// lowest offset that was touched.
fn delete_range(working: &mut String, start: usize, end: usize) -> usize {
    let range = deletion_range(working, start, end);
    let floor = range.start;
    working.replace_range(range, "");
    floor
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pair sentences of both texts by position; fall back to a single
/// whole-text record when that finds nothing.
fn sentence_replacements(original: &str, corrected: &str) -> Vec<SentenceReplacement> {
    let original_spans = sentence_spans(original);
    let corrected_sentences = segment_sentences(corrected);

    let mut replacements = Vec::new();
    if original_spans.len() == corrected_sentences.len() {
        for (span, fixed) in original_spans.iter().zip(&corrected_sentences) {
            let before = &original[span.clone()];
            if collapse_whitespace(before) != *fixed {
                replacements.push(SentenceReplacement {
                    kind: SentenceReplacementKind::SentenceCorrection,
                    original_text: before.to_string(),
                    corrected_text: fixed.to_string(),
                    start: span.start,
                    end: span.end,
                    message: format!("Suggested correction: \"{}\"", fixed),
                });
            }
        }
    }

    if replacements.is_empty() {
        replacements.push(SentenceReplacement {
            kind: SentenceReplacementKind::FullTextCorrection,
            original_text: original.to_string(),
            corrected_text: corrected.to_string(),
            start: 0,
            end: original.len(),
            message: format!("Suggested correction: \"{}\"", corrected),
        });
    }

    replacements
}
