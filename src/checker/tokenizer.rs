// Word and sentence segmentation for prose embedded in code.
//
// Offsets are byte offsets into the text passed in. Blanking replaces
// each removed sequence with the same number of spaces, so they stay valid.

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    // Escape sequences and regex metacharacter classes, then anything that
    // is not a letter, digit, space or apostrophe.
    static ref NON_WORDS: Regex = Regex::new(
        r"\\[sSwdDbB0nfrtv]|\\[0-7]{3}|\\x[0-9A-Fa-f]{2}|\\u[0-9A-Fa-f]{4}|[^\p{L}\p{M}\p{N} '’]"
    )
    .unwrap();
    static ref DIGITS_AND_APOSTROPHES: Regex = Regex::new(r"[0-9'’]+").unwrap();
}

/// A word candidate and where it sits in the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

fn blank_non_words(text: &str) -> String {
    NON_WORDS
        .replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()))
        .into_owned()
}

/// Split text into word candidates: strip escapes and punctuation, break
/// before every capital letter, then split on whitespace.
pub fn word_tokens(text: &str) -> Vec<WordToken<'_>> {
    let blanked = blank_non_words(text);
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in blanked.char_indices() {
        if ch == ' ' {
            if let Some(s) = start.take() {
                tokens.push(WordToken {
                    text: &text[s..i],
                    span: s..i,
                });
            }
        } else if ch.is_uppercase() {
            if let Some(s) = start.take() {
                tokens.push(WordToken {
                    text: &text[s..i],
                    span: s..i,
                });
            }
            start = Some(i);
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(WordToken {
            text: &text[s..],
            span: s..text.len(),
        });
    }

    tokens
}

pub fn segment_words(text: &str) -> Vec<&str> {
    word_tokens(text).into_iter().map(|t| t.text).collect()
}

/// Second-pass split of a token that failed the dictionary: digits and
/// apostrophes become boundaries, capitals start new words, everything is
/// lower-cased.
pub fn sub_tokens(word: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(word.len() + 8);
    for ch in word.chars() {
        if ch.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    DIGITS_AND_APOSTROPHES
        .replace_all(&spaced, " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Byte ranges of the sentences in `text`, trimmed. A sentence ends at
/// whitespace that follows `.`, `!` or `?`. Abbreviations are not special.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            push_trimmed(text, start..i, &mut spans);
            start = i;
        }
        prev = Some(ch);
    }
    push_trimmed(text, start..text.len(), &mut spans);

    spans
}

fn push_trimmed(text: &str, range: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let fragment = &text[range.clone()];
    let leading = fragment.len() - fragment.trim_start().len();
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        let start = range.start + leading;
        spans.push(start..start + trimmed.len());
    }
}

pub fn segment_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text).into_iter().map(|r| &text[r]).collect()
}
