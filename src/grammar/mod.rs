//! Adapter between sentences and an external grammar service.

pub mod bridge;
pub mod languagetool;

use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

use crate::checker::skip::SkipPolicy;
use crate::config::CheckConfiguration;
use crate::{Issue, IssueType, Severity};

pub use bridge::GrammarBridge;
pub use languagetool::LanguageToolClient;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("grammar worker is gone")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarRequest {
    pub text: String,
    pub language: String,
    /// Words the service must accept.
    pub dictionary: Vec<String>,
    pub skip_if_match: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GrammarResponse {
    #[serde(default)]
    pub matches: Vec<GrammarMatch>,
}

/// One finding. `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMatch {
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<GrammarReplacement>,
    #[serde(default)]
    pub rule: Option<MatchRule>,
    #[serde(default)]
    pub short_message: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarReplacement {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Grammar checking as the engine sees it: one call, one answer. The caller
/// is blocked until the answer (or an error) arrives.
pub trait GrammarService: Send + Sync {
    fn check(&self, request: &GrammarRequest) -> Result<GrammarResponse, GrammarError>;
}

/// A grammar backend that is asynchronous inside. Wrap it in a
/// [`GrammarBridge`] to hand it to the engine.
pub trait AsyncGrammarService: Send + 'static {
    fn check(
        &self,
        request: GrammarRequest,
    ) -> impl Future<Output = Result<GrammarResponse, GrammarError>> + Send;
}

/// Starts with a capital letter, ends with `.`, `!` or `?`, and has a word.
pub fn is_valid_sentence(text: &str) -> bool {
    let trimmed = text.trim();
    let starts_with_capital = trimmed.starts_with(|c: char| c.is_ascii_uppercase());
    let ends_with_punctuation = trimmed.ends_with(['.', '!', '?']);
    let has_words = trimmed.chars().any(|c| c.is_alphanumeric() || c == '_');
    starts_with_capital && ends_with_punctuation && has_words
}

/// Byte offset of the `utf16`-th UTF-16 code unit of `text`.
pub(crate) fn utf16_to_byte(text: &str, utf16: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == utf16 {
            return Some(byte);
        }
        units += ch.len_utf16();
    }
    (units == utf16).then_some(text.len())
}

/// Byte range of a match inside `text`.
pub(crate) fn match_range(text: &str, m: &GrammarMatch) -> Option<std::ops::Range<usize>> {
    let start = utf16_to_byte(text, m.offset)?;
    let end = utf16_to_byte(text, m.offset + m.length)?;
    (start < end).then_some(start..end)
}

/// Check one sentence. Offsets of the returned issues are relative to
/// `sentence`. Sentences that do not look like sentences never reach the
/// service.
pub fn check_sentence(
    service: &dyn GrammarService,
    sentence: &str,
    config: &CheckConfiguration,
) -> Result<Vec<Issue>, GrammarError> {
    if !is_valid_sentence(sentence) {
        return Ok(Vec::new());
    }

    let mut dictionary: Vec<String> = config.skip_words.iter().cloned().collect();
    dictionary.sort_unstable();
    let request = GrammarRequest {
        text: sentence.to_string(),
        language: config.language.clone(),
        dictionary,
        skip_if_match: config
            .skip_if_match
            .iter()
            .map(|r| r.as_str().to_string())
            .collect(),
    };

    let response = service.check(&request)?;
    let policy = SkipPolicy::new(config);
    let mut issues = Vec::new();

    for m in response.matches {
        let Some(range) = match_range(sentence, &m) else {
            tracing::warn!(
                "Grammar match at {}+{} does not fit the sentence",
                m.offset,
                m.length
            );
            continue;
        };
        let word = &sentence[range.clone()];
        if policy.should_skip_value(word) {
            continue;
        }
        if let Some(min) = config.confidence {
            let confidence = m.rule.as_ref().and_then(|r| r.confidence).unwrap_or(1.0);
            if confidence < min {
                continue;
            }
        }

        let message = if m.short_message.is_empty() {
            m.message.clone()
        } else {
            m.short_message.clone()
        };
        let mut issue = Issue::new(
            IssueType::Grammar,
            range.start,
            range.end,
            Severity::Error,
            message,
        );
        if let Some(first) = m.replacements.first() {
            let spliced = format!(
                "{}{}{}",
                &sentence[..range.start],
                first.value,
                &sentence[range.end..]
            );
            issue = issue
                .with_suggestion(spliced)
                .with_replacement(first.value.clone());
        }
        issues.push(issue);
    }

    Ok(issues)
}
