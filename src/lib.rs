pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod report;
pub mod style;

pub use checker::TextChecker;
pub use config::{CheckConfiguration, Config, ConfigFile};
pub use error::{Error, Result};

use serde::Serialize;
use std::fmt;

/// The syntactic category a piece of prose was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    Comment,
    String,
    Template,
    Identifier,
}

/// A contiguous text unit handed to the checker. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub content: String,
    pub kind: SpanKind,
}

impl TextSpan {
    pub fn new(content: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    WeakWord,
    PassiveVoice,
    Terminology,
    Contraction,
    Prohibited,
    GenderNeutral,
    Readability,
    Spelling,
    Grammar,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::WeakWord => "weak-word",
            IssueType::PassiveVoice => "passive-voice",
            IssueType::Terminology => "terminology",
            IssueType::Contraction => "contraction",
            IssueType::Prohibited => "prohibited",
            IssueType::GenderNeutral => "gender-neutral",
            IssueType::Readability => "readability",
            IssueType::Spelling => "spelling",
            IssueType::Grammar => "grammar",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected problem inside a span.
///
/// `start..end` is a byte range into the content of the span that produced
/// the issue. `replacement` is machine-applicable: `Some("")` deletes the
/// range, `None` means no safe fix exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueType,
    pub start: usize,
    pub end: usize,
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
    pub replacement: Option<String>,
}

impl Issue {
    pub fn new(
        kind: IssueType,
        start: usize,
        end: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            severity,
            message: message.into(),
            suggestion: None,
            replacement: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentenceReplacementKind {
    SentenceCorrection,
    FullTextCorrection,
}

/// A sentence-level (or whole-text) correction derived from the diff
/// between the original and the corrected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceReplacement {
    #[serde(rename = "type")]
    pub kind: SentenceReplacementKind,
    pub original_text: String,
    pub corrected_text: String,
    pub start: usize,
    pub end: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionResult {
    pub issues: Vec<Issue>,
    /// `None` iff no replacement was applied.
    pub corrected_text: Option<String>,
    pub original_text: String,
    pub sentence_replacements: Vec<SentenceReplacement>,
}

/// What [`TextChecker::check_text`] hands back to the host.
pub type CheckResult = CorrectionResult;
