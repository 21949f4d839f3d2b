//! Pattern-based writing-style rules.
//!
//! Every rule is independent and returns its own issues; matches from
//! different rules may overlap; the reconciler sorts that out.

pub mod phrases;
pub mod readability;
pub mod rules;

use crate::Issue;
use readability::{ReadabilityAnalyzer, WriteGoodHeuristic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleToggles {
    pub weak_words: bool,
    pub passive_voice: bool,
    pub terminology: bool,
    pub contractions: bool,
    pub prohibited: bool,
    pub gender_neutral: bool,
    pub readability: bool,
}

impl Default for StyleToggles {
    fn default() -> Self {
        Self {
            weak_words: true,
            passive_voice: true,
            terminology: true,
            contractions: true,
            prohibited: true,
            gender_neutral: true,
            readability: true,
        }
    }
}

impl StyleToggles {
    pub fn none() -> Self {
        Self {
            weak_words: false,
            passive_voice: false,
            terminology: false,
            contractions: false,
            prohibited: false,
            gender_neutral: false,
            readability: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

pub struct StyleEngine {
    toggles: StyleToggles,
    analyzer: Box<dyn ReadabilityAnalyzer>,
}

impl StyleEngine {
    pub fn new(toggles: StyleToggles) -> Self {
        Self::with_analyzer(toggles, Box::new(WriteGoodHeuristic))
    }

    /// Use another readability heuristic for the passive-voice and
    /// readability rules.
    pub fn with_analyzer(toggles: StyleToggles, analyzer: Box<dyn ReadabilityAnalyzer>) -> Self {
        Self { toggles, analyzer }
    }

    pub fn check(&self, text: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        if self.toggles.weak_words {
            issues.extend(rules::check_weak_words(text));
        }
        if self.toggles.passive_voice {
            issues.extend(rules::check_passive_voice(text, self.analyzer.as_ref()));
        }
        if self.toggles.terminology {
            issues.extend(rules::check_terminology(text));
        }
        if self.toggles.contractions {
            issues.extend(rules::check_contractions(text));
        }
        if self.toggles.prohibited {
            issues.extend(rules::check_prohibited(text));
        }
        if self.toggles.gender_neutral {
            issues.extend(rules::check_gender_neutral(text));
        }
        if self.toggles.readability {
            issues.extend(rules::check_readability(text, self.analyzer.as_ref()));
        }

        issues
    }
}
