pub mod dictionary;
pub mod reconcile;
pub mod skip;
pub mod spelling;
pub mod tokenizer;

use std::sync::Arc;

use crate::config::CheckConfiguration;
use crate::grammar::{check_sentence, GrammarService};
use crate::style::StyleEngine;
use crate::{CheckResult, Result, SpanKind, TextSpan};
use dictionary::DictionaryCache;
use skip::SkipPolicy;
use spelling::SpellingChecker;
use tokenizer::sentence_spans;

/// The single entry point hosts call with each extracted text unit.
pub struct TextChecker {
    config: CheckConfiguration,
    dictionaries: Arc<DictionaryCache>,
    grammar: Option<Arc<dyn GrammarService>>,
}

impl TextChecker {
    /// Loads the dictionary for `config.language` right away, so a broken
    /// dictionary setup fails here instead of on the first check.
    pub fn new(config: CheckConfiguration, dictionaries: Arc<DictionaryCache>) -> Result<Self> {
        dictionaries.get(&config.language)?;
        Ok(Self {
            config,
            dictionaries,
            grammar: None,
        })
    }

    /// Grammar service used for sentence checks when `sentences` is on.
    pub fn with_grammar(mut self, service: Arc<dyn GrammarService>) -> Self {
        self.grammar = Some(service);
        self
    }

    pub fn config(&self) -> &CheckConfiguration {
        &self.config
    }

    pub fn check_span(&self, span: &TextSpan) -> Result<CheckResult> {
        self.check_text(&span.content, span.kind)
    }

    pub fn check_text(&self, content: &str, kind: SpanKind) -> Result<CheckResult> {
        self.check_text_with(content, kind, &self.config)
    }

    /// Check one unit under `config`. Every issue offset is a byte range
    /// into `content`.
    ///
    /// A failing grammar service fails this call only; the host is expected
    /// to report it and carry on with the next unit.
    pub fn check_text_with(
        &self,
        content: &str,
        kind: SpanKind,
        config: &CheckConfiguration,
    ) -> Result<CheckResult> {
        let policy = SkipPolicy::new(config);
        if !config.checks_kind(kind)
            || content.trim().is_empty()
            || policy.should_skip_value(content)
        {
            return Ok(reconcile::reconcile(content, Vec::new()));
        }

        let dictionary = self.dictionaries.get(&config.language)?;
        let mut issues = SpellingChecker::new(dictionary.as_ref(), &policy).check(content);

        // Identifiers are names, not prose: spelling only.
        if kind != SpanKind::Identifier {
            issues.extend(StyleEngine::new(config.style).check(content));

            if config.sentences {
                if let Some(grammar) = &self.grammar {
                    for span in sentence_spans(content) {
                        let sentence = &content[span.clone()];
                        let found = check_sentence(grammar.as_ref(), sentence, config)?;
                        issues.extend(found.into_iter().map(|mut issue| {
                            issue.start += span.start;
                            issue.end += span.start;
                            issue
                        }));
                    }
                }
            }
        }

        issues.sort_by_key(|issue| (issue.start, issue.end));
        Ok(reconcile::reconcile(content, issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::tests::WordSet;
    use crate::checker::dictionary::SpellDictionary;
    use crate::grammar::tests::{grammar_match, CannedService};
    use crate::style::StyleToggles;
    use crate::IssueType;

    const WORDS: &[&str] = &[
        "please", "login", "now", "it", "isn't", "ready", "this", "is", "simply", "great", "he",
        "go", "to", "school", "the", "user", "name", "not", "a", "sentence", "value",
    ];

    fn checker(config: CheckConfiguration) -> TextChecker {
        let cache = DictionaryCache::with_loader(|_| {
            Ok(Arc::new(WordSet::new(WORDS)) as Arc<dyn SpellDictionary>)
        });
        TextChecker::new(config, Arc::new(cache)).unwrap()
    }

    #[test]
    fn test_terminology_end_to_end() {
        let result = checker(CheckConfiguration::default())
            .check_text("Please login now.", SpanKind::Comment)
            .unwrap();
        let term = result
            .issues
            .iter()
            .find(|i| i.kind == IssueType::Terminology)
            .unwrap();
        assert_eq!(term.replacement.as_deref(), Some("sign in"));
        assert_eq!(result.corrected_text.as_deref(), Some("Please sign in now."));
    }

    #[test]
    fn test_contraction_end_to_end() {
        let result = checker(CheckConfiguration::default())
            .check_text("It isn't ready.", SpanKind::String)
            .unwrap();
        let contraction = result
            .issues
            .iter()
            .find(|i| i.kind == IssueType::Contraction)
            .unwrap();
        assert_eq!(contraction.replacement.as_deref(), Some("is not"));
        assert_eq!(result.corrected_text.as_deref(), Some("It is not ready."));
    }

    #[test]
    fn test_disabled_kind_is_not_checked() {
        let config = CheckConfiguration {
            strings: false,
            ..Default::default()
        };
        let result = checker(config).check_text("Please login now.", SpanKind::String).unwrap();
        assert!(result.issues.is_empty());
        assert_eq!(result.corrected_text, None);
    }

    #[test]
    fn test_identifiers_get_spelling_only() {
        let result = checker(CheckConfiguration::default())
            .check_text("loginVaule", SpanKind::Identifier)
            .unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueType::Spelling);
        assert_eq!(result.corrected_text, None);
    }

    #[test]
    fn test_grammar_issues_are_shifted_to_unit_offsets() {
        let text = "not a sentence. He go to school.";
        let service = Arc::new(CannedService::new(vec![grammar_match(3, 2, "goes", None)]));
        let config = CheckConfiguration {
            sentences: true,
            style: StyleToggles::none(),
            ..Default::default()
        };
        let result = checker(config)
            .with_grammar(service.clone())
            .check_text(text, SpanKind::Comment)
            .unwrap();

        assert_eq!(service.seen.lock().as_slice(), ["He go to school."]);
        let grammar = &result.issues[0];
        assert_eq!(grammar.kind, IssueType::Grammar);
        assert_eq!(&text[grammar.range()], "go");
        assert_eq!(result.corrected_text.as_deref(), Some("not a sentence. He goes to school."));
    }

    #[test]
    fn test_grammar_failure_fails_the_unit() {
        let mut service = CannedService::new(Vec::new());
        service.fail = true;
        let config = CheckConfiguration {
            sentences: true,
            ..Default::default()
        };
        let checker = checker(config).with_grammar(Arc::new(service));
        assert!(checker.check_text("He go to school.", SpanKind::Comment).is_err());
        assert!(checker.check_text("loginValue", SpanKind::Identifier).is_ok());
    }

    #[test]
    fn test_skip_if_match_skips_whole_unit() {
        let config = CheckConfiguration {
            skip_if_match: vec![regex::Regex::new(r"^https?://").unwrap()],
            ..Default::default()
        };
        let result = checker(config)
            .check_text("https://example.com/loginn", SpanKind::String)
            .unwrap();
        assert!(result.issues.is_empty());
    }
}
