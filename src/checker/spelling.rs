use super::dictionary::SpellDictionary;
use super::skip::SkipPolicy;
use super::tokenizer::{sub_tokens, word_tokens};
use crate::{Issue, IssueType, Severity};

const MAX_SUGGESTIONS: usize = 5;

pub struct SpellingChecker<'a> {
    dictionary: &'a dyn SpellDictionary,
    policy: &'a SkipPolicy<'a>,
}

impl<'a> SpellingChecker<'a> {
    pub fn new(dictionary: &'a dyn SpellDictionary, policy: &'a SkipPolicy<'a>) -> Self {
        Self { dictionary, policy }
    }

    pub fn is_misspelled(&self, word: &str) -> bool {
        !self.policy.is_skip_word(word) && !self.dictionary.check(word)
    }

    /// Two-pass check. The token as written must be unknown, and so must at
    /// least one of its derived sub-tokens (`test12anything78variable` is
    /// checked as `test`, `anything`, `variable`).
    pub fn is_spelling_error(&self, token: &str) -> bool {
        if !self.is_misspelled(token) {
            return false;
        }
        sub_tokens(token)
            .iter()
            .filter(|sub| self.policy.should_skip_word(sub))
            .any(|sub| self.is_misspelled(sub))
    }

    pub fn check(&self, text: &str) -> Vec<Issue> {
        word_tokens(text)
            .into_iter()
            .filter(|token| self.policy.should_skip_word(token.text))
            .filter(|token| self.is_spelling_error(token.text))
            .map(|token| {
                let mut issue = Issue::new(
                    IssueType::Spelling,
                    token.span.start,
                    token.span.end,
                    Severity::Warning,
                    format!("Misspelled word \"{}\".", token.text),
                );

                let mut suggestions = self.dictionary.suggest(token.text);
                suggestions.truncate(MAX_SUGGESTIONS);
                if !suggestions.is_empty() {
                    let hint = format!("Did you mean: {}?", suggestions.join(", "));
                    issue = issue.with_suggestion(hint);
                }
                issue
            })
            .collect()
    }
}
