use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use grammarchk::checker::dictionary::{DictionaryCache, SpellDictionary};
use grammarchk::checker::reconcile::reconcile;
use grammarchk::grammar::{GrammarError, GrammarRequest, GrammarResponse, GrammarService};
use grammarchk::style::StyleToggles;
use grammarchk::{CheckConfiguration, Config, IssueType, SpanKind, TextChecker};
use regex::Regex;
use rstest::rstest;

struct Words(HashSet<String>);

impl SpellDictionary for Words {
    fn check(&self, word: &str) -> bool {
        self.0.contains(&word.to_lowercase())
    }
}

/// Accepts every word, so only style rules fire.
struct Anything;

impl SpellDictionary for Anything {
    fn check(&self, _word: &str) -> bool {
        true
    }
}

fn checker_with(config: CheckConfiguration, dictionary: Arc<dyn SpellDictionary>) -> TextChecker {
    let cache = DictionaryCache::with_loader(move |_| Ok(Arc::clone(&dictionary)));
    TextChecker::new(config, Arc::new(cache)).unwrap()
}

fn words(list: &[&str]) -> Arc<dyn SpellDictionary> {
    Arc::new(Words(list.iter().map(|w| w.to_string()).collect()))
}

#[derive(Default)]
struct RecordingService {
    seen: Mutex<Vec<String>>,
}

impl GrammarService for RecordingService {
    fn check(&self, request: &GrammarRequest) -> Result<GrammarResponse, GrammarError> {
        self.seen.lock().unwrap().push(request.text.clone());
        Ok(GrammarResponse { matches: Vec::new() })
    }
}

#[rstest]
#[case("")]
#[case("Please login now.")]
#[case("This is simply great.")]
fn reconcile_without_issues_changes_nothing(#[case] text: &str) {
    let result = reconcile(text, Vec::new());
    assert_eq!(result.corrected_text, None);
    assert!(result.sentence_replacements.is_empty());
}

#[rstest]
#[case("Please login now.", "Please sign in now.")]
#[case("It isn't ready.", "It is not ready.")]
#[case("This is simply great.", "This is great.")]
#[case("Send an email to the guys.", "Send an email address to the everyone.")]
fn style_corrections(#[case] input: &str, #[case] expected: &str) {
    let checker = checker_with(CheckConfiguration::default(), Arc::new(Anything));
    let result = checker.check_text(input, SpanKind::Comment).unwrap();
    assert_eq!(result.corrected_text.as_deref(), Some(expected));
}

#[test]
fn terminology_issue_carries_replacement() {
    let checker = checker_with(CheckConfiguration::default(), Arc::new(Anything));
    let result = checker.check_text("Please login now.", SpanKind::String).unwrap();
    let issue = result
        .issues
        .iter()
        .find(|i| i.kind == IssueType::Terminology)
        .unwrap();
    assert_eq!(issue.replacement.as_deref(), Some("sign in"));
    assert_eq!(&"Please login now."[issue.range()], "login");
}

#[rstest]
#[case("Please login now.")]
#[case("It isn't ready, and you're late.")]
#[case("Send an email to the guys after login.")]
#[case("The popup shows his/her setup.")]
fn corrections_are_idempotent(#[case] input: &str) {
    let checker = checker_with(CheckConfiguration::default(), Arc::new(Anything));
    let first = checker.check_text(input, SpanKind::Comment).unwrap();
    let corrected = first.corrected_text.expect("input has fixable issues");

    let second = checker.check_text(&corrected, SpanKind::Comment).unwrap();
    let refixed: Vec<_> = second
        .issues
        .iter()
        .filter(|i| {
            matches!(
                i.kind,
                IssueType::Terminology | IssueType::Contraction | IssueType::GenderNeutral
            )
        })
        .collect();
    assert!(refixed.is_empty(), "{:?} re-flagged in {:?}", refixed, corrected);
}

#[test]
fn compound_token_needs_an_unknown_part() {
    let config = CheckConfiguration::default();
    let known = checker_with(config.clone(), words(&["test", "anything", "variable"]));
    let result = known
        .check_text("test12anything78variable", SpanKind::Identifier)
        .unwrap();
    assert!(result.issues.is_empty());

    let unknown = checker_with(config, words(&["test", "anything"]));
    let result = unknown
        .check_text("test12anything78variable", SpanKind::Identifier)
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].kind, IssueType::Spelling);
}

#[test]
fn accented_words_are_checked_whole() {
    let dictionary = words(&["the", "café", "is", "open", "naïve", "value"]);
    let checker = checker_with(CheckConfiguration::default(), dictionary);

    for (text, kind) in [
        ("The café is open.", SpanKind::Comment),
        ("naïveValue", SpanKind::Identifier),
    ] {
        let result = checker.check_text(text, kind).unwrap();
        let spelling: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.kind == IssueType::Spelling)
            .map(|i| &text[i.range()])
            .collect();
        assert!(spelling.is_empty(), "{text}: {spelling:?}");
    }
}

#[test]
fn skip_word_pattern_beats_dictionary() {
    let config = Config {
        skip_word_if_match: vec!["^zz".to_string()],
        ..Default::default()
    };
    let config = CheckConfiguration::from_config(&config).unwrap();
    let checker = checker_with(config, words(&["value"]));

    let result = checker.check_text("zzqx value", SpanKind::Comment).unwrap();
    assert!(result.issues.iter().all(|i| i.kind != IssueType::Spelling));
}

#[test]
fn only_valid_sentences_reach_grammar() {
    let service = Arc::new(RecordingService::default());
    let config = CheckConfiguration {
        sentences: true,
        style: StyleToggles::none(),
        ..Default::default()
    };
    let checker = checker_with(config, Arc::new(Anything)).with_grammar(service.clone());

    checker.check_text("not a sentence", SpanKind::Comment).unwrap();
    checker.check_text("Missing the stop", SpanKind::Comment).unwrap();
    checker
        .check_text("lower start. This one counts.", SpanKind::Comment)
        .unwrap();

    assert_eq!(*service.seen.lock().unwrap(), vec!["This one counts.".to_string()]);
}

#[rstest]
#[case("Please login now.")]
#[case("Café’s login isn’t réady, simply put.")]
#[case("The guys  wrote   teh   setup. Thsi is it!")]
#[case("naïveValue userNaem")]
#[case("\u{1F600} emoji before login and after \u{1F600}")]
fn issue_offsets_slice_the_unit(#[case] text: &str) {
    let config = CheckConfiguration {
        skip_if_match: vec![Regex::new("^$").unwrap()],
        ..Default::default()
    };
    let checker = checker_with(config, words(&["the", "please", "now", "is", "it"]));

    for kind in [SpanKind::Comment, SpanKind::Identifier] {
        let result = checker.check_text(text, kind).unwrap();
        assert!(!result.issues.is_empty());
        for issue in &result.issues {
            assert!(issue.start < issue.end, "{:?}", issue);
            assert!(text.get(issue.range()).is_some(), "{:?} in {:?}", issue, text);
        }
    }
}
