use lazy_static::lazy_static;

use super::phrases::{match_case, PhraseMatcher};
use super::readability::{ReadabilityAnalyzer, ReadabilityChecks};
use crate::{Issue, IssueType, Severity};

pub const WEAK_WORDS: &[&str] = &[
    "quite", "very", "really", "just", "simply", "basically", "actually", "literally",
    "obviously", "clearly", "of course", "certainly", "probably", "maybe", "perhaps",
    "might", "could", "should", "would", "seem", "appear", "tend to", "in order to",
];

/// Weak words that carry no meaning and can simply be deleted.
const REMOVABLE_WEAK_WORDS: &[&str] = &[
    "quite", "very", "really", "just", "simply", "basically", "actually", "literally",
    "obviously", "clearly", "of course", "certainly",
];

const WEAK_WORD_SYNONYMS: &[(&str, &str)] = &[("in order to", "to"), ("tend to", "usually")];

pub const TERMINOLOGY: &[(&str, &str)] = &[
    ("login", "sign in"),
    ("logout", "sign out"),
    ("username", "user name"),
    ("email", "email address"),
    ("setup", "set up"),
    ("backup", "back up"),
    ("popup", "pop-up"),
    ("dropdown", "drop-down"),
    ("checkbox", "check box"),
    ("website", "web site"),
    ("web page", "webpage"),
    ("click on", "click"),
    ("press on", "press"),
    ("right-click on", "right-click"),
    ("double-click on", "double-click"),
];

pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("won't", "will not"),
    ("can't", "cannot"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("you're", "you are"),
    ("they're", "they are"),
    ("we're", "we are"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("here's", "here is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("who's", "who is"),
    ("how's", "how is"),
];

/// Phrase, human-readable alternative, machine replacement.
pub const PROHIBITED: &[(&str, &str, Option<&str>)] = &[
    ("simply", "Remove or be more specific", Some("")),
    ("just", "Remove or be more specific", Some("")),
    ("easy", "straightforward", Some("straightforward")),
    ("obviously", "Remove", Some("")),
    ("of course", "Remove", Some("")),
    ("clearly", "Remove", Some("")),
    ("please note", "Remove", Some("")),
    ("please be aware", "Remove", Some("")),
    ("it should be noted", "Remove", Some("")),
    ("kill", "stop, end, or close", Some("stop")),
    ("hang", "stop responding", Some("stop responding")),
    ("execute", "run", Some("run")),
    ("abort", "cancel", Some("cancel")),
    ("terminate", "end", Some("end")),
];

pub const GENDER_NEUTRAL: &[(&str, &str)] = &[
    ("he/she", "they"),
    ("his/her", "their"),
    ("him/her", "them"),
    ("himself/herself", "themselves"),
    ("guys", "everyone"),
    ("manpower", "workforce"),
    ("man-hours", "person-hours"),
    ("mankind", "humanity"),
];

lazy_static! {
    static ref WEAK_WORD_MATCHER: PhraseMatcher = PhraseMatcher::new(WEAK_WORDS).unwrap();
    static ref TERMINOLOGY_MATCHER: PhraseMatcher =
        PhraseMatcher::new(&TERMINOLOGY.iter().map(|(from, _)| *from).collect::<Vec<_>>()).unwrap();
    // Every contraction twice: with a straight and a typographic apostrophe.
    static ref CONTRACTION_PATTERNS: Vec<(String, &'static str)> = CONTRACTIONS
        .iter()
        .flat_map(|(short, long)| [(short.to_string(), *long), (short.replace('\'', "’"), *long)])
        .collect();
    static ref CONTRACTION_MATCHER: PhraseMatcher = PhraseMatcher::new(
        &CONTRACTION_PATTERNS.iter().map(|(short, _)| short.as_str()).collect::<Vec<_>>()
    )
    .unwrap();
    static ref PROHIBITED_MATCHER: PhraseMatcher = PhraseMatcher::new(
        &PROHIBITED.iter().map(|(phrase, ..)| *phrase).collect::<Vec<_>>()
    )
    .unwrap();
    static ref GENDER_MATCHER: PhraseMatcher = PhraseMatcher::new(
        &GENDER_NEUTRAL.iter().map(|(from, _)| *from).collect::<Vec<_>>()
    )
    .unwrap();
}

fn weak_word_replacement(word: &str) -> Option<&'static str> {
    let word = word.to_lowercase();
    if let Some((_, synonym)) = WEAK_WORD_SYNONYMS.iter().find(|(w, _)| *w == word) {
        return Some(synonym);
    }
    REMOVABLE_WEAK_WORDS.contains(&word.as_str()).then_some("")
}

pub fn check_weak_words(text: &str) -> Vec<Issue> {
    WEAK_WORD_MATCHER
        .find_all(text)
        .into_iter()
        .map(|m| {
            let matched = &text[m.start..m.end];
            let issue = Issue::new(
                IssueType::WeakWord,
                m.start,
                m.end,
                Severity::Warning,
                format!("Avoid weak word \"{}\". Be more specific and direct.", matched),
            )
            .with_suggestion("Consider removing or replacing with more specific language");
            match weak_word_replacement(matched) {
                Some(replacement) => issue.with_replacement(match_case(matched, replacement)),
                None => issue,
            }
        })
        .collect()
}

pub fn check_passive_voice(text: &str, analyzer: &dyn ReadabilityAnalyzer) -> Vec<Issue> {
    analyzer
        .analyze(text, ReadabilityChecks::passive_only())
        .into_iter()
        .filter(|s| s.reason.contains("passive voice"))
        .map(|s| {
            Issue::new(
                IssueType::PassiveVoice,
                s.index,
                s.index + s.offset,
                Severity::Warning,
                "Use active voice instead of passive voice for clearer communication.",
            )
            .with_suggestion("Rewrite in active voice")
        })
        .collect()
}

pub fn check_terminology(text: &str) -> Vec<Issue> {
    TERMINOLOGY_MATCHER
        .find_all(text)
        .into_iter()
        .filter_map(|m| {
            let (_, preferred) = TERMINOLOGY[m.phrase];
            // Already written the preferred way, e.g. "email address".
            if starts_with_ignore_case(&text[m.start..], preferred) {
                return None;
            }
            let matched = &text[m.start..m.end];
            let replacement = match_case(matched, preferred);
            Some(
                Issue::new(
                    IssueType::Terminology,
                    m.start,
                    m.end,
                    Severity::Error,
                    format!("Use \"{}\" instead of \"{}\".", preferred, matched),
                )
                .with_suggestion(replacement.clone())
                .with_replacement(replacement),
            )
        })
        .collect()
}

pub fn check_contractions(text: &str) -> Vec<Issue> {
    CONTRACTION_MATCHER
        .find_all(text)
        .into_iter()
        .map(|m| {
            let (_, expanded) = CONTRACTION_PATTERNS[m.phrase];
            let matched = &text[m.start..m.end];
            let replacement = match_case(matched, expanded);
            Issue::new(
                IssueType::Contraction,
                m.start,
                m.end,
                Severity::Warning,
                format!(
                    "Avoid contractions in formal documentation. Use \"{}\" instead of \"{}\".",
                    expanded, matched
                ),
            )
            .with_suggestion(replacement.clone())
            .with_replacement(replacement)
        })
        .collect()
}

pub fn check_prohibited(text: &str) -> Vec<Issue> {
    PROHIBITED_MATCHER
        .find_all(text)
        .into_iter()
        .map(|m| {
            let (_, alternative, replacement) = PROHIBITED[m.phrase];
            let matched = &text[m.start..m.end];
            let issue = Issue::new(
                IssueType::Prohibited,
                m.start,
                m.end,
                Severity::Error,
                format!("Avoid using \"{}\".", matched),
            )
            .with_suggestion(alternative);
            match replacement {
                Some(replacement) => issue.with_replacement(match_case(matched, replacement)),
                None => issue,
            }
        })
        .collect()
}

pub fn check_gender_neutral(text: &str) -> Vec<Issue> {
    GENDER_MATCHER
        .find_all(text)
        .into_iter()
        .map(|m| {
            let (_, neutral) = GENDER_NEUTRAL[m.phrase];
            let matched = &text[m.start..m.end];
            let replacement = match_case(matched, neutral);
            Issue::new(
                IssueType::GenderNeutral,
                m.start,
                m.end,
                Severity::Warning,
                format!(
                    "Use gender-neutral language. Replace \"{}\" with \"{}\".",
                    matched, neutral
                ),
            )
            .with_suggestion(replacement.clone())
            .with_replacement(replacement)
        })
        .collect()
}

pub fn check_readability(text: &str, analyzer: &dyn ReadabilityAnalyzer) -> Vec<Issue> {
    analyzer
        .analyze(text, ReadabilityChecks::prose())
        .into_iter()
        .map(|s| {
            Issue::new(
                IssueType::Readability,
                s.index,
                s.index + s.offset,
                Severity::Info,
                format!("Readability issue: {}", s.reason),
            )
            .with_suggestion("Consider revising for clarity")
        })
        .collect()
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}
