// A write-good style readability heuristic: passive voice, weasel words,
// lexical illusions, "So" openers, "There is" openers, adverbs and wordy
// phrases. Purely pattern based.

use lazy_static::lazy_static;
use regex::Regex;

use super::phrases::{is_boundary, PhraseMatcher};

/// Which families of suggestions to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadabilityChecks {
    pub passive: bool,
    pub weasel: bool,
    pub illusion: bool,
    pub so: bool,
    pub there_is: bool,
    pub adverb: bool,
    pub too_wordy: bool,
}

impl ReadabilityChecks {
    pub fn passive_only() -> Self {
        Self {
            passive: true,
            ..Default::default()
        }
    }

    /// Everything except passive voice, which has its own rule.
    pub fn prose() -> Self {
        Self {
            passive: false,
            weasel: true,
            illusion: true,
            so: true,
            there_is: true,
            adverb: true,
            too_wordy: true,
        }
    }
}

/// A flagged stretch of text: `index..index + offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadabilitySuggestion {
    pub index: usize,
    pub offset: usize,
    pub reason: String,
}

pub trait ReadabilityAnalyzer: Send + Sync {
    fn analyze(&self, text: &str, checks: ReadabilityChecks) -> Vec<ReadabilitySuggestion>;
}

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "awoken", "been", "born", "beat", "become", "begun", "bent", "bet", "bid", "bidden",
    "bound", "bitten", "bled", "blown", "broken", "bred", "brought", "broadcast", "built",
    "burnt", "burst", "bought", "cast", "caught", "chosen", "clung", "come", "cost",
    "crept", "cut", "dealt", "dug", "done", "drawn", "dreamt", "driven", "drunk", "eaten",
    "fallen", "fed", "felt", "fought", "found", "fled", "flung", "flown", "forbidden",
    "forecast", "foreseen", "forgotten", "forgiven", "forsaken", "frozen", "gotten",
    "given", "gone", "ground", "grown", "hung", "heard", "hidden", "hit", "held", "hurt",
    "kept", "knelt", "known", "laid", "led", "leapt", "learnt", "left", "lent", "let",
    "lain", "lost", "made", "meant", "met", "mistaken", "mown", "overcome", "overdone",
    "overtaken", "overthrown", "paid", "proven", "put", "quit", "read", "rid", "ridden",
    "rung", "risen", "run", "said", "seen", "sought", "sold", "sent", "set", "sewn",
    "shaken", "shorn", "shed", "shone", "shot", "shown", "shrunk", "shut", "sung", "sunk",
    "sat", "slept", "slain", "slid", "slung", "slit", "sown", "spoken", "sped", "spent",
    "spilt", "spun", "spit", "split", "spread", "sprung", "stood", "stolen", "stuck",
    "stung", "struck", "strung", "striven", "sworn", "swept", "swollen", "swum", "swung",
    "taken", "taught", "torn", "told", "thought", "thrown", "thrust", "trodden",
    "understood", "upheld", "upset", "woken", "worn", "woven", "wed", "wept", "wound",
    "won", "withheld", "withstood", "wrung", "written",
];

const WEASEL_WORDS: &[&str] = &[
    "many", "various", "very", "fairly", "several", "extremely", "exceedingly", "quite",
    "remarkably", "few", "surprisingly", "mostly", "largely", "huge", "tiny",
    "is a number", "are a number", "excellent", "interestingly", "significantly",
    "substantially", "clearly", "vast", "relatively", "completely",
];

const ADVERBS: &[&str] = &[
    "absolutely", "accidentally", "additionally", "allegedly", "alternatively",
    "angrily", "anxiously", "approximately", "awkwardly", "badly", "barely",
    "beautifully", "blindly", "boldly", "bravely", "briefly", "brightly", "briskly",
    "broadly", "busily", "calmly", "carefully", "carelessly", "certainly", "cheerfully",
    "cleverly", "closely", "commonly", "correctly", "deeply", "definitely",
    "deliberately", "easily", "effectively", "entirely", "equally", "especially",
    "essentially", "eventually", "exactly", "extremely", "fairly", "finally", "firmly",
    "frankly", "freely", "frequently", "fully", "generally", "gently", "greatly",
    "happily", "hardly", "heavily", "highly", "honestly", "hopefully", "immediately",
    "incredibly", "initially", "instantly", "largely", "literally", "loosely", "merely",
    "mostly", "nearly", "necessarily", "normally", "obviously", "occasionally", "only",
    "partially", "particularly", "perfectly", "possibly", "practically", "precisely",
    "presumably", "previously", "primarily", "probably", "properly", "quickly",
    "quietly", "rapidly", "rarely", "readily", "really", "reasonably", "recently",
    "relatively", "seemingly", "seriously", "significantly", "simply", "slightly",
    "slowly", "strongly", "successfully", "suddenly", "surely", "totally", "truly",
    "typically", "ultimately", "unfortunately", "usually", "utterly", "virtually",
    "widely",
];

const WORDY_PHRASES: &[&str] = &[
    "a number of", "accede to", "accelerate", "accentuate", "accompany", "accomplish",
    "accorded", "accordingly", "accrue", "acquiesce", "acquire", "additional",
    "adjacent to", "adjustment", "admissible", "advantageous", "adversely impact",
    "advise", "aforementioned", "aggregate", "all of", "alleviate", "allocate",
    "along the lines of", "already existing", "ameliorate", "anticipate", "apparent",
    "appreciable", "as a means of", "as of yet", "as to", "as yet", "ascertain",
    "assist", "at the present time", "at this time", "attain", "attributable to",
    "by means of", "commence", "consequently", "demonstrate", "due to the fact that",
    "during the course of", "endeavor", "facilitate", "for the purpose of",
    "has the ability to", "in a timely manner", "in order to", "in the event that",
    "in the near future", "is able to", "it is", "methodology", "notwithstanding",
    "numerous", "prior to", "subsequently", "sufficient", "take into consideration",
    "there are", "there is", "utilize", "whether or not", "with regard to",
    "with the exception of",
];

lazy_static! {
    static ref PASSIVE: Regex = Regex::new(&format!(
        r"(?i)\b(am|are|were|being|is|been|was|be)\b\s*([a-z]+ed|{})\b",
        IRREGULAR_PARTICIPLES.join("|")
    ))
    .unwrap();
    static ref SO_OPENER: Regex = Regex::new(r"(?i)(?:^|[.!?;]\s+)\s*(so)\b[\s\S]").unwrap();
    static ref THERE_IS_OPENER: Regex =
        Regex::new(r"(?i)(?:^|[.!?;]\s+)\s*(there\s+(?:is|are))\b").unwrap();
    static ref WORD: Regex = Regex::new(r"[A-Za-z0-9_']+").unwrap();
    static ref WEASELS: PhraseMatcher = PhraseMatcher::new(WEASEL_WORDS).unwrap();
    static ref ADVERB_WORDS: PhraseMatcher = PhraseMatcher::new(ADVERBS).unwrap();
    static ref WORDY: PhraseMatcher = PhraseMatcher::new(WORDY_PHRASES).unwrap();
}

/// The built-in analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteGoodHeuristic;

impl ReadabilityAnalyzer for WriteGoodHeuristic {
    fn analyze(&self, text: &str, checks: ReadabilityChecks) -> Vec<ReadabilitySuggestion> {
        let mut found = Vec::new();

        if checks.passive {
            for m in PASSIVE.find_iter(text) {
                let reason = format!("\"{}\" may be passive voice", m.as_str());
                found.push(suggestion(m.start(), m.end(), reason));
            }
        }
        if checks.weasel {
            phrase_suggestions(&WEASELS, text, "is a weasel word", &mut found);
        }
        if checks.illusion {
            lexical_illusions(text, &mut found);
        }
        if checks.so {
            for caps in SO_OPENER.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    let reason = format!("\"{}\" adds no meaning", m.as_str());
                    found.push(suggestion(m.start(), m.end(), reason));
                }
            }
        }
        if checks.there_is {
            for caps in THERE_IS_OPENER.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    found.push(suggestion(
                        m.start(),
                        m.end(),
                        format!("\"{}\" is unnecessary verbiage", m.as_str()),
                    ));
                }
            }
        }
        if checks.adverb {
            phrase_suggestions(&ADVERB_WORDS, text, "can weaken meaning", &mut found);
        }
        if checks.too_wordy {
            phrase_suggestions(&WORDY, text, "is wordy or unneeded", &mut found);
        }

        found.sort_by_key(|s| (s.index, s.offset));
        found
    }
}

fn suggestion(start: usize, end: usize, reason: String) -> ReadabilitySuggestion {
    ReadabilitySuggestion {
        index: start,
        offset: end - start,
        reason,
    }
}

fn phrase_suggestions(
    matcher: &PhraseMatcher,
    text: &str,
    reason: &str,
    found: &mut Vec<ReadabilitySuggestion>,
) {
    for m in matcher.find_all(text) {
        found.push(suggestion(
            m.start,
            m.end,
            format!("\"{}\" {}", &text[m.start..m.end], reason),
        ));
    }
}

// "the the": the same word twice with only whitespace between.
fn lexical_illusions(text: &str, found: &mut Vec<ReadabilitySuggestion>) {
    let words: Vec<_> = WORD
        .find_iter(text)
        .filter(|m| is_boundary(text, m.start()) && is_boundary(text, m.end()))
        .collect();

    for pair in words.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let gap = &text[first.end()..second.start()];
        if !gap.is_empty()
            && gap.chars().all(char::is_whitespace)
            && first.as_str().eq_ignore_ascii_case(second.as_str())
        {
            found.push(suggestion(
                first.start(),
                second.end(),
                format!("\"{}\" is repeated", second.as_str()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasons(text: &str, checks: ReadabilityChecks) -> Vec<String> {
        WriteGoodHeuristic
            .analyze(text, checks)
            .into_iter()
            .map(|s| s.reason)
            .collect()
    }

    #[test]
    fn test_passive_voice() {
        let text = "The file was deleted by the job.";
        let found = WriteGoodHeuristic.analyze(text, ReadabilityChecks::passive_only());
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].index..found[0].index + found[0].offset], "was deleted");
        assert!(found[0].reason.contains("passive voice"));

        assert!(reasons("The ball was thrown.", ReadabilityChecks::passive_only())
            .iter()
            .any(|r| r.contains("was thrown")));
        assert!(reasons("We deleted the file.", ReadabilityChecks::passive_only()).is_empty());
    }

    #[test]
    fn test_prose_checks() {
        let found = reasons(
            "So there are many things in the the list.",
            ReadabilityChecks::prose(),
        );
        assert!(found.iter().any(|r| r == "\"So\" adds no meaning"));
        assert!(found.iter().any(|r| r == "\"many\" is a weasel word"));
        assert!(found.iter().any(|r| r == "\"the\" is repeated"));
        assert!(found.iter().any(|r| r.contains("wordy")));
    }

    #[test]
    fn test_there_is_opener() {
        let found = reasons("It works. There is a catch.", ReadabilityChecks::prose());
        assert!(found.iter().any(|r| r == "\"There is\" is unnecessary verbiage"));
    }

    #[test]
    fn test_prose_excludes_passive() {
        let found = reasons("The file was deleted.", ReadabilityChecks::prose());
        assert!(found.iter().all(|r| !r.contains("passive")));
    }
}
