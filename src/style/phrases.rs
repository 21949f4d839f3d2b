use aho_corasick::{AhoCorasick, BuildError, MatchKind};

/// One whole-word occurrence of a catalog phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Index of the phrase in the list the matcher was built from.
    pub phrase: usize,
    pub start: usize,
    pub end: usize,
}

/// Case-insensitive, whole-word search for a fixed list of phrases.
///
/// Word boundaries follow the ASCII `\b` rule: a boundary sits between a
/// word character (`[A-Za-z0-9_]`) and anything else. Occurrences of
/// different phrases may overlap.
pub struct PhraseMatcher {
    automaton: AhoCorasick,
}

impl PhraseMatcher {
    pub fn new<P: AsRef<str>>(phrases: &[P]) -> Result<Self, BuildError> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(phrases.iter().map(|p| p.as_ref()))?;
        Ok(Self { automaton })
    }

    pub fn find_all(&self, text: &str) -> Vec<PhraseMatch> {
        let mut matches: Vec<PhraseMatch> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| is_boundary(text, m.start()) && is_boundary(text, m.end()))
            .map(|m| PhraseMatch {
                phrase: m.pattern().as_usize(),
                start: m.start(),
                end: m.end(),
            })
            .collect();
        matches.sort_by_key(|m| (m.phrase, m.start));
        matches
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `\b` at byte offset `pos`.
pub(crate) fn is_boundary(text: &str, pos: usize) -> bool {
    if !text.is_char_boundary(pos) {
        return false;
    }
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = text[pos..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Give `replacement` the capitalization of the first letter of `matched`.
pub fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let matcher = PhraseMatcher::new(&["just"]).unwrap();
        assert_eq!(matcher.find_all("Just adjust it, just").len(), 2);
        assert!(matcher.find_all("justify").is_empty());
    }

    #[test]
    fn test_overlapping_phrases() {
        let matcher = PhraseMatcher::new(&["click on", "right-click on"]).unwrap();
        let found = matcher.find_all("Then right-click on the file.");
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (11, 19));
        assert_eq!((found[1].start, found[1].end), (5, 19));
    }

    #[test]
    fn test_phrases_with_punctuation() {
        let matcher = PhraseMatcher::new(&["he/she", "isn't"]).unwrap();
        let found = matcher.find_all("If He/she says it isn't.");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Login", "sign in"), "Sign in");
        assert_eq!(match_case("login", "sign in"), "sign in");
        assert_eq!(match_case("Just", ""), "");
    }
}
