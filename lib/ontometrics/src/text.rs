//! Word statistics over literal values and raw file text.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

#[expect(clippy::expect_used)]
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("the word pattern is valid"));

/// Splits a text into word tokens.
///
/// A token is a maximal run of Unicode word characters: whitespace and punctuation are separators.
///
/// ```
/// use ontometrics::text::tokenize;
///
/// assert_eq!(
///     tokenize("A dog, named \"Rex\".").collect::<Vec<_>>(),
///     ["A", "dog", "named", "Rex"]
/// );
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Total and distinct (case-folded) word counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    words: u64,
    vocabulary: BTreeSet<String>,
}

impl WordStats {
    /// Tokenizes `text`, records its words and returns how many were found.
    pub fn add_text(&mut self, text: &str) -> u64 {
        let mut count = 0;
        for word in tokenize(text) {
            count += 1;
            self.vocabulary.insert(word.to_lowercase());
        }
        self.words += count;
        count
    }

    /// Total number of tokens seen.
    #[inline]
    pub fn words(&self) -> u64 {
        self.words
    }

    /// Number of distinct case-folded tokens seen.
    ///
    /// Never greater than [`words`](Self::words).
    #[inline]
    pub fn vocabulary_size(&self) -> u64 {
        self.vocabulary.len() as u64
    }

    pub fn merge(&mut self, other: Self) {
        self.words += other.words;
        self.vocabulary.extend(other.vocabulary);
    }
}

/// Statistics computed from the unparsed content of a file.
///
/// They do not depend on the file being valid Turtle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTextStats {
    lines: u64,
    chars: u64,
    words: WordStats,
}

impl RawTextStats {
    pub fn new(text: &str) -> Self {
        let mut words = WordStats::default();
        words.add_text(text);
        Self {
            lines: text.lines().count() as u64,
            chars: text.chars().count() as u64,
            words,
        }
    }

    #[inline]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Number of Unicode scalar values.
    #[inline]
    pub fn chars(&self) -> u64 {
        self.chars
    }

    #[inline]
    pub fn words(&self) -> &WordStats {
        &self.words
    }

    pub fn merge(&mut self, other: Self) {
        self.lines += other.lines;
        self.chars += other.chars;
        self.words.merge(other.words);
    }
}

/// Word statistics over the literal values of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralStats {
    literals: u64,
    longest: u64,
    shortest: Option<u64>,
    words: WordStats,
}

impl LiteralStats {
    pub fn add_literal(&mut self, value: &str) {
        let count = self.words.add_text(value);
        self.literals += 1;
        self.longest = self.longest.max(count);
        self.shortest = Some(self.shortest.map_or(count, |shortest| shortest.min(count)));
    }

    #[inline]
    pub fn literals(&self) -> u64 {
        self.literals
    }

    /// Word count of the longest literal, 0 if there are no literals.
    #[inline]
    pub fn longest(&self) -> u64 {
        self.longest
    }

    /// Word count of the shortest literal, 0 if there are no literals.
    #[inline]
    pub fn shortest(&self) -> u64 {
        self.shortest.unwrap_or(0)
    }

    #[inline]
    pub fn words(&self) -> &WordStats {
        &self.words
    }

    pub fn merge(&mut self, other: Self) {
        self.literals += other.literals;
        self.longest = self.longest.max(other.longest);
        self.shortest = match (self.shortest, other.shortest) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.words.merge(other.words);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_case_folded() {
        let mut stats = WordStats::default();
        assert_eq!(stats.add_text("Dog dog DOG cat"), 4);
        assert_eq!(stats.words(), 4);
        assert_eq!(stats.vocabulary_size(), 2);
    }

    #[test]
    fn punctuation_splits_words() {
        assert_eq!(
            tokenize("well-known, (really);fine").collect::<Vec<_>>(),
            ["well", "known", "really", "fine"]
        );
        assert_eq!(tokenize("  \t\n").count(), 0);
    }

    #[test]
    fn unicode_words() {
        assert_eq!(
            tokenize("Élan vital über alles").collect::<Vec<_>>(),
            ["Élan", "vital", "über", "alles"]
        );
    }

    #[test]
    fn raw_text_stats() {
        let stats = RawTextStats::new("@prefix ex: <http://example.com/> .\nex:a ex:b \"é\" .\n");
        assert_eq!(stats.lines(), 2);
        assert_eq!(
            stats.chars(),
            "@prefix ex: <http://example.com/> .\nex:a ex:b \"é\" .\n"
                .chars()
                .count() as u64
        );
        assert!(stats.words().vocabulary_size() <= stats.words().words());
    }

    #[test]
    fn literal_extremes() {
        let mut stats = LiteralStats::default();
        assert_eq!(stats.shortest(), 0);
        stats.add_literal("one two three");
        stats.add_literal("four");
        assert_eq!(stats.literals(), 2);
        assert_eq!(stats.longest(), 3);
        assert_eq!(stats.shortest(), 1);
        assert_eq!(stats.words().words(), 4);
    }

    #[test]
    fn literal_merge_keeps_extremes() {
        let mut a = LiteralStats::default();
        a.add_literal("a b c d");
        let mut b = LiteralStats::default();
        b.add_literal("a");
        let empty = LiteralStats::default();
        a.merge(b);
        a.merge(empty);
        assert_eq!(a.literals(), 2);
        assert_eq!(a.longest(), 4);
        assert_eq!(a.shortest(), 1);
        assert_eq!(a.words().words(), 5);
        assert_eq!(a.words().vocabulary_size(), 4);
    }
}
