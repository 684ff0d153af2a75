//! Text normalization and tokenization shared by the matchers

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    email_regex: Regex,
    url_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let url_regex = Regex::new(r"https?://[^\s]+").expect("Invalid URL regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            email_regex,
            url_regex,
            whitespace_regex,
        }
    }

    /// Lower-cased text with typographic punctuation folded and whitespace
    /// collapsed. Hard matching runs against this form.
    pub fn normalize_for_matching(&self, text: &str) -> String {
        let folded = fold_typography(text).to_lowercase();
        self.whitespace_regex
            .replace_all(&folded, " ")
            .trim()
            .to_string()
    }

    /// Strip contact details and URLs, which carry no topical signal
    pub fn clean_text(&self, text: &str) -> String {
        let without_urls = self.url_regex.replace_all(text, " ");
        let without_emails = self.email_regex.replace_all(&without_urls, " ");
        self.normalize_for_matching(&without_emails)
    }

    /// Lower-cased word tokens with stop words, single characters and pure numbers removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean_text(text)
            .unicode_words()
            .filter(|word| word.chars().count() > 1)
            .filter(|word| word.chars().any(|c| c.is_alphabetic()))
            .filter(|word| !self.stop_words.contains(word))
            .map(str::to_string)
            .collect()
    }

    /// Token counts, ordered by token for deterministic iteration
    pub fn term_frequencies(&self, text: &str) -> BTreeMap<String, f64> {
        let mut frequencies = BTreeMap::new();
        for token in self.tokenize(text) {
            *frequencies.entry(token).or_insert(0.0) += 1.0;
        }
        frequencies
    }
}

/// Fold typographic quotes, dashes, bullets and no-break spaces to plain
/// ASCII. Resume text and requirement terms both pass through this before
/// they are compared.
pub fn fold_typography(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' | '\u{25CF}' => ' ',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
    "as", "at", "be", "been", "being", "both", "but", "by", "can", "could", "did", "do",
    "does", "doing", "during", "each", "etc", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "me", "more", "most", "my", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "our", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "years", "year", "experience", "experienced", "including",
    "strong", "good", "knowledge", "ability", "skills", "work", "worked", "working",
];
