//! Composes a word list with the stem on both sides, hyphenated and
//! concatenated, mirroring `dnstwist.py::DomainDict`.

use crate::candidate::{Algorithm, Candidate};
use crate::generator::Generator;
use crate::split::Split;

/// Built-in word list used when no `--dictionary` file is supplied,
/// lifted from `h4x0r-DomFuzz::default_dictionary`'s fallback list.
pub const DEFAULT_DICTIONARY: &[&str] = &[
    "support", "secure", "login", "pay", "help", "service", "account", "portal", "center", "app",
    "online", "store", "shop", "mail", "cloud", "data", "mobile", "web", "digital", "tech", "pro",
    "plus", "premium", "official", "admin", "manage", "bank", "finance", "crypto",
];

/// Only purely-alphabetic lines are kept, per spec.md §4.4.
pub fn parse_dictionary(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim())
        .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_alphabetic()))
        .map(|word| word.to_string())
        .collect()
}

pub struct DictionaryComposer {
    split: Split,
    words: Vec<String>,
}

impl DictionaryComposer {
    pub fn new(split: Split, words: Vec<String>) -> Self {
        Self { split, words }
    }
}

impl Generator for DictionaryComposer {
    fn generate(&self) -> Vec<Candidate> {
        let stem = &self.split.stem;
        let tld = &self.split.tld;
        let mut candidates = Vec::with_capacity(self.words.len() * 4);

        for word in &self.words {
            for name in [
                format!("{}-{}", stem, word),
                format!("{}{}", stem, word),
                format!("{}-{}", word, stem),
                format!("{}{}", word, stem),
            ] {
                candidates.push(Candidate::new(Algorithm::Dictionary, format!("{}.{}", name, tld)));
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_alphabetic_lines() {
        let words = parse_dictionary("hello\nworld123\nfoo-bar\n\nbaz\n");
        assert_eq!(words, vec!["hello".to_string(), "baz".to_string()]);
    }

    #[test]
    fn composes_both_orders_and_joins() {
        let split = Split { stem: "example".into(), tld: "com".into() };
        let composer = DictionaryComposer::new(split, vec!["pay".to_string()]);
        let names: Vec<_> = composer.generate().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "example-pay.com".to_string(),
                "examplepay.com".to_string(),
                "pay-example.com".to_string(),
                "payexample.com".to_string(),
            ]
        );
    }
}
