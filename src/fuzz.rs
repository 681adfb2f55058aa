//! Runs every perturbation algorithm against a domain's stem, emitting one
//! `Candidate` per produced name tagged with the algorithm that produced it.
//! Mirrors `dnstwist.py::DomainFuzz` one method at a time.

use crate::candidate::{Algorithm, Candidate};
use crate::generator::Generator;
use crate::homoglyph::GLYPHS;
use crate::keyboard::KEYBOARDS;
use crate::split::Split;
use std::collections::HashSet;

/// Ceiling on homoglyph output per input label (spec.md §9 open question:
/// the two-pass expansion can blow up combinatorially on long inputs).
pub const HOMOGLYPH_CAP: usize = 2000;

pub struct FuzzEngine {
    split: Split,
    verbose: bool,
}

impl FuzzEngine {
    pub fn new(split: Split, verbose: bool) -> Self {
        Self { split, verbose }
    }

    fn stem_chars(&self) -> Vec<char> {
        self.split.stem.chars().collect()
    }

    fn addition(&self) -> Vec<String> {
        let s = &self.split.stem;
        ('a'..='z').map(|c| format!("{}{}", s, c)).collect()
    }

    fn bitsquatting(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let masks: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
        let mut result = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            if !c.is_ascii() {
                continue;
            }
            let byte = c as u8;
            for mask in masks {
                let flipped = byte ^ mask;
                let is_allowed = flipped.is_ascii_digit()
                    || (b'a'..=b'z').contains(&flipped)
                    || flipped == b'-';
                if is_allowed {
                    let mut out = chars.clone();
                    out[i] = flipped as char;
                    result.push(out.into_iter().collect());
                }
            }
        }
        result
    }

    fn homoglyph_one_pass(input: &[char], budget: &mut usize) -> HashSet<String> {
        let mut result = HashSet::new();
        let len = input.len();
        for window_len in 1..len {
            for i in 0..=(len - window_len) {
                let window = &input[i..i + window_len];
                for j in 0..window_len {
                    let c = window[j];
                    let Some(glyphs) = GLYPHS.get(&c) else { continue };
                    for glyph in glyphs {
                        if *budget == 0 {
                            return result;
                        }
                        let replaced: String = window
                            .iter()
                            .map(|&ch| if ch == c { glyph.to_string() } else { ch.to_string() })
                            .collect();
                        let mut spliced = String::new();
                        spliced.extend(input[..i].iter());
                        spliced.push_str(&replaced);
                        spliced.extend(input[i + window_len..].iter());
                        if result.insert(spliced) {
                            *budget -= 1;
                        }
                    }
                }
            }
        }
        result
    }

    fn homoglyph(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut budget = HOMOGLYPH_CAP;
        let pass1 = Self::homoglyph_one_pass(&chars, &mut budget);

        let mut pass2: HashSet<String> = HashSet::new();
        for domain in &pass1 {
            if budget == 0 {
                break;
            }
            let domain_chars: Vec<char> = domain.chars().collect();
            pass2.extend(Self::homoglyph_one_pass(&domain_chars, &mut budget));
        }

        if self.verbose && budget == 0 {
            eprintln!(
                "  Homoglyph generation hit the {}-candidate cap for stem '{}'",
                HOMOGLYPH_CAP, self.split.stem
            );
        }

        pass1.union(&pass2).cloned().collect()
    }

    fn hyphenation(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = Vec::new();
        for i in 1..chars.len() {
            let mut out = String::new();
            out.extend(&chars[..i]);
            out.push('-');
            out.extend(&chars[i..]);
            result.push(out);
        }
        result
    }

    fn insertion(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = HashSet::new();
        if chars.len() < 2 {
            return Vec::new();
        }
        for i in 1..chars.len() - 1 {
            for layout in KEYBOARDS.iter() {
                if let Some(neighbors) = layout.get(&chars[i]) {
                    for c in neighbors.chars() {
                        let mut before = String::new();
                        before.extend(&chars[..i]);
                        before.push(c);
                        before.push(chars[i]);
                        before.extend(&chars[i + 1..]);
                        result.insert(before);

                        let mut after = String::new();
                        after.extend(&chars[..i]);
                        after.push(chars[i]);
                        after.push(c);
                        after.extend(&chars[i + 1..]);
                        result.insert(after);
                    }
                }
            }
        }
        result.into_iter().collect()
    }

    fn omission(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = HashSet::new();
        for i in 0..chars.len() {
            let mut out = String::new();
            out.extend(&chars[..i]);
            out.extend(&chars[i + 1..]);
            result.insert(out);
        }

        let collapsed = collapse_runs(&self.split.stem);
        if collapsed != self.split.stem {
            result.insert(collapsed);
        }

        result.into_iter().collect()
    }

    fn repetition(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = HashSet::new();
        for i in 0..chars.len() {
            if chars[i].is_alphabetic() {
                let mut out = String::new();
                out.extend(&chars[..i]);
                out.push(chars[i]);
                out.push(chars[i]);
                out.extend(&chars[i + 1..]);
                result.insert(out);
            }
        }
        result.into_iter().collect()
    }

    fn replacement(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = HashSet::new();
        for i in 0..chars.len() {
            for layout in KEYBOARDS.iter() {
                if let Some(neighbors) = layout.get(&chars[i]) {
                    for c in neighbors.chars() {
                        let mut out = chars.clone();
                        out[i] = c;
                        result.insert(out.into_iter().collect());
                    }
                }
            }
        }
        result.into_iter().collect()
    }

    fn subdomain(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = Vec::new();
        for i in 1..chars.len() {
            if chars[i] != '-' && chars[i] != '.' && chars[i - 1] != '-' && chars[i - 1] != '.' {
                let mut out = String::new();
                out.extend(&chars[..i]);
                out.push('.');
                out.extend(&chars[i..]);
                result.push(out);
            }
        }
        result
    }

    fn transposition(&self) -> Vec<String> {
        let chars = self.stem_chars();
        let mut result = Vec::new();
        if chars.len() < 2 {
            return result;
        }
        for i in 0..chars.len() - 1 {
            if chars[i + 1] != chars[i] {
                let mut out = chars.clone();
                out.swap(i, i + 1);
                result.push(out.into_iter().collect());
            }
        }
        result
    }

    fn vowel_swap(&self) -> Vec<String> {
        const VOWELS: &str = "aeiou";
        let chars = self.stem_chars();
        let mut result = HashSet::new();
        for i in 0..chars.len() {
            if VOWELS.contains(chars[i]) {
                for vowel in VOWELS.chars() {
                    let mut out = chars.clone();
                    out[i] = vowel;
                    result.insert(out.into_iter().collect());
                }
            }
        }
        result.into_iter().collect()
    }

    /// The `Various` block: reproduces the original's no-separator quirk
    /// for the `tld` contains `.` branch exactly, per spec.md §9.
    fn various(&self) -> Vec<Candidate> {
        let stem = &self.split.stem;
        let tld = &self.split.tld;
        let mut out = Vec::new();

        if tld.contains('.') {
            let last_label = tld.rsplit('.').next().unwrap_or(tld);
            out.push(Candidate::new(Algorithm::Various, format!("{}.{}", stem, last_label)));
            if self.verbose {
                eprintln!(
                    "  Various: emitting '{}{}' with no separator before the compound TLD (parity with the original)",
                    stem, tld
                );
            }
            out.push(Candidate::new(Algorithm::Various, format!("{}{}", stem, tld)));
        } else {
            out.push(Candidate::new(Algorithm::Various, format!("{}{}.{}", stem, tld, tld)));
        }

        if tld != "com" && !tld.contains('.') {
            out.push(Candidate::new(Algorithm::Various, format!("{}-{}.com", stem, tld)));
        }

        out
    }
}

fn collapse_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last: Option<char> = None;
    for c in s.chars() {
        if Some(c) != last {
            out.push(c);
        }
        last = Some(c);
    }
    out
}

impl Generator for FuzzEngine {
    fn generate(&self) -> Vec<Candidate> {
        let tld = &self.split.tld;
        let mut candidates = Vec::new();

        candidates.push(Candidate::new(Algorithm::Original, self.split.joined()));

        let tagged = [
            (Algorithm::Addition, self.addition()),
            (Algorithm::Bitsquatting, self.bitsquatting()),
            (Algorithm::Homoglyph, self.homoglyph()),
            (Algorithm::Hyphenation, self.hyphenation()),
            (Algorithm::Insertion, self.insertion()),
            (Algorithm::Omission, self.omission()),
            (Algorithm::Repetition, self.repetition()),
            (Algorithm::Replacement, self.replacement()),
            (Algorithm::Subdomain, self.subdomain()),
            (Algorithm::Transposition, self.transposition()),
            (Algorithm::VowelSwap, self.vowel_swap()),
        ];

        for (algorithm, names) in tagged {
            if self.verbose {
                eprintln!("  {} generated {} raw candidates", algorithm, names.len());
            }
            for name in names {
                candidates.push(Candidate::new(algorithm, format!("{}.{}", name, tld)));
            }
        }

        candidates.extend(self.various());

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(stem: &str, tld: &str) -> Split {
        Split { stem: stem.to_string(), tld: tld.to_string() }
    }

    #[test]
    fn original_appears_exactly_once() {
        let engine = FuzzEngine::new(split("example", "com"), false);
        let candidates = engine.generate();
        let originals: Vec<_> = candidates
            .iter()
            .filter(|c| c.algorithm == Algorithm::Original)
            .collect();
        assert_eq!(originals.len(), 1);
        assert_eq!(originals[0].name, "example.com");
    }

    #[test]
    fn bitsquatting_flips_exactly_one_byte() {
        let engine = FuzzEngine::new(split("google", "com"), false);
        let names = engine.bitsquatting();
        assert!(names.contains(&"foogle".to_string()), "{:?}", names);
        for name in &names {
            assert_eq!(name.len(), "google".len());
        }
    }

    #[test]
    fn short_stem_ab() {
        let engine = FuzzEngine::new(split("ab", "com"), false);
        let omissions: HashSet<_> = engine.omission().into_iter().collect();
        assert_eq!(omissions, HashSet::from(["a".to_string(), "b".to_string()]));

        let transpositions = engine.transposition();
        assert_eq!(transpositions, vec!["ba".to_string()]);

        let repetitions: HashSet<_> = engine.repetition().into_iter().collect();
        assert_eq!(repetitions, HashSet::from(["aab".to_string(), "abb".to_string()]));

        let hyphenations = engine.hyphenation();
        assert_eq!(hyphenations, vec!["a-b".to_string()]);
    }

    #[test]
    fn transposition_count_matches_formula() {
        let engine = FuzzEngine::new(split("hello", "com"), false);
        let chars: Vec<char> = "hello".chars().collect();
        let repeats = chars.windows(2).filter(|w| w[0] == w[1]).count();
        assert_eq!(engine.transposition().len(), chars.len() - 1 - repeats);
    }

    #[test]
    fn omission_is_at_most_len_plus_one() {
        let engine = FuzzEngine::new(split("banana", "com"), false);
        assert!(engine.omission().len() <= "banana".len() + 1);
    }

    #[test]
    fn various_no_dot_tld_wraps_twice() {
        let engine = FuzzEngine::new(split("example", "xyz"), false);
        let names: Vec<_> = engine.various().into_iter().map(|c| c.name).collect();
        assert!(names.contains(&"examplexyz.xyz".to_string()));
        assert!(names.contains(&"example-xyz.com".to_string()));
    }

    #[test]
    fn various_compound_tld_reproduces_no_separator_quirk() {
        let engine = FuzzEngine::new(split("example", "co.uk"), false);
        let names: Vec<_> = engine.various().into_iter().map(|c| c.name).collect();
        assert!(names.contains(&"example.uk".to_string()));
        assert!(names.contains(&"exampleco.uk".to_string()));
    }

    #[test]
    fn vowel_swap_skips_non_vowel_positions() {
        let engine = FuzzEngine::new(split("faceb00k", "com"), false);
        let names = engine.vowel_swap();
        // every emitted variant differs only at an original vowel position
        let stem_chars: Vec<char> = "faceb00k".chars().collect();
        for name in &names {
            let name_chars: Vec<char> = name.chars().collect();
            let diffs: Vec<usize> = (0..stem_chars.len())
                .filter(|&i| stem_chars[i] != name_chars[i])
                .collect();
            assert!(diffs.len() <= 1);
            if let Some(&i) = diffs.first() {
                assert!("aeiou".contains(stem_chars[i]));
            }
        }
    }
}
