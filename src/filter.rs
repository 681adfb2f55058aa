//! IDNA-encodes each candidate, rejects invalid labels, and deduplicates on
//! the un-encoded name keeping the first-inserted algorithm tag. Mirrors
//! `dnstwist.py::DomainFuzz.__validate_domain` / `__filter_domains`.

use crate::candidate::{Candidate, CandidateSet};
use regex::Regex;

lazy_static::lazy_static! {
    // `regex` has no lookaround, so the original's single
    // `(?=.{4,253}$)((?!-)[a-z0-9-]{1,63}(?<!-)\.)+[a-z]{2,63}\.?$` is split
    // into a length check plus this per-label shape check.
    static ref LABEL_SHAPE: Regex = Regex::new(r"(?i)^[a-z0-9-]{1,63}$").unwrap();
    static ref TLD_SHAPE: Regex = Regex::new(r"(?i)^[a-z]{2,63}$").unwrap();
}

/// Equivalent to the original's
/// `(?=.{4,253}$)((?!-)[a-z0-9-]{1,63}(?<!-)\.)+[a-z]{2,63}\.?$`, expressed
/// without lookaround (unsupported by the `regex` crate).
fn label_regex_equivalent(encoded: &str) -> bool {
    if !(4..=253).contains(&encoded.len()) {
        return false;
    }

    let trimmed = encoded.strip_suffix('.').unwrap_or(encoded);
    let labels: Vec<&str> = trimmed.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let (tld, rest) = labels.split_last().expect("checked len >= 2");
    if !TLD_SHAPE.is_match(tld) {
        return false;
    }

    rest.iter().all(|label| {
        LABEL_SHAPE.is_match(label) && !label.starts_with('-') && !label.ends_with('-')
    })
}

pub struct CandidateFilter {
    verbose: bool,
}

impl CandidateFilter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// IDNA-encodes and validates each candidate, keeping only the first
    /// occurrence of each (un-encoded) name across the whole input slice.
    pub fn filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut set = CandidateSet::new();
        let mut rejected = 0usize;

        for candidate in candidates {
            if self.validate(&candidate.name) {
                set.insert(candidate);
            } else {
                rejected += 1;
            }
        }

        if self.verbose {
            eprintln!("  CandidateFilter rejected {} invalid/duplicate candidates", rejected);
        }

        set.into_vec()
    }

    fn validate(&self, name: &str) -> bool {
        let encoded = match idna::domain_to_ascii(name) {
            Ok(encoded) => encoded,
            Err(_) => return false,
        };

        if encoded.chars().count() == name.chars().count() && encoded != name {
            return false;
        }

        label_regex_equivalent(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Algorithm;

    fn c(name: &str) -> Candidate {
        Candidate::new(Algorithm::Original, name)
    }

    #[test]
    fn accepts_plain_ascii_domain() {
        let filter = CandidateFilter::new(false);
        let out = filter.filter(vec![c("example.com")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "example.com");
    }

    #[test]
    fn rejects_too_short_or_malformed() {
        let filter = CandidateFilter::new(false);
        let out = filter.filter(vec![c("a"), c("-bad.com"), c("bad-.com")]);
        assert!(out.is_empty());
    }

    #[test]
    fn dedups_keeping_first_algorithm() {
        let filter = CandidateFilter::new(false);
        let mut second = c("example.com");
        second.algorithm = Algorithm::Addition;
        let out = filter.filter(vec![c("example.com"), second]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].algorithm, Algorithm::Original);
    }

    #[test]
    fn unicode_homoglyph_survives_with_name_unencoded() {
        // Filter validates via IDNA but stores the un-encoded name; the
        // Reporter re-encodes at output time (spec.md §4.3/§4.8).
        let filter = CandidateFilter::new(false);
        let out = filter.filter(vec![c("exámple.com")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "exámple.com");
    }
}
