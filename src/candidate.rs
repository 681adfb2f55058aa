//! The record types shared by every pipeline stage (spec.md §3): the
//! per-variant `Candidate`, its `Algorithm` tag, the DNS `RecordKind`
//! buckets it may carry after resolution, the dedup-preserving
//! `CandidateSet`, and the append-only `SuccessList`.

use std::collections::{HashSet, VecDeque};
use std::fmt;

/// One of the fifteen tags a Candidate can carry, per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Original,
    Addition,
    Bitsquatting,
    Homoglyph,
    Hyphenation,
    Insertion,
    Omission,
    Repetition,
    Replacement,
    Subdomain,
    Transposition,
    VowelSwap,
    Various,
    Dictionary,
    TldSwap,
}

impl Algorithm {
    /// Matches the original's exact tag spelling, used in CLI/CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Original => "Original*",
            Algorithm::Addition => "Addition",
            Algorithm::Bitsquatting => "Bitsquatting",
            Algorithm::Homoglyph => "Homoglyph",
            Algorithm::Hyphenation => "Hyphenation",
            Algorithm::Insertion => "Insertion",
            Algorithm::Omission => "Omission",
            Algorithm::Repetition => "Repetition",
            Algorithm::Replacement => "Replacement",
            Algorithm::Subdomain => "Subdomain",
            Algorithm::Transposition => "Transposition",
            Algorithm::VowelSwap => "Vowel-swap",
            Algorithm::Various => "Various",
            Algorithm::Dictionary => "Dictionary",
            Algorithm::TldSwap => "TLD-swap",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A/AAAA are coalesced under one bucket per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Ns,
    Mx,
}

impl RecordKind {
    pub fn csv_column(&self) -> &'static str {
        match self {
            RecordKind::A => "dns-a",
            RecordKind::Ns => "dns-ns",
            RecordKind::Mx => "dns-mx",
        }
    }

    pub fn json_key(&self) -> &'static str {
        self.csv_column()
    }
}

/// One generated domain-name variant, pre- or post-resolution.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub algorithm: Algorithm,
    pub name: String,
    pub records: Vec<(RecordKind, Vec<String>)>,
}

impl Candidate {
    pub fn new(algorithm: Algorithm, name: impl Into<String>) -> Self {
        Self { algorithm, name: name.into(), records: Vec::new() }
    }

    pub fn records_of(&self, kind: RecordKind) -> Option<&[String]> {
        self.records
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_slice())
    }

    pub fn push_record(&mut self, kind: RecordKind, value: String) {
        if let Some((_, values)) = self.records.iter_mut().find(|(k, _)| *k == kind) {
            values.push(value);
        } else {
            self.records.push((kind, vec![value]));
        }
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

/// FIFO queue with membership semantics: the algorithm that first produces
/// a given name wins; later duplicates of the same name are dropped.
/// Preserves first-insertion order for reproducible reports.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    queue: VecDeque<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the candidate was newly inserted (not a duplicate).
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.seen.contains(&candidate.name) {
            return false;
        }
        self.seen.insert(candidate.name.clone());
        self.queue.push_back(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.queue.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.queue.iter()
    }
}

/// Ordered append-only collection of Candidates that received at least one
/// non-NXDOMAIN answer. Order is arrival order from workers, not
/// deterministic across runs.
pub type SuccessList = Vec<Candidate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_algorithm() {
        let mut set = CandidateSet::new();
        assert!(set.insert(Candidate::new(Algorithm::Original, "example.com")));
        assert!(!set.insert(Candidate::new(Algorithm::Addition, "example.com")));
        let all = set.into_vec();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].algorithm, Algorithm::Original);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut set = CandidateSet::new();
        set.insert(Candidate::new(Algorithm::Original, "a.com"));
        set.insert(Candidate::new(Algorithm::Addition, "b.com"));
        let names: Vec<_> = set.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["a.com", "b.com"]);
    }

    #[test]
    fn push_record_coalesces_into_one_bucket() {
        let mut c = Candidate::new(Algorithm::Original, "example.com");
        c.push_record(RecordKind::A, "1.2.3.4".into());
        c.push_record(RecordKind::A, "::1".into());
        assert_eq!(c.records_of(RecordKind::A).unwrap(), &["1.2.3.4", "::1"]);
    }
}
