//! Common capability realized by the three independent candidate sources
//! (spec.md §9 "Inheritance of generators"), replacing the original's
//! abstract `DomainGenerator` base class.

use crate::candidate::Candidate;

pub trait Generator {
    fn generate(&self) -> Vec<Candidate>;
}
