//! Name fingerprints
//!
//! A cheap 64-bit FNV-1a summary of a tag name, used as a prefilter before a
//! candidate list is considered a match.

use fnv::FnvHasher;
use std::hash::Hasher;

/// Fingerprint of a node name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Compute the fingerprint of `name`
    pub fn of(name: &str) -> Self {
        let mut hasher = FnvHasher::default();
        hasher.write(name.as_bytes());
        Fingerprint(hasher.finish())
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Compute the fingerprint of a name as a raw integer
pub fn fingerprint(name: &str) -> u64 {
    Fingerprint::of(name).value()
}
