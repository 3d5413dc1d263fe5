//! Lenient key matching used when ranking the registry listing.
//!
//! A registry key is looked up under an ordered list of transforms and the
//! first transform that produces a key present in the counts table wins.
//! The consistency check does not use this; it compares keys exactly.

use crate::stats::FlatCountTable;

/// One way of deriving a lookup key from a registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCandidate {
    Exact,
    Lowercase,
    Uppercase,
    /// Leading `http://` or `https://` removed, any case.
    SchemeStripped,
    Trimmed,
    /// Trimmed, scheme removed and lower-cased.
    Folded,
}

impl MatchCandidate {
    /// Candidates in the order they are tried.
    pub const ORDER: [MatchCandidate; 6] = [
        MatchCandidate::Exact,
        MatchCandidate::Lowercase,
        MatchCandidate::Uppercase,
        MatchCandidate::SchemeStripped,
        MatchCandidate::Trimmed,
        MatchCandidate::Folded,
    ];

    pub fn apply(self, key: &str) -> String {
        match self {
            MatchCandidate::Exact => key.to_string(),
            MatchCandidate::Lowercase => key.to_lowercase(),
            MatchCandidate::Uppercase => key.to_uppercase(),
            MatchCandidate::SchemeStripped => strip_scheme(key).to_string(),
            MatchCandidate::Trimmed => key.trim().to_string(),
            MatchCandidate::Folded => strip_scheme(key.trim()).to_lowercase(),
        }
    }
}

fn strip_scheme(key: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if key
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        {
            return &key[scheme.len()..];
        }
    }
    key
}

/// All lookup keys for `key`, in the order they are tried.
pub fn candidate_keys(key: &str) -> Vec<(MatchCandidate, String)> {
    MatchCandidate::ORDER
        .iter()
        .map(|candidate| (*candidate, candidate.apply(key)))
        .collect()
}

/// Finds the first candidate of `key` present in `counts`.
pub fn find_match<'a>(key: &str, counts: &'a FlatCountTable) -> Option<(MatchCandidate, &'a str, u64)> {
    candidate_keys(key).into_iter().find_map(|(candidate, lookup)| {
        counts
            .get_key_value(&lookup)
            .map(|(found, blocks)| (candidate, found.as_str(), *blocks))
    })
}

/// Block count for `key`, or 0 when no candidate is present.
pub fn match_count(key: &str, counts: &FlatCountTable) -> u64 {
    find_match(key, counts).map_or(0, |(_, _, blocks)| blocks)
}
