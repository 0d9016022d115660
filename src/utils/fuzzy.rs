//! Fuzzy matching utilities for lookups
//!
//! Maps an approximate, voice-recognized phrase onto an exact value drawn
//! from a directory listing or a catalog column. Scores are partial ratios
//! in the range 0..=100: the shorter string is slid across the longer one
//! and the best window similarity wins.

use std::path::Path;

use strsim::normalized_levenshtein;
use walkdir::WalkDir;

use crate::error::CharlotteResult;

/// Historic threshold for file-name lookups
pub const FILE_MIN_SCORE: u8 = 65;

/// Historic threshold for generic string/column lookups
pub const TEXT_MIN_SCORE: u8 = 70;

/// Upper bound of every score
pub const MAX_SCORE: u8 = 100;

/// Number of best guesses considered before picking one
const GUESS_LIMIT: usize = 3;

/// A candidate together with its score against a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub value: String,
    pub score: u8,
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Best candidate, with a score strictly above the threshold
    Found { value: String, score: u8 },
    /// A query was given but nothing cleared the threshold
    NotFound,
    /// No query was given, so no constraint applies
    NoPreference,
}

impl MatchResult {
    /// The matched value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            MatchResult::Found { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }
}

/// Normalize text before scoring
///
/// Lowercases, turns every non-alphanumeric character into a space and
/// collapses runs of whitespace. "So_What.mp3" becomes "so what mp3".
pub fn normalize_text(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Partial ratio between two raw strings (0..=100)
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    processed_ratio(&normalize_text(a), &normalize_text(b))
}

/// Partial ratio between two already-normalized strings
fn processed_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    let needle: String = short.iter().collect();
    let window = short.len();
    let mut best = 0.0_f64;

    for start in 0..=(long.len() - window) {
        let slice: String = long[start..start + window].iter().collect();
        let similarity = normalized_levenshtein(&needle, &slice);
        if similarity > best {
            best = similarity;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * f64::from(MAX_SCORE)).round() as u8
}

/// Score every candidate and return the best `limit` of them
///
/// Sorted by score descending. Ties keep candidate order, so the first
/// occurrence wins.
pub fn extract<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<Scored> {
    let query = normalize_text(query);

    let mut scored: Vec<Scored> = candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            Scored {
                value: candidate.to_string(),
                score: processed_ratio(&query, &normalize_text(candidate)),
            }
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Resolve an approximate query against a candidate list
///
/// A missing or blank query yields [`MatchResult::NoPreference`]. Otherwise
/// the top of the best three guesses is returned if its score is strictly
/// greater than both `min_score` and zero. Candidates are not deduplicated.
pub fn resolve<S: AsRef<str>>(query: Option<&str>, candidates: &[S], min_score: u8) -> MatchResult {
    let query = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => q,
        None => return MatchResult::NoPreference,
    };

    match extract(query, candidates, GUESS_LIMIT).into_iter().next() {
        Some(best) if best.score > min_score && best.score > 0 => MatchResult::Found {
            value: best.value,
            score: best.score,
        },
        _ => MatchResult::NotFound,
    }
}

/// Find a file in a directory by approximate name
///
/// Only regular files directly inside `dir` are candidates, in file-name
/// order. Failing to read the directory is an error; finding nothing is not.
pub fn find_file(query: &str, dir: &Path, min_score: u8) -> CharlotteResult<MatchResult> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    Ok(resolve(Some(query), &files, min_score))
}
