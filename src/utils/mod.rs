//! Utility modules

pub mod fuzzy;

pub use fuzzy::{
    extract, find_file, normalize_text, partial_ratio, resolve, MatchResult, Scored,
    FILE_MIN_SCORE, TEXT_MIN_SCORE,
};
