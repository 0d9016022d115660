//! Charlotte Library
//!
//! Music core of the Charlotte assistant: fuzzy lookup of spoken phrases,
//! the track catalog, and catalog selection with next/previous neighbors.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod players;
pub mod processor;
pub mod profile;
pub mod responses;
pub mod selection;
pub mod session;
pub mod slots;
pub mod utils;
