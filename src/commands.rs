//! Shell command parsing
//!
//! Turns one line typed into the interactive shell into a command. Slot
//! values are given as `key=value` or `key="value"`. A bare value runs up to
//! the next `key=`:
//!
//! ```text
//! charlotte, play artist=Miles Davis genre=jazz
//! play so what
//! next
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::Attribute;
use crate::slots::{normalize_slot, MusicSlots};

lazy_static! {
    static ref SLOT_KEY: Regex =
        Regex::new(r"^\s*(?P<key>[A-Za-z_]+)\s*=\s*").expect("slot key pattern is valid");
    static ref NEXT_SLOT_KEY: Regex =
        Regex::new(r"\s[A-Za-z_]+\s*=").expect("next slot key pattern is valid");
}

const NEXT_WORDS: &[&str] = &["next", "next track", "skip", "play next"];
const PREVIOUS_WORDS: &[&str] = &["previous", "previous track", "back", "play previous"];
const GREET_WORDS: &[&str] = &["hello", "hi", "hey", "greet"];
const QUIT_WORDS: &[&str] = &["quit", "exit", "goodbye", "good bye", "bye"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Play(MusicSlots),
    Next,
    Previous,
    Greet,
    Find(String),
    Scan,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one shell line
pub fn parse(line: &str) -> ShellCommand {
    let text = line.trim();
    let lower = text.to_lowercase();

    if text.is_empty() {
        return ShellCommand::Empty;
    }
    if NEXT_WORDS.contains(&lower.as_str()) {
        return ShellCommand::Next;
    }
    if PREVIOUS_WORDS.contains(&lower.as_str()) {
        return ShellCommand::Previous;
    }
    if GREET_WORDS.contains(&lower.as_str()) {
        return ShellCommand::Greet;
    }
    if QUIT_WORDS.contains(&lower.as_str()) {
        return ShellCommand::Quit;
    }
    if lower == "help" || lower == "list commands" {
        return ShellCommand::Help;
    }
    if lower == "scan" || lower == "rescan" {
        return ShellCommand::Scan;
    }

    if let Some(rest) = strip_word(text, "find") {
        return ShellCommand::Find(rest.to_string());
    }
    if lower == "play" {
        return ShellCommand::Play(MusicSlots::default());
    }
    if let Some(rest) = strip_word(text, "play") {
        return ShellCommand::Play(parse_slots(rest));
    }

    ShellCommand::Unknown(text.to_string())
}

/// Slots from `key=value` pairs, or the whole text as a track name
pub fn parse_slots(text: &str) -> MusicSlots {
    match slot_pairs(text) {
        Some(pairs) => MusicSlots::from_map(&pairs),
        None => MusicSlots {
            track_name: normalize_slot(Some(text)),
            ..Default::default()
        },
    }
}

/// Split `text` into `key=value` pairs
///
/// `None` unless the whole text is pairs and every key names an attribute,
/// so a title such as "Love = Pain" stays free text.
fn slot_pairs(text: &str) -> Option<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let caps = SLOT_KEY.captures(rest)?;
        let key = caps.name("key")?.as_str();
        if key.parse::<Attribute>().is_err() {
            debug!("'{}' is not a slot name, reading '{}' as a title", key, text);
            return None;
        }

        let after = &rest[caps.get(0)?.end()..];
        let (value, remaining) = match after.strip_prefix('"') {
            Some(quoted) => {
                let close = quoted.find('"')?;
                (&quoted[..close], &quoted[close + 1..])
            }
            None => {
                let end = NEXT_SLOT_KEY
                    .find(after)
                    .map(|m| m.start())
                    .unwrap_or(after.len());
                after.split_at(end)
            }
        };

        pairs.insert(key.to_string(), value.trim().to_string());
        rest = remaining.trim_start();
    }

    if pairs.is_empty() {
        None
    } else {
        Some(pairs)
    }
}

/// Drop a leading wake phrase ("charlotte, play ...")
pub fn strip_wake_phrase<'a>(line: &'a str, wake_phrase: &str) -> &'a str {
    let text = line.trim_start();
    let wake = wake_phrase.trim();
    if wake.is_empty() {
        return text;
    }

    match text.get(..wake.len()) {
        Some(head) if head.eq_ignore_ascii_case(wake) => {
            let rest = &text[wake.len()..];
            if rest.starts_with(|c: char| c.is_alphanumeric()) {
                return text;
            }
            rest.trim_start_matches(|c: char| c == ',' || c == ':' || c.is_whitespace())
        }
        _ => text,
    }
}

/// Text after a leading command word, if the line starts with it
fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let (head, rest) = text.split_once(char::is_whitespace)?;
    if head.eq_ignore_ascii_case(word) {
        Some(rest.trim()).filter(|r| !r.is_empty())
    } else {
        None
    }
}

pub const HELP_TEXT: &str = "You can say: play <title>, play artist=<name> genre=<genre>, \
next, previous, find <file>, scan, hello, or quit.";
