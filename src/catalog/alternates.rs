//! Removes alternate versions of a track when the plain version is present.
//!
//! A title such as `Song (Acoustic)` or `Song - Live at Wembley` is split at
//! its first `-` or `(` into a base (`Song`) and a suffix. When the suffix
//! names an alternate version and another track is titled exactly like the
//! base, the alternate is dropped.
//!
//! The keyword and exception lists are a heuristic: a distinct song whose
//! subtitle happens to contain a keyword, e.g. `Song (Club Mix)` next to an
//! unrelated `Song`, is dropped as well.

use std::collections::{HashMap, HashSet};

use crate::catalog::TrackRecord;

/// Suffix substrings marking an alternate version.
pub const ALTERNATE_KEYWORDS: &[&str] = &[
    "live",
    "remix",
    "mix",
    "acoustic",
    "demo",
    "instrumental",
    "extended",
    "sped up",
    "sped-up",
    "slowed",
    "reverb",
    "radio edit",
    "edit",
    "version",
    "remaster",
    "acapella",
    "a cappella",
    "karaoke",
    "unplugged",
    "session",
];

/// Suffix substrings that rule out an alternate version regardless of keywords.
pub const ALTERNATE_EXCEPTIONS: &[&str] = &["taylor", "feat.", "ft.", "with "];

/// Lowercased base title when `title` looks like an alternate version.
pub fn alternate_base(title: &str) -> Option<String> {
    let lower = title.to_lowercase();
    let split = lower.find(['-', '('])?;
    let (base, suffix) = lower.split_at(split);
    let base = base.trim();

    if base.is_empty() {
        return None;
    }
    if !ALTERNATE_KEYWORDS.iter().any(|k| suffix.contains(k)) {
        return None;
    }
    if ALTERNATE_EXCEPTIONS.iter().any(|e| suffix.contains(e)) {
        return None;
    }

    Some(base.to_string())
}

pub fn filter_alternates(records: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let titles: HashSet<String> = records
        .iter()
        .map(|r| r.title.trim().to_lowercase())
        .collect();

    let mut kept: Vec<TrackRecord> = Vec::with_capacity(records.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in records {
        // a base never equals its own title, so a hit is always another track
        if let Some(base) = alternate_base(&record.title) {
            if titles.contains(&base) {
                continue;
            }
        }

        let key = record.recording_key().to_string();
        match slots.get(&key) {
            Some(&slot) => kept[slot] = record,
            None => {
                slots.insert(key, kept.len());
                kept.push(record);
            }
        }
    }

    kept
}
