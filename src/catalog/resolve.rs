//! Collapses records of the same recording into one canonical record.
//!
//! Records are grouped by ISRC. Within a group the record from the most
//! official release survives, ranked by [`Precedence`]:
//!
//! | rank | guest appearance | kind        | equal rank      |
//! |------|------------------|-------------|-----------------|
//! | 0    | yes              | compilation | keep existing   |
//! | 1    | yes              | single      | later replaces  |
//! | 2    | yes              | album       | later replaces  |
//! | 3    | no               | compilation | later replaces  |
//! | 4    | no               | single      | later replaces  |
//! | 5    | no               | album       | later replaces  |
//!
//! Records without an ISRC are never merged.

use std::{cmp::Ordering, collections::HashMap};

use crate::catalog::{ReleaseKind, TrackRecord};

/// Position of a record in the duplicate resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedence {
    pub external: bool,
    pub kind: ReleaseKind,
}

impl Precedence {
    pub fn of(record: &TrackRecord) -> Self {
        Self {
            external: record.external,
            kind: record.kind,
        }
    }

    pub fn rank(&self) -> u8 {
        let kind = match self.kind {
            ReleaseKind::Compilation => 0,
            ReleaseKind::Single => 1,
            ReleaseKind::Album => 2,
        };
        if self.external { kind } else { kind + 3 }
    }

    /// An equally ranked later record takes over, except among guest
    /// compilations where the first one stays.
    fn replaces_on_tie(&self) -> bool {
        !(self.external && self.kind == ReleaseKind::Compilation)
    }

    /// Whether `self`, seen later, takes the place of `existing`.
    pub fn supersedes(&self, existing: &Precedence) -> bool {
        match self.rank().cmp(&existing.rank()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.replaces_on_tie(),
        }
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// One record per ISRC plus every record without one, in order of first
/// appearance of each group.
pub fn resolve(records: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let mut selected: Vec<TrackRecord> = Vec::with_capacity(records.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(isrc) = record.isrc.clone() else {
            selected.push(record);
            continue;
        };

        match slots.get(&isrc) {
            Some(&slot) => {
                if Precedence::of(&record).supersedes(&Precedence::of(&selected[slot])) {
                    selected[slot] = record;
                }
            }
            None => {
                slots.insert(isrc, selected.len());
                selected.push(record);
            }
        }
    }

    selected
}
