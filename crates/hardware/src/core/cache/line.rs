//! Line slots and the table that holds them.

use std::ops::{Index, IndexMut, Range};

/// One cache slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    /// Line number held, `None` while the slot has never been filled.
    pub tag: Option<u64>,
    /// Exactly `line_bytes` bytes.
    pub data: Vec<u8>,
    /// Logical clock value of the last resolution that touched this slot.
    pub last_access: u64,
    /// Data differs from the backing store. Only ever set under write-back.
    pub dirty: bool,
}

impl CacheLine {
    pub fn empty(line_bytes: usize) -> Self {
        Self {
            tag: None,
            data: vec![0; line_bytes],
            last_access: 0,
            dirty: false,
        }
    }

    pub fn holds(&self, line: u64) -> bool {
        self.tag == Some(line)
    }
}

/// Flat run of slots, `ways` consecutive slots per set.
#[derive(Clone, Debug)]
pub struct LineTable {
    lines: Vec<CacheLine>,
    ways: usize,
}

impl LineTable {
    pub fn new(num_sets: usize, ways: usize, line_bytes: usize) -> Self {
        Self {
            lines: vec![CacheLine::empty(line_bytes); num_sets * ways],
            ways,
        }
    }

    /// Slot indices belonging to `set`.
    pub fn set_range(&self, set: usize) -> Range<usize> {
        let base = set * self.ways;
        base..base + self.ways
    }

    pub fn set(&self, set: usize) -> &[CacheLine] {
        &self.lines[self.set_range(set)]
    }

    /// Slot index holding `line` within `set`, if resident.
    pub fn find(&self, set: usize, line: u64) -> Option<usize> {
        let range = self.set_range(set);
        let base = range.start;
        self.lines[range]
            .iter()
            .position(|slot| slot.holds(line))
            .map(|way| base + way)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CacheLine> {
        self.lines.iter()
    }
}

impl Index<usize> for LineTable {
    type Output = CacheLine;

    fn index(&self, idx: usize) -> &CacheLine {
        &self.lines[idx]
    }
}

impl IndexMut<usize> for LineTable {
    fn index_mut(&mut self, idx: usize) -> &mut CacheLine {
        &mut self.lines[idx]
    }
}
