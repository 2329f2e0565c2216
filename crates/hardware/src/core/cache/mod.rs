//! The cache engine.
//!
//! [`CacheEmulator`] owns a [`LineTable`] and resolves every byte-range access
//! line by line against it. A miss picks a victim within the line's set
//! (least recently used, or whatever the shared
//! [`VictimSelector`](policies::VictimSelector) says),
//! writes the victim back if it is dirty, and refills it from the shared
//! backing store. Writes are committed once per touched line: write-back
//! marks the line dirty, write-through sends it to the store straight away.
//!
//! Dirty lines are never lost. They reach the store on eviction, on
//! [`CacheEmulator::flush`], on a switch to write-through, or when the cache
//! is dropped.

pub mod line;
pub mod policies;

use log::{debug, info, trace};

use self::line::{CacheLine, LineTable};
use self::policies::{SharedSelector, select_lru};
use crate::common::addr::LineAddr;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, CacheGeometry, LatencyConfig, ReplacementPolicy, WritePolicy};
use crate::core::value::{LineValue, to_bytes};
use crate::stats::CacheStats;
use crate::system::SharedStore;

/// A set-associative, write-allocate cache over a shared [`BackingStore`].
///
/// Build one with [`CacheEmulator::new`]. Under write-back the cache flushes
/// its dirty lines when dropped.
///
/// [`BackingStore`]: crate::system::memory::BackingStore
pub struct CacheEmulator {
    geometry: CacheGeometry,
    replacement: ReplacementPolicy,
    write_policy: WritePolicy,
    latency: LatencyConfig,
    lines: LineTable,
    /// Logical clock, advanced on every line resolution.
    clock: u64,
    stats: CacheStats,
    memory: SharedStore,
    selector: SharedSelector,
}

impl CacheEmulator {
    /// Builds an empty cache in front of `memory`.
    ///
    /// `selector` is only consulted under [`ReplacementPolicy::Random`]; it
    /// must return ways in `[0, config.ways)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry in `config` is invalid.
    pub fn new(
        config: &CacheConfig,
        memory: SharedStore,
        selector: SharedSelector,
    ) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        debug!(
            "cache: {} sets x {} ways x {} bytes, {:?}, {:?}",
            geometry.num_sets,
            geometry.ways,
            geometry.line_bytes,
            config.replacement,
            config.write_policy
        );
        Ok(Self {
            geometry,
            replacement: config.replacement,
            write_policy: config.write_policy,
            latency: config.latency.clone(),
            lines: LineTable::new(geometry.num_sets, geometry.ways, geometry.line_bytes),
            clock: 0,
            stats: CacheStats::default(),
            memory,
            selector,
        })
    }

    /// Reads `count` bytes starting at `addr`.
    ///
    /// Lines are resolved in ascending order, each exactly once. A zero
    /// `count` touches nothing.
    pub fn read_bytes(&mut self, addr: u64, count: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(count);
        if count == 0 {
            return out;
        }
        let line_bytes = self.geometry.line_bytes;
        let LineAddr { mut line, mut offset } = self.geometry.decompose(addr);
        let mut slot = self.load_line(line);
        while out.len() < count {
            if offset == line_bytes {
                line += 1;
                offset = 0;
                slot = self.load_line(line);
            }
            let take = (line_bytes - offset).min(count - out.len());
            out.extend_from_slice(&self.lines[slot].data[offset..offset + take]);
            offset += take;
        }
        out
    }

    /// Writes `data` starting at `addr`.
    ///
    /// Each touched line is loaded first and committed once, after its last
    /// byte is written. An empty `data` still loads and commits the line
    /// holding `addr`.
    pub fn write_bytes(&mut self, data: &[u8], addr: u64) {
        let line_bytes = self.geometry.line_bytes;
        let LineAddr { mut line, mut offset } = self.geometry.decompose(addr);
        let mut slot = self.load_line(line);
        let mut written = 0;
        while written < data.len() {
            if offset == line_bytes {
                self.commit_line(slot);
                line += 1;
                offset = 0;
                slot = self.load_line(line);
            }
            let take = (line_bytes - offset).min(data.len() - written);
            self.lines[slot].data[offset..offset + take]
                .copy_from_slice(&data[written..written + take]);
            offset += take;
            written += take;
        }
        self.commit_line(slot);
    }

    /// Reads a `T` from the `T::SIZE` bytes at `addr`.
    pub fn read_value<T: LineValue>(&mut self, addr: u64) -> T {
        T::read_ne(&self.read_bytes(addr, T::SIZE))
    }

    /// Writes `value` as `T::SIZE` bytes at `addr`.
    pub fn write_value<T: LineValue>(&mut self, value: &T, addr: u64) {
        self.write_bytes(&to_bytes(value), addr);
    }

    /// Switches the write policy.
    ///
    /// Going from write-back to write-through flushes every dirty line first.
    pub fn set_write_policy(&mut self, policy: WritePolicy) {
        if policy == self.write_policy {
            return;
        }
        info!("cache: write policy {:?} -> {:?}", self.write_policy, policy);
        self.write_policy = policy;
        if policy == WritePolicy::WriteThrough {
            self.flush();
        }
    }

    /// Switches the replacement policy. Resident lines are left alone.
    pub fn set_replacement_policy(&mut self, policy: ReplacementPolicy) {
        if policy != self.replacement {
            info!("cache: replacement policy {:?} -> {:?}", self.replacement, policy);
        }
        self.replacement = policy;
    }

    /// Writes every dirty line to the backing store and marks it clean.
    ///
    /// Returns the number of lines written.
    pub fn flush(&mut self) -> usize {
        let mut flushed = 0;
        for idx in 0..self.lines.len() {
            if self.lines[idx].dirty {
                self.write_back(idx);
                flushed += 1;
            }
        }
        if flushed > 0 {
            debug!("cache: flushed {flushed} dirty lines");
        }
        flushed
    }

    /// Whether the line holding `addr` is resident. Touches no state.
    pub fn is_resident(&self, addr: u64) -> bool {
        let line = self.geometry.decompose(addr).line;
        self.lines.find(self.geometry.set_of(line), line).is_some()
    }

    /// Number of lines holding data not yet in the backing store.
    pub fn dirty_lines(&self) -> usize {
        self.lines.iter().filter(|slot| slot.dirty).count()
    }

    pub fn hit_count(&self) -> u64 {
        self.stats.hits
    }

    pub fn miss_count(&self) -> u64 {
        self.stats.misses
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zeroes every counter. Lines and the logical clock are untouched.
    pub fn reset_statistics(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    pub fn replacement_policy(&self) -> ReplacementPolicy {
        self.replacement
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Slots of set `set`, in way order.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        self.lines.set(set)
    }

    /// Finds `line` in its set. On a miss, returns the victim slot with its
    /// old contents still in place.
    fn resolve(&mut self, line: u64) -> (usize, bool) {
        let set = self.geometry.set_of(line);
        self.stats.cycles += self.latency.hit_cycles;

        if let Some(slot) = self.lines.find(set, line) {
            self.stats.hits += 1;
            trace!("cache: hit line {line:#x} in set {set}");
            return (slot, true);
        }

        self.stats.misses += 1;
        let way = match self.replacement {
            ReplacementPolicy::LeastRecentlyUsed => select_lru(self.lines.set(set)),
            ReplacementPolicy::Random => {
                let way = self.selector.borrow_mut().generate();
                assert!(
                    way < self.geometry.ways,
                    "victim selector returned way {way} for a {}-way cache",
                    self.geometry.ways
                );
                way
            }
        };
        trace!("cache: miss line {line:#x} in set {set}, victim way {way}");
        (self.lines.set_range(set).start + way, false)
    }

    /// Makes `line` resident and up to date, returning its slot.
    fn load_line(&mut self, line: u64) -> usize {
        let (slot, hit) = self.resolve(line);
        self.clock += 1;
        if hit {
            self.lines[slot].last_access = self.clock;
            return slot;
        }

        if self.lines[slot].dirty {
            self.write_back(slot);
        }
        if let Some(old) = self.lines[slot].tag {
            debug!("cache: evict line {old:#x} for {line:#x}");
        }

        let data = self.memory.borrow().read_line(line);
        assert_eq!(
            data.len(),
            self.geometry.line_bytes,
            "backing store returned a {}-byte line for a {}-byte cache line",
            data.len(),
            self.geometry.line_bytes
        );
        self.stats.line_fills += 1;
        self.stats.cycles += self.latency.memory_cycles;

        let clock = self.clock;
        let entry = &mut self.lines[slot];
        entry.tag = Some(line);
        entry.data = data;
        entry.dirty = false;
        entry.last_access = clock;
        slot
    }

    /// Applies the write policy to a slot whose bytes just changed.
    fn commit_line(&mut self, slot: usize) {
        match self.write_policy {
            WritePolicy::WriteBack => self.lines[slot].dirty = true,
            WritePolicy::WriteThrough => self.write_back(slot),
        }
    }

    fn write_back(&mut self, slot: usize) {
        let entry = &mut self.lines[slot];
        if let Some(tag) = entry.tag {
            self.memory.borrow_mut().write_line(tag, &entry.data);
            self.stats.writebacks += 1;
            self.stats.cycles += self.latency.memory_cycles;
        }
        entry.dirty = false;
    }
}

impl Drop for CacheEmulator {
    fn drop(&mut self) {
        if self.write_policy == WritePolicy::WriteBack {
            let flushed = self.flush();
            if flushed > 0 {
                info!("cache: wrote back {flushed} dirty lines on teardown");
            }
        }
    }
}
