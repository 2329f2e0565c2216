//! Trace-driven simulation.
//!
//! A [`Simulation`] is a cache wired to a fresh backing store and a seeded
//! victim selector, built from a [`Config`]. Traces are parsed and replayed
//! against it by [`trace`].

pub mod trace;

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::error::{ConfigError, TraceError};
use crate::config::{Config, MemoryFill};
use crate::core::cache::CacheEmulator;
use crate::core::cache::policies::XorShiftSelector;
use crate::stats::CacheStats;
use crate::system::memory::Memory;

pub struct Simulation {
    pub cache: CacheEmulator,
    pub memory: Rc<RefCell<Memory>>,
}

impl Simulation {
    /// Builds the cache and backing store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache geometry is invalid or the
    /// memory size is not a whole number of lines.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        let memory = match config.memory.fill {
            MemoryFill::Zero => Memory::new(config.memory.size_bytes, geometry.line_bytes),
            MemoryFill::Pattern => {
                Memory::with_pattern(config.memory.size_bytes, geometry.line_bytes)
            }
        };
        let memory = Rc::new(RefCell::new(memory));
        let selector = Rc::new(RefCell::new(XorShiftSelector::new(geometry.ways, config.seed)));
        let cache = CacheEmulator::new(&config.cache, memory.clone(), selector)?;
        Ok(Self { cache, memory })
    }

    /// Parses `text`, rejecting accesses that fall outside this memory.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] in the trace.
    pub fn parse_trace(&self, text: &str) -> Result<Vec<trace::TraceOp>, TraceError> {
        let memory_bytes = self.memory.borrow().as_bytes().len() as u64;
        trace::parse_within(text, memory_bytes)
    }

    /// Ends the run: flushes dirty lines the way teardown would, then returns
    /// the final statistics, teardown write-backs included.
    pub fn finish(mut self) -> CacheStats {
        self.cache.flush();
        self.cache.stats().clone()
    }
}
