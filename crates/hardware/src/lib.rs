//! Set-associative cache model.
//!
//! `linecache` models a single cache sitting between a byte-addressable CPU
//! and a line-granular backing store. For every byte-range access it reports
//! which lines hit, which slot is evicted on a miss, and when dirty data
//! reaches the store under write-through or write-back.
//!
//! The crate is organised the way a hardware model usually is:
//! - [`config`]: cache geometry, policies and validation.
//! - [`core`]: the cache engine, its line table and victim selection.
//! - [`system`]: the backing store the cache sits in front of.
//! - [`stats`]: hit/miss accounting and the timing model.
//! - [`sim`]: access-trace parsing and replay.

/// Shared helpers: error types and address decomposition.
pub mod common;

/// Cache and memory configuration, deserializable from JSON.
pub mod config;

/// The cache engine and the value serialization contract.
pub mod core;

/// Trace-driven simulation.
pub mod sim;

/// Hit/miss counters and the cycle model.
pub mod stats;

/// Backing store models.
pub mod system;

pub use crate::config::{CacheConfig, Config, ReplacementPolicy, WritePolicy};
pub use crate::core::cache::CacheEmulator;
pub use crate::core::value::LineValue;
pub use crate::stats::CacheStats;
pub use crate::system::memory::{BackingStore, Memory};
