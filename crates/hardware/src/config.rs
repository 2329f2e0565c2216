//! Configuration for the cache model.
//!
//! Every structure here deserializes from JSON with `#[serde(default)]`, so a
//! configuration file only needs to name the fields it changes. Geometry is
//! validated separately by [`CacheConfig::geometry`]; deserialization alone
//! never rejects a shape.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::addr::LineAddr;
use crate::common::error::ConfigError;

/// Victim selection on a miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    /// Evict the slot with the oldest access timestamp.
    #[default]
    #[serde(rename = "LRU", alias = "Lru")]
    LeastRecentlyUsed,
    /// Evict the slot chosen by the victim selector.
    Random,
}

/// When written data reaches the backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WritePolicy {
    /// Every committed line is written to the store immediately.
    WriteThrough,
    /// Committed lines are marked dirty and written on eviction or flush.
    #[default]
    WriteBack,
}

/// Cycle costs for the timing model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Cost of resolving one line, hit or miss.
    pub hit_cycles: u64,
    /// Cost of moving one line to or from the backing store.
    pub memory_cycles: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            hit_cycles: 1,
            memory_cycles: 100,
        }
    }
}

/// Shape and policies of one cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total data capacity in bytes.
    pub size_bytes: usize,
    /// Lines per set.
    pub ways: usize,
    /// Bytes per line.
    pub line_bytes: usize,
    /// Victim selection policy.
    pub replacement: ReplacementPolicy,
    /// Write policy.
    pub write_policy: WritePolicy,
    /// Timing model.
    pub latency: LatencyConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: 4096,
            ways: 4,
            line_bytes: 64,
            replacement: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            latency: LatencyConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Shorthand for a configuration with default latencies.
    pub fn new(
        size_bytes: usize,
        ways: usize,
        line_bytes: usize,
        replacement: ReplacementPolicy,
        write_policy: WritePolicy,
    ) -> Self {
        Self {
            size_bytes,
            ways,
            line_bytes,
            replacement,
            write_policy,
            latency: LatencyConfig::default(),
        }
    }

    /// Validates the shape and derives the set count.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if associativity or line size is zero or out
    /// of range, or if the capacity is not a non-zero multiple of
    /// `ways * line_bytes`.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.line_bytes == 0 {
            return Err(ConfigError::ZeroLineSize);
        }
        if self.ways > u8::MAX as usize {
            return Err(ConfigError::TooManyWays(self.ways));
        }
        if self.line_bytes > u16::MAX as usize {
            return Err(ConfigError::LineTooLarge(self.line_bytes));
        }
        if self.size_bytes == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let set_bytes = self.ways * self.line_bytes;
        if self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::Indivisible {
                size_bytes: self.size_bytes,
                set_bytes,
            });
        }
        Ok(CacheGeometry {
            num_sets: self.size_bytes / set_bytes,
            ways: self.ways,
            line_bytes: self.line_bytes,
        })
    }
}

/// Validated cache shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    pub num_sets: usize,
    pub ways: usize,
    pub line_bytes: usize,
}

impl CacheGeometry {
    /// Total number of line slots.
    pub fn num_lines(&self) -> usize {
        self.num_sets * self.ways
    }

    /// Data capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.num_lines() * self.line_bytes
    }

    /// Set a line number maps to.
    pub fn set_of(&self, line: u64) -> usize {
        (line % self.num_sets as u64) as usize
    }

    /// Splits a byte address into line number and offset.
    pub fn decompose(&self, addr: u64) -> LineAddr {
        LineAddr::new(addr, self.line_bytes)
    }
}

/// Initial contents of the backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryFill {
    /// All bytes zero.
    #[default]
    Zero,
    /// Byte `i` holds `i as u8`.
    Pattern,
}

/// Backing store built by the trace driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub size_bytes: usize,
    pub fill: MemoryFill,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: 1 << 20,
            fill: MemoryFill::Zero,
        }
    }
}

/// Top-level document read by the command line driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub memory: MemoryConfig,
    /// Seed for the random victim selector.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            memory: MemoryConfig::default(),
            seed: 123456789,
        }
    }
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that the cache geometry is valid and that the memory holds a
    /// whole number of lines.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheConfig::geometry`] errors and returns
    /// [`ConfigError::MemoryNotLineMultiple`] for a ragged memory size.
    pub fn validate(&self) -> Result<CacheGeometry, ConfigError> {
        let geometry = self.cache.geometry()?;
        if self.memory.size_bytes % geometry.line_bytes != 0 {
            return Err(ConfigError::MemoryNotLineMultiple {
                size_bytes: self.memory.size_bytes,
                line_bytes: geometry.line_bytes,
            });
        }
        Ok(geometry)
    }
}
