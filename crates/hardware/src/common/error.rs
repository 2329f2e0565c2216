//! Error types.
//!
//! Configuration problems are reported once, at construction. Once a cache
//! exists, its operations cannot fail: a victim index outside the set or a
//! slot index beyond the table is a programming error and panics.

use std::path::PathBuf;

/// Errors raised while building or loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Associativity of zero.
    #[error("cache associativity must be at least 1")]
    ZeroWays,

    /// Line size of zero.
    #[error("cache line size must be at least 1 byte")]
    ZeroLineSize,

    /// Capacity of zero.
    #[error("cache capacity must be at least one set")]
    ZeroCapacity,

    /// Associativity beyond what the tag comparators can hold.
    #[error("cache associativity {0} exceeds the maximum of {max}", max = u8::MAX)]
    TooManyWays(usize),

    /// Line size beyond the 16-bit offset field.
    #[error("cache line size {0} exceeds the maximum of {max} bytes", max = u16::MAX)]
    LineTooLarge(usize),

    /// Capacity is not a whole number of sets.
    #[error("cache capacity {size_bytes} is not a multiple of the set size {set_bytes}")]
    Indivisible { size_bytes: usize, set_bytes: usize },

    /// Backing store size is not a whole number of lines.
    #[error("memory size {size_bytes} is not a multiple of the line size {line_bytes}")]
    MemoryNotLineMultiple { size_bytes: usize, line_bytes: usize },

    /// Malformed JSON document.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while parsing an access trace. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// First token is not a known operation.
    #[error("line {line}: unknown operation `{op}`")]
    UnknownOp { line: usize, op: String },

    /// An operation is missing one of its operands.
    #[error("line {line}: `{op}` is missing its {field}")]
    MissingField {
        line: usize,
        op: String,
        field: &'static str,
    },

    /// Address is neither decimal nor `0x` hex.
    #[error("line {line}: invalid address `{text}`")]
    BadAddress { line: usize, text: String },

    /// Byte count is not a non-negative integer.
    #[error("line {line}: invalid byte count `{text}`")]
    BadCount { line: usize, text: String },

    /// Write payload is not an even-length hex string.
    #[error("line {line}: invalid byte literal `{text}`")]
    BadBytes { line: usize, text: String },

    /// Policy name not recognised.
    #[error("line {line}: unknown policy `{text}`")]
    BadPolicy { line: usize, text: String },

    /// Extra tokens after a complete operation.
    #[error("line {line}: unexpected trailing input `{text}`")]
    Trailing { line: usize, text: String },

    /// A read or write touches bytes past the end of memory.
    #[error("line {line}: access at {addr:#x} runs past the end of a {memory_bytes}-byte memory")]
    OutOfRange {
        line: usize,
        addr: u64,
        memory_bytes: u64,
    },
}
