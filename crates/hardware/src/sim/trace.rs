//! Access traces.
//!
//! One operation per line. Blank lines and everything after `#` are ignored.
//!
//! ```text
//! R 0x40 8            # read 8 bytes at 0x40
//! W 64 deadbeef       # write 4 bytes at 64
//! P WriteThrough      # switch write policy (flushes dirty lines)
//! P Random            # switch replacement policy
//! F                   # flush dirty lines
//! S                   # reset statistics
//! ```
//!
//! Addresses are decimal or `0x`-prefixed hex. Write payloads are hex digit
//! pairs with an optional `0x` prefix, so `W 4 0x` is an empty write: it
//! still loads the line holding address 4 and commits it, like any other
//! zero-length write.

use log::trace;

use crate::common::error::TraceError;
use crate::config::{ReplacementPolicy, WritePolicy};
use crate::core::cache::CacheEmulator;

/// One trace operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceOp {
    Read { addr: u64, count: usize },
    Write { addr: u64, data: Vec<u8> },
    Flush,
    SetWritePolicy(WritePolicy),
    SetReplacementPolicy(ReplacementPolicy),
    ResetStats,
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns the first [`TraceError`] encountered, tagged with its line number.
pub fn parse(text: &str) -> Result<Vec<TraceOp>, TraceError> {
    let mut ops = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(op) = parse_line(raw, idx + 1)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

/// Parses a whole trace and rejects reads and writes that fall outside a
/// memory of `memory_bytes` bytes.
///
/// An empty write touches the line holding `addr`, so `addr` itself must be
/// in range. An empty read touches nothing and is always accepted.
///
/// # Errors
///
/// As [`parse`], plus [`TraceError::OutOfRange`].
pub fn parse_within(text: &str, memory_bytes: u64) -> Result<Vec<TraceOp>, TraceError> {
    let mut ops = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let Some(op) = parse_line(raw, line)? else {
            continue;
        };
        let rejected = match &op {
            TraceOp::Read { addr, count } if *count > 0 => {
                (!fits(*addr, *count as u64, memory_bytes)).then_some(*addr)
            }
            TraceOp::Write { addr, data } if data.is_empty() => {
                (*addr >= memory_bytes).then_some(*addr)
            }
            TraceOp::Write { addr, data } => {
                (!fits(*addr, data.len() as u64, memory_bytes)).then_some(*addr)
            }
            _ => None,
        };
        if let Some(addr) = rejected {
            return Err(TraceError::OutOfRange {
                line,
                addr,
                memory_bytes,
            });
        }
        ops.push(op);
    }
    Ok(ops)
}

fn fits(addr: u64, len: u64, memory_bytes: u64) -> bool {
    addr.checked_add(len).is_some_and(|end| end <= memory_bytes)
}

fn parse_line(raw: &str, line: usize) -> Result<Option<TraceOp>, TraceError> {
    let content = raw.split('#').next().unwrap_or("");
    let mut tokens = content.split_whitespace();
    let Some(op) = tokens.next() else {
        return Ok(None);
    };

    let mut operand = |field: &'static str| {
        tokens.next().ok_or_else(|| TraceError::MissingField {
            line,
            op: op.to_string(),
            field,
        })
    };

    let parsed = match op.to_ascii_uppercase().as_str() {
        "R" => {
            let addr = parse_addr(operand("address")?, line)?;
            let text = operand("byte count")?;
            let count = text.parse().map_err(|_| TraceError::BadCount {
                line,
                text: text.to_string(),
            })?;
            TraceOp::Read { addr, count }
        }
        "W" => {
            let addr = parse_addr(operand("address")?, line)?;
            let data = parse_hex_bytes(operand("data")?, line)?;
            TraceOp::Write { addr, data }
        }
        "P" => parse_policy(operand("policy")?, line)?,
        "F" => TraceOp::Flush,
        "S" => TraceOp::ResetStats,
        _ => {
            return Err(TraceError::UnknownOp {
                line,
                op: op.to_string(),
            });
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(TraceError::Trailing {
            line,
            text: extra.to_string(),
        });
    }
    Ok(Some(parsed))
}

fn parse_addr(text: &str, line: usize) -> Result<u64, TraceError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| TraceError::BadAddress {
        line,
        text: text.to_string(),
    })
}

fn parse_hex_bytes(text: &str, line: usize) -> Result<Vec<u8>, TraceError> {
    let bad = || TraceError::BadBytes {
        line,
        text: text.to_string(),
    };
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return Err(bad());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad()))
        .collect()
}

fn parse_policy(text: &str, line: usize) -> Result<TraceOp, TraceError> {
    let op = match text.to_ascii_lowercase().as_str() {
        "writethrough" | "wt" => TraceOp::SetWritePolicy(WritePolicy::WriteThrough),
        "writeback" | "wb" => TraceOp::SetWritePolicy(WritePolicy::WriteBack),
        "lru" => TraceOp::SetReplacementPolicy(ReplacementPolicy::LeastRecentlyUsed),
        "random" => TraceOp::SetReplacementPolicy(ReplacementPolicy::Random),
        _ => {
            return Err(TraceError::BadPolicy {
                line,
                text: text.to_string(),
            });
        }
    };
    Ok(op)
}

/// Runs `ops` against `cache` in order and returns the bytes of every read.
pub fn replay(cache: &mut CacheEmulator, ops: &[TraceOp]) -> Vec<Vec<u8>> {
    let mut reads = Vec::new();
    for op in ops {
        trace!("trace: {op:?}");
        match op {
            TraceOp::Read { addr, count } => reads.push(cache.read_bytes(*addr, *count)),
            TraceOp::Write { addr, data } => cache.write_bytes(data, *addr),
            TraceOp::Flush => {
                cache.flush();
            }
            TraceOp::SetWritePolicy(policy) => cache.set_write_policy(*policy),
            TraceOp::SetReplacementPolicy(policy) => cache.set_replacement_policy(*policy),
            TraceOp::ResetStats => cache.reset_statistics(),
        }
    }
    reads
}
