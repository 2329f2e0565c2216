//! Byte address to cache line mapping.

/// A byte address split into the line that holds it and the offset within
/// that line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineAddr {
    /// `addr / line_bytes`.
    pub line: u64,
    /// `addr - line * line_bytes`, always `< line_bytes`.
    pub offset: usize,
}

impl LineAddr {
    /// Decomposes `addr` for a cache with `line_bytes`-byte lines.
    ///
    /// # Arguments
    ///
    /// * `addr` - The byte address.
    /// * `line_bytes` - Line size in bytes. Must be non-zero.
    pub fn new(addr: u64, line_bytes: usize) -> Self {
        let line_bytes = line_bytes as u64;
        let line = addr / line_bytes;
        Self {
            line,
            offset: (addr - line * line_bytes) as usize,
        }
    }
}
