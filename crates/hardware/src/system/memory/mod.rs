//! Line-granular backing store.

/// The memory a cache sits in front of.
///
/// Transfers are whole lines. Line numbers the store does not hold are a
/// caller error; implementations may panic on them.
#[cfg_attr(test, mockall::automock)]
pub trait BackingStore {
    /// Returns the `line_bytes` bytes of `line`.
    fn read_line(&self, line: u64) -> Vec<u8>;

    /// Replaces the contents of `line`. `data` is exactly one line long.
    fn write_line(&mut self, line: u64, data: &[u8]);
}

/// Flat RAM addressed in fixed-size lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
    line_bytes: usize,
}

impl Memory {
    /// Zero-filled memory of `size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `line_bytes` is zero or `size` is not a multiple of it.
    pub fn new(size: usize, line_bytes: usize) -> Self {
        Self::from_bytes(vec![0; size], line_bytes)
    }

    /// Memory where byte `i` holds `i as u8`.
    pub fn with_pattern(size: usize, line_bytes: usize) -> Self {
        Self::from_bytes((0..size).map(|i| i as u8).collect(), line_bytes)
    }

    /// Memory initialised from `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `line_bytes` is zero or `bytes.len()` is not a multiple of it.
    pub fn from_bytes(bytes: Vec<u8>, line_bytes: usize) -> Self {
        assert!(line_bytes > 0, "line size must be non-zero");
        assert!(
            bytes.len() % line_bytes == 0,
            "memory size {} is not a multiple of the line size {}",
            bytes.len(),
            line_bytes
        );
        Self { bytes, line_bytes }
    }

    pub fn num_lines(&self) -> u64 {
        (self.bytes.len() / self.line_bytes) as u64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn line_range(&self, line: u64) -> std::ops::Range<usize> {
        assert!(
            line < self.num_lines(),
            "line {line} is outside a memory of {} lines",
            self.num_lines()
        );
        let start = line as usize * self.line_bytes;
        start..start + self.line_bytes
    }
}

impl BackingStore for Memory {
    fn read_line(&self, line: u64) -> Vec<u8> {
        self.bytes[self.line_range(line)].to_vec()
    }

    fn write_line(&mut self, line: u64, data: &[u8]) {
        let range = self.line_range(line);
        self.bytes[range].copy_from_slice(data);
    }
}
