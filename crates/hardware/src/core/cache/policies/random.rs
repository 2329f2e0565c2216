use super::VictimSelector;

/// Xorshift64 selector. Cheap, deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct XorShiftSelector {
    ways: usize,
    state: u64,
}

impl XorShiftSelector {
    /// # Panics
    ///
    /// Panics if `ways` is zero.
    pub fn new(ways: usize, seed: u64) -> Self {
        assert!(ways > 0, "selector needs at least one way");
        Self {
            ways,
            // Xorshift is stuck at zero forever.
            state: if seed == 0 { 123456789 } else { seed },
        }
    }
}

impl VictimSelector for XorShiftSelector {
    fn generate(&mut self) -> usize {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % self.ways as u64) as usize
    }
}

/// Replays a fixed sequence of ways, wrapping at the end.
///
/// Makes random-policy runs reproducible in traces and tests.
#[derive(Clone, Debug)]
pub struct SequenceSelector {
    ways: Vec<usize>,
    next: usize,
}

impl SequenceSelector {
    /// # Panics
    ///
    /// Panics if `ways` is empty.
    pub fn new(ways: Vec<usize>) -> Self {
        assert!(!ways.is_empty(), "selector sequence must not be empty");
        Self { ways, next: 0 }
    }

    /// Selector that always returns `way`.
    pub fn constant(way: usize) -> Self {
        Self::new(vec![way])
    }
}

impl VictimSelector for SequenceSelector {
    fn generate(&mut self) -> usize {
        let way = self.ways[self.next];
        self.next = (self.next + 1) % self.ways.len();
        way
    }
}
