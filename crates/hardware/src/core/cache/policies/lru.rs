use crate::core::cache::line::CacheLine;

/// Way holding the least recently used line of `set`.
///
/// Scans left to right and only moves on a strictly older timestamp, so
/// among equally old slots the lowest way wins. Empty slots carry timestamp
/// zero and are therefore filled in way order before anything is evicted.
pub fn select_lru(set: &[CacheLine]) -> usize {
    let mut victim = 0;
    for (way, line) in set.iter().enumerate() {
        if line.last_access < set[victim].last_access {
            victim = way;
        }
    }
    victim
}
