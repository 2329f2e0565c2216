//! Cache statistics.

use serde::Serialize;

/// Counters accumulated by a [`CacheEmulator`](crate::CacheEmulator).
///
/// `hits` and `misses` advance once per line resolved, never per byte.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Lines read from the backing store.
    pub line_fills: u64,
    /// Lines written to the backing store, whatever the trigger.
    pub writebacks: u64,
    /// Modelled cycles spent in the cache and on store transfers.
    pub cycles: u64,
}

impl CacheStats {
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of resolutions that hit, `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE STATISTICS");
        println!("==========================================================");
        println!("  accesses         : {}", self.accesses());
        println!("  hits             : {}", self.hits);
        println!("  misses           : {}", self.misses);
        println!("  hit rate         : {:.2}%", self.hit_rate() * 100.0);
        println!("  line fills       : {}", self.line_fills);
        println!("  writebacks       : {}", self.writebacks);
        println!("  cycles           : {}", self.cycles);
        println!("==========================================================");
    }
}
