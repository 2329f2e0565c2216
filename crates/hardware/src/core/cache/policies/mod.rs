use std::cell::RefCell;
use std::rc::Rc;

/// Source of victim ways for the random replacement policy.
///
/// Only consulted on a miss while [`ReplacementPolicy::Random`] is active.
/// Every value returned must lie in `[0, ways)` for the cache it serves.
///
/// [`ReplacementPolicy::Random`]: crate::config::ReplacementPolicy::Random
#[cfg_attr(test, mockall::automock)]
pub trait VictimSelector {
    fn generate(&mut self) -> usize;
}

/// Victim selector handle shared between caches and their owner.
pub type SharedSelector = Rc<RefCell<dyn VictimSelector>>;

pub use self::lru::select_lru;
pub use self::random::{SequenceSelector, XorShiftSelector};

mod lru;
mod random;
