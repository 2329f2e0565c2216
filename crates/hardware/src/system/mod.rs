pub mod memory;

use std::cell::RefCell;
use std::rc::Rc;

pub use self::memory::{BackingStore, Memory};

/// Backing store handle shared between caches and their owner.
///
/// Several caches may sit over one store. Each cache borrows it only for the
/// duration of a line transfer and does no locking of its own.
pub type SharedStore = Rc<RefCell<dyn BackingStore>>;

