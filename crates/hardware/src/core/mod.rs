pub mod cache;
pub mod value;

pub use self::cache::CacheEmulator;
pub use self::value::LineValue;
