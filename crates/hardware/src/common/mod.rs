/// Address decomposition into line number and in-line offset.
pub mod addr;

/// Error types for configuration and trace parsing.
pub mod error;

pub use self::addr::LineAddr;
pub use self::error::{ConfigError, TraceError};
