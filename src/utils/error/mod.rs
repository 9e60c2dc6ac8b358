//! Error handling for the access control engine
//!
//! Access *decisions* never produce errors (they fail closed); errors here
//! cover configuration loading and session wiring.

pub mod error;

// Re-export commonly used types
pub use error::{AclError, Result};
