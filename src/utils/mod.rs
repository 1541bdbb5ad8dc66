//! Utility functions module
//!
//! Process-level helpers used by the server binary.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
