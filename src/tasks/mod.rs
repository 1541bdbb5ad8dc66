//! Background tasks module
//! 
//! This module contains the task that delivers ticks to a running countdown.

pub mod countdown;

// Re-export main functions
pub use countdown::countdown_task;
