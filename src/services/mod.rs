//! External actions module
//!
//! This module contains the side effects a countdown can trigger outside the
//! process when it expires.

pub mod command;

// Re-export main functions
pub use command::execute_expire_command;
