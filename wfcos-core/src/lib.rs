//! Core types and error handling for the WFCOS configuration toolkit

pub mod error;
pub mod types;

pub use error::*;
/// Re-export commonly used types
pub use types::*;
