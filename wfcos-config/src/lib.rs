//! Configuration loading and validation for WFCOS training runs

pub mod expr;
pub mod loader;
pub mod schema;
pub mod validator;

/// Re-export main types
pub use loader::*;
pub use schema::*;
pub use validator::*;
