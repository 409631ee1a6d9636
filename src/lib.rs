//! # WFCOS Configuration Toolkit
//!
//! Typed loading and validation of the declarative JSON documents that drive
//! WFCOS detector training runs (watershed FCOS: ResNet backbone, FPN neck,
//! FCOS-style head with an energy map replacing centerness).
//!
//! ## Architecture
//!
//! The toolkit follows a layered layout with clear separation of concerns:
//!
//! - **Core Layer** (`wfcos-core`): error taxonomy and shared value types
//! - **Configuration Layer** (`wfcos-config`): document schema, strict
//!   loader, restricted expression evaluator and cross-field validator
//! - **CLI Layer** (`bin/wfcos.rs`): plumbing that selects which document to
//!   load and reports the outcome
//!
//! The actual training framework (model builder, optimizer builder, data
//! pipeline, training loop) consumes the validated configuration through
//! read-only accessors; none of it lives in this repository.

#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![deny(unsafe_code)]

/// Core types and error handling
pub use wfcos_core as core;

/// Configuration schema, loading and validation
pub use wfcos_config as config;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_initialization() {
        assert!(!VERSION.is_empty());
    }
}
