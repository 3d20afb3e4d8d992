//! Validator plugin system.
//!
//! This module provides the trait and registry for implementing custom validators.

mod registry;
mod r#trait;

// Re-export trait for backward compatibility
pub use r#trait::Validator;

// Re-export registry functions for backward compatibility
pub use registry::{clear_validators, list_validators, register_validator, unregister_validator};
