//! Validator registry management.
//!
//! This module provides functions for managing the global validator registry.

use super::r#trait::Validator;
use std::sync::Arc;

/// Register a validator with the global registry.
///
/// # Errors
///
/// - `KreuzbergError::Validation` - Invalid validator name (empty or contains whitespace)
/// - Any error from the validator's `initialize()` method
pub fn register_validator(validator: Arc<dyn Validator>) -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    get_validator_registry().write().unwrap().register(validator)
}

/// Unregister a validator by name.
///
/// Removes the validator from the global registry and calls its `shutdown()` method.
/// A no-op (returns `Ok`) if no validator with that name is registered.
pub fn unregister_validator(name: &str) -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    get_validator_registry().write().unwrap().remove(name)
}

/// List all registered validators.
pub fn list_validators() -> crate::Result<Vec<String>> {
    use crate::plugins::registry::get_validator_registry;

    Ok(get_validator_registry().read().unwrap().list())
}

/// Clear all validators from the global registry, calling each one's `shutdown()`.
pub fn clear_validators() -> crate::Result<()> {
    use crate::plugins::registry::get_validator_registry;

    get_validator_registry().write().unwrap().shutdown_all()
}
