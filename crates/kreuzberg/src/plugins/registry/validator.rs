//! Validator registry implementation.

use crate::Result;
use crate::plugins::Validator;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for validator plugins.
///
/// Unlike post-processors, a validator carries its own [`Validator::priority`],
/// so registration takes no separate priority argument.
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Create a new empty validator registry.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Register a validator.
    pub fn register(&mut self, validator: Arc<dyn Validator>) -> Result<()> {
        let name = validator.name().to_string();
        super::validate_plugin_name(&name)?;
        validator.initialize()?;
        self.validators.insert(name, validator);
        Ok(())
    }

    /// Remove a validator by name. Silent no-op if absent.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let Some(validator) = self.validators.remove(name) else {
            return Ok(());
        };
        validator.shutdown()
    }

    /// List all registered validator names.
    pub fn list(&self) -> Vec<String> {
        self.validators.keys().cloned().collect()
    }

    /// All registered validators, highest priority first.
    pub fn all_by_priority(&self) -> Vec<Arc<dyn Validator>> {
        let mut validators: Vec<Arc<dyn Validator>> = self.validators.values().cloned().collect();
        validators.sort_by(|a, b| b.priority().cmp(&a.priority()));
        validators
    }

    /// Shut down and clear every registered validator.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names = self.list();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
