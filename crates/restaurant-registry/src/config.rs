//! Registry configuration.
//!
//! Loaded from JSON or from the environment; every field has a default so an
//! empty document (or no variables at all) yields a usable registry.

use restaurant_core::{RestaurantError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`RegistryConfig::name`]
pub const NAME_ENV: &str = "RESTAURANTS_MANAGER_NAME";

/// Environment variable overriding [`RegistryConfig::ingredient_prefix`]
pub const INGREDIENT_PREFIX_ENV: &str = "RESTAURANTS_INGREDIENT_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Display name of the registry
    #[serde(default = "default_name")]
    pub name: String,

    /// Prefix used by the default ingredient filter of `find_dishes`
    #[serde(default = "default_ingredient_prefix")]
    pub ingredient_prefix: String,
}

fn default_name() -> String {
    "Restaurants Manager".to_string()
}

fn default_ingredient_prefix() -> String {
    "P".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            ingredient_prefix: default_ingredient_prefix(),
        }
    }
}

impl RegistryConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_ingredient_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ingredient_prefix = prefix.into();
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RestaurantError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values are ignored.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(name) = lookup(NAME_ENV).filter(|v| !v.trim().is_empty()) {
            config.name = name.trim().to_string();
        }
        if let Some(prefix) = lookup(INGREDIENT_PREFIX_ENV).filter(|v| !v.is_empty()) {
            config.ingredient_prefix = prefix;
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RestaurantError::Config("name cannot be empty".to_string()));
        }
        Ok(())
    }
}
