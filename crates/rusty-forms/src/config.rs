// File: src/config.rs
// Purpose: Configuration parsing from rusty-forms.toml

use crate::error::FormError;
use anyhow::{Context, Result};
use rusty_forms_validation::PasswordPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub form: FormSettings,

    #[serde(default)]
    pub password: PasswordPolicy,
}

/// Name rule and success message timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Minimum trimmed name length (default: 2)
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,

    /// How long the success message stays up (default: 3000)
    #[serde(default = "default_success_timeout_ms")]
    pub success_timeout_ms: u64,
}

fn default_name_min_length() -> usize {
    2
}

fn default_success_timeout_ms() -> u64 {
    3000
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            success_timeout_ms: default_success_timeout_ms(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./rusty-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rusty-forms.toml")
    }

    /// Rejects values that would make every submission fail or the success
    /// message vanish immediately
    pub fn validate(&self) -> Result<(), FormError> {
        if self.form.name_min_length == 0 {
            return Err(FormError::InvalidConfig(
                "form.name_min_length must be at least 1".to_string(),
            ));
        }
        if self.form.success_timeout_ms == 0 {
            return Err(FormError::InvalidConfig(
                "form.success_timeout_ms must be positive".to_string(),
            ));
        }
        if self.password.min_length == 0 {
            return Err(FormError::InvalidConfig(
                "password.min_length must be at least 1".to_string(),
            ));
        }
        if matches!(&self.password.special_characters, Some(set) if set.is_empty()) {
            return Err(FormError::InvalidConfig(
                "password.special_characters must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn success_timeout(&self) -> Duration {
        Duration::from_millis(self.form.success_timeout_ms)
    }
}
