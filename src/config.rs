//! Checkout configuration.
//!
//! Values come from an optional TOML file; command-line flags override them
//! and built-in defaults fill in whatever neither sets.

use crate::domain::field::Field;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub throttle: ThrottleConfig,
}

/// Debounce applied to keystrokes before a field is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Quiet period after the last keystroke, in milliseconds.
    pub interval_ms: u64,
    /// When false the CVV field validates on every keystroke.
    pub throttle_cvv: bool,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            throttle_cvv: true,
        }
    }
}

impl ThrottleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Quiet period for one field; zero means validate immediately.
    pub fn interval_for(&self, field: Field) -> Duration {
        if field == Field::Cvv && !self.throttle_cvv {
            Duration::ZERO
        } else {
            self.interval()
        }
    }
}

impl CheckoutConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }
}
