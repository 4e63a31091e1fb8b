//! Health component configuration

use crate::damage::{DamageModifiers, DamageType};
use crate::error::{HealthError, Result};
use crate::state::{DEFAULT_HEALTH, DEFAULT_MAX_HEALTH};
use serde::{Deserialize, Serialize};

/// Construction parameters for a health controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Starting health (clamped to `[0, max_health]`)
    pub initial_health: f32,

    /// Maximum health (clamped to `>= 0`)
    pub max_health: f32,

    /// Record damage and healing in the change log
    pub logging_enabled: bool,

    /// Resistances and weaknesses per damage type
    pub damage_modifiers: DamageModifiers,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            initial_health: DEFAULT_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            logging_enabled: true,
            damage_modifiers: DamageModifiers::default(),
        }
    }
}

impl HealthConfig {
    /// Full health pool of the given size
    pub fn with_max(max_health: f32) -> Self {
        Self {
            initial_health: max_health,
            max_health,
            ..Default::default()
        }
    }

    /// Set starting health
    pub fn with_initial_health(mut self, health: f32) -> Self {
        self.initial_health = health;
        self
    }

    /// Set maximum health
    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Enable or disable the change log
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Set the damage modifier table
    pub fn with_damage_modifiers(mut self, modifiers: DamageModifiers) -> Self {
        self.damage_modifiers = modifiers;
        self
    }

    /// Add a resistance
    pub fn with_resistance(mut self, damage_type: DamageType, fraction: f32) -> Self {
        self.damage_modifiers = self.damage_modifiers.with_resistance(damage_type, fraction);
        self
    }

    /// Add a weakness
    pub fn with_weakness(mut self, damage_type: DamageType, fraction: f32) -> Self {
        self.damage_modifiers = self.damage_modifiers.with_weakness(damage_type, fraction);
        self
    }

    /// Reject non-finite values.
    ///
    /// Negative and out-of-range values are accepted; the controller clamps
    /// them on construction.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_health.is_finite() {
            return Err(HealthError::InvalidConfig(format!(
                "initial_health must be finite, got {}",
                self.initial_health
            )));
        }
        if !self.max_health.is_finite() {
            return Err(HealthError::InvalidConfig(format!(
                "max_health must be finite, got {}",
                self.max_health
            )));
        }
        for (damage_type, fraction) in self.damage_modifiers.fractions() {
            if !fraction.is_finite() {
                return Err(HealthError::InvalidConfig(format!(
                    "{} modifier must be finite, got {}",
                    damage_type.name(),
                    fraction
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
