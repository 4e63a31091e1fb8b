//! Damage types and per-type resistance/weakness modifiers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Types of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Physical damage (melee, bullets, falls)
    Physical,
    /// Fire damage
    Fire,
    /// Ice/cold damage
    Ice,
    /// Electric/shock damage
    Electric,
    /// Poison/toxic damage
    Poison,
    /// Energy/plasma damage
    Energy,
}

impl DamageType {
    /// All damage types, in declaration order
    pub const ALL: [DamageType; 6] = [
        DamageType::Physical,
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Electric,
        DamageType::Poison,
        DamageType::Energy,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Physical => "Physical",
            DamageType::Fire => "Fire",
            DamageType::Ice => "Ice",
            DamageType::Electric => "Electric",
            DamageType::Poison => "Poison",
            DamageType::Energy => "Energy",
        }
    }
}

impl Default for DamageType {
    fn default() -> Self {
        Self::Physical
    }
}

/// Resistance and weakness fractions per damage type.
///
/// A resistance `r` scales incoming damage by `1 - r`, a weakness `w` by
/// `1 + w`. When both exist for a type, resistance is applied first and the
/// weakness scales the already reduced amount. Types without an entry are
/// left unscaled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageModifiers {
    /// Resistance fraction per damage type
    pub resistances: HashMap<DamageType, f32>,
    /// Weakness fraction per damage type
    pub weaknesses: HashMap<DamageType, f32>,
}

impl DamageModifiers {
    /// Create an empty modifier table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set resistance to a damage type
    pub fn with_resistance(mut self, damage_type: DamageType, fraction: f32) -> Self {
        self.resistances.insert(damage_type, fraction);
        self
    }

    /// Set weakness to a damage type
    pub fn with_weakness(mut self, damage_type: DamageType, fraction: f32) -> Self {
        self.weaknesses.insert(damage_type, fraction);
        self
    }

    /// Get the resistance fraction for a damage type
    pub fn resistance(&self, damage_type: DamageType) -> Option<f32> {
        self.resistances.get(&damage_type).copied()
    }

    /// Get the weakness fraction for a damage type
    pub fn weakness(&self, damage_type: DamageType) -> Option<f32> {
        self.weaknesses.get(&damage_type).copied()
    }

    /// Check if no modifiers are set
    pub fn is_empty(&self) -> bool {
        self.resistances.is_empty() && self.weaknesses.is_empty()
    }

    /// Scale a raw damage amount by the modifiers for `damage_type`.
    ///
    /// Untyped damage (`None`) passes through unchanged. The result is not
    /// clamped: fractions above 1 can flip the sign.
    pub fn apply(&self, amount: f32, damage_type: Option<DamageType>) -> f32 {
        let Some(damage_type) = damage_type else {
            return amount;
        };

        let mut effective = amount;
        if let Some(resistance) = self.resistance(damage_type) {
            effective *= 1.0 - resistance;
        }
        if let Some(weakness) = self.weakness(damage_type) {
            effective *= 1.0 + weakness;
        }
        effective
    }

    /// Iterate over every fraction stored in the table
    pub(crate) fn fractions(&self) -> impl Iterator<Item = (DamageType, f32)> + '_ {
        self.resistances
            .iter()
            .chain(self.weaknesses.iter())
            .map(|(damage_type, fraction)| (*damage_type, *fraction))
    }
}
