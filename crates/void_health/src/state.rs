//! Health data model and clamping rules

use crate::damage::DamageModifiers;
use crate::history::ChangeLog;

/// Default starting health
pub const DEFAULT_HEALTH: f32 = 100.0;

/// Default maximum health
pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

/// Clamp a maximum health value to `>= 0`. NaN maps to 0.
#[inline]
pub fn clamp_max(value: f32) -> f32 {
    // f32::max returns the non-NaN operand
    value.max(0.0)
}

/// Clamp a current health value into `[0, max]`. NaN maps to 0.
///
/// `max` must already satisfy `clamp_max(max) == max`.
#[inline]
pub fn clamp_current(value: f32, max: f32) -> f32 {
    value.max(0.0).min(max)
}

/// Health data for a single entity.
///
/// Invariant: `0 <= current_health <= max_health`. Only
/// [`HealthController`](crate::controller::HealthController) mutates it, so
/// the invariant holds after every public call.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub(crate) current_health: f32,
    pub(crate) max_health: f32,
    /// Sticky: set on the first drop to 0, never cleared
    pub(crate) is_dead: bool,
    pub(crate) damage_modifiers: DamageModifiers,
    pub(crate) change_log: ChangeLog,
}

impl HealthState {
    /// Create a state with clamped initial values.
    ///
    /// The death flag starts cleared; the controller evaluates it right after
    /// construction.
    pub(crate) fn new(initial_health: f32, initial_max_health: f32) -> Self {
        let max_health = clamp_max(initial_max_health);
        Self {
            current_health: clamp_current(initial_health, max_health),
            max_health,
            is_dead: false,
            damage_modifiers: DamageModifiers::default(),
            change_log: ChangeLog::new(),
        }
    }

    /// Current health
    #[inline]
    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    /// Maximum health
    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Whether the entity has died
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Active damage modifiers
    pub fn damage_modifiers(&self) -> &DamageModifiers {
        &self.damage_modifiers
    }

    /// Recorded health changes
    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Health as a fraction of max (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.current_health / self.max_health
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current_health >= self.max_health
    }
}
