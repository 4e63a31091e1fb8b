//! Void Health - Health Component with Damage Modifiers and Death Events
//!
//! This crate provides an engine-agnostic health component for the Void Engine.
//!
//! # Features
//!
//! - Current/max health with clamping on every write
//! - Resistance and weakness fractions per damage type
//! - Append-only change log with source attribution
//! - Health-changed and death notifications (death fires exactly once)
//! - JSON-loadable configuration
//!
//! # Example
//!
//! ```ignore
//! use void_health::prelude::*;
//!
//! let mut health = HealthController::with_defaults(EntityRef::new(7));
//! health.set_damage_modifiers(
//!     DamageModifiers::new()
//!         .with_resistance(DamageType::Fire, 0.5)
//!         .with_weakness(DamageType::Fire, 0.2),
//! );
//!
//! let events = HealthEventCollector::new();
//! health.add_listener(Box::new(events.clone()));
//!
//! health.apply_damage(100.0, Some(DamageType::Fire)); // 60 after modifiers
//! for event in events.drain() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod config;
pub mod controller;
pub mod damage;
pub mod entity;
pub mod error;
pub mod events;
pub mod history;
pub mod state;

pub mod prelude {
    pub use crate::config::HealthConfig;
    pub use crate::controller::HealthController;
    pub use crate::damage::{DamageModifiers, DamageType};
    pub use crate::entity::EntityRef;
    pub use crate::error::{HealthError, Result};
    pub use crate::events::{HealthEvent, HealthEventCollector, HealthListener, ListenerId};
    pub use crate::history::{ChangeLog, HealthLogEntry};
    pub use crate::state::{clamp_current, clamp_max, HealthState};
}

pub use prelude::*;
