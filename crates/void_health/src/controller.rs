//! Health controller: the single entry point for health mutation

use crate::config::HealthConfig;
use crate::damage::{DamageModifiers, DamageType};
use crate::entity::EntityRef;
use crate::events::{HealthEvent, HealthListener, ListenerId, ListenerSet};
use crate::history::{ChangeLog, HealthLogEntry};
use crate::state::{clamp_current, clamp_max, HealthState, DEFAULT_HEALTH, DEFAULT_MAX_HEALTH};

/// Health component for one entity.
///
/// Every write clamps health into `[0, max]`. A change is detected by exact
/// float comparison; only an actual change notifies listeners, appends to
/// the change log and runs the death check. Death fires once per controller
/// and the dead flag is never cleared.
#[derive(Debug)]
pub struct HealthController {
    owner: EntityRef,
    state: HealthState,
    logging_enabled: bool,
    listeners: ListenerSet,
    /// Death from construction, held until the first listener registers
    /// Health at a construction-time death not yet delivered
    pending_death: Option<f32>,
}

impl HealthController {
    /// Create a controller with the given starting and maximum health.
    ///
    /// Values are clamped. Starting at 0 marks the entity dead immediately;
    /// the death event is delivered when the first listener registers.
    pub fn new(owner: EntityRef, initial_health: f32, initial_max_health: f32) -> Self {
        let mut controller = Self {
            owner,
            state: HealthState::new(initial_health, initial_max_health),
            logging_enabled: true,
            listeners: ListenerSet::default(),
            pending_death: None,
        };
        controller.death_check();
        if controller.state.is_dead {
            controller.pending_death = Some(controller.state.current_health);
        }
        controller
    }

    /// Register a listener before handing the controller out
    pub fn with_listener(mut self, listener: Box<dyn HealthListener>) -> Self {
        self.add_listener(listener);
        self
    }

    /// Create a controller with 100/100 health
    pub fn with_defaults(owner: EntityRef) -> Self {
        Self::new(owner, DEFAULT_HEALTH, DEFAULT_MAX_HEALTH)
    }

    /// Create a controller from a configuration
    pub fn from_config(owner: EntityRef, config: &HealthConfig) -> Self {
        let mut controller = Self::new(owner, config.initial_health, config.max_health);
        controller.logging_enabled = config.logging_enabled;
        controller.state.damage_modifiers = config.damage_modifiers.clone();
        controller
    }

    // ---- Mutation ----

    /// Apply damage attributed to the owner
    pub fn apply_damage(&mut self, amount: f32, damage_type: Option<DamageType>) {
        self.apply_damage_from(self.owner, amount, damage_type);
    }

    /// Apply damage attributed to `source`.
    ///
    /// The amount is scaled by the modifier table when a type is given.
    /// Negative amounts heal. The log records the scaled amount, not the
    /// clamped difference.
    pub fn apply_damage_from(
        &mut self,
        source: EntityRef,
        amount: f32,
        damage_type: Option<DamageType>,
    ) {
        let effective = self.state.damage_modifiers.apply(amount, damage_type);
        if effective.is_nan() {
            log::warn!(
                "Ignoring NaN damage on entity {} (amount: {}, type: {:?})",
                self.owner,
                amount,
                damage_type
            );
            return;
        }

        let old_health = self.state.current_health;
        let new_health = clamp_current(old_health - effective, self.state.max_health);
        if new_health == old_health {
            return;
        }

        self.state.current_health = new_health;
        log::debug!(
            "Entity {} took {} damage from {} ({} -> {})",
            self.owner,
            effective,
            source,
            old_health,
            new_health
        );
        self.record(source, -effective);
        self.notify_health_changed();
    }

    /// Heal, attributed to the owner
    pub fn heal(&mut self, amount: f32) {
        self.heal_from(self.owner, amount);
    }

    /// Heal, attributed to `source`.
    ///
    /// Healing a dead entity raises its health but does not revive it.
    pub fn heal_from(&mut self, source: EntityRef, amount: f32) {
        if amount.is_nan() {
            log::warn!("Ignoring NaN heal on entity {}", self.owner);
            return;
        }

        let old_health = self.state.current_health;
        let new_health = clamp_current(old_health + amount, self.state.max_health);
        if new_health == old_health {
            return;
        }

        self.state.current_health = new_health;
        let healed = new_health - old_health;
        log::debug!(
            "Entity {} healed {} by {} ({} -> {})",
            self.owner,
            healed,
            source,
            old_health,
            new_health
        );
        self.record(source, healed);
        self.notify_health_changed();
    }

    /// Set current health directly (clamped to `[0, max]`).
    ///
    /// For initialization and authoritative correction; not logged.
    pub fn set_current_health(&mut self, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN health for entity {}", self.owner);
            return;
        }

        let old_health = self.state.current_health;
        let new_health = clamp_current(value, self.state.max_health);
        if new_health == old_health {
            return;
        }

        self.state.current_health = new_health;
        log::debug!(
            "Entity {} health set ({} -> {})",
            self.owner,
            old_health,
            new_health
        );
        self.notify_health_changed();
    }

    /// Set max health (clamped to `>= 0`).
    ///
    /// Current health is reduced to the new ceiling if it exceeds it; that
    /// reduction is what listeners are told about.
    pub fn set_max_health(&mut self, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN max health for entity {}", self.owner);
            return;
        }

        self.state.max_health = clamp_max(value);

        let old_health = self.state.current_health;
        let new_health = clamp_current(old_health, self.state.max_health);
        if new_health == old_health {
            return;
        }

        self.state.current_health = new_health;
        log::debug!(
            "Entity {} health capped by new max {} ({} -> {})",
            self.owner,
            self.state.max_health,
            old_health,
            new_health
        );
        self.notify_health_changed();
    }

    /// Replace the damage modifier table
    pub fn set_damage_modifiers(&mut self, modifiers: DamageModifiers) {
        log::debug!(
            "Entity {} damage modifiers replaced ({} resistances, {} weaknesses)",
            self.owner,
            modifiers.resistances.len(),
            modifiers.weaknesses.len()
        );
        self.state.damage_modifiers = modifiers;
    }

    // ---- Queries ----

    /// Owning entity
    #[inline]
    pub fn owner(&self) -> EntityRef {
        self.owner
    }

    /// Current health
    #[inline]
    pub fn current_health(&self) -> f32 {
        self.state.current_health
    }

    /// Maximum health
    #[inline]
    pub fn max_health(&self) -> f32 {
        self.state.max_health
    }

    /// Whether the entity has died
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state.is_dead
    }

    /// Check if alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.state.is_dead
    }

    /// Get health as a percentage (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        self.state.health_percent()
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }

    /// Active damage modifiers
    pub fn damage_modifiers(&self) -> &DamageModifiers {
        &self.state.damage_modifiers
    }

    /// Recorded damage and healing, oldest first
    pub fn change_log(&self) -> &[HealthLogEntry] {
        self.state.change_log.entries()
    }

    /// The change log with its aggregate helpers
    pub fn history(&self) -> &ChangeLog {
        &self.state.change_log
    }

    /// Read-only view of the full health state
    pub fn state(&self) -> &HealthState {
        &self.state
    }

    // ---- Change log ----

    /// Enable or disable change logging. Existing entries are kept.
    pub fn set_logging_enabled(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
    }

    /// Whether damage and healing are being logged
    pub fn is_logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Drop all recorded entries
    pub fn clear_change_log(&mut self) {
        self.state.change_log.clear();
    }

    // ---- Listeners ----

    /// Register a listener
    pub fn add_listener(&mut self, listener: Box<dyn HealthListener>) -> ListenerId {
        let id = self.listeners.add(listener);
        log::debug!("Entity {} registered health listener {:?}", self.owner, id);
        self.flush_pending_death();
        id
    }

    /// Register a closure called with every event
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&HealthEvent) + Send + 'static,
    {
        let id = self.listeners.add_callback(callback);
        log::debug!("Entity {} registered health callback {:?}", self.owner, id);
        self.flush_pending_death();
        id
    }

    /// Unregister a listener. Returns false if the ID is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ---- Internal ----

    fn record(&mut self, source: EntityRef, delta: f32) {
        if self.logging_enabled {
            self.state.change_log.push(HealthLogEntry::new(source, delta));
        }
    }

    fn notify_health_changed(&mut self) {
        self.listeners.emit(HealthEvent::HealthChanged {
            new_health: self.state.current_health,
        });
        self.death_check();
    }

    fn flush_pending_death(&mut self) {
        if let Some(final_health) = self.pending_death.take() {
            self.listeners.emit(HealthEvent::Death {
                owner: self.owner,
                final_health,
            });
        }
    }

    fn death_check(&mut self) {
        if self.state.current_health > 0.0 || self.state.is_dead {
            return;
        }

        self.state.is_dead = true;
        log::info!("Entity {} died", self.owner);
        self.listeners.emit(HealthEvent::Death {
            owner: self.owner,
            final_health: self.state.current_health,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::HealthEventCollector;

    const OWNER: EntityRef = EntityRef(1);

    fn with_collector(controller: &mut HealthController) -> HealthEventCollector {
        let collector = HealthEventCollector::new();
        controller.add_listener(Box::new(collector.clone()));
        collector
    }

    #[test]
    fn test_damage() {
        let mut health = HealthController::with_defaults(OWNER);
        let events = with_collector(&mut health);

        health.apply_damage(30.0, None);
        assert_eq!(health.current_health(), 70.0);
        assert_eq!(events.health_changes(), vec![70.0]);
        assert_eq!(events.death_count(), 0);
        assert!(health.is_alive());
    }

    #[test]
    fn test_typed_damage_uses_modifiers() {
        let mut health = HealthController::with_defaults(OWNER);
        health.set_damage_modifiers(DamageModifiers::new().with_resistance(DamageType::Fire, 0.5));

        health.apply_damage(40.0, Some(DamageType::Fire));
        assert_eq!(health.current_health(), 80.0);

        health.apply_damage(40.0, Some(DamageType::Physical));
        assert_eq!(health.current_health(), 40.0);
    }

    #[test]
    fn test_modifiers_replaced_wholesale() {
        let mut health = HealthController::with_defaults(OWNER);
        health.set_damage_modifiers(DamageModifiers::new().with_resistance(DamageType::Fire, 0.5));
        health.set_damage_modifiers(DamageModifiers::new().with_weakness(DamageType::Ice, 1.0));

        assert_eq!(health.damage_modifiers().resistance(DamageType::Fire), None);
        health.apply_damage(10.0, Some(DamageType::Fire));
        assert_eq!(health.current_health(), 90.0);
    }

    #[test]
    fn test_death_fires_after_health_changed() {
        let mut health = HealthController::new(OWNER, 70.0, 100.0);
        let events = with_collector(&mut health);

        health.apply_damage(90.0, None);
        assert_eq!(health.current_health(), 0.0);
        assert!(health.is_dead());
        assert_eq!(
            events.drain(),
            vec![
                HealthEvent::HealthChanged { new_health: 0.0 },
                HealthEvent::Death {
                    owner: OWNER,
                    final_health: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_zero_amounts_are_silent() {
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        let events = with_collector(&mut health);

        health.apply_damage(0.0, None);
        health.heal(0.0);
        assert!(events.is_empty());
        assert!(health.change_log().is_empty());
    }

    #[test]
    fn test_clamped_noop_is_silent() {
        let mut health = HealthController::with_defaults(OWNER);
        let events = with_collector(&mut health);

        health.heal(25.0);
        assert!(events.is_empty());
        assert!(health.change_log().is_empty());
    }

    #[test]
    fn test_negative_damage_heals() {
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        health.apply_damage(-20.0, None);
        assert_eq!(health.current_health(), 70.0);
        assert_eq!(health.change_log()[0].delta, 20.0);
    }

    #[test]
    fn test_negative_heal_can_kill() {
        let mut health = HealthController::new(OWNER, 10.0, 100.0);
        let events = with_collector(&mut health);

        health.heal(-15.0);
        assert_eq!(health.current_health(), 0.0);
        assert!(health.is_dead());
        assert_eq!(events.death_count(), 1);
    }

    #[test]
    fn test_log_deltas() {
        let mut health = HealthController::new(OWNER, 90.0, 100.0);
        let attacker = EntityRef(99);

        health.apply_damage_from(attacker, 30.0, None);
        health.heal(50.0);

        let log = health.change_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].source, attacker);
        assert_eq!(log[0].delta, -30.0);
        assert_eq!(log[1].source, OWNER);
        // Only 40 of the requested 50 fit under max
        assert_eq!(log[1].delta, 40.0);
    }

    #[test]
    fn test_damage_log_records_effective_amount() {
        let mut health = HealthController::new(OWNER, 20.0, 100.0);
        health.apply_damage(50.0, None);
        assert_eq!(health.current_health(), 0.0);
        assert_eq!(health.change_log()[0].delta, -50.0);
    }

    #[test]
    fn test_logging_disabled() {
        let mut health = HealthController::with_defaults(OWNER);
        health.set_logging_enabled(false);
        assert!(!health.is_logging_enabled());

        health.apply_damage(10.0, None);
        assert!(health.change_log().is_empty());

        health.set_logging_enabled(true);
        health.apply_damage(10.0, None);
        assert_eq!(health.change_log().len(), 1);

        health.clear_change_log();
        assert!(health.history().is_empty());
    }

    #[test]
    fn test_setters_not_logged() {
        let mut health = HealthController::with_defaults(OWNER);
        health.set_current_health(40.0);
        health.set_max_health(20.0);
        assert!(health.change_log().is_empty());
    }

    #[test]
    fn test_set_current_health_clamps() {
        let mut health = HealthController::with_defaults(OWNER);
        let events = with_collector(&mut health);

        health.set_current_health(500.0);
        assert_eq!(health.current_health(), 100.0);
        assert!(events.is_empty());

        health.set_current_health(-1.0);
        assert_eq!(health.current_health(), 0.0);
        assert!(health.is_dead());
        assert_eq!(events.health_changes(), vec![0.0]);
        assert_eq!(events.death_count(), 1);
    }

    #[test]
    fn test_set_max_health_caps_current() {
        let mut health = HealthController::new(OWNER, 80.0, 100.0);
        let events = with_collector(&mut health);

        health.set_max_health(50.0);
        assert_eq!(health.max_health(), 50.0);
        assert_eq!(health.current_health(), 50.0);
        assert_eq!(events.health_changes(), vec![50.0]);

        // Raising max leaves current alone
        health.set_max_health(200.0);
        assert_eq!(health.current_health(), 50.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_negative_max_health() {
        let mut health = HealthController::with_defaults(OWNER);
        let events = with_collector(&mut health);

        health.set_max_health(-5.0);
        assert_eq!(health.max_health(), 0.0);
        assert_eq!(health.current_health(), 0.0);
        assert!(health.is_dead());
        assert_eq!(events.death_count(), 1);
    }

    #[test]
    fn test_dead_entity_heals_without_reviving() {
        let mut health = HealthController::with_defaults(OWNER);
        let events = with_collector(&mut health);

        health.apply_damage(100.0, None);
        health.heal(50.0);
        assert_eq!(health.current_health(), 50.0);
        assert!(health.is_dead());

        health.apply_damage(50.0, None);
        assert_eq!(events.health_changes(), vec![0.0, 50.0, 0.0]);
        assert_eq!(events.death_count(), 1);
    }

    #[test]
    fn test_construction() {
        let health = HealthController::new(OWNER, 150.0, -10.0);
        assert_eq!(health.max_health(), 0.0);
        assert_eq!(health.current_health(), 0.0);
        assert!(health.is_dead());

        let health = HealthController::new(OWNER, 0.0, 100.0);
        assert!(health.is_dead());

        let health = HealthController::new(OWNER, 150.0, 100.0);
        assert_eq!(health.current_health(), 100.0);
        assert!(health.is_full());
        assert_eq!(health.owner(), OWNER);
    }

    #[test]
    fn test_dead_at_construction_delivers_death_once() {
        let mut health = HealthController::new(OWNER, 0.0, 100.0);
        let events = with_collector(&mut health);
        assert_eq!(
            events.events(),
            vec![HealthEvent::Death {
                owner: OWNER,
                final_health: 0.0
            }]
        );

        health.heal(10.0);
        health.apply_damage(10.0, None);
        health.apply_damage(10.0, None);
        assert_eq!(events.health_changes(), vec![10.0, 0.0]);
        assert_eq!(events.death_count(), 1);

        // Later listeners do not get a replay
        let late = with_collector(&mut health);
        assert!(late.is_empty());
    }

    #[test]
    fn test_with_listener_sees_construction_death() {
        let events = HealthEventCollector::new();
        let health = HealthController::new(OWNER, -3.0, 100.0)
            .with_listener(Box::new(events.clone()));

        assert!(health.is_dead());
        assert_eq!(health.listener_count(), 1);
        assert_eq!(events.death_count(), 1);
    }

    #[test]
    fn test_held_death_reports_health_at_death() {
        let mut health = HealthController::new(OWNER, 0.0, 100.0);
        health.heal(25.0);

        let events = with_collector(&mut health);
        assert_eq!(
            events.events(),
            vec![HealthEvent::Death {
                owner: OWNER,
                final_health: 0.0
            }]
        );
        assert_eq!(health.current_health(), 25.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_subscribe_sees_construction_death() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let deaths = Arc::new(Mutex::new(0));
        let mut health = HealthController::from_config(OWNER, &HealthConfig::with_max(0.0));
        let sink = deaths.clone();
        health.subscribe(move |event| {
            if event.is_death() {
                *sink.lock() += 1;
            }
        });

        assert_eq!(*deaths.lock(), 1);
    }

    #[test]
    fn test_change_detection_is_exact() {
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        let events = with_collector(&mut health);

        health.heal(1e-3);
        assert_eq!(events.health_changes(), vec![50.0_f32 + 1e-3]);
        assert_eq!(health.change_log().len(), 1);

        // Below half an ulp at this magnitude the stored value cannot move
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        let events = with_collector(&mut health);

        health.heal(1e-6);
        health.apply_damage(1e-6, None);
        assert_eq!(health.current_health(), 50.0);
        assert!(events.is_empty());
        assert!(health.change_log().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = HealthConfig::with_max(60.0)
            .with_logging(false)
            .with_weakness(DamageType::Ice, 0.5);
        let mut health = HealthController::from_config(OWNER, &config);

        assert_eq!(health.current_health(), 60.0);
        assert!(!health.is_logging_enabled());

        health.apply_damage(10.0, Some(DamageType::Ice));
        assert_eq!(health.current_health(), 45.0);
        assert!(health.change_log().is_empty());
    }

    #[test]
    fn test_nan_inputs_ignored() {
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        let events = with_collector(&mut health);

        health.apply_damage(f32::NAN, None);
        health.heal(f32::NAN);
        health.set_current_health(f32::NAN);
        health.set_max_health(f32::NAN);

        assert_eq!(health.current_health(), 50.0);
        assert_eq!(health.max_health(), 100.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_infinite_resistance_product_ignored() {
        let mut health = HealthController::new(OWNER, 50.0, 100.0);
        health.set_damage_modifiers(DamageModifiers::new().with_resistance(DamageType::Fire, 1.0));

        // inf * (1 - 1) is NaN
        health.apply_damage(f32::INFINITY, Some(DamageType::Fire));
        assert_eq!(health.current_health(), 50.0);
    }

    #[test]
    fn test_subscribe_and_remove() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut health = HealthController::with_defaults(OWNER);
        let sink = seen.clone();
        let id = health.subscribe(move |event| sink.lock().push(*event));
        assert_eq!(health.listener_count(), 1);

        health.apply_damage(5.0, None);
        assert!(health.remove_listener(id));
        health.apply_damage(5.0, None);

        assert_eq!(*seen.lock(), vec![HealthEvent::HealthChanged { new_health: 95.0 }]);
        assert_eq!(health.listener_count(), 0);
    }
}
