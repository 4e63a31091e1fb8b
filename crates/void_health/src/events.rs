//! Health notifications and listeners

use crate::entity::EntityRef;
use parking_lot::Mutex;
use std::sync::Arc;

/// Events emitted by a health controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthEvent {
    /// Stored health changed
    HealthChanged {
        new_health: f32,
    },
    /// Entity died (fires once per controller)
    Death {
        owner: EntityRef,
        final_health: f32,
    },
}

impl HealthEvent {
    /// Check if this is a death event
    pub fn is_death(&self) -> bool {
        matches!(self, HealthEvent::Death { .. })
    }

    /// Deliver this event to a listener
    pub fn dispatch(&self, listener: &mut dyn HealthListener) {
        match *self {
            HealthEvent::HealthChanged { new_health } => listener.on_health_changed(new_health),
            HealthEvent::Death {
                owner,
                final_health,
            } => listener.on_death(owner, final_health),
        }
    }
}

/// Handler trait for health events.
///
/// Called synchronously from inside the mutating call, after the state has
/// been updated.
pub trait HealthListener: Send {
    /// Called when stored health changes
    fn on_health_changed(&mut self, _new_health: f32) {}

    /// Called once, when health first reaches zero
    fn on_death(&mut self, _owner: EntityRef, _final_health: f32) {}
}

/// Listener registration ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Adapts a closure to [`HealthListener`]
struct CallbackListener<F> {
    callback: F,
}

impl<F> HealthListener for CallbackListener<F>
where
    F: FnMut(&HealthEvent) + Send,
{
    fn on_health_changed(&mut self, new_health: f32) {
        (self.callback)(&HealthEvent::HealthChanged { new_health });
    }

    fn on_death(&mut self, owner: EntityRef, final_health: f32) {
        (self.callback)(&HealthEvent::Death {
            owner,
            final_health,
        });
    }
}

/// Registered listeners, called in registration order
#[derive(Default)]
pub(crate) struct ListenerSet {
    listeners: Vec<(ListenerId, Box<dyn HealthListener>)>,
    next_id: u64,
}

impl ListenerSet {
    pub(crate) fn add(&mut self, listener: Box<dyn HealthListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn add_callback<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&HealthEvent) + Send + 'static,
    {
        self.add(Box::new(CallbackListener { callback }))
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: HealthEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            event.dispatch(listener.as_mut());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl core::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("count", &self.listeners.len())
            .finish()
    }
}

/// Listener that buffers events for later polling.
///
/// Clones share the same buffer: register one clone with a controller and
/// keep another to drain from the integration layer.
#[derive(Clone, Default)]
pub struct HealthEventCollector {
    events: Arc<Mutex<Vec<HealthEvent>>>,
}

impl HealthEventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events, oldest first
    pub fn drain(&self) -> Vec<HealthEvent> {
        core::mem::take(&mut *self.events.lock())
    }

    /// Copy of the buffered events, oldest first
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events.lock().clone()
    }

    /// Buffered health-changed values, oldest first
    pub fn health_changes(&self) -> Vec<f32> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                HealthEvent::HealthChanged { new_health } => Some(*new_health),
                HealthEvent::Death { .. } => None,
            })
            .collect()
    }

    /// Number of buffered death events
    pub fn death_count(&self) -> usize {
        self.events.lock().iter().filter(|e| e.is_death()).count()
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Check if no events are buffered
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Clear all buffered events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl HealthListener for HealthEventCollector {
    fn on_health_changed(&mut self, new_health: f32) {
        self.events
            .lock()
            .push(HealthEvent::HealthChanged { new_health });
    }

    fn on_death(&mut self, owner: EntityRef, final_health: f32) {
        self.events.lock().push(HealthEvent::Death {
            owner,
            final_health,
        });
    }
}

impl core::fmt::Debug for HealthEventCollector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HealthEventCollector")
            .field("pending", &self.len())
            .finish()
    }
}
