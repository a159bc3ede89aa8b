//! Synchronous fan-out of token events to subscribers.

use vtk_types::TokenEvent;

/// Synchronous fan-out event bus for token events.
///
/// Listeners are invoked inline, after the emitting call has fully succeeded
/// and in the order the events were produced; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&TokenEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &TokenEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
