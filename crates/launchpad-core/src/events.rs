//! Key event delivery.
//!
//! Two kinds of listeners: handlers, called synchronously in registration
//! order, and channel subscribers, for consumers living in other tasks.
//! Handlers run first. A handler that panics unwinds through
//! [`EventBus::emit`] and the remaining listeners are skipped.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::inbound::KeyEvent;

type KeyHandler = Box<dyn FnMut(&KeyEvent) + Send>;

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<KeyHandler>,
    subscribers: Vec<UnboundedSender<KeyEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key<F>(&mut self, handler: F)
    where
        F: FnMut(&KeyEvent) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Receive every future event on a channel.
    pub fn subscribe(&mut self) -> UnboundedReceiver<KeyEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.len() + self.subscribers.len()
    }

    pub fn emit(&mut self, event: &KeyEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
        self.subscribers.retain(|tx| tx.send(*event).is_ok());
        debug!(
            "Key ({}, {}) {} delivered to {} listeners",
            event.x,
            event.y,
            if event.pressed { "down" } else { "up" },
            self.listener_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;
    use std::sync::{Arc, Mutex};

    fn event() -> KeyEvent {
        let topology = Topology::new();
        KeyEvent::from_button(topology.coordinate_for(1, 2).unwrap())
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            bus.on_key(move |_| log.lock().unwrap().push(name));
        }

        bus.emit(&event());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn subscribers_receive_events() {
        let mut bus = EventBus::new();
        let mut rx = bus.subscribe();
        let sent = event();
        bus.emit(&sent);
        assert_eq!(rx.try_recv().unwrap(), sent);
    }

    #[test]
    fn closed_subscribers_are_dropped() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        let _kept = bus.subscribe();
        drop(rx);
        bus.emit(&event());
        assert_eq!(bus.listener_count(), 1);
    }
}
