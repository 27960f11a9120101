//! The outbound side of the device connection.
//!
//! Opening ports and moving bytes belongs to the transport. The core only
//! hands it finished messages; the inbound side calls
//! [`Launchpad::handle_message`](crate::Launchpad::handle_message).

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::protocol::Message;

/// Fire-and-forget message sink.
///
/// Delivery failures are the transport's concern and are not reported back.
pub trait Transport {
    fn send(&mut self, message: Message);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, message: Message) {
        (**self).send(message);
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: Message) {
        (**self).send(message);
    }
}

/// Hands messages to a task that owns the real connection.
impl Transport for UnboundedSender<Message> {
    fn send(&mut self, message: Message) {
        if UnboundedSender::send(self, message).is_err() {
            warn!("Transport channel closed, dropping message {}", message);
        }
    }
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    messages: Vec<Message>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, message: Message) {
        self.messages.push(message);
    }
}
