//! The device controller.
//!
//! [`Launchpad`] turns coordinates, patterns and colours into messages for a
//! [`Transport`], mirrors the buffer configuration it has sent, and turns
//! inbound bytes into [`KeyEvent`]s. It is meant to be driven from a single
//! task: inbound messages are handled one at a time, to completion.

use serde::Serialize;
use tracing::{debug, warn};

use crate::color::ColorCode;
use crate::config::PacerConfig;
use crate::coords::Coordinate;
use crate::error::LaunchpadError;
use crate::events::EventBus;
use crate::inbound::{decode_message, KeyEvent};
use crate::pacer::Pacer;
use crate::pattern;
use crate::protocol::{self, BufferUpdate, DeviceState, Message};
use crate::topology::{Button, ButtonId, Topology};
use crate::transport::Transport;

/// Outcome of a bulk write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkWrite {
    /// Messages sent.
    pub sent: usize,
    /// Entries whose coordinate is not a button.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Launchpad<T: Transport> {
    transport: T,
    topology: Topology,
    state: DeviceState,
    events: EventBus,
    pacer: Pacer,
}

impl<T: Transport> Launchpad<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PacerConfig::default())
    }

    pub fn with_config(transport: T, pacer: PacerConfig) -> Self {
        Self {
            transport,
            topology: Topology::new(),
            state: DeviceState::default(),
            events: EventBus::new(),
            pacer: Pacer::new(pacer),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn send_raw(&mut self, message: Message) {
        debug!("Sending {}", message);
        self.transport.send(message);
    }

    // Buttons

    pub fn button(&self, coordinate: Coordinate) -> Result<&Button, LaunchpadError> {
        self.topology.button(coordinate)
    }

    pub fn button_for(&self, id: ButtonId) -> Result<&Button, LaunchpadError> {
        self.topology.button_for(id)
    }

    /// Coordinates of all buttons currently held down.
    pub fn pressed_buttons(&self) -> Vec<Coordinate> {
        self.topology.pressed().map(|b| b.coordinate).collect()
    }

    pub fn is_pressed(&self, coordinate: impl Into<Coordinate>) -> bool {
        self.topology
            .button(coordinate.into())
            .map(|b| b.pressed)
            .unwrap_or(false)
    }

    pub fn from_pattern(&self, pattern: &str) -> Vec<Coordinate> {
        pattern::decode_pattern(pattern)
    }

    pub fn from_patterns<S: AsRef<str>>(&self, patterns: &[S]) -> Vec<Coordinate> {
        pattern::decode_patterns(patterns)
    }

    pub fn from_map(&self, map: &str) -> Vec<Coordinate> {
        pattern::from_map(map)
    }

    // Colours

    /// Set one LED. Returns `false`, sending nothing, if the coordinate is
    /// not a button.
    pub fn set_color(
        &mut self,
        coordinate: impl Into<Coordinate>,
        color: impl Into<ColorCode>,
    ) -> bool {
        let coordinate = coordinate.into();
        let message = match self.topology.button(coordinate) {
            Ok(button) => protocol::color_message(button, color),
            Err(err) => {
                debug!("Skipping colour write: {}", err);
                return false;
            }
        };
        self.send_raw(message);
        true
    }

    /// Set each entry's LED to its own colour, in order, then wait for the
    /// device to drain them.
    pub async fn set_colors<I, C, K>(&mut self, entries: I) -> BulkWrite
    where
        I: IntoIterator<Item = (C, K)>,
        C: Into<Coordinate>,
        K: Into<ColorCode>,
    {
        let mut result = BulkWrite::default();
        for (coordinate, color) in entries {
            if self.set_color(coordinate, color) {
                result.sent += 1;
            } else {
                result.skipped += 1;
            }
        }
        self.pacer.pace(result.sent + result.skipped).await;
        result
    }

    /// Set many LEDs to the same colour.
    pub async fn fill<I, C>(&mut self, coordinates: I, color: impl Into<ColorCode>) -> BulkWrite
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let code = color.into();
        self.set_colors(coordinates.into_iter().map(|c| (c, code)))
            .await
    }

    // Buffers

    pub fn update_buffers(&mut self, update: BufferUpdate) {
        let message = self.state.apply(update);
        self.send_raw(message);
    }

    pub fn write_buffer(&self) -> u8 {
        self.state.write_buffer
    }

    pub fn display_buffer(&self) -> u8 {
        self.state.display_buffer
    }

    pub fn flashing(&self) -> bool {
        self.state.flashing
    }

    pub fn set_write_buffer(&mut self, buffer: u8) {
        self.update_buffers(BufferUpdate::new().write(buffer));
    }

    /// Show a buffer. This also stops flashing.
    pub fn set_display_buffer(&mut self, buffer: u8) {
        self.update_buffers(BufferUpdate::new().display(buffer).flash(false));
    }

    pub fn set_flash(&mut self, flash: bool) {
        self.update_buffers(BufferUpdate::new().flash(flash));
    }

    // Brightness and reset

    pub fn set_multiplexing(&mut self, numerator: Option<u8>, denominator: Option<u8>) {
        self.send_raw(protocol::multiplexing_message(numerator, denominator));
    }

    /// Dim non-full LEDs; `0.0` is darkest, `1.0` brightest.
    pub fn set_brightness(&mut self, brightness: f64) {
        self.send_raw(protocol::brightness_message(brightness));
    }

    /// Reset the device and the local buffer mirror.
    pub fn reset(&mut self, brightness: Option<u8>) {
        self.state.reset();
        self.send_raw(protocol::reset_message(brightness));
    }

    // Inbound

    /// Process one inbound message.
    ///
    /// Messages that are not key events, or that name no button, are logged
    /// and dropped without touching any state.
    pub fn handle_message(&mut self, bytes: &[u8]) -> Option<KeyEvent> {
        let key = match decode_message(bytes) {
            Ok(key) => key,
            Err(err) => {
                warn!("Discarding inbound message: {}", err);
                return None;
            }
        };

        let event = match self.topology.set_pressed(key.coordinate, key.pressed) {
            Ok(button) => KeyEvent::from_button(button),
            Err(err) => {
                warn!("Discarding inbound message: {}", err);
                return None;
            }
        };

        self.events.emit(&event);
        Some(event)
    }

    /// Forget all pressed state, e.g. after reconnecting.
    pub fn clear_pressed(&mut self) {
        self.topology.clear_pressed();
    }
}
