//! Outbound command encoding.
//!
//! Every command is a 3-byte message `[status, data1, data2]`:
//!
//! | Command        | Bytes                              |
//! |----------------|------------------------------------|
//! | LED colour     | `[0x90 or 0xB0, key, colour]`      |
//! | Buffer config  | `[0xB0, 0x00, 0b1_0_f_w_0_d]`      |
//! | Reset          | `[0xB0, 0x00, 0 or 0x7D..=0x7F]`   |
//! | Multiplexing   | `[0xB0, 0x1E or 0x1F, data]`       |
//!
//! Numeric arguments are clamped, never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::ColorCode;
use crate::duty_cycle::{
    nearest_duty_cycle, DENOMINATOR_MAX, DENOMINATOR_MIN, NUMERATOR_MAX, NUMERATOR_MIN,
};
use crate::topology::{Button, CONTROL_STATUS};

/// Length of every message in either direction.
pub const MESSAGE_LEN: usize = 3;

const CONFIG_REGISTER: u8 = 0x00;
const MULTIPLEX_LOW: u8 = 0x1E;
const MULTIPLEX_HIGH: u8 = 0x1F;
const RESET_BRIGHTNESS_BASE: u8 = 0x7C;

const BUFFER_BASE: u8 = 0b100000;
const BUFFER_COPY: u8 = 0b010000;
const BUFFER_FLASH: u8 = 0b001000;
const BUFFER_WRITE: u8 = 0b000100;
const BUFFER_DISPLAY: u8 = 0b000001;

pub const DEFAULT_NUMERATOR: u8 = 1;
pub const DEFAULT_DENOMINATOR: u8 = 5;

/// A fixed-length message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(pub [u8; MESSAGE_LEN]);

impl Message {
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self([status, data1, data2])
    }

    /// Take a message from raw bytes. `None` unless exactly 3 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; MESSAGE_LEN]>::try_from(bytes).ok().map(Self)
    }

    pub fn status(&self) -> u8 {
        self.0[0]
    }

    pub fn data1(&self) -> u8 {
        self.0[1]
    }

    pub fn data2(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [status, data1, data2] = self.0;
        write!(f, "{:02x} {:02x} {:02x}", status, data1, data2)
    }
}

impl From<Message> for [u8; MESSAGE_LEN] {
    fn from(message: Message) -> Self {
        message.0
    }
}

/// Set one LED.
pub fn color_message(button: &Button, color: impl Into<ColorCode>) -> Message {
    Message::new(button.family.status(), button.key, color.into().0)
}

/// Set the duty cycle for non-full brightness levels.
///
/// `None` or `0` picks the default (1/5). Other values are clamped to
/// `1..=16` and `3..=18`.
pub fn multiplexing_message(numerator: Option<u8>, denominator: Option<u8>) -> Message {
    let num = numerator
        .filter(|&n| n != 0)
        .unwrap_or(DEFAULT_NUMERATOR)
        .clamp(NUMERATOR_MIN, NUMERATOR_MAX);
    let den = denominator
        .filter(|&d| d != 0)
        .unwrap_or(DEFAULT_DENOMINATOR)
        .clamp(DENOMINATOR_MIN, DENOMINATOR_MAX);

    let (command, data) = if num <= 8 {
        (MULTIPLEX_LOW, 0x10 * (num - 1) + (den - 3))
    } else {
        (MULTIPLEX_HIGH, 0x10 * (num - 9) + (den - 3))
    };
    Message::new(CONTROL_STATUS, command, data)
}

/// Multiplexing for a brightness in `[0, 1]`, via the duty-cycle table.
pub fn brightness_message(brightness: f64) -> Message {
    let entry = nearest_duty_cycle(brightness);
    multiplexing_message(Some(entry.numerator), Some(entry.denominator))
}

/// Reset the device. A brightness of 1–3 lights every LED at that level,
/// anything else turns them all off.
pub fn reset_message(brightness: Option<u8>) -> Message {
    let value = match brightness {
        Some(level @ 1..=3) => level + RESET_BRIGHTNESS_BASE,
        _ => 0,
    };
    Message::new(CONTROL_STATUS, CONFIG_REGISTER, value)
}

/// Partial buffer configuration. Unset fields keep their mirrored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferUpdate {
    pub write: Option<u8>,
    pub display: Option<u8>,
    /// Copy the display buffer into the write buffer. Not persisted.
    pub copy_to_display: bool,
    pub flash: Option<bool>,
}

impl BufferUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn write(mut self, buffer: u8) -> Self {
        self.write = Some(buffer);
        self
    }

    #[must_use]
    pub fn display(mut self, buffer: u8) -> Self {
        self.display = Some(buffer);
        self
    }

    #[must_use]
    pub fn copy_to_display(mut self, copy: bool) -> Self {
        self.copy_to_display = copy;
        self
    }

    #[must_use]
    pub fn flash(mut self, flash: bool) -> Self {
        self.flash = Some(flash);
        self
    }
}

/// Local mirror of the device's buffer configuration.
///
/// The device cannot be queried, so this is assumed to match the last
/// configuration sent. A reset returns it to the power-on defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub write_buffer: u8,
    pub display_buffer: u8,
    pub flashing: bool,
}

impl DeviceState {
    /// Merge an update into the mirror and encode the full configuration.
    ///
    /// Buffer numbers other than 0 are treated as buffer 1.
    pub fn apply(&mut self, update: BufferUpdate) -> Message {
        if let Some(write) = update.write {
            self.write_buffer = write.min(1);
        }
        if let Some(display) = update.display {
            self.display_buffer = display.min(1);
        }
        if let Some(flash) = update.flash {
            self.flashing = flash;
        }
        self.config_message(update.copy_to_display)
    }

    pub fn config_message(&self, copy_to_display: bool) -> Message {
        let value = BUFFER_BASE
            | (BUFFER_COPY * u8::from(copy_to_display))
            | (BUFFER_FLASH * u8::from(self.flashing))
            | (BUFFER_WRITE * self.write_buffer)
            | (BUFFER_DISPLAY * self.display_buffer);
        Message::new(CONTROL_STATUS, CONFIG_REGISTER, value)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::topology::Topology;

    #[test]
    fn color_message_uses_family_and_key() {
        let topology = Topology::new();
        let pad = topology.coordinate_for(3, 2).unwrap();
        assert_eq!(
            color_message(pad, Color::RED),
            Message::new(0x90, 0x23, 0x03)
        );

        let automap = topology.coordinate_for(7, 8).unwrap();
        assert_eq!(
            color_message(automap, 0x3Cu8),
            Message::new(0xB0, 0x6F, 0x3C)
        );
    }

    #[test]
    fn multiplexing_low_and_high_ranges() {
        assert_eq!(
            multiplexing_message(Some(1), Some(5)),
            Message::new(0xB0, 0x1E, 0x02)
        );
        assert_eq!(
            multiplexing_message(Some(9), Some(5)),
            Message::new(0xB0, 0x1F, 0x02)
        );
        assert_eq!(
            multiplexing_message(Some(8), Some(18)),
            Message::new(0xB0, 0x1E, 0x7F)
        );
        assert_eq!(
            multiplexing_message(Some(16), Some(18)),
            Message::new(0xB0, 0x1F, 0x7F)
        );
    }

    #[test]
    fn multiplexing_defaults_and_clamping() {
        assert_eq!(
            multiplexing_message(None, None),
            Message::new(0xB0, 0x1E, 0x02)
        );
        assert_eq!(
            multiplexing_message(Some(0), Some(0)),
            Message::new(0xB0, 0x1E, 0x02)
        );
        assert_eq!(
            multiplexing_message(Some(0), Some(18)),
            Message::new(0xB0, 0x1E, 0x0F)
        );
        assert_eq!(
            multiplexing_message(Some(2), Some(1)),
            Message::new(0xB0, 0x1E, 0x10)
        );
        assert_eq!(
            multiplexing_message(Some(200), Some(200)),
            Message::new(0xB0, 0x1F, 0x7F)
        );
    }

    #[test]
    fn brightness_goes_through_duty_cycle_table() {
        // 1/18 is the dimmest entry
        assert_eq!(brightness_message(0.0), Message::new(0xB0, 0x1E, 0x0F));
        // 3/3 is the brightest
        assert_eq!(brightness_message(1.0), Message::new(0xB0, 0x1E, 0x20));
        // 9/17 at the midpoint
        assert_eq!(brightness_message(0.5), Message::new(0xB0, 0x1F, 0x0E));
    }

    #[test]
    fn reset_values() {
        assert_eq!(reset_message(None), Message::new(0xB0, 0x00, 0x00));
        assert_eq!(reset_message(Some(1)), Message::new(0xB0, 0x00, 0x7D));
        assert_eq!(reset_message(Some(3)), Message::new(0xB0, 0x00, 0x7F));
        assert_eq!(reset_message(Some(0)), Message::new(0xB0, 0x00, 0x00));
        assert_eq!(reset_message(Some(4)), Message::new(0xB0, 0x00, 0x00));
    }

    #[test]
    fn buffer_update_merges_with_mirror() {
        let mut state = DeviceState::default();
        assert_eq!(
            state.apply(BufferUpdate::new().write(1)),
            Message::new(0xB0, 0x00, 0b100100)
        );
        assert_eq!(
            state.apply(BufferUpdate::new().display(1)),
            Message::new(0xB0, 0x00, 0b100101)
        );
        assert_eq!(
            state.apply(BufferUpdate::new().flash(true).copy_to_display(true)),
            Message::new(0xB0, 0x00, 0b111101)
        );
        // copy is per call only
        assert_eq!(
            state.apply(BufferUpdate::new()),
            Message::new(0xB0, 0x00, 0b101101)
        );
    }

    #[test]
    fn buffer_update_is_idempotent() {
        let mut state = DeviceState::default();
        let first = state.apply(BufferUpdate::new().flash(true));
        let second = state.apply(BufferUpdate::new().flash(true));
        assert_eq!(first, second);
        assert_eq!(first, Message::new(0xB0, 0x00, 0b101000));
    }

    #[test]
    fn buffer_numbers_are_clamped() {
        let mut state = DeviceState::default();
        state.apply(BufferUpdate::new().write(7).display(2));
        assert_eq!(state.write_buffer, 1);
        assert_eq!(state.display_buffer, 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = DeviceState::default();
        state.apply(BufferUpdate::new().write(1).display(1).flash(true));
        state.reset();
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn message_from_bytes_and_display() {
        let message = Message::from_bytes(&[0xB0, 0x1E, 0x02]).unwrap();
        assert_eq!(message.status(), 0xB0);
        assert_eq!(message.to_string(), "b0 1e 02");
        assert!(Message::from_bytes(&[0x90, 0x00]).is_none());
        assert!(Message::from_bytes(&[0x90, 0x00, 0x00, 0x00]).is_none());
    }
}
