//! Core types and logic for driving a Launchpad grid controller.
//!
//! The device is a 9×9 logical grid of 80 buttons with red/green LEDs,
//! talking 3-byte MIDI-style messages. This crate maps between button
//! addresses, colours and those messages. Opening the MIDI connection is
//! left to a [`Transport`] implementation.
//!
//! # Modules
//!
//! - [`coords`]: `(x, y)` coordinates and list helpers
//! - [`topology`]: the 80 buttons, their groups and identities
//! - [`pattern`]: row/column patterns and 9×9 map paintings
//! - [`color`]: palette colours and the colour byte
//! - [`duty_cycle`]: brightness fractions for multiplexing
//! - [`protocol`]: outbound message encoding and the buffer mirror
//! - [`inbound`]: key message decoding
//! - [`launchpad`]: the controller tying it together
//!
//! # Addressing
//!
//! | Notation | Example | Buttons |
//! |----------|---------|---------|
//! | Coordinate | `(3, 2)` | one |
//! | Group | [`ButtonGroup::Scene`] | a fixed set |
//! | Pattern | `"r3x.x"` | part of a row or column |
//! | Map | 81-character painting | anything |
//!
//! ```
//! use launchpad_core::{Color, Launchpad, RecordingTransport};
//!
//! let mut lp = Launchpad::new(RecordingTransport::new());
//! for coordinate in lp.from_pattern("am.xx") {
//!     lp.set_color(coordinate, Color::AMBER.medium());
//! }
//! assert_eq!(lp.transport().messages().len(), 2);
//! ```

pub mod color;
pub mod config;
pub mod coords;
pub mod duty_cycle;
pub mod error;
pub mod events;
pub mod inbound;
pub mod launchpad;
pub mod pacer;
pub mod pattern;
pub mod protocol;
pub mod topology;
pub mod transport;

pub use color::{Color, ColorCode, Hue};
pub use coords::Coordinate;
pub use error::{ErrorCode, LaunchpadError};
pub use inbound::KeyEvent;
pub use launchpad::{BulkWrite, Launchpad};
pub use protocol::{BufferUpdate, DeviceState, Message};
pub use topology::{Button, ButtonGroup, ButtonId, Topology};
pub use transport::{RecordingTransport, Transport};
