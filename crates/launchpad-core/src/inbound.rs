//! Inbound key message decoding.
//!
//! Grid and scene buttons report `[0x90, 0x10 * y + x, velocity]`; automap
//! buttons report `[0xB0, 0x68 + x, value]`. A non-zero last byte means
//! pressed.

use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;
use crate::error::LaunchpadError;
use crate::protocol::Message;
use crate::topology::{Button, ButtonId, CONTROL_KEY_BASE, CONTROL_STATUS, GRID_STATUS, ROUND_INDEX};

/// A decoded key message, before it is matched to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMessage {
    pub coordinate: Coordinate,
    pub pressed: bool,
}

/// Decode raw bytes into a key message.
///
/// Fails with `UNRECOGNIZED_MESSAGE` for anything but a 3-byte grid or
/// control message. The coordinate is not checked against the topology.
pub fn decode_message(bytes: &[u8]) -> Result<KeyMessage, LaunchpadError> {
    let message =
        Message::from_bytes(bytes).ok_or_else(|| LaunchpadError::unrecognized_message(bytes))?;
    let pressed = message.data2() > 0;

    let coordinate = match message.status() {
        GRID_STATUS => {
            let key = message.data1();
            Coordinate::new(key % 0x10, key / 0x10)
        }
        CONTROL_STATUS => {
            let x = message
                .data1()
                .checked_sub(CONTROL_KEY_BASE)
                .ok_or_else(|| LaunchpadError::unrecognized_message(bytes))?;
            Coordinate::new(x, ROUND_INDEX)
        }
        _ => return Err(LaunchpadError::unrecognized_message(bytes)),
    };

    Ok(KeyMessage {
        coordinate,
        pressed,
    })
}

/// A press or release of a known button.
///
/// Converts into a [`Coordinate`], so an event can be passed straight back
/// to the colouring API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub x: u8,
    pub y: u8,
    pub pressed: bool,
    pub id: ButtonId,
}

impl KeyEvent {
    pub fn from_button(button: &Button) -> Self {
        Self {
            x: button.x(),
            y: button.y(),
            pressed: button.pressed,
            id: button.id,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl From<KeyEvent> for Coordinate {
    fn from(event: KeyEvent) -> Self {
        event.coordinate()
    }
}

impl From<&KeyEvent> for Coordinate {
    fn from(event: &KeyEvent) -> Self {
        event.coordinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::topology::Topology;

    #[test]
    fn grid_press() {
        let key = decode_message(&[0x90, 0x23, 0x7F]).unwrap();
        assert_eq!(key.coordinate, Coordinate::new(3, 2));
        assert!(key.pressed);
    }

    #[test]
    fn scene_release() {
        let key = decode_message(&[0x90, 0x78, 0x00]).unwrap();
        assert_eq!(key.coordinate, Coordinate::new(8, 7));
        assert!(!key.pressed);
    }

    #[test]
    fn control_release() {
        let key = decode_message(&[0xB0, 0x6A, 0x00]).unwrap();
        assert_eq!(key.coordinate, Coordinate::new(2, 8));
        assert!(!key.pressed);
    }

    #[test]
    fn unknown_status_is_unrecognized() {
        let err = decode_message(&[0x80, 0x23, 0x00]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnrecognizedMessage);
    }

    #[test]
    fn control_below_key_base_is_unrecognized() {
        let err = decode_message(&[0xB0, 0x00, 0x7D]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnrecognizedMessage);
    }

    #[test]
    fn wrong_length_is_unrecognized() {
        for bytes in [&[][..], &[0x90, 0x23][..], &[0x90, 0x23, 0x7F, 0x00][..]] {
            let err = decode_message(bytes).unwrap_err();
            assert_eq!(err.code, ErrorCode::UnrecognizedMessage);
        }
    }

    #[test]
    fn grid_key_outside_topology_still_decodes() {
        // Resolution against the topology is the caller's job.
        let key = decode_message(&[0x90, 0x0C, 0x7F]).unwrap();
        assert_eq!(key.coordinate, Coordinate::new(12, 0));
    }

    #[test]
    fn key_event_converts_to_coordinate() {
        let topology = Topology::new();
        let button = topology.coordinate_for(4, 6).unwrap();
        let event = KeyEvent::from_button(button);
        assert_eq!(event.id, button.id);
        assert_eq!(Coordinate::from(event), Coordinate::new(4, 6));
    }

    #[test]
    fn key_event_json_shape() {
        let topology = Topology::new();
        let event = KeyEvent::from_button(topology.coordinate_for(0, 8).unwrap());
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["x"], 0);
        assert_eq!(json["y"], 8);
        assert_eq!(json["pressed"], false);
        assert!(json["id"].is_string());
    }
}
