//! Static button layout of the device.
//!
//! The device is a 9×9 logical grid: 8×8 square pads, a column of round
//! scene buttons at `x = 8` and a row of round automap buttons at `y = 8`.
//! The corner `(8, 8)` does not exist, leaving 80 buttons. Buttons are
//! stored row-major, so index `x + 9 * y` addresses a button directly.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coords::Coordinate;
use crate::error::LaunchpadError;

/// Width and height of the logical grid.
pub const GRID_SIZE: u8 = 9;

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 80;

/// Index of the round buttons along either axis.
pub const ROUND_INDEX: u8 = 8;

/// Status byte for the square pads and scene buttons.
pub const GRID_STATUS: u8 = 0x90;

/// Status byte for the automap row.
pub const CONTROL_STATUS: u8 = 0xB0;

/// Key code of the leftmost automap button.
pub const CONTROL_KEY_BASE: u8 = 0x68;

/// Opaque per-button identity.
///
/// Issued once per process and shared by every [`Topology`], so callers may
/// cache identities. Supports equality and hashing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonId(Uuid);

impl ButtonId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which status byte addresses a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandFamily {
    /// Rows 0..8 (including the scene column): note messages.
    Grid,
    /// The automap row: controller messages.
    Control,
}

impl CommandFamily {
    pub fn status(self) -> u8 {
        match self {
            CommandFamily::Grid => GRID_STATUS,
            CommandFamily::Control => CONTROL_STATUS,
        }
    }
}

/// One physical button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub coordinate: Coordinate,
    pub id: ButtonId,
    pub family: CommandFamily,
    /// Second byte of every message addressing this button.
    pub key: u8,
    /// Last state reported by the device.
    pub pressed: bool,
}

impl Button {
    fn new(coordinate: Coordinate, id: ButtonId) -> Self {
        let Coordinate { x, y } = coordinate;
        let (family, key) = if y >= ROUND_INDEX {
            (CommandFamily::Control, CONTROL_KEY_BASE + x)
        } else {
            (CommandFamily::Grid, 0x10 * y + x)
        };
        Self {
            coordinate,
            id,
            family,
            key,
            pressed: false,
        }
    }

    pub fn x(&self) -> u8 {
        self.coordinate.x
    }

    pub fn y(&self) -> u8 {
        self.coordinate.y
    }
}

/// Logical subsets of the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGroup {
    /// All 80 buttons.
    All,
    /// The 8×8 square pads.
    Grid,
    /// Round buttons along the top of the device (`y = 8`).
    Automap,
    /// Round buttons along the right side (`x = 8`).
    Scene,
}

impl ButtonGroup {
    pub fn contains(self, coordinate: Coordinate) -> bool {
        let Coordinate { x, y } = coordinate;
        match self {
            ButtonGroup::All => true,
            ButtonGroup::Grid => x < ROUND_INDEX && y < ROUND_INDEX,
            ButtonGroup::Automap => y == ROUND_INDEX,
            ButtonGroup::Scene => x == ROUND_INDEX,
        }
    }
}

fn index_of(coordinate: Coordinate) -> Option<usize> {
    let Coordinate { x, y } = coordinate;
    if x >= GRID_SIZE || y >= GRID_SIZE {
        return None;
    }
    let index = usize::from(x) + usize::from(GRID_SIZE) * usize::from(y);
    (index < BUTTON_COUNT).then_some(index)
}

fn coordinate_of(index: usize) -> Coordinate {
    let size = usize::from(GRID_SIZE);
    // index < BUTTON_COUNT, so both parts fit in a u8
    Coordinate::new((index % size) as u8, (index / size) as u8)
}

fn identities() -> &'static [ButtonId; BUTTON_COUNT] {
    static IDS: OnceLock<[ButtonId; BUTTON_COUNT]> = OnceLock::new();
    IDS.get_or_init(|| std::array::from_fn(|_| ButtonId(Uuid::new_v4())))
}

/// The button set with per-button pressed state.
#[derive(Debug, Clone)]
pub struct Topology {
    buttons: Vec<Button>,
    by_id: HashMap<ButtonId, usize>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    pub fn new() -> Self {
        let buttons: Vec<Button> = identities()
            .iter()
            .enumerate()
            .map(|(index, id)| Button::new(coordinate_of(index), *id))
            .collect();
        let by_id = buttons
            .iter()
            .enumerate()
            .map(|(index, button)| (button.id, index))
            .collect();
        Self { buttons, by_id }
    }

    /// Resolve a coordinate to its button.
    pub fn coordinate_for(&self, x: u8, y: u8) -> Result<&Button, LaunchpadError> {
        self.button(Coordinate::new(x, y))
    }

    pub fn button(&self, coordinate: Coordinate) -> Result<&Button, LaunchpadError> {
        index_of(coordinate)
            .map(|index| &self.buttons[index])
            .ok_or_else(|| LaunchpadError::out_of_range(coordinate))
    }

    /// Resolve an identity to its button.
    pub fn button_for(&self, id: ButtonId) -> Result<&Button, LaunchpadError> {
        self.by_id
            .get(&id)
            .map(|&index| &self.buttons[index])
            .ok_or_else(|| LaunchpadError::unknown_identity(id))
    }

    /// Buttons of a group in row-major order.
    pub fn group(&self, group: ButtonGroup) -> impl Iterator<Item = &Button> + '_ {
        self.buttons
            .iter()
            .filter(move |button| group.contains(button.coordinate))
    }

    pub fn all(&self) -> &[Button] {
        &self.buttons
    }

    pub fn grid(&self) -> Vec<&Button> {
        self.group(ButtonGroup::Grid).collect()
    }

    pub fn automap(&self) -> Vec<&Button> {
        self.group(ButtonGroup::Automap).collect()
    }

    pub fn scene(&self) -> Vec<&Button> {
        self.group(ButtonGroup::Scene).collect()
    }

    /// Record a press or release. Returns the updated button.
    pub(crate) fn set_pressed(
        &mut self,
        coordinate: Coordinate,
        pressed: bool,
    ) -> Result<&Button, LaunchpadError> {
        let index = index_of(coordinate).ok_or_else(|| LaunchpadError::out_of_range(coordinate))?;
        let button = &mut self.buttons[index];
        button.pressed = pressed;
        Ok(button)
    }

    pub(crate) fn clear_pressed(&mut self) {
        for button in &mut self.buttons {
            button.pressed = false;
        }
    }

    pub fn pressed(&self) -> impl Iterator<Item = &Button> + '_ {
        self.buttons.iter().filter(|button| button.pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn group_sizes() {
        let topology = Topology::new();
        assert_eq!(topology.all().len(), 80);
        assert_eq!(topology.grid().len(), 64);
        assert_eq!(topology.automap().len(), 8);
        assert_eq!(topology.scene().len(), 8);
    }

    #[test]
    fn groups_are_row_major() {
        let topology = Topology::new();
        let scene: Vec<Coordinate> = topology.scene().iter().map(|b| b.coordinate).collect();
        let expected: Vec<Coordinate> = (0..8).map(|y| Coordinate::new(8, y)).collect();
        assert_eq!(scene, expected);

        let automap: Vec<u8> = topology.automap().iter().map(|b| b.x()).collect();
        assert_eq!(automap, (0..8).collect::<Vec<_>>());

        for (index, button) in topology.all().iter().enumerate() {
            assert_eq!(usize::from(button.x()) + 9 * usize::from(button.y()), index);
        }
    }

    #[test]
    fn protocol_fields() {
        let topology = Topology::new();
        let pad = topology.coordinate_for(3, 2).unwrap();
        assert_eq!(pad.family, CommandFamily::Grid);
        assert_eq!(pad.key, 0x23);

        let scene = topology.coordinate_for(8, 7).unwrap();
        assert_eq!(scene.family, CommandFamily::Grid);
        assert_eq!(scene.key, 0x78);

        let automap = topology.coordinate_for(2, 8).unwrap();
        assert_eq!(automap.family, CommandFamily::Control);
        assert_eq!(automap.key, 0x6A);
        assert_eq!(automap.family.status(), 0xB0);
    }

    #[test]
    fn out_of_range_coordinates() {
        let topology = Topology::new();
        for (x, y) in [(8, 8), (9, 0), (0, 9), (255, 255)] {
            let err = topology.coordinate_for(x, y).unwrap_err();
            assert_eq!(err.code, ErrorCode::OutOfRange);
        }
    }

    #[test]
    fn identities_are_unique_and_resolvable() {
        let topology = Topology::new();
        let ids: std::collections::HashSet<_> = topology.all().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 80);

        let button = topology.coordinate_for(5, 1).unwrap();
        let found = topology.button_for(button.id).unwrap();
        assert_eq!(found.coordinate, Coordinate::new(5, 1));
    }

    #[test]
    fn identities_are_stable_across_topologies() {
        let a = Topology::new();
        let b = Topology::new();
        assert_eq!(
            a.coordinate_for(4, 4).unwrap().id,
            b.coordinate_for(4, 4).unwrap().id
        );
    }

    #[test]
    fn unknown_identity() {
        let topology = Topology::new();
        let err = topology
            .button_for(ButtonId::from_uuid(Uuid::nil()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownIdentity);
    }

    #[test]
    fn pressed_state() {
        let mut topology = Topology::new();
        topology.set_pressed(Coordinate::new(1, 1), true).unwrap();
        topology.set_pressed(Coordinate::new(8, 0), true).unwrap();
        topology.set_pressed(Coordinate::new(1, 1), false).unwrap();

        let pressed: Vec<Coordinate> = topology.pressed().map(|b| b.coordinate).collect();
        assert_eq!(pressed, vec![Coordinate::new(8, 0)]);

        topology.clear_pressed();
        assert_eq!(topology.pressed().count(), 0);
    }
}
