//! LED colours and their protocol byte.
//!
//! Each LED has a red and a green element with four brightness levels
//! (0 = off to 3 = full). A colour also says what happens to the same LED in
//! the other buffer: cleared, overwritten with this colour, or untouched.
//!
//! ```
//! use launchpad_core::color::Color;
//!
//! assert_eq!(Color::RED.code(), 3);
//! assert_eq!(Color::GREEN.low().code(), 16);
//! assert_eq!(Color::AMBER.copying_other().code(), 55);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest brightness level.
pub const MAX_LEVEL: u8 = 3;

const GREEN_WEIGHT: u8 = 0b10000;
const CLEAR_BIT: u8 = 0b01000;
const COPY_BIT: u8 = 0b00100;
const RED_WEIGHT: u8 = 0b00001;

/// Palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hue {
    Red,
    Green,
    Amber,
    /// Only one yellow is achievable, so any non-zero level gives the same LED state.
    Yellow,
    Off,
}

impl Hue {
    fn red_active(self) -> bool {
        matches!(self, Hue::Red | Hue::Amber)
    }

    fn green_active(self) -> bool {
        matches!(self, Hue::Green | Hue::Amber)
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hue::Red => "red",
            Hue::Green => "green",
            Hue::Amber => "amber",
            Hue::Yellow => "yellow",
            Hue::Off => "off",
        };
        f.write_str(name)
    }
}

impl FromStr for Hue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Hue::Red),
            "green" => Ok(Hue::Green),
            "amber" => Ok(Hue::Amber),
            "yellow" => Ok(Hue::Yellow),
            "off" => Ok(Hue::Off),
            other => Err(format!(
                "unknown colour '{}', expected red, green, amber, yellow or off",
                other
            )),
        }
    }
}

/// An immutable colour value. Every modifier returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    hue: Hue,
    level: u8,
    clear_other: bool,
    copy_other: bool,
}

impl Color {
    pub const RED: Color = Color::new(Hue::Red);
    pub const GREEN: Color = Color::new(Hue::Green);
    pub const AMBER: Color = Color::new(Hue::Amber);
    pub const YELLOW: Color = Color::new(Hue::Yellow);
    pub const OFF: Color = Color::new(Hue::Off);

    /// Full brightness, other buffer untouched.
    #[must_use]
    pub const fn new(hue: Hue) -> Self {
        Self {
            hue,
            level: MAX_LEVEL,
            clear_other: false,
            copy_other: false,
        }
    }

    pub fn hue(&self) -> Hue {
        self.hue
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn clears_other(&self) -> bool {
        self.clear_other
    }

    pub fn copies_other(&self) -> bool {
        self.copy_other
    }

    /// Set the level, rounded and clamped to `0..=3`. NaN gives 0.
    #[must_use]
    pub fn with_level(self, level: impl Into<f64>) -> Self {
        let level = level.into().round().clamp(0.0, f64::from(MAX_LEVEL));
        Self {
            level: level as u8,
            ..self
        }
    }

    #[must_use]
    pub fn off(self) -> Self {
        self.with_level(0)
    }

    #[must_use]
    pub fn low(self) -> Self {
        self.with_level(1)
    }

    #[must_use]
    pub fn medium(self) -> Self {
        self.with_level(2)
    }

    #[must_use]
    pub fn full(self) -> Self {
        self.with_level(3)
    }

    /// Turn the LED off in the other buffer.
    #[must_use]
    pub fn clearing_other(self) -> Self {
        Self {
            clear_other: true,
            ..self
        }
    }

    /// Write the same colour to the other buffer. Both flag bits are encoded
    /// when combined with [`Color::clearing_other`]; the device honours the copy.
    #[must_use]
    pub fn copying_other(self) -> Self {
        Self {
            copy_other: true,
            ..self
        }
    }

    /// Protocol byte: `16 * green + 8 * clear + 4 * copy + red`.
    pub fn code(&self) -> u8 {
        let (red, green) = if self.hue == Hue::Yellow && self.level > 0 {
            (2, 3)
        } else {
            (
                self.level * u8::from(self.hue.red_active()),
                self.level * u8::from(self.hue.green_active()),
            )
        };
        GREEN_WEIGHT * green
            + CLEAR_BIT * u8::from(self.clear_other)
            + COPY_BIT * u8::from(self.copy_other)
            + RED_WEIGHT * red
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::OFF
    }
}

/// A colour byte as sent on the wire.
///
/// Write operations accept either a [`Color`] or a raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorCode(pub u8);

impl From<Color> for ColorCode {
    fn from(color: Color) -> Self {
        ColorCode(color.code())
    }
}

impl From<&Color> for ColorCode {
    fn from(color: &Color) -> Self {
        ColorCode(color.code())
    }
}

impl From<u8> for ColorCode {
    fn from(code: u8) -> Self {
        ColorCode(code)
    }
}
