//! Error types with actionable suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::Coordinate;
use crate::topology::ButtonId;

/// Error codes surfaced by the core.
///
/// Malformed patterns never produce an error: they decode to an empty
/// coordinate list so partially typed patterns stay usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    OutOfRange,
    UnknownIdentity,
    UnrecognizedMessage,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::OutOfRange => write!(f, "OUT_OF_RANGE"),
            ErrorCode::UnknownIdentity => write!(f, "UNKNOWN_IDENTITY"),
            ErrorCode::UnrecognizedMessage => write!(f, "UNRECOGNIZED_MESSAGE"),
        }
    }
}

/// An error with a hint on how to recover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchpadError {
    pub code: ErrorCode,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for LaunchpadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for LaunchpadError {}

impl LaunchpadError {
    /// Coordinate outside the 9×9 grid, or the unused `(8, 8)` cell.
    pub fn out_of_range(coordinate: Coordinate) -> Self {
        Self {
            code: ErrorCode::OutOfRange,
            message: format!("No button at {}", coordinate),
            suggestion: Some(
                "x and y must be between 0 and 8, and (8, 8) is not a button".into(),
            ),
        }
    }

    pub fn unknown_identity(id: ButtonId) -> Self {
        Self {
            code: ErrorCode::UnknownIdentity,
            message: format!("No button with identity {}", id),
            suggestion: Some(
                "Identities are issued once per process; use an id taken from a button or key event"
                    .into(),
            ),
        }
    }

    /// Inbound bytes that are not a grid or control key message.
    pub fn unrecognized_message(bytes: &[u8]) -> Self {
        let hex = bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let shown = if hex.is_empty() { "(empty)".to_string() } else { hex };
        Self {
            code: ErrorCode::UnrecognizedMessage,
            message: format!("Unrecognized message: {}", shown),
            suggestion: Some(
                "Only 3-byte messages with status 0x90 (grid) or 0xb0 (control) are key events"
                    .into(),
            ),
        }
    }
}
