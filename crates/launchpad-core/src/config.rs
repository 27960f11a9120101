//! Tunables shared by the controller and its front ends.

use serde::{Deserialize, Serialize};

/// Messages the pacer assumes the device absorbs per millisecond.
pub const DEFAULT_MESSAGES_PER_MS: u32 = 20;

/// Port-name keyword identifying the device.
pub const DEFAULT_PORT_KEYWORD: &str = "Launchpad";

/// Throttle settings for bulk writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacerConfig {
    /// Zero is treated as one.
    pub messages_per_ms: u32,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            messages_per_ms: DEFAULT_MESSAGES_PER_MS,
        }
    }
}

/// Does a MIDI port name belong to the device?
///
/// Substring match, as port names carry vendor and index decorations
/// (e.g. `"Launchpad S:Launchpad S MIDI 1 20:0"`).
pub fn port_matches(name: &str, keyword: &str) -> bool {
    !keyword.is_empty() && name.contains(keyword)
}
