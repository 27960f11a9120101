//! Settings resolved from the environment.
//!
//! - `LAUNCHPAD_PACE`: messages per millisecond assumed by the bulk-write
//!   throttle (positive integer, default 20)
//! - `LAUNCHPAD_PORT`: keyword identifying the device's MIDI ports
//!   (default "Launchpad")
//!
//! Empty values are ignored. Invalid values are ignored with a warning.

use std::env;

use launchpad_core::config::{PacerConfig, DEFAULT_MESSAGES_PER_MS, DEFAULT_PORT_KEYWORD};

pub const PACE_VAR: &str = "LAUNCHPAD_PACE";
pub const PORT_VAR: &str = "LAUNCHPAD_PORT";

/// Get the pacer configuration from env or default.
pub fn get_pacer_config() -> PacerConfig {
    let messages_per_ms = match env::var(PACE_VAR) {
        Ok(value) if !value.is_empty() => parse_pace(&value).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid {} '{}', using {}. Expected a positive integer.",
                PACE_VAR,
                value,
                DEFAULT_MESSAGES_PER_MS
            );
            DEFAULT_MESSAGES_PER_MS
        }),
        _ => DEFAULT_MESSAGES_PER_MS,
    };
    PacerConfig { messages_per_ms }
}

/// Get the port keyword from env or default.
pub fn get_port_keyword() -> String {
    match env::var(PORT_VAR) {
        Ok(keyword) if !keyword.is_empty() => keyword,
        _ => DEFAULT_PORT_KEYWORD.to_string(),
    }
}

pub(crate) fn parse_pace(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|&n| n > 0)
}
