//! Line-oriented transport over standard streams.
//!
//! Outbound messages are written as hex, one per line. Inbound messages are
//! read the same way and turned into JSON key events.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use launchpad_core::{KeyEvent, Launchpad, Message, Transport};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::hex;

/// Writes each message as a hex line.
pub struct LineTransport<W: Write> {
    out: W,
}

impl<W: Write> LineTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Transport for LineTransport<W> {
    fn send(&mut self, message: Message) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            warn!("Failed to write message {}: {}", message, e);
        }
    }
}

/// One line of `monitor` output.
#[derive(Debug, Serialize)]
pub struct MonitorLine {
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: KeyEvent,
}

/// Feed hex lines from `input` through the controller until EOF.
///
/// Lines that do not parse, or do not decode to a key event, are logged
/// and skipped. Returns the number of events written.
pub async fn monitor<T, R, W>(launchpad: &mut Launchpad<T>, input: R, out: &mut W) -> Result<usize>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut count = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let bytes = match hex::parse_message(line) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping input line: {}", e);
                continue;
            }
        };

        let Some(event) = launchpad.handle_message(&bytes) else {
            continue;
        };

        let record = MonitorLine {
            received_at: Utc::now(),
            event,
        };
        writeln!(out, "{}", serde_json::to_string(&record)?).context("Failed to write event")?;
        count += 1;
    }

    debug!("Input closed after {} events", count);
    Ok(count)
}

/// Decode hex messages given as arguments and print each key event.
///
/// Bad messages are logged and skipped, the same as in [`monitor`].
/// Returns the number of events written.
pub fn decode_all<T, S, W>(launchpad: &mut Launchpad<T>, messages: &[S], out: &mut W) -> Result<usize>
where
    T: Transport,
    S: AsRef<str>,
    W: Write,
{
    let mut count = 0;

    for text in messages {
        let text = text.as_ref();
        let bytes = match hex::parse_message(text) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping '{}': {}", text, e);
                continue;
            }
        };

        let Some(event) = launchpad.handle_message(&bytes) else {
            continue;
        };

        writeln!(out, "{}", serde_json::to_string_pretty(&event)?).context("Failed to write event")?;
        count += 1;
    }

    Ok(count)
}
