// SPDX-License-Identifier: MPL-2.0
//! Server-Sent Events decoding for realtime database streams.
//!
//! A streaming GET answers with blocks separated by a blank line:
//!
//! ```text
//! event: put
//! data: {"path":"/","data":{"trials":10}}
//! ```
//!
//! [`EventParser`] accepts arbitrary byte chunks and yields one
//! [`DatabaseEvent`] per complete block.

use crate::error::{BackendError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Change notification received from a listened path.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseEvent {
    /// `data` replaces the value at `path` (relative to the listened path).
    Put { path: String, data: Value },
    /// `data` children are merged into the value at `path`.
    Patch { path: String, data: Value },
    KeepAlive,
    /// The server cancelled the stream, usually because read access was denied.
    Cancel,
    /// The credential used for the stream expired or was revoked.
    AuthRevoked,
    Unknown { name: String, data: String },
}

#[derive(Deserialize)]
struct ChangePayload {
    path: String,
    #[serde(default)]
    data: Value,
}

/// Incremental SSE block parser.
///
/// Line endings are normalized to `\n` on the way in (`\r\n` and a lone
/// `\r` both end a line). Each byte is scanned for a block terminator once.
#[derive(Debug, Default)]
pub struct EventParser {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already searched for a blank line.
    scanned: usize,
    /// Last byte seen was `\r`; a following `\n` completes the same line ending.
    after_cr: bool,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<DatabaseEvent>> {
        self.buffer.reserve(chunk.len());
        for &byte in chunk {
            match byte {
                b'\r' => {
                    self.buffer.push(b'\n');
                    self.after_cr = true;
                }
                b'\n' if self.after_cr => self.after_cr = false,
                _ => {
                    self.buffer.push(byte);
                    self.after_cr = false;
                }
            }
        }

        let mut events = Vec::new();
        let mut consumed = 0;
        let mut cursor = self.scanned.saturating_sub(1);
        while let Some(offset) = self.buffer[cursor..]
            .windows(2)
            .position(|w| w == b"\n\n")
        {
            let end = cursor + offset;
            let text = String::from_utf8_lossy(&self.buffer[consumed..end]);
            if let Some(event) = parse_block(&text) {
                events.push(event);
            }
            consumed = end + 2;
            cursor = consumed;
        }

        self.buffer.drain(..consumed);
        self.scanned = self.buffer.len();
        events
    }

    /// Bytes received but not yet terminated by a blank line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn parse_block(block: &str) -> Option<Result<DatabaseEvent>> {
    let mut name: Option<&str> = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in block.lines() {
        if line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => name = Some(value),
            "data" => data_lines.push(value),
            _ => {}
        }
    }

    if name.is_none() && data_lines.is_empty() {
        return None;
    }

    let data = data_lines.join("\n");
    let event = match name.unwrap_or("message") {
        "put" => decode_change(&data).map(|(path, data)| DatabaseEvent::Put { path, data }),
        "patch" => decode_change(&data).map(|(path, data)| DatabaseEvent::Patch { path, data }),
        "keep-alive" => Ok(DatabaseEvent::KeepAlive),
        "cancel" => Ok(DatabaseEvent::Cancel),
        "auth_revoked" => Ok(DatabaseEvent::AuthRevoked),
        other => Ok(DatabaseEvent::Unknown {
            name: other.to_string(),
            data,
        }),
    };
    Some(event)
}

fn decode_change(data: &str) -> Result<(String, Value)> {
    let payload: ChangePayload =
        serde_json::from_str(data).map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok((payload.path, payload.data))
}
