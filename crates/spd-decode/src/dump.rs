//! Capture framing: sentinel-delimited JSON payload
//!
//! The dumping firmware prints console noise around a region like:
//!
//! ```text
//! --------JSON DUMP START--------
//! { "DDR4_B": [ 35,  17,  12,   2, ...
//!              ...] }
//! --------JSON DUMP END--------
//! ```
//!
//! A line *containing* a marker is a sentinel; the payload is every line
//! strictly between the first start sentinel and the next end sentinel.
//! Only [`extract_payload`] knows about the surrounding text.

use crate::buffer::RawSpdBuffer;
use crate::channel::{ChannelId, ChannelSet};
use crate::error::{Result, SpdError};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Default start sentinel
pub const DEFAULT_START_MARKER: &str = "JSON DUMP START";

/// Default end sentinel
pub const DEFAULT_END_MARKER: &str = "JSON DUMP END";

/// Sentinel strings bounding the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Substring identifying the start line
    pub start: String,
    /// Substring identifying the end line
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Return the payload lines between the sentinels, joined with `\n`.
///
/// # Errors
///
/// Returns `MalformedInput` if either sentinel is missing.
pub fn extract_payload(text: &str, markers: &Markers) -> Result<String> {
    let mut lines = text.lines();

    if !lines.by_ref().any(|line| line.contains(&markers.start)) {
        return Err(SpdError::malformed(format!(
            "start marker {:?} not found",
            markers.start
        )));
    }

    let mut payload = Vec::new();
    for line in lines {
        if line.contains(&markers.end) {
            tracing::debug!("Extracted {} payload line(s)", payload.len());
            return Ok(payload.join("\n"));
        }
        payload.push(line);
    }

    Err(SpdError::malformed(format!(
        "end marker {:?} not found",
        markers.end
    )))
}

/// Parse a payload document into a channel set.
///
/// The document is a JSON object mapping channel keys (`DDR4_A` … `DDR4_D`)
/// to arrays of byte values.
///
/// # Errors
///
/// - `Json` if the payload is not an object of byte arrays (values above 255
///   included)
/// - `MalformedInput` for unknown or repeated keys, oversized arrays, or no
///   channels
pub fn parse_channels(payload: &str) -> Result<ChannelSet> {
    let RawChannels(raw) = serde_json::from_str(payload)?;

    let entries = raw
        .into_iter()
        .map(|(key, bytes)| -> Result<(ChannelId, RawSpdBuffer)> {
            let id: ChannelId = key.parse()?;
            tracing::debug!("Channel {}: {} bytes", id, bytes.len());
            Ok((id, RawSpdBuffer::new(bytes)?))
        })
        .collect::<Result<Vec<_>>>()?;

    ChannelSet::new(entries)
}

/// Payload object in document order, keeping every entry of a repeated key.
struct RawChannels(Vec<(String, Vec<u8>)>);

impl<'de> Deserialize<'de> for RawChannels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawChannels;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping channel keys to byte arrays")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RawChannels, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<u8>>()? {
                    entries.push(entry);
                }
                Ok(RawChannels(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Extract and parse a complete capture.
///
/// # Errors
///
/// Any error from [`extract_payload`] or [`parse_channels`].
pub fn read_capture(text: &str, markers: &Markers) -> Result<ChannelSet> {
    let payload = extract_payload(text, markers)?;
    parse_channels(&payload)
}
