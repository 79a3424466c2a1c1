//! One channel's captured EEPROM bytes

use crate::error::{Result, SpdError};
use spd_layout::offsets::SPD_MAX_BYTES;
use std::ops::Deref;

/// Raw SPD bytes for one channel, at most 512.
///
/// May be shorter than the size declared in byte 0 when the download was
/// cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpdBuffer {
    bytes: Vec<u8>,
}

impl RawSpdBuffer {
    /// Wrap captured bytes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if more than 512 bytes are given.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > SPD_MAX_BYTES {
            return Err(SpdError::malformed(format!(
                "SPD dump has {} bytes, EEPROM holds at most {SPD_MAX_BYTES}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for RawSpdBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for RawSpdBuffer {
    type Error = SpdError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}
