//! Error types for SPD decoding and channel comparison

use crate::channel::ChannelId;
use thiserror::Error;

/// Result type alias for SPD operations
pub type Result<T> = std::result::Result<T, SpdError>;

/// Errors that can occur while reading a capture, decoding a channel, or
/// comparing channels
#[derive(Debug, Error)]
pub enum SpdError {
    /// Device type byte is not the DDR4 code
    #[error("{channel}: not a DDR4 format: code={code}")]
    UnsupportedFormat {
        /// Channel being decoded
        channel: ChannelId,
        /// Device type byte found at offset 2
        code: u8,
    },

    /// Buffer ends before a mandatory field
    #[error("{channel}: SPD dump truncated: need byte {offset:#05x} but only {len} bytes downloaded")]
    Truncated {
        /// Channel being decoded
        channel: ChannelId,
        /// Offset that was required
        offset: usize,
        /// Bytes available
        len: usize,
    },

    /// Minimum cycle time byte is zero
    #[error("{channel}: minimum cycle time is zero, speed grade undefined")]
    InvalidCycleTime {
        /// Channel being decoded
        channel: ChannelId,
    },

    /// Capture text or payload could not be interpreted
    #[error("Malformed input: {reason}")]
    MalformedInput {
        /// Reason for failure
        reason: String,
    },

    /// An expected channel is absent from the capture
    #[error("Channel {channel} missing from capture")]
    MissingChannel {
        /// Channel that was expected
        channel: ChannelId,
    },

    /// Channels cannot be compared byte for byte
    #[error(
        "Channel length mismatch: {reference} has {reference_len} bytes, {channel} has {len}"
    )]
    ChannelLengthMismatch {
        /// Reference channel
        reference: ChannelId,
        /// Reference length
        reference_len: usize,
        /// Channel that differs
        channel: ChannelId,
        /// Its length
        len: usize,
    },

    /// Payload is not valid JSON or has the wrong shape
    #[error("Malformed input: payload JSON: {source}")]
    Json {
        /// Underlying parse error
        #[from]
        source: serde_json::Error,
    },
}

impl SpdError {
    /// Create a malformed input error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Channel the error is scoped to, if any
    pub fn channel(&self) -> Option<ChannelId> {
        match self {
            Self::UnsupportedFormat { channel, .. }
            | Self::Truncated { channel, .. }
            | Self::InvalidCycleTime { channel }
            | Self::MissingChannel { channel }
            | Self::ChannelLengthMismatch { channel, .. } => Some(*channel),
            Self::MalformedInput { .. } | Self::Json { .. } => None,
        }
    }
}

/// Recoverable conditions raised while decoding.
///
/// Decoding continues with the affected field marked unknown or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Module type byte is not in the form factor table
    UnknownFormFactor {
        /// Raw module type byte
        code: u8,
    },
    /// Density exponent has no defined capacity
    UnknownDensity {
        /// Raw density nibble
        code: u8,
    },
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFormFactor { code } => write!(f, "Unknown UDIMM format: {code:#04x}"),
            Self::UnknownDensity { code } => write!(f, "Unknown density: code={code}"),
        }
    }
}
