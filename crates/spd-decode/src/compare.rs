//! Byte-for-byte consistency check across channels
//!
//! Modules populated as a matched set should carry identical SPD contents.
//! Every channel is compared against the reference channel (the first in
//! [`ChannelId`] order).

use crate::channel::{ChannelId, ChannelSet};
use crate::error::{Result, SpdError};
use serde::Serialize;

/// One byte that differs from the reference channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    /// Byte offset
    pub offset: usize,
    /// Reference channel's byte
    pub reference_value: u8,
    /// Channel that differs
    pub channel: ChannelId,
    /// That channel's byte
    pub value: u8,
}

/// Outcome of comparing a channel set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "discrepancies", rename_all = "snake_case")]
pub enum Comparison {
    /// All channels carry the same bytes
    Identical,
    /// Differences ordered by offset, then channel
    Differ(Vec<Discrepancy>),
}

impl Comparison {
    /// True if no discrepancies were found.
    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical)
    }

    /// Discrepancy records, empty when identical.
    pub fn discrepancies(&self) -> &[Discrepancy] {
        match self {
            Self::Identical => &[],
            Self::Differ(list) => list,
        }
    }
}

/// Compare every channel in `set` against the reference channel.
///
/// # Errors
///
/// Returns `ChannelLengthMismatch` for the first channel whose length differs
/// from the reference. No bytes are compared in that case.
pub fn compare(set: &ChannelSet) -> Result<Comparison> {
    let (reference, ref_bytes) = set.reference();

    for (channel, bytes) in set.iter().skip(1) {
        if bytes.len() != ref_bytes.len() {
            return Err(SpdError::ChannelLengthMismatch {
                reference,
                reference_len: ref_bytes.len(),
                channel,
                len: bytes.len(),
            });
        }
    }

    let others: Vec<_> = set.iter().skip(1).collect();
    let mut discrepancies = Vec::new();
    for (offset, &reference_value) in ref_bytes.iter().enumerate() {
        for (channel, bytes) in &others {
            let value = bytes[offset];
            if value != reference_value {
                discrepancies.push(Discrepancy {
                    offset,
                    reference_value,
                    channel: *channel,
                    value,
                });
            }
        }
    }

    tracing::debug!(
        "Compared {} channel(s) of {} bytes against {}: {} discrepancies",
        set.len(),
        ref_bytes.len(),
        reference,
        discrepancies.len()
    );

    if discrepancies.is_empty() {
        Ok(Comparison::Identical)
    } else {
        Ok(Comparison::Differ(discrepancies))
    }
}
