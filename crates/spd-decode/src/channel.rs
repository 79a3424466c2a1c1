//! Memory channels and their captured SPD buffers

use crate::buffer::RawSpdBuffer;
use crate::error::{Result, SpdError};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Memory channel identifier.
///
/// Ordering is fixed (A < B < C < D); the first present channel is the
/// comparison reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelId {
    /// `DDR4_A`
    A,
    /// `DDR4_B`
    B,
    /// `DDR4_C`
    C,
    /// `DDR4_D`
    D,
}

impl ChannelId {
    /// All channels in reference order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Key used in captures, e.g. `DDR4_B`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "DDR4_A",
            Self::B => "DDR4_B",
            Self::C => "DDR4_C",
            Self::D => "DDR4_D",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChannelId {
    type Err = SpdError;

    /// Accepts `DDR4_B` or a bare `B`, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let letter = upper.strip_prefix("DDR4_").unwrap_or(&upper);
        match letter {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(SpdError::malformed(format!("unknown channel key {s:?}"))),
        }
    }
}

impl serde::Serialize for ChannelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Captured buffers keyed by channel, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    channels: BTreeMap<ChannelId, RawSpdBuffer>,
}

impl ChannelSet {
    /// Build from channel/buffer pairs.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if no channels are given or one appears twice.
    pub fn new(entries: impl IntoIterator<Item = (ChannelId, RawSpdBuffer)>) -> Result<Self> {
        let mut channels = BTreeMap::new();
        for (id, buffer) in entries {
            if channels.insert(id, buffer).is_some() {
                return Err(SpdError::malformed(format!("channel {id} appears twice")));
            }
        }
        if channels.is_empty() {
            return Err(SpdError::malformed("capture contains no channels"));
        }
        Ok(Self { channels })
    }

    /// Number of channels present.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True only for a set with no channels, which `new` never builds.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Buffer for one channel.
    pub fn get(&self, id: ChannelId) -> Option<&RawSpdBuffer> {
        self.channels.get(&id)
    }

    /// Channels in reference order.
    pub fn ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.keys().copied()
    }

    /// Channel/buffer pairs in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &RawSpdBuffer)> {
        self.channels.iter().map(|(id, buf)| (*id, buf))
    }

    /// First channel in the fixed ordering.
    pub fn reference(&self) -> (ChannelId, &RawSpdBuffer) {
        self.iter()
            .next()
            .unwrap_or_else(|| unreachable!("ChannelSet is never empty"))
    }

    /// Check that every expected channel is present.
    ///
    /// # Errors
    ///
    /// Returns `MissingChannel` for the first absent channel.
    pub fn require(&self, expected: &[ChannelId]) -> Result<()> {
        match expected.iter().find(|id| !self.channels.contains_key(*id)) {
            Some(&channel) => Err(SpdError::MissingChannel { channel }),
            None => Ok(()),
        }
    }

    /// Keep only the listed channels.
    ///
    /// # Errors
    ///
    /// Returns `MissingChannel` if a listed channel is absent.
    pub fn select(&self, wanted: &[ChannelId]) -> Result<Self> {
        self.require(wanted)?;
        Self::new(
            self.iter()
                .filter(|(id, _)| wanted.contains(id))
                .map(|(id, buf)| (id, buf.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(len: usize) -> RawSpdBuffer {
        RawSpdBuffer::new(vec![0; len]).unwrap()
    }

    #[test]
    fn parses_labels_and_letters() {
        assert_eq!("DDR4_A".parse::<ChannelId>().unwrap(), ChannelId::A);
        assert_eq!("ddr4_c".parse::<ChannelId>().unwrap(), ChannelId::C);
        assert_eq!(" d ".parse::<ChannelId>().unwrap(), ChannelId::D);
        assert!("DDR4_E".parse::<ChannelId>().is_err());
        assert!("DDR3_A".parse::<ChannelId>().is_err());
    }

    #[test]
    fn reference_is_first_in_fixed_order() {
        let set = ChannelSet::new([(ChannelId::D, buf(4)), (ChannelId::B, buf(4))]).unwrap();
        assert_eq!(set.reference().0, ChannelId::B);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![ChannelId::B, ChannelId::D]);
    }

    #[test]
    fn empty_and_duplicate_rejected() {
        assert!(matches!(
            ChannelSet::new(Vec::<(ChannelId, RawSpdBuffer)>::new()),
            Err(SpdError::MalformedInput { .. })
        ));
        assert!(matches!(
            ChannelSet::new([(ChannelId::A, buf(1)), (ChannelId::A, buf(1))]),
            Err(SpdError::MalformedInput { .. })
        ));
    }

    #[test]
    fn require_reports_missing_channel() {
        let set = ChannelSet::new([(ChannelId::A, buf(4)), (ChannelId::B, buf(4))]).unwrap();
        assert!(set.require(&[ChannelId::A, ChannelId::B]).is_ok());
        assert!(matches!(
            set.require(&ChannelId::ALL),
            Err(SpdError::MissingChannel {
                channel: ChannelId::C
            })
        ));
    }

    #[test]
    fn select_subset() {
        let set = ChannelSet::new(ChannelId::ALL.map(|id| (id, buf(2)))).unwrap();
        let only_b = set.select(&[ChannelId::B]).unwrap();
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b.reference().0, ChannelId::B);
    }
}
