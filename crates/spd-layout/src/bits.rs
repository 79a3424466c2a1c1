//! Bitfield extraction from single SPD bytes.
//!
//! Every SPD field is an inclusive bit range `[upper:lower]` within one byte.
//! Ranges are compile-time constants in [`crate::fields`], so an invalid
//! range is a programming error rather than a runtime condition: both
//! [`extract_bits`] and [`BitRange::new`] assert `lower <= upper <= 7`, which
//! turns a bad table entry into a compile error when evaluated in a const
//! context.

/// Return bits `[upper:lower]` of `value`, shifted down to bit 0.
///
/// # Panics
///
/// Panics if `upper < lower` or `upper > 7`.
#[must_use]
pub const fn extract_bits(value: u8, upper: u8, lower: u8) -> u8 {
    assert!(lower <= upper && upper <= 7, "bit range must satisfy lower <= upper <= 7");
    let width = upper - lower + 1;
    // u16 so that a full [7:0] mask does not overflow
    let mask = ((1u16 << width) - 1) as u8;
    (value >> lower) & mask
}

/// Inclusive bit range within one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitRange {
    upper: u8,
    lower: u8,
}

impl BitRange {
    /// The whole byte, `[7:0]`.
    pub const FULL: Self = Self::new(7, 0);

    /// Build `[upper:lower]`.
    ///
    /// # Panics
    ///
    /// Panics if `upper < lower` or `upper > 7`.
    #[must_use]
    pub const fn new(upper: u8, lower: u8) -> Self {
        assert!(lower <= upper && upper <= 7, "bit range must satisfy lower <= upper <= 7");
        Self { upper, lower }
    }

    /// Single bit `[bit:bit]`.
    #[must_use]
    pub const fn bit(bit: u8) -> Self {
        Self::new(bit, bit)
    }

    /// Highest bit index.
    #[must_use]
    pub const fn upper(&self) -> u8 {
        self.upper
    }

    /// Lowest bit index.
    #[must_use]
    pub const fn lower(&self) -> u8 {
        self.lower
    }

    /// Number of bits covered.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.upper - self.lower + 1
    }

    /// Extract this range from `value`.
    #[must_use]
    pub const fn extract(&self, value: u8) -> u8 {
        extract_bits(value, self.upper, self.lower)
    }
}

impl core::fmt::Display for BitRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}:{}]", self.upper, self.lower)
    }
}
