//! Field layout table: semantic name → (offset, bit range, scaling rule).
//!
//! Each entry is a `const`, so [`BitRange::new`] validates every range when
//! the crate compiles. The decoder reads fields exclusively through this
//! table; [`LAYOUT`] lists them all for display.

use crate::bits::BitRange;
use crate::offsets;
use crate::timebase;

/// How a raw bitfield maps to a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scaling {
    /// Value used as-is.
    Raw,
    /// `raw + n` (counts stored minus their minimum).
    Add(u32),
    /// `base << raw` (power-of-two widths and sizes).
    Shl(u32),
    /// `k * raw`.
    Mul(u32),
    /// `raw * MTB` nanoseconds.
    Mtb,
}

impl Scaling {
    /// Apply an integer rule. `None` for [`Scaling::Mtb`], which is real-valued.
    #[must_use]
    pub const fn integer(self, raw: u8) -> Option<u32> {
        let raw = raw as u32;
        match self {
            Self::Raw => Some(raw),
            Self::Add(n) => Some(raw + n),
            Self::Shl(base) => Some(base << raw),
            Self::Mul(k) => Some(k * raw),
            Self::Mtb => None,
        }
    }

    /// Apply the timebase rule. `None` for integer rules.
    #[must_use]
    pub fn nanos(self, raw: u8) -> Option<f64> {
        match self {
            Self::Mtb => Some(timebase::mtb_to_ns(raw)),
            _ => None,
        }
    }
}

impl core::fmt::Display for Scaling {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Add(n) => write!(f, "raw + {n}"),
            Self::Shl(base) => write!(f, "{base} << raw"),
            Self::Mul(k) => write!(f, "{k} * raw"),
            Self::Mtb => write!(f, "raw * {} ns", timebase::MTB_NS),
        }
    }
}

/// One named field of the SPD layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSpec {
    /// Semantic name.
    pub name: &'static str,
    /// Byte offset in the EEPROM.
    pub offset: usize,
    /// Bit range within the byte.
    pub bits: BitRange,
    /// Scaling rule applied to the extracted bits.
    pub scaling: Scaling,
}

impl FieldSpec {
    const fn new(name: &'static str, offset: usize, bits: BitRange, scaling: Scaling) -> Self {
        Self {
            name,
            offset,
            bits,
            scaling,
        }
    }

    /// Extract the raw bits of this field from `spd`, `None` if out of range.
    #[must_use]
    pub fn raw(&self, spd: &[u8]) -> Option<u8> {
        spd.get(self.offset).map(|&byte| self.bits.extract(byte))
    }
}

/// Declared EEPROM size, in 128-byte units.
pub const BYTES_USED: FieldSpec = FieldSpec::new(
    "bytes_used",
    offsets::BYTES_USED,
    BitRange::new(3, 0),
    Scaling::Mul(offsets::BYTES_USED_UNIT),
);
/// SPD encoding revision, reported as-is.
pub const SPD_REVISION: FieldSpec =
    FieldSpec::new("spd_revision", offsets::SPD_REVISION, BitRange::FULL, Scaling::Raw);
/// DRAM device type; must be DDR4 (`0x0C`).
pub const DEVICE_TYPE: FieldSpec =
    FieldSpec::new("device_type", offsets::DEVICE_TYPE, BitRange::FULL, Scaling::Raw);
/// Module form factor code.
pub const MODULE_TYPE: FieldSpec =
    FieldSpec::new("module_type", offsets::MODULE_TYPE, BitRange::FULL, Scaling::Raw);

/// Density exponent; `256 << b` Mb, valid only for `b <= MAX_DENSITY_EXPONENT`.
pub const DENSITY: FieldSpec = FieldSpec::new(
    "density_per_chip_mb",
    offsets::DENSITY_BANKS,
    BitRange::new(3, 0),
    Scaling::Shl(256),
);
/// Largest density exponent with a defined capacity (32 Gb).
pub const MAX_DENSITY_EXPONENT: u8 = 7;

/// Banks per bank group: `4 << bits[5:4]`.
pub const BANKS_PER_GROUP: FieldSpec = FieldSpec::new(
    "banks_per_group",
    offsets::DENSITY_BANKS,
    BitRange::new(5, 4),
    Scaling::Shl(4),
);
/// Bank groups: `2 * bits[7:6]`.
pub const BANK_GROUPS: FieldSpec = FieldSpec::new(
    "bank_groups",
    offsets::DENSITY_BANKS,
    BitRange::new(7, 6),
    Scaling::Mul(2),
);
/// Column address bits: `bits[2:0] + 9`.
pub const COLUMN_ADDRESS_BITS: FieldSpec = FieldSpec::new(
    "column_address_bits",
    offsets::ADDRESSING,
    BitRange::new(2, 0),
    Scaling::Add(9),
);
/// Row address bits: `bits[5:3] + 12`.
pub const ROW_ADDRESS_BITS: FieldSpec = FieldSpec::new(
    "row_address_bits",
    offsets::ADDRESSING,
    BitRange::new(5, 3),
    Scaling::Add(12),
);
/// Dies per package: `bits[2:0] + 1`.
pub const DIE_COUNT: FieldSpec = FieldSpec::new(
    "die_count",
    offsets::PACKAGE_TYPE,
    BitRange::new(2, 0),
    Scaling::Add(1),
);

/// SDRAM device width: `4 << bits[2:0]`.
pub const DEVICE_WIDTH: FieldSpec = FieldSpec::new(
    "sdram_device_width",
    offsets::MODULE_ORGANIZATION,
    BitRange::new(2, 0),
    Scaling::Shl(4),
);
/// Package ranks per module: `bits[5:3] + 1`.
pub const PAGE_RANKS: FieldSpec = FieldSpec::new(
    "page_ranks",
    offsets::MODULE_ORGANIZATION,
    BitRange::new(5, 3),
    Scaling::Add(1),
);
/// Set for an asymmetric rank mix.
pub const RANK_MIX: FieldSpec = FieldSpec::new(
    "asymmetric",
    offsets::MODULE_ORGANIZATION,
    BitRange::bit(6),
    Scaling::Raw,
);

/// Primary bus width: `8 << bits[2:0]`.
pub const BUS_WIDTH: FieldSpec = FieldSpec::new(
    "module_bus_width",
    offsets::BUS_WIDTH,
    BitRange::new(2, 0),
    Scaling::Shl(8),
);
/// ECC bus extension: `8 * bits[4:3]`.
pub const ECC_WIDTH: FieldSpec = FieldSpec::new(
    "module_ecc_width",
    offsets::BUS_WIDTH,
    BitRange::new(4, 3),
    Scaling::Mul(8),
);

/// Minimum cycle time tCKmin, in MTB.
pub const TCK_MIN: FieldSpec =
    FieldSpec::new("min_cycle_time_ns", offsets::TCK_MIN, BitRange::FULL, Scaling::Mtb);
/// Minimum CAS latency time tAAmin, in MTB.
pub const TAA_MIN: FieldSpec =
    FieldSpec::new("cas_latency_ns", offsets::TAA_MIN, BitRange::FULL, Scaling::Mtb);
/// Minimum RAS-to-CAS delay tRCDmin, in MTB.
pub const TRCD_MIN: FieldSpec =
    FieldSpec::new("ras_to_cas_ns", offsets::TRCD_MIN, BitRange::FULL, Scaling::Mtb);
/// Minimum row precharge time tRPmin, in MTB.
pub const TRP_MIN: FieldSpec =
    FieldSpec::new("ras_precharge_ns", offsets::TRP_MIN, BitRange::FULL, Scaling::Mtb);

/// JEP-106 manufacturer ID, low byte (continuation count).
pub const MANUFACTURER_ID_LSB: FieldSpec = FieldSpec::new(
    "manufacturer_id_lsb",
    offsets::MANUFACTURER_ID_LSB,
    BitRange::FULL,
    Scaling::Raw,
);
/// JEP-106 manufacturer ID, high byte.
pub const MANUFACTURER_ID_MSB: FieldSpec = FieldSpec::new(
    "manufacturer_id_msb",
    offsets::MANUFACTURER_ID_MSB,
    BitRange::FULL,
    Scaling::Raw,
);

/// Every field, in offset order.
pub const LAYOUT: &[FieldSpec] = &[
    BYTES_USED,
    SPD_REVISION,
    DEVICE_TYPE,
    MODULE_TYPE,
    DENSITY,
    BANKS_PER_GROUP,
    BANK_GROUPS,
    COLUMN_ADDRESS_BITS,
    ROW_ADDRESS_BITS,
    DIE_COUNT,
    DEVICE_WIDTH,
    PAGE_RANKS,
    RANK_MIX,
    BUS_WIDTH,
    ECC_WIDTH,
    TCK_MIN,
    TAA_MIN,
    TRCD_MIN,
    TRP_MIN,
    MANUFACTURER_ID_LSB,
    MANUFACTURER_ID_MSB,
];

/// Look up a field by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
    LAYOUT.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_sorted_by_offset() {
        assert!(LAYOUT.windows(2).all(|w| w[0].offset <= w[1].offset));
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in LAYOUT.iter().enumerate() {
            for b in &LAYOUT[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn scaling_rules() {
        assert_eq!(DEVICE_WIDTH.scaling.integer(0), Some(4));
        assert_eq!(DEVICE_WIDTH.scaling.integer(3), Some(32));
        assert_eq!(BUS_WIDTH.scaling.integer(3), Some(64));
        assert_eq!(ECC_WIDTH.scaling.integer(1), Some(8));
        assert_eq!(ECC_WIDTH.scaling.integer(2), Some(16));
        assert_eq!(DENSITY.scaling.integer(MAX_DENSITY_EXPONENT), Some(32_768));
        assert_eq!(BYTES_USED.scaling.integer(4), Some(512));
        assert_eq!(TCK_MIN.scaling.integer(6), None);
        assert_eq!(TCK_MIN.scaling.nanos(6), Some(0.75));
        assert_eq!(DIE_COUNT.scaling.nanos(1), None);
    }

    #[test]
    fn raw_reads_through_bit_range() {
        let mut spd = [0u8; 16];
        spd[offsets::MODULE_ORGANIZATION] = 0b0100_1001;
        assert_eq!(RANK_MIX.raw(&spd), Some(1));
        assert_eq!(PAGE_RANKS.raw(&spd), Some(1));
        assert_eq!(DEVICE_WIDTH.raw(&spd), Some(1));
        assert_eq!(TCK_MIN.raw(&spd), None);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("module_bus_width"), Some(&BUS_WIDTH));
        assert_eq!(by_name("no_such_field"), None);
    }

    #[test]
    fn scaling_display() {
        assert_eq!(Scaling::Shl(256).to_string(), "256 << raw");
        assert_eq!(Scaling::Mtb.to_string(), "raw * 0.125 ns");
    }
}
