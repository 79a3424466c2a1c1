//! DDR4 SPD byte map, base configuration section.
//!
//! Offsets follow JEDEC Standard No. 21-C, Annex L (DDR4 SPD, block 0 and
//! the manufacturing block). Only the bytes this workspace decodes are
//! listed; the EEPROM holds up to 512 bytes.
//!
//! ```text
//! 0x000  SPD bytes used / total           [3:0] bytes used ×128
//! 0x001  SPD revision                     encoding.additions nibbles
//! 0x002  DRAM device type                 0x0C = DDR4 SDRAM
//! 0x003  Module type                      UDIMM, SO-DIMM, ...
//! 0x004  SDRAM density and banks          [3:0] density, [5:4] banks, [7:6] bank groups
//! 0x005  SDRAM addressing                 [2:0] column, [5:3] row
//! 0x006  Primary SDRAM package type       [2:0] die count - 1
//! 0x00c  Module organization              [2:0] width, [5:3] ranks - 1, [6] asymmetric
//! 0x00d  Module memory bus width          [2:0] primary width, [4:3] ECC extension
//! 0x012  tCKAVGmin                        MTB units
//! 0x018  tAAmin (CAS latency time)        MTB units
//! 0x019  tRCDmin                          MTB units
//! 0x01a  tRPmin                           MTB units
//! 0x075  Module manufacturer ID, LSB      JEP-106 continuation count
//! 0x076  Module manufacturer ID, MSB      JEP-106 code
//! ```

// ── Size ────────────────────────────────────────────────────────────────────

/// Full DDR4 SPD EEPROM size in bytes.
pub const SPD_MAX_BYTES: usize = 512;

/// Multiplier applied to the "bytes used" nibble of byte 0.
pub const BYTES_USED_UNIT: u32 = 128;

// ── Identification ──────────────────────────────────────────────────────────

/// Number of SPD bytes used / total.
pub const BYTES_USED: usize = 0x000;

/// SPD encoding and additions revision.
pub const SPD_REVISION: usize = 0x001;

/// Key byte: DRAM device type.
pub const DEVICE_TYPE: usize = 0x002;

/// Key byte: module type (form factor).
pub const MODULE_TYPE: usize = 0x003;

// ── SDRAM geometry ──────────────────────────────────────────────────────────

/// SDRAM density and banks.
pub const DENSITY_BANKS: usize = 0x004;

/// SDRAM row and column addressing.
pub const ADDRESSING: usize = 0x005;

/// Primary SDRAM package type.
pub const PACKAGE_TYPE: usize = 0x006;

/// Module organization (ranks, device width).
pub const MODULE_ORGANIZATION: usize = 0x00C;

/// Module memory bus width.
pub const BUS_WIDTH: usize = 0x00D;

// ── Timing (MTB units) ──────────────────────────────────────────────────────

/// Minimum SDRAM cycle time, tCKAVGmin.
pub const TCK_MIN: usize = 0x012;

/// Minimum CAS latency time, tAAmin.
pub const TAA_MIN: usize = 0x018;

/// Minimum RAS to CAS delay time, tRCDmin.
pub const TRCD_MIN: usize = 0x019;

/// Minimum row precharge delay time, tRPmin.
pub const TRP_MIN: usize = 0x01A;

/// Last byte every decode requires.
pub const LAST_MANDATORY: usize = TRP_MIN;

// ── Manufacturing information ───────────────────────────────────────────────

/// Module manufacturer ID code, least significant byte.
pub const MANUFACTURER_ID_LSB: usize = 0x075;

/// Module manufacturer ID code, most significant byte.
pub const MANUFACTURER_ID_MSB: usize = 0x076;

/// Device type codes found at [`DEVICE_TYPE`].
pub mod device_type {
    /// DDR3 SDRAM.
    pub const DDR3: u8 = 0x0B;
    /// DDR4 SDRAM, the only type this workspace decodes.
    pub const DDR4: u8 = 0x0C;
    /// DDR5 SDRAM.
    pub const DDR5: u8 = 0x12;
}
