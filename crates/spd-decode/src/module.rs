//! Decoded module characteristics

use crate::channel::ChannelId;
use crate::error::DecodeWarning;
use serde::Serialize;
use spd_layout::ModuleType;

/// Everything derived from one channel's SPD bytes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedModule {
    /// Channel the buffer came from
    pub channel: ChannelId,

    /// DRAM device type byte (always the DDR4 code once decoded)
    pub memory_type: u8,

    /// SPD bytes the EEPROM declares as used
    pub declared_bytes: u32,

    /// Bytes actually present in the capture
    pub downloaded_bytes: usize,

    /// SPD encoding/additions revision, shown as two hex digits
    pub spd_revision: u8,

    /// Module form factor
    pub form_factor: ModuleType,

    /// Die, rank and device width layout
    pub organization: Organization,

    /// Primary and ECC bus widths
    pub bus: BusWidth,

    /// Minimum clock period in nanoseconds
    pub min_cycle_time_ns: f64,

    /// Data rate in MT/s (integer truncation)
    pub speed_mts: u32,

    /// Density per SDRAM chip in Mb, 0 when the code is not defined
    pub density_per_chip_mb: u32,

    /// Total module capacity in MB
    pub capacity_mb: u64,

    /// CL, tRCD and tRP
    pub timings: Timings,

    /// Bank and address geometry of each SDRAM
    pub addressing: Addressing,

    /// JEP-106 module manufacturer code, absent if the dump stops early
    pub manufacturer_id: Option<u16>,

    /// Recoverable conditions met while decoding
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedModule {
    /// Speed grade label, e.g. `DDR4-2666`.
    pub fn speed_grade(&self) -> String {
        format!("DDR4-{}", self.speed_mts)
    }

    /// Density per chip in Gb (integer division).
    pub fn density_per_chip_gb(&self) -> u32 {
        self.density_per_chip_mb / 1024
    }

    /// Total capacity in GB (integer division).
    pub fn capacity_gb(&self) -> u64 {
        self.capacity_mb / 1024
    }

    /// False when the density code was outside the defined range.
    pub fn density_known(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::UnknownDensity { .. }))
    }

    /// True if the capture holds fewer bytes than byte 0 declares.
    pub fn is_partial(&self) -> bool {
        (self.downloaded_bytes as u64) < u64::from(self.declared_bytes)
    }
}

/// Module organization from bytes 6 and 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Organization {
    /// Dies per SDRAM package
    pub die_count: u32,
    /// Ranks of different composition
    pub asymmetric: bool,
    /// Package ranks per DIMM
    pub page_ranks: u32,
    /// Data width of each SDRAM device in bits
    pub device_width: u32,
}

/// Module data bus from byte 13
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusWidth {
    /// Primary bus width in bits
    pub primary: u32,
    /// ECC extension width in bits
    pub ecc: u32,
}

/// SDRAM addressing from bytes 4 and 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Addressing {
    /// Banks in each bank group
    pub banks_per_group: u32,
    /// Bank groups, 0 when the device has none
    pub bank_groups: u32,
    /// Row address bits
    pub row_bits: u32,
    /// Column address bits
    pub column_bits: u32,
}

/// One timing parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    /// Byte as stored, in MTB units
    pub raw: u8,
    /// `raw * MTB`
    pub ns: f64,
    /// Clock cycles at the minimum cycle time, rounded up
    pub cycles: u32,
}

/// The `CL-tRCD-tRP` triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timings {
    /// CAS latency (tAAmin)
    pub cas_latency: Timing,
    /// RAS to CAS delay (tRCDmin)
    pub ras_to_cas: Timing,
    /// Row precharge (tRPmin)
    pub ras_precharge: Timing,
}

impl Timings {
    /// Conventional label for the triple.
    pub const LABEL: &'static str = "CL-tRCD-tRP";

    /// Parameters in label order.
    pub fn as_array(&self) -> [Timing; 3] {
        [self.cas_latency, self.ras_to_cas, self.ras_precharge]
    }
}
