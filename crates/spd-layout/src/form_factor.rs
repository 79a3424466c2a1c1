//! Module type codes (byte 3).
//!
//! The table is closed: codes this workspace has not catalogued decode to
//! [`ModuleType::Unknown`] carrying the raw code, never to a default label.

/// Module type codes found at [`crate::offsets::MODULE_TYPE`].
pub mod code {
    /// Unbuffered DIMM.
    pub const UDIMM: u8 = 0x02;
    /// Small outline unbuffered DIMM.
    pub const SO_UDIMM: u8 = 0x03;
    /// Mini unbuffered DIMM.
    pub const MINI_UDIMM: u8 = 0x06;
    /// 72-bit small outline unbuffered DIMM.
    pub const SO_UDIMM_72B: u8 = 0x09;
    /// 16-bit small outline unbuffered DIMM.
    pub const SO_UDIMM_16B: u8 = 0x0C;
    /// 32-bit small outline unbuffered DIMM.
    pub const SO_UDIMM_32B: u8 = 0x0D;
}

/// All catalogued codes, in table order.
pub const KNOWN_CODES: &[u8] = &[
    code::UDIMM,
    code::SO_UDIMM,
    code::MINI_UDIMM,
    code::SO_UDIMM_72B,
    code::SO_UDIMM_16B,
    code::SO_UDIMM_32B,
];

/// Module form factor decoded from byte 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// `UDIMM`
    Udimm,
    /// `SO-UDIMM`
    SoUdimm,
    /// `mini-UDIMM`
    MiniUdimm,
    /// `72b SO-UDIMM`
    SoUdimm72b,
    /// `16b SO-UDIMM`
    SoUdimm16b,
    /// `32b SO-UDIMM`
    SoUdimm32b,
    /// Code not in the table.
    Unknown(u8),
}

impl ModuleType {
    /// Identify the form factor from the raw module type byte.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            code::UDIMM => Self::Udimm,
            code::SO_UDIMM => Self::SoUdimm,
            code::MINI_UDIMM => Self::MiniUdimm,
            code::SO_UDIMM_72B => Self::SoUdimm72b,
            code::SO_UDIMM_16B => Self::SoUdimm16b,
            code::SO_UDIMM_32B => Self::SoUdimm32b,
            other => Self::Unknown(other),
        }
    }

    /// Raw code this variant was decoded from.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Udimm => code::UDIMM,
            Self::SoUdimm => code::SO_UDIMM,
            Self::MiniUdimm => code::MINI_UDIMM,
            Self::SoUdimm72b => code::SO_UDIMM_72B,
            Self::SoUdimm16b => code::SO_UDIMM_16B,
            Self::SoUdimm32b => code::SO_UDIMM_32B,
            Self::Unknown(c) => *c,
        }
    }

    /// Display label, `None` for uncatalogued codes.
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Udimm => Some("UDIMM"),
            Self::SoUdimm => Some("SO-UDIMM"),
            Self::MiniUdimm => Some("mini-UDIMM"),
            Self::SoUdimm72b => Some("72b SO-UDIMM"),
            Self::SoUdimm16b => Some("16b SO-UDIMM"),
            Self::SoUdimm32b => Some("32b SO-UDIMM"),
            Self::Unknown(_) => None,
        }
    }

    /// True if the code is catalogued.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Catalogued types serialize as their label, uncatalogued ones as
/// `{ "unknown": code }`.
#[cfg(feature = "serde")]
impl serde::Serialize for ModuleType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unknown(code) => {
                serializer.serialize_newtype_variant("ModuleType", 6, "unknown", code)
            }
            known => serializer.serialize_str(known.label().unwrap_or_default()),
        }
    }
}
