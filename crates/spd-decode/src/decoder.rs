//! DDR4 SPD decoder
//!
//! Applies the field table from `spd_layout::fields` to one channel's buffer.
//! Only the device type check and the mandatory byte range are fatal; an
//! uncatalogued form factor or density code is recorded as a
//! [`DecodeWarning`] and decoding continues.

use crate::buffer::RawSpdBuffer;
use crate::channel::ChannelId;
use crate::error::{DecodeWarning, Result, SpdError};
use crate::module::{Addressing, BusWidth, DecodedModule, Organization, Timing, Timings};
use spd_layout::fields::{self, FieldSpec, MAX_DENSITY_EXPONENT};
use spd_layout::offsets::{self, device_type};
use spd_layout::{timebase, ModuleType};

/// Decode one channel's SPD buffer.
///
/// # Errors
///
/// - `UnsupportedFormat` if byte 2 is not the DDR4 code (checked first)
/// - `Truncated` if the buffer ends before byte `0x1a`, naming the first
///   missing offset
/// - `InvalidCycleTime` if the minimum cycle time byte is zero
pub fn decode(buffer: &RawSpdBuffer, channel: ChannelId) -> Result<DecodedModule> {
    tracing::debug!("Decoding {} ({} bytes)", channel, buffer.len());

    let reader = FieldReader {
        spd: buffer.as_bytes(),
        channel,
    };

    let memory_type = reader.raw(&fields::DEVICE_TYPE)?;
    if memory_type != device_type::DDR4 {
        tracing::error!("{}: not a DDR4 format: code={}", channel, memory_type);
        return Err(SpdError::UnsupportedFormat {
            channel,
            code: memory_type,
        });
    }
    tracing::debug!("{}: found DDR4 memory format", channel);

    // Everything up to tRPmin must be present before any field is derived.
    // The offset reported is the first byte that was not downloaded.
    if buffer.len() <= offsets::LAST_MANDATORY {
        return Err(SpdError::Truncated {
            channel,
            offset: buffer.len(),
            len: buffer.len(),
        });
    }

    let mut warnings = Vec::new();

    let declared_bytes = reader.integer(&fields::BYTES_USED)?;
    let spd_revision = reader.raw(&fields::SPD_REVISION)?;

    let form_factor = ModuleType::from_code(reader.raw(&fields::MODULE_TYPE)?);
    if let ModuleType::Unknown(code) = form_factor {
        tracing::warn!("{}: unknown UDIMM format: {:#04x}", channel, code);
        warnings.push(DecodeWarning::UnknownFormFactor { code });
    }

    let organization = Organization {
        die_count: reader.integer(&fields::DIE_COUNT)?,
        asymmetric: reader.raw(&fields::RANK_MIX)? == 1,
        page_ranks: reader.integer(&fields::PAGE_RANKS)?,
        device_width: reader.integer(&fields::DEVICE_WIDTH)?,
    };

    let bus = BusWidth {
        primary: reader.integer(&fields::BUS_WIDTH)?,
        ecc: reader.integer(&fields::ECC_WIDTH)?,
    };

    let min_cycle_time_ns = reader.nanos(&fields::TCK_MIN)?;
    let speed_mts =
        timebase::data_rate_mts(min_cycle_time_ns).ok_or(SpdError::InvalidCycleTime { channel })?;
    tracing::debug!(
        "{}: tCKmin = {:.3} ns, DDR4-{}",
        channel,
        min_cycle_time_ns,
        speed_mts
    );

    let density_code = reader.raw(&fields::DENSITY)?;
    let density_per_chip_mb = if density_code <= MAX_DENSITY_EXPONENT {
        reader.integer(&fields::DENSITY)?
    } else {
        tracing::warn!("{}: unknown density code {}", channel, density_code);
        warnings.push(DecodeWarning::UnknownDensity { code: density_code });
        0
    };

    let capacity_mb = capacity_mb(density_per_chip_mb, bus.primary, organization.device_width);

    let timings = Timings {
        cas_latency: reader.timing(&fields::TAA_MIN, min_cycle_time_ns)?,
        ras_to_cas: reader.timing(&fields::TRCD_MIN, min_cycle_time_ns)?,
        ras_precharge: reader.timing(&fields::TRP_MIN, min_cycle_time_ns)?,
    };

    let addressing = Addressing {
        banks_per_group: reader.integer(&fields::BANKS_PER_GROUP)?,
        bank_groups: reader.integer(&fields::BANK_GROUPS)?,
        row_bits: reader.integer(&fields::ROW_ADDRESS_BITS)?,
        column_bits: reader.integer(&fields::COLUMN_ADDRESS_BITS)?,
    };

    let manufacturer_id = match (
        fields::MANUFACTURER_ID_LSB.raw(buffer),
        fields::MANUFACTURER_ID_MSB.raw(buffer),
    ) {
        (Some(lsb), Some(msb)) => Some(u16::from_le_bytes([lsb, msb])),
        _ => {
            tracing::debug!("{}: dump ends before manufacturer ID", channel);
            None
        }
    };

    tracing::info!(
        "{}: {} MB, DDR4-{}, {} warning(s)",
        channel,
        capacity_mb,
        speed_mts,
        warnings.len()
    );

    Ok(DecodedModule {
        channel,
        memory_type,
        declared_bytes,
        downloaded_bytes: buffer.len(),
        spd_revision,
        form_factor,
        organization,
        bus,
        min_cycle_time_ns,
        speed_mts,
        density_per_chip_mb,
        capacity_mb,
        timings,
        addressing,
        manufacturer_id,
        warnings,
    })
}

/// Module capacity in MB: `density * (bus / width) / 8`, real-valued, then floored.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn capacity_mb(density_per_chip_mb: u32, bus_width: u32, device_width: u32) -> u64 {
    if device_width == 0 {
        return 0;
    }
    let chips = f64::from(bus_width) / f64::from(device_width);
    (f64::from(density_per_chip_mb) * chips / 8.0).floor() as u64
}

/// Reads table fields from one buffer, mapping short reads to `Truncated`.
struct FieldReader<'a> {
    spd: &'a [u8],
    channel: ChannelId,
}

impl FieldReader<'_> {
    fn raw(&self, field: &FieldSpec) -> Result<u8> {
        field.raw(self.spd).ok_or(SpdError::Truncated {
            channel: self.channel,
            offset: field.offset,
            len: self.spd.len(),
        })
    }

    fn integer(&self, field: &FieldSpec) -> Result<u32> {
        let raw = self.raw(field)?;
        let value = field.scaling.integer(raw).ok_or_else(|| {
            SpdError::malformed(format!("{} is not an integer field", field.name))
        })?;
        tracing::trace!("{}: {} = {} (raw {})", self.channel, field.name, value, raw);
        Ok(value)
    }

    fn nanos(&self, field: &FieldSpec) -> Result<f64> {
        let raw = self.raw(field)?;
        field
            .scaling
            .nanos(raw)
            .ok_or_else(|| SpdError::malformed(format!("{} is not a timebase field", field.name)))
    }

    fn timing(&self, field: &FieldSpec, cycle_time_ns: f64) -> Result<Timing> {
        let raw = self.raw(field)?;
        let ns = self.nanos(field)?;
        let cycles = timebase::cycles(ns, cycle_time_ns)
            .ok_or(SpdError::InvalidCycleTime {
                channel: self.channel,
            })?;
        Ok(Timing { raw, ns, cycles })
    }
}
