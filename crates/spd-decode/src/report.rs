//! Human-readable reports
//!
//! Downstream tooling scrapes these lines, so labels stay fixed: integers
//! print as integers, nanosecond values with two decimals.

use crate::compare::Comparison;
use crate::module::{DecodedModule, Timings};
use std::fmt;

impl fmt::Display for DecodedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found DDR4 memory format")?;
        writeln!(
            f,
            "Number of bytes in EEPROM = {} and {} have been downloaded",
            self.declared_bytes, self.downloaded_bytes
        )?;
        writeln!(f, "SPD revision hex = 0x{:02x}", self.spd_revision)?;

        match self.form_factor.label() {
            Some(label) => writeln!(f, "UDIMM format: {label}")?,
            None => writeln!(f, "Unknown UDIMM format: 0x{:02x}", self.form_factor.code())?,
        }

        let org = &self.organization;
        writeln!(f, "chip organization:")?;
        writeln!(f, "   die count = {}", org.die_count)?;
        writeln!(
            f,
            "   {}",
            if org.asymmetric { "asymmetric" } else { "symmetric" }
        )?;
        writeln!(f, "   page ranks = {}", org.page_ranks)?;
        writeln!(f, "   width (per chip) = {}", org.device_width)?;

        writeln!(f, "Module bus width = {}", self.bus.primary)?;
        writeln!(f, "Module ecc width = {}", self.bus.ecc)?;
        writeln!(f, "Minimum cycle time = {:.2} ns", self.min_cycle_time_ns)?;
        writeln!(f, "Speed grade = {}", self.speed_grade())?;

        if !self.density_known() {
            writeln!(f, "Unknown density")?;
        }
        writeln!(
            f,
            "Density per chip = {} Mb = {}Gb",
            self.density_per_chip_mb,
            self.density_per_chip_gb()
        )?;
        writeln!(
            f,
            "Total capacity = {} MB = {}GB",
            self.capacity_mb,
            self.capacity_gb()
        )?;

        write_timings(f, &self.timings)?;

        let addr = &self.addressing;
        writeln!(
            f,
            "Banks = {} per group, bank groups = {}",
            addr.banks_per_group, addr.bank_groups
        )?;
        writeln!(
            f,
            "Row address bits = {}, column address bits = {}",
            addr.row_bits, addr.column_bits
        )?;

        match self.manufacturer_id {
            Some(id) => writeln!(f, "JEP-106 module manufacturer ID = 0x{id:04x}")?,
            None => writeln!(f, "JEP-106 module manufacturer ID = (not downloaded)")?,
        }

        Ok(())
    }
}

fn write_timings(f: &mut fmt::Formatter<'_>, timings: &Timings) -> fmt::Result {
    let [cl, rcd, rp] = timings.as_array();
    writeln!(
        f,
        "{} = {}-{}-{} cycles = {:.2}-{:.2}-{:.2} ns (raw 0x{:02x}-0x{:02x}-0x{:02x})",
        Timings::LABEL,
        cl.cycles,
        rcd.cycles,
        rp.cycles,
        cl.ns,
        rcd.ns,
        rp.ns,
        cl.raw,
        rcd.raw,
        rp.raw
    )
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identical => writeln!(f, "All channels identical"),
            Self::Differ(list) => {
                writeln!(f, "Channels differ at {} location(s)", list.len())?;
                for d in list {
                    writeln!(
                        f,
                        "  0x{:03x}: reference=0x{:02x} {}=0x{:02x}",
                        d.offset, d.reference_value, d.channel, d.value
                    )?;
                }
                Ok(())
            }
        }
    }
}
