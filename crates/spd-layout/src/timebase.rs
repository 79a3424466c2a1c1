//! Timebases and the conversions built on them.

/// Medium timebase, 0.125 ns. All DDR4 timing bytes are MTB multiples.
pub const MTB_NS: f64 = 0.125;

/// Numerator for the data rate in MT/s: two transfers per clock, ns → MHz.
pub const DATA_RATE_NUMERATOR: f64 = 2000.0;

/// Convert a raw MTB count to nanoseconds.
#[must_use]
pub fn mtb_to_ns(raw: u8) -> f64 {
    f64::from(raw) * MTB_NS
}

/// Data rate in MT/s for a clock period, truncated to an integer.
///
/// Returns `None` for a non-positive period.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn data_rate_mts(cycle_time_ns: f64) -> Option<u32> {
    if cycle_time_ns <= 0.0 {
        return None;
    }
    Some((DATA_RATE_NUMERATOR / cycle_time_ns).trunc() as u32)
}

/// Clock cycles needed to cover `time_ns`, rounded up.
///
/// Returns `None` for a non-positive period.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cycles(time_ns: f64, cycle_time_ns: f64) -> Option<u32> {
    if cycle_time_ns <= 0.0 {
        return None;
    }
    Some((time_ns / cycle_time_ns).ceil() as u32)
}
