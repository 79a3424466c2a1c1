//! Byte layout model for DDR4 SPD EEPROMs.
//!
//! This crate has **no required dependencies** and **no I/O**. It is a pure
//! model of the JEDEC DDR4 SPD base configuration: byte offsets, bit ranges, scaling
//! rules, timebase constants, and the module type table.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`bits`] | Bitfield extraction, compile-time checked bit ranges |
//! | [`offsets`] | Byte map of the fields decoded from block 0 |
//! | [`fields`] | Field table: name, offset, bit range, scaling |
//! | [`timebase`] | Medium timebase, speed grade and cycle conversions |
//! | [`form_factor`] | Module type codes (UDIMM, SO-UDIMM, ...) |
//!
//! Enable the `serde` feature to serialize layout entries and module types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod fields;
pub mod form_factor;
pub mod offsets;
pub mod timebase;

pub use bits::{extract_bits, BitRange};
pub use fields::{FieldSpec, Scaling};
pub use form_factor::ModuleType;
