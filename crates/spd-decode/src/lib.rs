#![deny(unsafe_code)]

//! DDR4 SPD dump decoder
//!
//! This crate turns captured SPD EEPROM contents into module characteristics
//! and checks that every memory channel carries the same module.
//!
//! # Pipeline
//!
//! - **Capture**: console text with a sentinel-delimited JSON payload
//!   ([`dump`])
//! - **Channels**: one [`RawSpdBuffer`] per [`ChannelId`], at most 512 bytes
//! - **Decode**: field table from `spd_layout` → [`DecodedModule`]
//! - **Compare**: byte-for-byte check against the reference channel
//!
//! # Example
//!
//! ```no_run
//! use spd_decode::{compare, decode, dump};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = std::fs::read_to_string("capture.log")?;
//! let channels = dump::read_capture(&text, &dump::Markers::default())?;
//!
//! for (id, buffer) in channels.iter() {
//!     match decode(buffer, id) {
//!         Ok(module) => println!("{id}\n{module}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! print!("{}", compare(&channels)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod buffer;
mod channel;
mod compare;
mod decoder;
pub mod dump;
mod error;
mod module;
mod report;

pub use buffer::RawSpdBuffer;
pub use channel::{ChannelId, ChannelSet};
pub use compare::{compare, Comparison, Discrepancy};
pub use decoder::{capacity_mb, decode};
pub use error::{DecodeWarning, Result, SpdError};
pub use module::{Addressing, BusWidth, DecodedModule, Organization, Timing, Timings};

/// Re-export of the layout model
pub use spd_layout as layout;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        compare, decode, ChannelId, ChannelSet, Comparison, DecodedModule, RawSpdBuffer, Result,
        SpdError,
    };
}
