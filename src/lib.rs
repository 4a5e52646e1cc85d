//! Incremental decoder for *NMEA 0183* GPS sentences.
//!
//! Bytes are fed one at a time into a [`GpsDecoder`]. Complete frames with a
//! valid checksum update a [`NavigationModel`] of staleness-tracked fields
//! (position, time, date, speed, course, altitude, dilution of precision and
//! satellites per constellation). GGA, RMC, GSA, GSV and VTG are decoded,
//! every other sentence is skipped.
//!
//! ```
//! use nmea_decode::GpsDecoder;
//!
//! let mut gps = GpsDecoder::new();
//! for &b in b"$GNGSA,A,3,10,16,,,,,,,,,,,9.7,2.7,9.3,1*36\r\n".iter() {
//!     gps.decode(b);
//! }
//! assert!(gps.hdop().is_updated());
//! assert_eq!(gps.hdop().value(), 2.7);
//! assert!(!gps.hdop().is_updated());
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

#[macro_use]
mod macros;
pub mod decoder;
pub mod degrees;
pub mod err;
mod fields;
pub mod frame;
pub mod geo;
pub mod model;
pub mod parser;
pub mod stale;
pub mod units;

pub use decoder::{GpsDecoder, Sentences, Statistics};
pub use degrees::RawDegrees;
pub use err::{FrameError, ReadError};
pub use model::{Constellation, NavigationModel};
pub use parser::Sentence;
pub use stale::{Clock, DecimalField, IntegerField, StaleField, SystemClock, AGE_NEVER};
