//! The decoder: feed it bytes, read navigation fields from it.

use std::io;

use crate::err::{FrameError, ReadError};
use crate::frame::FrameAcquirer;
use crate::model::{Date, Location, NavigationModel, Satellites, Time};
use crate::parser::{self, Sentence};
use crate::stale::{Clock, DecimalField, IntegerField, SystemClock};

/// Counters kept for the whole lifetime of a decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Every byte ever passed to `decode`.
    pub chars_processed: u64,
    pub passed_checksum: u64,
    pub failed_checksum: u64,
    /// Sentences that committed a location from an actual fix.
    pub sentences_with_fix: u64,
}

/// Incremental NMEA 0183 decoder.
///
/// Owns the navigation model; callers get read access only. The clock
/// stamps every commit and is what field ages are measured against.
///
/// ```
/// use nmea_decode::GpsDecoder;
///
/// let mut gps = GpsDecoder::with_clock(|| 0);
/// let accepted = gps.decode_bytes(b"$GNVTG,181.50,T,,M,0.00,N,0.00,K,A*2E\r\n");
/// assert_eq!(accepted, 1);
/// assert_eq!(gps.course().value(), 181.5);
/// ```
#[derive(Debug)]
pub struct GpsDecoder<C = SystemClock> {
    acquirer: FrameAcquirer,
    model: NavigationModel,
    stats: Statistics,
    clock: C,
}

impl GpsDecoder<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for GpsDecoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GpsDecoder<C> {
    pub fn with_clock(clock: C) -> Self {
        GpsDecoder {
            acquirer: FrameAcquirer::new(),
            model: NavigationModel::default(),
            stats: Statistics::default(),
            clock,
        }
    }

    /// Process one byte received from the receiver.
    ///
    /// Returns true iff this byte terminated a frame that passed the checksum
    /// test and was decoded.
    pub fn decode(&mut self, byte: u8) -> bool {
        match self.feed(byte) {
            Some(Ok(_)) => true,
            _ => false,
        }
    }

    /// Like [`decode`](#method.decode), but tells what happened to the frame
    /// this byte terminated. `None` if the byte did not terminate a frame.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Sentence, FrameError>> {
        self.stats.chars_processed += 1;

        let frame = self.acquirer.push(byte)?;
        if frame.truncated {
            warn!(
                "frame exceeds {} bytes, parsing truncated data",
                frame.payload.len()
            );
        }

        let now = self.clock.millis();
        let res = parser::dispatch(
            frame.payload,
            frame.checksum,
            &mut self.model,
            &mut self.stats,
            now,
        );
        match res {
            Err(FrameError::UnrecognizedSentence(ref id)) => {
                debug!("ignoring unsupported sentence \"{}\"", id)
            }
            Err(ref e) => warn!("dropping frame: {}", e),
            Ok(_) => (),
        }
        Some(res)
    }

    /// Feeds a whole buffer. Returns the number of sentences decoded.
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.decode(b)).count()
    }

    /// Iterates over the outcome of every frame read from `input`.
    pub fn sentences<R: io::Read>(&mut self, input: R) -> Sentences<'_, R, C> {
        Sentences {
            input: input.bytes(),
            decoder: self,
        }
    }

    /// Feeds `input` until EOF. Returns the number of sentences decoded.
    /// Rejected frames are skipped, I/O errors abort.
    pub fn decode_reader<R: io::Read>(&mut self, input: R) -> io::Result<usize> {
        let mut count = 0;
        for res in self.sentences(input) {
            match res {
                Ok(_) => count += 1,
                Err(ReadError::Io(e)) => return Err(e),
                Err(ReadError::Frame(_)) => (),
            }
        }
        Ok(count)
    }

    /// Current time of the decoder's clock, for use with the `age` methods.
    #[inline]
    pub fn millis(&self) -> u32 {
        self.clock.millis()
    }

    #[inline]
    pub fn stats(&self) -> Statistics {
        self.stats
    }

    #[inline]
    pub fn chars_processed(&self) -> u64 {
        self.stats.chars_processed
    }

    #[inline]
    pub fn passed_checksum(&self) -> u64 {
        self.stats.passed_checksum
    }

    #[inline]
    pub fn failed_checksum(&self) -> u64 {
        self.stats.failed_checksum
    }

    #[inline]
    pub fn sentences_with_fix(&self) -> u64 {
        self.stats.sentences_with_fix
    }

    /// The whole navigation model.
    #[inline]
    pub fn model(&self) -> &NavigationModel {
        &self.model
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.model.location
    }

    #[inline]
    pub fn date(&self) -> &Date {
        &self.model.date
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.model.time
    }

    /// Speed over ground in knots.
    #[inline]
    pub fn speed(&self) -> &DecimalField {
        &self.model.speed
    }

    /// Course over ground in degrees.
    #[inline]
    pub fn course(&self) -> &DecimalField {
        &self.model.course
    }

    /// Altitude above mean sea level in whole meters.
    #[inline]
    pub fn altitude(&self) -> &DecimalField {
        &self.model.altitude
    }

    #[inline]
    pub fn hdop(&self) -> &DecimalField {
        &self.model.hdop
    }

    #[inline]
    pub fn vdop(&self) -> &DecimalField {
        &self.model.vdop
    }

    #[inline]
    pub fn pdop(&self) -> &DecimalField {
        &self.model.pdop
    }

    #[inline]
    pub fn fix_type(&self) -> &IntegerField {
        &self.model.fix_type
    }

    #[inline]
    pub fn satellites(&self) -> &Satellites {
        &self.model.satellites
    }
}

/// Iterator returned by [`GpsDecoder::sentences`](struct.GpsDecoder.html#method.sentences).
///
/// Yields one item per terminated frame and ends at EOF.
#[derive(Debug)]
pub struct Sentences<'a, R, C> {
    input: io::Bytes<R>,
    decoder: &'a mut GpsDecoder<C>,
}

impl<'a, R: io::Read, C: Clock> Iterator for Sentences<'a, R, C> {
    type Item = Result<Sentence, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let byte = try_some!(self.input.next()?);
            if let Some(res) = self.decoder.feed(byte) {
                return Some(res.map_err(ReadError::from));
            }
        }
    }
}
