//! The navigation entities populated by the sentence parsers.
//!
//! Everything here is readable through a shared reference. Only the decoder
//! can stage and commit new values.

use chrono::{NaiveDate, NaiveTime};

use crate::degrees::RawDegrees;
use crate::stale::{DecimalField, IntegerField, StaleField};

/// Capacity of the per-constellation satellite tables.
pub const MAX_SATELLITES: usize = 12;

/// Satellites reported by a single GSV sentence.
pub const SATS_PER_GSV: usize = 4;

/// Latitude and longitude, committed together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: RawDegrees,
    pub lng: RawDegrees,
}

#[derive(Debug, Clone, Default)]
pub struct Location {
    field: StaleField<Coordinates>,
}

impl Location {
    pub fn is_valid(&self) -> bool {
        self.field.is_valid()
    }

    pub fn is_updated(&self) -> bool {
        self.field.is_updated()
    }

    pub fn age(&self, now: u32) -> u32 {
        self.field.age(now)
    }

    pub fn raw_lat(&self) -> RawDegrees {
        self.field.value().lat
    }

    pub fn raw_lng(&self) -> RawDegrees {
        self.field.value().lng
    }

    /// Latitude in signed decimal degrees.
    pub fn lat(&self) -> f64 {
        self.raw_lat().to_decimal_degrees()
    }

    /// Longitude in signed decimal degrees.
    pub fn lng(&self) -> f64 {
        self.raw_lng().to_decimal_degrees()
    }

    pub(crate) fn set(&mut self, lat: RawDegrees, lng: RawDegrees, now: u32) {
        self.field.update(Coordinates { lat, lng }, now);
    }
}

/// UTC date, packed as `DDMMYY`.
#[derive(Debug, Clone, Default)]
pub struct Date {
    field: IntegerField,
}

impl Date {
    pub fn is_valid(&self) -> bool {
        self.field.is_valid()
    }

    pub fn is_updated(&self) -> bool {
        self.field.is_updated()
    }

    pub fn age(&self, now: u32) -> u32 {
        self.field.age(now)
    }

    /// The packed `DDMMYY` value.
    pub fn value(&self) -> u32 {
        self.field.value()
    }

    /// Four digit year, assuming the 21st century.
    pub fn year(&self) -> u16 {
        (self.value() % 100) as u16 + 2000
    }

    pub fn month(&self) -> u8 {
        ((self.value() / 100) % 100) as u8
    }

    pub fn day(&self) -> u8 {
        (self.value() / 10_000) as u8
    }

    /// The date as a calendar date, `None` before the first commit or if
    /// the receiver sent something that is not a date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if !self.is_valid() {
            return None;
        }
        let packed = self.value();
        NaiveDate::from_ymd_opt(
            (packed % 100) as i32 + 2000,
            (packed / 100) % 100,
            packed / 10_000,
        )
    }

    pub(crate) fn set(&mut self, packed: u32, now: u32) {
        self.field.update(packed, now);
    }
}

/// UTC time of day, packed as `HHMMSScc`.
#[derive(Debug, Clone, Default)]
pub struct Time {
    field: IntegerField,
}

impl Time {
    pub fn is_valid(&self) -> bool {
        self.field.is_valid()
    }

    pub fn is_updated(&self) -> bool {
        self.field.is_updated()
    }

    pub fn age(&self, now: u32) -> u32 {
        self.field.age(now)
    }

    /// The packed `HHMMSScc` value.
    pub fn value(&self) -> u32 {
        self.field.value()
    }

    pub fn hour(&self) -> u8 {
        (self.value() / 1_000_000) as u8
    }

    pub fn minute(&self) -> u8 {
        ((self.value() / 10_000) % 100) as u8
    }

    pub fn second(&self) -> u8 {
        ((self.value() / 100) % 100) as u8
    }

    pub fn centisecond(&self) -> u8 {
        (self.value() % 100) as u8
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if !self.is_valid() {
            return None;
        }
        let packed = self.value();
        NaiveTime::from_hms_milli_opt(
            packed / 1_000_000,
            (packed / 10_000) % 100,
            (packed / 100) % 100,
            (packed % 100) * 10,
        )
    }

    pub(crate) fn set(&mut self, packed: u32, now: u32) {
        self.field.update(packed, now);
    }
}

/// One row of a satellites-in-view table.
#[derive(Debug, Clone, Default)]
pub struct SatelliteInfo {
    pub id: IntegerField,
    /// 0..=90 degrees.
    pub elevation: IntegerField,
    /// 0..=359 degrees.
    pub azimuth: IntegerField,
    /// 0..=99 dBHz, 0 when not tracked.
    pub snr: IntegerField,
}

impl SatelliteInfo {
    pub(crate) fn set(&mut self, sat: &GsvSatellite, now: u32) {
        self.id.update(sat.id, now);
        self.elevation.update(sat.elevation, now);
        self.azimuth.update(sat.azimuth, now);
        self.snr.update(sat.snr, now);
    }
}

/// A satellite group as it appears in a GSV sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GsvSatellite {
    pub id: u32,
    pub elevation: u32,
    pub azimuth: u32,
    pub snr: u32,
}

/// What is known about one constellation.
#[derive(Debug, Clone, Default)]
pub struct SatelliteSystem {
    /// Satellites used for the fix, from GSA. Unused slots read 0.
    pub active_satellite_ids: [IntegerField; MAX_SATELLITES],
    pub satellites_in_view_count: IntegerField,
    /// Filled four slots at a time by consecutive GSV messages.
    pub satellites_in_view: [SatelliteInfo; MAX_SATELLITES],
}

impl SatelliteSystem {
    /// Ids of the active satellites, skipping empty slots.
    pub fn active_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.active_satellite_ids
            .iter()
            .map(IntegerField::value)
            .filter(|&id| id != 0)
    }
}

/// Constellations tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constellation {
    Gps,
    Glonass,
    BeiDou,
}

impl Constellation {
    /// Maps the NMEA 4.1 system id of a GSA sentence.
    pub fn from_system_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Constellation::Gps),
            2 => Some(Constellation::Glonass),
            4 => Some(Constellation::BeiDou),
            _ => None,
        }
    }

    /// Maps the talker of a GSV sentence.
    pub fn from_talker(talker: &[u8]) -> Option<Self> {
        match talker {
            b"GP" => Some(Constellation::Gps),
            b"GL" => Some(Constellation::Glonass),
            b"BD" => Some(Constellation::BeiDou),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Satellites {
    pub gps: SatelliteSystem,
    pub glonass: SatelliteSystem,
    pub beidou: SatelliteSystem,
}

impl Satellites {
    pub fn system(&self, constellation: Constellation) -> &SatelliteSystem {
        match constellation {
            Constellation::Gps => &self.gps,
            Constellation::Glonass => &self.glonass,
            Constellation::BeiDou => &self.beidou,
        }
    }

    pub(crate) fn system_mut(&mut self, constellation: Constellation) -> &mut SatelliteSystem {
        match constellation {
            Constellation::Gps => &mut self.gps,
            Constellation::Glonass => &mut self.glonass,
            Constellation::BeiDou => &mut self.beidou,
        }
    }
}

/// Every quantity the decoder produces.
///
/// Speed is in knots, course in degrees, altitude and geoid separation in
/// meters. See [`units`](../units/index.html) for conversions.
#[derive(Debug, Clone, Default)]
pub struct NavigationModel {
    pub location: Location,
    pub date: Date,
    pub time: Time,
    pub speed: DecimalField,
    pub course: DecimalField,
    pub altitude: DecimalField,
    pub geoid_separation: DecimalField,
    pub hdop: DecimalField,
    pub vdop: DecimalField,
    pub pdop: DecimalField,
    /// 1 = no fix, 2 = 2D, 3 = 3D.
    pub fix_type: IntegerField,
    /// GGA quality indicator, 0 = no fix.
    pub fix_quality: IntegerField,
    /// Satellites used in the GGA solution.
    pub satellites_used: IntegerField,
    pub satellites: Satellites,
}
