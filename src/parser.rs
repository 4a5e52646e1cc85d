//! Dispatch of checked frames and the positional parsers for the *GGA*,
//! *RMC*, *GSA*, *GSV* and *VTG* sentences of the *NMEA 0183* protocol.
//!
//! Each parser splits the sentence on `,` into a fixed number of tokens and
//! commits only the entities its sentence type is guaranteed to define.
//! Malformed numbers degrade to zero instead of rejecting the sentence.

use crate::decoder::Statistics;
use crate::degrees::{parse_degrees, CardDir, RawDegrees};
use crate::err::{identifier, FrameError, IDENTIFIER_LENGTH};
use crate::fields::{parse_uint, Fields};
use crate::model::{Constellation, GsvSatellite, NavigationModel, MAX_SATELLITES, SATS_PER_GSV};

// Token counts, identifier included.
const GGA_FIELDS: usize = 15;
const RMC_FIELDS: usize = 12;
const GSA_FIELDS: usize = 19;
const GSV_FIELDS: usize = 4 + 4 * SATS_PER_GSV;
const VTG_FIELDS: usize = 10;

/// The sentence types the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentence {
    /// Global positioning system fix data.
    Gga,
    /// Recommended minimum navigation information.
    Rmc,
    /// DOP and active satellites.
    Gsa,
    /// Satellites in view, for one constellation.
    Gsv(Constellation),
    /// Track made good and ground speed.
    Vtg,
}

impl Sentence {
    /// Maps the `<talker><type>` prefix of a frame to a sentence type.
    pub fn identify(body: &[u8]) -> Option<Self> {
        match body.get(..IDENTIFIER_LENGTH)? {
            b"GNGGA" => Some(Sentence::Gga),
            b"GNRMC" => Some(Sentence::Rmc),
            b"GNGSA" => Some(Sentence::Gsa),
            b"GNVTG" => Some(Sentence::Vtg),
            [t0, t1, b'G', b'S', b'V'] => Constellation::from_talker(&[*t0, *t1]).map(Sentence::Gsv),
            _ => None,
        }
    }
}

/// Checks a terminated frame against its calculated checksum and routes it
/// to the matching sentence parser.
///
/// `frame` is everything between `$` and the line end. On error the model is
/// left untouched.
pub(crate) fn dispatch(
    frame: &[u8],
    calculated: u8,
    model: &mut NavigationModel,
    stats: &mut Statistics,
    now: u32,
) -> Result<Sentence, FrameError> {
    let star = frame
        .iter()
        .position(|&b| b == b'*')
        .ok_or(FrameError::MissingChecksumDelimiter)?;

    let digits = &frame[star + 1..];
    let expected = (from_hex(digits.first()) << 4) | from_hex(digits.get(1));
    if expected != calculated {
        stats.failed_checksum += 1;
        return Err((expected, calculated).into());
    }
    stats.passed_checksum += 1;

    let body = &frame[..star];
    let sentence = Sentence::identify(body)
        .ok_or_else(|| FrameError::UnrecognizedSentence(identifier(body)))?;

    debug!(
        "found {:?} frame: \"{}\"",
        sentence,
        String::from_utf8_lossy(body)
    );

    let with_fix = match sentence {
        Sentence::Gga => parse_gga(body, model, now),
        Sentence::Rmc => parse_rmc(body, model, now),
        Sentence::Gsa => parse_gsa(body, model, now),
        Sentence::Gsv(constellation) => parse_gsv(body, constellation, model, now),
        Sentence::Vtg => parse_vtg(body, model, now),
    };
    if with_fix {
        stats.sentences_with_fix += 1;
    }

    Ok(sentence)
}

/// Parse a GGA sentence. Returns true if it carried a position fix.
///
/// `id, utc, lat, N/S, lon, E/W, quality, sats, hdop, alt, M, geoid sep, M,
/// dgps age, dgps station`
fn parse_gga(body: &[u8], model: &mut NavigationModel, now: u32) -> bool {
    let f = Fields::<GGA_FIELDS>::split(body);

    if !f.get(1).is_empty() {
        model.time.set(parse_time(f.get(1)), now);
    }

    let has_position = !f.get(2).is_empty() && !f.get(4).is_empty();
    if has_position {
        model.location.set(coordinate(&f, 2), coordinate(&f, 4), now);
    }

    let quality = f.uint(6);
    commit!(now;
        model.fix_quality => quality,
        model.satellites_used => f.uint(7),
        model.altitude => f.float(9).round(),
        model.geoid_separation => f.float(11),
    );

    has_position && quality > 0
}

/// Parse an RMC sentence. Returns true if the status was active.
///
/// `id, utc, status, lat, N/S, lon, E/W, speed kn, track, date, mag var, E/W`
fn parse_rmc(body: &[u8], model: &mut NavigationModel, now: u32) -> bool {
    let f = Fields::<RMC_FIELDS>::split(body);

    if !f.get(1).is_empty() {
        model.time.set(parse_time(f.get(1)), now);
    }

    // a void status leaves the previous position in place
    let active = f.char(2) == b'A';
    if active {
        model.location.set(coordinate(&f, 3), coordinate(&f, 5), now);
    }

    commit!(now; model.speed => f.float(7));

    if !f.get(9).is_empty() {
        model.date.set(f.uint(9), now);
    }

    active
}

/// Parse a GSA sentence.
///
/// `id, mode, fix type, 12 x satellite id, pdop, hdop, vdop, system id`
fn parse_gsa(body: &[u8], model: &mut NavigationModel, now: u32) -> bool {
    let f = Fields::<GSA_FIELDS>::split(body);

    commit!(now;
        model.hdop => f.float(16),
        model.vdop => f.float(17),
        model.pdop => f.float(15),
        model.fix_type => f.uint(2),
    );

    match Constellation::from_system_id(f.uint(18)) {
        Some(constellation) => {
            let system = model.satellites.system_mut(constellation);
            for (i, slot) in system.active_satellite_ids.iter_mut().enumerate() {
                slot.update(f.uint(3 + i), now);
            }
        }
        None => debug!("GSA without known system id, active satellites not updated"),
    }

    false
}

/// Parse a GSV sentence into the table of `constellation`.
///
/// `id, message count, message index, satellites in view,
/// up to 4 x (id, elevation, azimuth, snr)`
///
/// Message `n` fills slots `(n - 1) * 4 ..`. Groups missing from a short
/// final message leave their slots as they were.
fn parse_gsv(
    body: &[u8],
    constellation: Constellation,
    model: &mut NavigationModel,
    now: u32,
) -> bool {
    let f = Fields::<GSV_FIELDS>::split(body);
    let message_index = f.uint(2) as usize;
    let system = model.satellites.system_mut(constellation);

    system.satellites_in_view_count.update(f.uint(3), now);

    if message_index == 0 {
        warn!("GSV message index 0, satellites in view not updated");
        return false;
    }

    // a trailing signal id (NMEA 4.1) never completes a group
    let groups = (f.len().saturating_sub(4) / 4).min(SATS_PER_GSV);
    for group in 0..groups {
        let slot = (message_index - 1)
            .saturating_mul(SATS_PER_GSV)
            .saturating_add(group);
        if slot >= MAX_SATELLITES {
            warn!(
                "GSV message {} exceeds {} satellites, dropping the rest",
                message_index, MAX_SATELLITES
            );
            break;
        }
        let base = 4 + group * 4;
        let sat = GsvSatellite {
            id: f.uint(base),
            elevation: f.uint(base + 1),
            azimuth: f.uint(base + 2),
            snr: f.uint(base + 3),
        };
        system.satellites_in_view[slot].set(&sat, now);
    }

    false
}

/// Parse a VTG sentence.
///
/// `id, track, T, track mag, M, speed kn, N, speed km/h, K, mode`
fn parse_vtg(body: &[u8], model: &mut NavigationModel, now: u32) -> bool {
    let f = Fields::<VTG_FIELDS>::split(body);

    if f.char(2) == b'T' {
        commit!(now;
            model.speed => f.float(5),
            model.course => f.float(1),
        );
    }

    false
}

/// Coordinate at `idx`, signed by the direction letter that follows it.
#[inline]
fn coordinate<const N: usize>(f: &Fields<'_, N>, idx: usize) -> RawDegrees {
    parse_degrees(f.get(idx), CardDir::from_byte(f.char(idx + 1)))
}

/// Converts `hhmmss[.ss]` into `hhmmsscc` without going through a float.
fn parse_time(token: &[u8]) -> u32 {
    let int_len = token.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut centis = 0;
    if token.get(int_len) == Some(&b'.') {
        let mut weight = 10;
        for &d in token[int_len + 1..]
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_digit())
        {
            centis += u32::from(d - b'0') * weight;
            weight /= 10;
        }
    }
    parse_uint(token).wrapping_mul(100).wrapping_add(centis)
}

/// Value of an ASCII hex digit, either case. Anything else is 0.
#[inline]
fn from_hex(c: Option<&u8>) -> u8 {
    match c {
        Some(&c @ b'0'..=b'9') => c - b'0',
        Some(&c @ b'a'..=b'f') => c - b'a' + 10,
        Some(&c @ b'A'..=b'F') => c - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Checksum;

    /// Payload plus its correct checksum, as the acquirer would hand it over.
    fn frame(body: &str) -> (String, u8) {
        let checksum = Checksum::of(body.as_bytes());
        (format!("{}*{:02X}", body, checksum), checksum)
    }

    fn run(body: &str, model: &mut NavigationModel) -> Result<Sentence, FrameError> {
        let (frame, checksum) = frame(body);
        dispatch(
            frame.as_bytes(),
            checksum,
            model,
            &mut Statistics::default(),
            100,
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn identify_sentences() {
        assert_eq!(Sentence::identify(b"GNGGA,1"), Some(Sentence::Gga));
        assert_eq!(
            Sentence::identify(b"BDGSV,1"),
            Some(Sentence::Gsv(Constellation::BeiDou))
        );
        assert_eq!(Sentence::identify(b"GPGGA,1"), None);
        assert_eq!(Sentence::identify(b"GAGSV,1"), None);
        assert_eq!(Sentence::identify(b"GN"), None);
    }

    #[test]
    fn hex_digits() {
        assert_eq!(from_hex(Some(&b'7')), 7);
        assert_eq!(from_hex(Some(&b'c')), 12);
        assert_eq!(from_hex(Some(&b'C')), 12);
        assert_eq!(from_hex(None), 0);
    }

    #[test]
    fn time_is_fixed_point() {
        assert_eq!(parse_time(b"165520.000"), 16_552_000);
        assert_eq!(parse_time(b"123519.99"), 12_351_999);
        assert_eq!(parse_time(b"123519.5"), 12_351_950);
        assert_eq!(parse_time(b"123519"), 12_351_900);
    }

    #[test]
    fn checksum_mismatch_leaves_model() {
        let mut model = NavigationModel::default();
        let mut stats = Statistics::default();
        let res = dispatch(
            b"GNVTG,181.50,T,,M,0.00,N,0.00,K,A*2F",
            0x2E,
            &mut model,
            &mut stats,
            0,
        );
        assert_matches!(res, Err(FrameError::InvalidChecksum(0x2F, 0x2E)));
        assert_eq!(stats.failed_checksum, 1);
        assert_eq!(stats.passed_checksum, 0);
        assert!(!model.course.is_valid());
    }

    #[test]
    fn missing_delimiter() {
        let mut model = NavigationModel::default();
        let mut stats = Statistics::default();
        let res = dispatch(b"GNVTG,181.50,T", 0, &mut model, &mut stats, 0);
        assert_matches!(res, Err(FrameError::MissingChecksumDelimiter));
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn unrecognized_sentence_counts_as_passed() {
        let mut model = NavigationModel::default();
        let mut stats = Statistics::default();
        let res = dispatch(
            b"GNZDA,165520.000,18,03,2023,00,00*44",
            0x44,
            &mut model,
            &mut stats,
            0,
        );
        assert_matches!(res, Err(FrameError::UnrecognizedSentence(ref id)) if id.as_str() == "GNZDA");
        assert_eq!(stats.passed_checksum, 1);
    }

    #[test]
    fn rmc_active() {
        let mut model = NavigationModel::default();
        let res = run(
            "GNRMC,165520.000,A,5000.95387,N,00024.919,E,0.00,181.50,180323,,,A",
            &mut model,
        );
        assert_matches!(res, Ok(Sentence::Rmc));
        assert_eq!(model.time.hour(), 16);
        assert_eq!(model.time.minute(), 55);
        assert_eq!(model.time.second(), 20);
        assert!(approx(model.location.lat(), 50.015898));
        assert!(approx(model.location.lng(), 0.415317));
        assert_eq!(model.date.day(), 18);
        assert_eq!(model.date.month(), 3);
        assert_eq!(model.date.year(), 2023);
        assert_eq!(model.speed.value(), 0.0);
        // course is owned by VTG
        assert!(!model.course.is_valid());
    }

    #[test]
    fn rmc_void_keeps_location_stale() {
        let mut model = NavigationModel::default();
        run("GNRMC,081836,V,,,,,,,130998,,", &mut model).unwrap();
        assert!(!model.location.is_valid());
        assert!(model.time.is_valid());
        assert!(model.speed.is_valid());
        assert_eq!(model.date.value(), 130_998);
    }

    #[test]
    fn rmc_without_date_or_time() {
        let mut model = NavigationModel::default();
        run("GNRMC,,V,,,,,1.5,,,,", &mut model).unwrap();
        assert!(!model.time.is_valid());
        assert!(!model.date.is_valid());
        assert_eq!(model.speed.value(), 1.5);
    }

    #[test]
    fn gga_southern_western() {
        let mut model = NavigationModel::default();
        let mut stats = Statistics::default();
        let (frame, checksum) =
            frame("GNGGA,123519.00,4807.038,S,01131.000,W,1,08,0.9,545.4,M,46.9,M,,");
        let res = dispatch(frame.as_bytes(), checksum, &mut model, &mut stats, 0);
        assert_matches!(res, Ok(Sentence::Gga));
        assert!(approx(model.location.lat(), -48.1173));
        assert!(approx(model.location.lng(), -11.516667));
        assert_eq!(model.altitude.value(), 545.0);
        assert_eq!(model.geoid_separation.value(), 46.9);
        assert_eq!(model.fix_quality.value(), 1);
        assert_eq!(model.satellites_used.value(), 8);
        assert_eq!(model.time.value(), 12_351_900);
        assert_eq!(stats.sentences_with_fix, 1);
        // GGA does not own the dilution of precision
        assert!(!model.hdop.is_valid());
    }

    #[test]
    fn gga_without_position() {
        let mut model = NavigationModel::default();
        run("GNGGA,,,,,,0,00,99.99,,,,,,", &mut model).unwrap();
        assert!(!model.location.is_valid());
        assert!(!model.time.is_valid());
        assert!(model.altitude.is_valid());
        assert_eq!(model.altitude.value(), 0.0);
    }

    #[test]
    fn gga_altitude_rounds() {
        let mut model = NavigationModel::default();
        run("GNGGA,165520.000,5000.95387,N,00024.91,E,1,07,2.7,101.5,M,48.3,M,,", &mut model)
            .unwrap();
        assert_eq!(model.altitude.value(), 102.0);
    }

    #[test]
    fn gsa_gps() {
        let mut model = NavigationModel::default();
        let mut stats = Statistics::default();
        let res = dispatch(
            b"GNGSA,A,3,10,16,,,,,,,,,,,9.7,2.7,9.3,1*36",
            0x36,
            &mut model,
            &mut stats,
            0,
        );
        assert_matches!(res, Ok(Sentence::Gsa));
        assert_eq!(model.hdop.value(), 2.7);
        assert_eq!(model.vdop.value(), 9.3);
        assert_eq!(model.pdop.value(), 9.7);
        assert_eq!(model.fix_type.value(), 3);
        let gps = &model.satellites.gps;
        assert_eq!(gps.active_satellite_ids[0].value(), 10);
        assert_eq!(gps.active_satellite_ids[1].value(), 16);
        assert!(gps.active_satellite_ids[2..].iter().all(|s| s.value() == 0));
        assert!(gps.active_satellite_ids[11].is_valid());
        assert!(!model.satellites.glonass.active_satellite_ids[0].is_valid());
    }

    #[test]
    fn gsa_without_system_id() {
        let mut model = NavigationModel::default();
        run("GNGSA,A,2,05,,,,,,,,,,,,1.5,1.2,0.9", &mut model).unwrap();
        assert_eq!(model.fix_type.value(), 2);
        assert_eq!(model.hdop.value(), 1.2);
        for sys in &[
            &model.satellites.gps,
            &model.satellites.glonass,
            &model.satellites.beidou,
        ] {
            assert!(!sys.active_satellite_ids[0].is_valid());
        }
    }

    #[test]
    fn gsv_fills_consecutive_windows() {
        let mut model = NavigationModel::default();
        run(
            "GPGSV,2,1,06,08,,,21,10,56,137,27,16,49,200,26,18,,,18,0",
            &mut model,
        )
        .unwrap();
        run("GPGSV,2,2,06,23,,,28,26,18,178,,0", &mut model).unwrap();

        let gps = &model.satellites.gps;
        assert_eq!(gps.satellites_in_view_count.value(), 6);
        let ids: Vec<u32> = gps.satellites_in_view.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![8, 10, 16, 18, 23, 26, 0, 0, 0, 0, 0, 0]);
        assert_eq!(gps.satellites_in_view[1].elevation.value(), 56);
        assert_eq!(gps.satellites_in_view[1].azimuth.value(), 137);
        assert_eq!(gps.satellites_in_view[1].snr.value(), 27);
        assert_eq!(gps.satellites_in_view[5].azimuth.value(), 178);
        assert_eq!(gps.satellites_in_view[5].snr.value(), 0);
        assert!(!gps.satellites_in_view[6].id.is_valid());
        assert!(!model.satellites.glonass.satellites_in_view_count.is_valid());
    }

    #[test]
    fn gsv_short_message_leaves_other_slots() {
        let mut model = NavigationModel::default();
        run("GLGSV,1,1,04,70,,,31,86,,,27,85,,,29,67,30,120,29,0", &mut model).unwrap();
        run("GLGSV,1,1,01,71,10,20,30", &mut model).unwrap();
        let glonass = &model.satellites.glonass;
        assert_eq!(glonass.satellites_in_view[0].id.value(), 71);
        assert_eq!(glonass.satellites_in_view[1].id.value(), 86);
        assert_eq!(glonass.satellites_in_view[3].elevation.value(), 30);
    }

    #[test]
    fn gsv_out_of_range_index() {
        let mut model = NavigationModel::default();
        run("BDGSV,4,4,14,21,30,056,33,28,37,280,26", &mut model).unwrap();
        run("BDGSV,4,0,14,21,30,056,33", &mut model).unwrap();
        let beidou = &model.satellites.beidou;
        assert_eq!(beidou.satellites_in_view_count.value(), 14);
        assert!(beidou.satellites_in_view.iter().all(|s| !s.id.is_valid()));
    }

    #[test]
    fn vtg_requires_true_track_tag() {
        let mut model = NavigationModel::default();
        run("GNVTG,054.7,,034.4,M,005.5,N,010.2,K,N", &mut model).unwrap();
        assert!(!model.speed.is_valid());
        assert!(!model.course.is_valid());

        run("GNVTG,054.7,T,034.4,M,005.5,N,010.2,K,A", &mut model).unwrap();
        assert_eq!(model.speed.value(), 5.5);
        assert_eq!(model.course.value(), 54.7);
    }
}
