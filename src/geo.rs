//! Great-circle helpers on signed decimal degrees.
//!
//! The earth is treated as a sphere, so results can be off by up to 0.5%.

use std::f64::consts::PI;

/// Radius of the sphere used for distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_372_795.0;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Distance in meters between two positions.
pub fn distance_between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let delta = (lng1 - lng2).to_radians();
    let (sdlng, cdlng) = delta.sin_cos();
    let (slat1, clat1) = lat1.to_radians().sin_cos();
    let (slat2, clat2) = lat2.to_radians().sin_cos();

    let a = clat1 * slat2 - slat1 * clat2 * cdlng;
    let b = clat2 * sdlng;
    let num = (a * a + b * b).sqrt();
    let denom = slat1 * slat2 + clat1 * clat2 * cdlng;
    num.atan2(denom) * EARTH_RADIUS_M
}

/// Initial course in degrees from position 1 to position 2.
/// North is 0, east 90, west 270.
pub fn course_to(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlng = (lng2 - lng1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    let mut course = y.atan2(x);
    if course < 0.0 {
        course += 2.0 * PI;
    }
    course.to_degrees()
}

/// One of the 16 compass points for a course in degrees.
pub fn cardinal(course: f64) -> &'static str {
    let idx = ((course + 11.25) / 22.5).floor() as i64;
    CARDINALS[idx.rem_euclid(16) as usize]
}
