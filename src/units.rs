//! Conversions for the knots and meters the decoder reports in.

pub const MPH_PER_KNOT: f64 = 1.150_779_45;
pub const MPS_PER_KNOT: f64 = 0.514_444_44;
pub const KMPH_PER_KNOT: f64 = 1.852;
pub const MILES_PER_METER: f64 = 0.000_621_371_12;
pub const KM_PER_METER: f64 = 0.001;
pub const FEET_PER_METER: f64 = 3.280_839_9;

#[inline]
pub fn knots_to_mph(knots: f64) -> f64 {
    knots * MPH_PER_KNOT
}

#[inline]
pub fn knots_to_mps(knots: f64) -> f64 {
    knots * MPS_PER_KNOT
}

#[inline]
pub fn knots_to_kmph(knots: f64) -> f64 {
    knots * KMPH_PER_KNOT
}

#[inline]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

#[inline]
pub fn meters_to_km(meters: f64) -> f64 {
    meters * KM_PER_METER
}

#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}
