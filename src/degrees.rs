//! Exact fixed-point coordinates, parsed from the NMEA `DDDMM.MMMM` notation.

/// A coordinate as whole degrees plus billionths of a degree.
///
/// Keeping the fraction as an integer avoids rounding the value before the
/// caller asks for it as a float.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawDegrees {
    pub whole_degrees: u16,
    pub billionths_of_degree_fraction: u32,
    pub is_negative: bool,
}

impl RawDegrees {
    /// Signed decimal degrees.
    pub fn to_decimal_degrees(&self) -> f64 {
        let value =
            f64::from(self.whole_degrees) + f64::from(self.billionths_of_degree_fraction) / 1e9;
        if self.is_negative {
            -value
        } else {
            value
        }
    }
}

/// The cardinal directions a coordinate can be given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'N' => Some(CardDir::North),
            b'S' => Some(CardDir::South),
            b'E' => Some(CardDir::East),
            b'W' => Some(CardDir::West),
            _ => None,
        }
    }

    #[inline]
    fn is_negative(self) -> bool {
        match self {
            CardDir::North | CardDir::East => false,
            CardDir::South | CardDir::West => true,
        }
    }
}

/// Parses `DDMM.MMMM` (latitude) or `DDDMM.MMMM` (longitude).
///
/// Degrees are everything left of the last two integer digits. The minutes
/// are accumulated as ten-millionths of a minute and rescaled by `5/3` into
/// billionths of a degree. Digits past the seventh fractional one are
/// ignored. A malformed token degrades to zero rather than failing.
pub fn parse_degrees(token: &[u8], dir: Option<CardDir>) -> RawDegrees {
    let int_len = token.iter().take_while(|b| b.is_ascii_digit()).count();
    let left_of_decimal = token[..int_len].iter().fold(0u32, |acc, &b| {
        acc.wrapping_mul(10).wrapping_add(u32::from(b - b'0'))
    });

    let mut multiplier: u32 = 10_000_000;
    let mut ten_millionths_of_minutes = (left_of_decimal % 100) * multiplier;

    if token.get(int_len) == Some(&b'.') {
        for &d in token[int_len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
        {
            multiplier /= 10;
            ten_millionths_of_minutes += u32::from(d - b'0') * multiplier;
        }
    }

    // widened: 59.9999999 min is 599_999_999, times 5 overflows u32
    let billionths = (5 * u64::from(ten_millionths_of_minutes) + 1) / 3;

    RawDegrees {
        whole_degrees: (left_of_decimal / 100) as u16,
        billionths_of_degree_fraction: billionths as u32,
        is_negative: dir.map_or(false, CardDir::is_negative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn latitude() {
        let deg = parse_degrees(b"5000.95387", Some(CardDir::North));
        assert_eq!(deg.whole_degrees, 50);
        assert_eq!(deg.billionths_of_degree_fraction, 15_897_833);
        assert!(!deg.is_negative);
        assert!(approx(deg.to_decimal_degrees(), 50.015898));
    }

    #[test]
    fn longitude_three_digit_degrees() {
        let deg = parse_degrees(b"12311.76", Some(CardDir::West));
        assert_eq!(deg.whole_degrees, 123);
        assert!(deg.is_negative);
        assert!(approx(deg.to_decimal_degrees(), -123.196));
    }

    #[test]
    fn southern_hemisphere_is_negative() {
        let deg = parse_degrees(b"3351.0000", CardDir::from_byte(b'S'));
        assert!(approx(deg.to_decimal_degrees(), -33.85));
    }

    #[test]
    fn missing_direction_stays_positive() {
        let deg = parse_degrees(b"0024.919", CardDir::from_byte(0));
        assert!(!deg.is_negative);
        assert!(approx(deg.to_decimal_degrees(), 0.415317));
    }

    #[test]
    fn excess_fraction_digits_are_ignored() {
        let a = parse_degrees(b"4916.2900000", None);
        let b = parse_degrees(b"4916.290000099", None);
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_degrees(b"", None), RawDegrees::default());
        assert_eq!(parse_degrees(b"abc", None).to_decimal_degrees(), 0.0);
    }
}
