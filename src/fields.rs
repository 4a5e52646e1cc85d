//! Positional tokenizing of a frame payload.
//!
//! NMEA fields are not self-describing: their meaning is given by their
//! position. A [`Fields`] holds at most `N` comma separated tokens; a token
//! that is not there reads as the empty string, so optional tails that a
//! receiver chose to omit never turn into parse failures.

use arrayvec::ArrayVec;

use std::str;

#[derive(Debug)]
pub struct Fields<'a, const N: usize> {
    tokens: ArrayVec<&'a [u8], N>,
}

impl<'a, const N: usize> Fields<'a, N> {
    /// Splits `payload` on `,`. Tokens beyond `N` are dropped.
    pub fn split(payload: &'a [u8]) -> Self {
        let tokens = payload.split(|&b| b == b',').take(N).collect();
        Fields { tokens }
    }

    /// Number of tokens actually present.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> &'a [u8] {
        self.tokens.get(idx).copied().unwrap_or(b"")
    }

    /// First byte of a single-character field, `0` for an empty token.
    #[inline]
    pub fn char(&self, idx: usize) -> u8 {
        self.get(idx).first().copied().unwrap_or(0)
    }

    #[inline]
    pub fn uint(&self, idx: usize) -> u32 {
        parse_uint(self.get(idx))
    }

    #[inline]
    pub fn float(&self, idx: usize) -> f64 {
        parse_float(self.get(idx))
    }
}

/// Lenient base-10 parse: reads the leading digits and ignores the rest.
/// Anything without a leading digit is `0`.
pub fn parse_uint(token: &[u8]) -> u32 {
    token
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, &b| {
            acc.wrapping_mul(10).wrapping_add(u32::from(b - b'0'))
        })
}

/// Lenient float parse: reads the longest leading `[+-]digits[.digits]`
/// prefix. Anything without a leading number is `0.0`.
pub fn parse_float(token: &[u8]) -> f64 {
    let mut end = 0;
    if let Some(b'+') | Some(b'-') = token.first() {
        end = 1;
    }
    let digits_start = end;
    while end < token.len() && token[end].is_ascii_digit() {
        end += 1;
    }
    if end < token.len() && token[end] == b'.' {
        end += 1;
        while end < token.len() && token[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &token[digits_start..end] == b"." {
        return 0.0;
    }
    str::from_utf8(&token[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}
