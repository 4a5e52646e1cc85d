//! Staleness-tracked values.
//!
//! Every quantity the decoder produces lives in a [`StaleField`]. Parsers
//! *stage* a value while working through a sentence and *commit* it once the
//! sentence is known to carry it. Consumers read the committed value and can
//! tell apart "never set", "set but already read" and "freshly updated".

use std::cell::Cell;
use std::time::Instant;

/// Value returned by `age` for a field that was never committed.
pub const AGE_NEVER: u32 = u32::MAX;

/// A monotonic millisecond counter.
///
/// The decoder stamps each commit with the time reported here. Any closure
/// `Fn() -> u32` is a clock, which keeps tests deterministic.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Allowed to wrap.
    fn millis(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    #[inline]
    fn millis(&self) -> u32 {
        self()
    }
}

/// The default clock: milliseconds elapsed since it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn millis(&self) -> u32 {
        // truncation is the intended wrap-around
        self.origin.elapsed().as_millis() as u32
    }
}

/// A two-phase value holder with freshness bookkeeping.
///
/// `valid` turns true on the first commit and stays true. `updated` is set by
/// every commit and cleared by every read of the value. Reads go through a
/// shared reference, so `updated` sits in a `Cell`.
#[derive(Debug, Clone, Default)]
pub struct StaleField<T> {
    committed: T,
    staged: T,
    valid: bool,
    updated: Cell<bool>,
    last_commit: u32,
}

impl<T: Copy + Default> StaleField<T> {
    pub fn new() -> Self {
        StaleField {
            committed: T::default(),
            staged: T::default(),
            valid: false,
            updated: Cell::new(false),
            last_commit: 0,
        }
    }

    /// True once the field has been committed at least once.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if the field was committed since the value was last read.
    #[inline]
    pub fn is_updated(&self) -> bool {
        self.updated.get()
    }

    /// Milliseconds since the last commit, measured against `now`, or
    /// [`AGE_NEVER`] if the field was never committed.
    #[inline]
    pub fn age(&self, now: u32) -> u32 {
        if self.valid {
            now.wrapping_sub(self.last_commit)
        } else {
            AGE_NEVER
        }
    }

    /// Returns the committed value and clears `updated`.
    #[inline]
    pub fn value(&self) -> T {
        self.updated.set(false);
        self.committed
    }

    /// Writes the pending value. The committed value is untouched.
    #[inline]
    pub(crate) fn stage(&mut self, value: T) {
        self.staged = value;
    }

    /// Publishes the staged value, stamped with `now`.
    #[inline]
    pub(crate) fn commit(&mut self, now: u32) {
        self.committed = self.staged;
        self.last_commit = now;
        self.valid = true;
        self.updated.set(true);
    }

    #[inline]
    pub(crate) fn update(&mut self, value: T, now: u32) {
        self.stage(value);
        self.commit(now);
    }
}

/// Whole-number quantities: satellite ids, counts, fix type.
pub type IntegerField = StaleField<u32>;

/// Real-valued quantities: dilution of precision, speed, course, altitude.
pub type DecimalField = StaleField<f64>;
