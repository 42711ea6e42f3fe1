#![forbid(unsafe_code)]

//! Playback speed factor.
//!
//! A speed factor is a positive, finite multiplier. Every pacing delay and
//! every renderer animation duration is divided by it: `2.0` plays twice as
//! fast, `0.5` half as fast.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Positive, finite speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    /// Normal speed.
    pub const NORMAL: Self = Self(1.0);

    /// Speed the playback starts at unless configured otherwise.
    pub const DEFAULT: Self = Self(1.5);

    /// Validate a raw factor. Zero, negative, NaN and infinite values are
    /// rejected.
    #[must_use]
    pub fn new(factor: f64) -> Option<Self> {
        (factor.is_finite() && factor > 0.0).then_some(Self(factor))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Scale a base duration: `base / factor`, rounded to the nanosecond.
    #[must_use]
    pub fn scale(self, base: Duration) -> Duration {
        let nanos = (base.as_nanos() as f64 / self.0).round();
        if nanos >= u64::MAX as f64 {
            return Duration::MAX;
        }
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Lock-free cell holding the current speed, shared with playback handles.
#[derive(Debug)]
pub(crate) struct AtomicSpeed(AtomicU64);

impl AtomicSpeed {
    pub(crate) fn new(speed: SpeedFactor) -> Self {
        Self(AtomicU64::new(speed.0.to_bits()))
    }

    pub(crate) fn load(&self) -> SpeedFactor {
        SpeedFactor(f64::from_bits(self.0.load(Ordering::Acquire)))
    }

    pub(crate) fn store(&self, speed: SpeedFactor) {
        self.0.store(speed.0.to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        assert!(SpeedFactor::new(0.0).is_none());
        assert!(SpeedFactor::new(-1.0).is_none());
        assert!(SpeedFactor::new(f64::NAN).is_none());
        assert!(SpeedFactor::new(f64::INFINITY).is_none());
        assert_eq!(SpeedFactor::new(2.5).map(SpeedFactor::get), Some(2.5));
    }

    #[test]
    fn scale_is_inverse_proportional() {
        let base = Duration::from_millis(1200);
        assert_eq!(SpeedFactor::NORMAL.scale(base), base);
        assert_eq!(
            SpeedFactor::new(2.0).unwrap().scale(base),
            Duration::from_millis(600)
        );
        assert_eq!(
            SpeedFactor::new(0.5).unwrap().scale(base),
            Duration::from_millis(2400)
        );
    }

    #[test]
    fn tiny_factor_saturates() {
        let tiny = SpeedFactor::new(f64::MIN_POSITIVE).unwrap();
        assert_eq!(tiny.scale(Duration::from_secs(1)), Duration::MAX);
    }

    #[test]
    fn atomic_round_trips_value() {
        let cell = AtomicSpeed::new(SpeedFactor::DEFAULT);
        assert_eq!(cell.load(), SpeedFactor::DEFAULT);
        cell.store(SpeedFactor::new(3.0).unwrap());
        assert_eq!(cell.load().get(), 3.0);
    }
}
