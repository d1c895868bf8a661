use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// Point in time a block was sealed, in fractional seconds since the UNIX epoch.
///
/// Always finite and non-negative, so it has exactly one canonical JSON
/// representation.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Create a timestamp from seconds since the UNIX epoch.
    pub fn from_secs(secs: f64) -> Result<Self, TypeError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(TypeError::InvalidTimestamp(secs));
        }
        Ok(Self(secs))
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        Self(secs)
    }

    /// The UNIX epoch.
    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Self::from_secs(secs).map_err(serde::de::Error::custom)
    }
}

/// Source of block timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at one instant. Makes block hashes reproducible in tests
/// and offline recomputation.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_epoch() {
        assert!(Timestamp::now() > Timestamp::zero());
    }

    #[test]
    fn rejects_non_finite_and_negative() {
        assert!(Timestamp::from_secs(f64::NAN).is_err());
        assert!(Timestamp::from_secs(f64::INFINITY).is_err());
        assert!(Timestamp::from_secs(-1.0).is_err());
        assert!(Timestamp::from_secs(1_700_000_000.25).is_ok());
    }

    #[test]
    fn serializes_as_bare_number() {
        let ts = Timestamp::from_secs(1_700_000_000.5).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000.5");
        let parsed: Timestamp = serde_json::from_str("1700000000.5").unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Timestamp>("-3.0").is_err());
    }

    #[test]
    fn fixed_clock_is_stable() {
        let ts = Timestamp::from_secs(42.0).unwrap();
        let clock = FixedClock(ts);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), ts);
    }
}
