//! Respawn time resolution
//!
//! The respawn manager's field name and numeric type change between host
//! versions, so the value is probed rather than read through a fixed API.
//! Every failure collapses to zero seconds; the update loop never sees an error.
//!
//! Contract: the reported quantity is seconds. Fractional readings are rounded
//! up so a wave never shows `00:00` while time is actually left.

mod probe;


pub use probe::ProbingTimeSource;
pub use respawn_types::MAX_SECONDS;

use crate::host::Value;

/// Seconds until the next wave, always within `0..=MAX_SECONDS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct RemainingTime(u32);

impl RemainingTime {
    pub const ZERO: RemainingTime = RemainingTime(0);
    pub const MAX: RemainingTime = RemainingTime(MAX_SECONDS);

    /// Clamp any whole-second count into range
    pub fn from_seconds(seconds: i64) -> Self {
        Self(seconds.clamp(0, MAX_SECONDS as i64) as u32)
    }

    pub fn seconds(self) -> u32 {
        self.0
    }

    pub fn minutes_part(self) -> u32 {
        self.0 / 60
    }

    pub fn seconds_part(self) -> u32 {
        self.0 % 60
    }
}

/// A numeric reading in whatever representation the host exposed it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber {
    Int16(i16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl RawNumber {
    /// Extract a number from a host value; `None` for non-numeric values
    pub fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Int16(v) => Some(RawNumber::Int16(v)),
            Value::Int32(v) => Some(RawNumber::Int32(v)),
            Value::UInt32(v) => Some(RawNumber::UInt32(v)),
            Value::Int64(v) => Some(RawNumber::Int64(v)),
            Value::Float32(v) => Some(RawNumber::Float32(v)),
            Value::Float64(v) => Some(RawNumber::Float64(v)),
            _ => None,
        }
    }

    /// Whole seconds as i32. Floats round up; wide integers saturate instead of wrapping.
    pub fn whole_seconds(self) -> i32 {
        match self {
            RawNumber::Int16(v) => i32::from(v),
            RawNumber::Int32(v) => v,
            RawNumber::UInt32(v) => i32::try_from(v).unwrap_or(i32::MAX),
            RawNumber::Int64(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            RawNumber::Float32(v) => ceil_seconds(f64::from(v)),
            RawNumber::Float64(v) => ceil_seconds(v),
        }
    }
}

fn ceil_seconds(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    // float -> int `as` saturates at the bounds
    v.ceil() as i32
}

/// Normalize a raw reading into a displayable remaining time
pub fn normalize(raw: RawNumber) -> RemainingTime {
    RemainingTime::from_seconds(i64::from(raw.whole_seconds()))
}

/// Anything that can report seconds until the next wave.
///
/// Implementations must not fail: an unknown value is reported as zero.
pub trait RemainingSecondsSource: Send + Sync {
    fn remaining_seconds(&self) -> RemainingTime;
}

/// Source that always reports the same value
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimeSource(pub RemainingTime);

impl RemainingSecondsSource for FixedTimeSource {
    fn remaining_seconds(&self) -> RemainingTime {
        self.0
    }
}
