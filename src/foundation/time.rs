//! Exact rational media time.
//!
//! Clip durations are concatenated and overlapped many times while building a timeline, so
//! time is never carried as floating-point seconds here: [`MediaTime`] is a `value / timescale`
//! pair compared and combined with integer arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use crate::foundation::error::{MontageError, MontageResult};

/// A point (or length) on a media timeline, `value / timescale` seconds.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MediaTimeDef")]
pub struct MediaTime {
    value: i64,
    timescale: i32, // > 0
}

#[derive(serde::Deserialize)]
struct MediaTimeDef {
    value: i64,
    timescale: i32,
}

impl TryFrom<MediaTimeDef> for MediaTime {
    type Error = MontageError;

    fn try_from(def: MediaTimeDef) -> MontageResult<Self> {
        Self::new(def.value, def.timescale)
    }
}

impl MediaTime {
    /// Time zero.
    pub const ZERO: Self = Self {
        value: 0,
        timescale: 1,
    };

    /// Build a time value; `timescale` must be > 0.
    pub fn new(value: i64, timescale: i32) -> MontageResult<Self> {
        if timescale <= 0 {
            return Err(MontageError::validation(format!(
                "MediaTime timescale must be > 0 (got {timescale})"
            )));
        }
        Ok(Self { value, timescale })
    }

    /// Whole seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self {
            value: secs,
            timescale: 1,
        }
    }

    /// Milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            value: millis,
            timescale: 1000,
        }
    }

    /// Numerator.
    pub fn value(self) -> i64 {
        self.value
    }

    /// Denominator (units per second).
    pub fn timescale(self) -> i32 {
        self.timescale
    }

    /// Lossy conversion for display and logging.
    pub fn as_secs_f64(self) -> f64 {
        self.value as f64 / f64::from(self.timescale)
    }

    /// `true` when the value is exactly zero.
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// `true` when the value is strictly below zero.
    pub fn is_negative(self) -> bool {
        self.value < 0
    }

    /// Smallest equivalent `value / timescale` pair.
    pub fn reduced(self) -> Self {
        if self.value == 0 {
            return Self::ZERO;
        }
        let g = gcd(
            u128::from(self.value.unsigned_abs()),
            u128::from(self.timescale.unsigned_abs()),
        ) as i64;
        // g divides timescale, so both quotients keep their widths.
        Self {
            value: self.value / g,
            timescale: (i64::from(self.timescale) / g) as i32,
        }
    }

    fn combine(self, rhs: Self, op: impl Fn(i128, i128) -> i128) -> Self {
        let a = i128::from(self.timescale);
        let b = i128::from(rhs.timescale);
        let common = a / gcd(a as u128, b as u128) as i128 * b;
        let lhs_v = i128::from(self.value) * (common / a);
        let rhs_v = i128::from(rhs.value) * (common / b);
        let fallback = self.timescale.max(rhs.timescale);
        Self::from_wide(op(lhs_v, rhs_v), common, fallback)
    }

    fn from_wide(value: i128, timescale: i128, fallback_timescale: i32) -> Self {
        let g = gcd(value.unsigned_abs(), timescale as u128).max(1) as i128;
        let (value, timescale) = if value == 0 {
            (0, 1)
        } else {
            (value / g, timescale / g)
        };
        if timescale <= i128::from(i32::MAX) {
            return Self {
                value: saturate_i64(value),
                timescale: timescale as i32,
            };
        }

        // No exact i32 timescale exists; round to the coarser input scale.
        let target = i128::from(fallback_timescale);
        Self {
            value: saturate_i64(div_round(value * target, timescale)),
            timescale: fallback_timescale,
        }
    }

    fn cross(self, rhs: Self) -> (i128, i128) {
        (
            i128::from(self.value) * i128::from(rhs.timescale),
            i128::from(rhs.value) * i128::from(self.timescale),
        )
    }
}

impl Default for MediaTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for MediaTime {
    fn eq(&self, other: &Self) -> bool {
        let (l, r) = self.cross(*other);
        l == r
    }
}

impl Eq for MediaTime {}

impl PartialOrd for MediaTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MediaTime {
    fn cmp(&self, other: &Self) -> Ordering {
        let (l, r) = self.cross(*other);
        l.cmp(&r)
    }
}

impl Hash for MediaTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let r = self.reduced();
        r.value.hash(state);
        r.timescale.hash(state);
    }
}

impl Add for MediaTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Sub for MediaTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a - b)
    }
}

impl fmt::Display for MediaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timescale == 1 {
            write!(f, "{}s", self.value)
        } else {
            write!(f, "{}/{}s", self.value, self.timescale)
        }
    }
}

/// Half-open range `[start, start + duration)` on a media timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TimeRangeDef")]
pub struct TimeRange {
    start: MediaTime,
    duration: MediaTime, // >= 0
}

#[derive(serde::Deserialize)]
struct TimeRangeDef {
    start: MediaTime,
    duration: MediaTime,
}

impl TryFrom<TimeRangeDef> for TimeRange {
    type Error = MontageError;

    fn try_from(def: TimeRangeDef) -> MontageResult<Self> {
        Self::new(def.start, def.duration)
    }
}

impl TimeRange {
    /// Build a range; `duration` must be >= 0.
    pub fn new(start: MediaTime, duration: MediaTime) -> MontageResult<Self> {
        if duration.is_negative() {
            return Err(MontageError::validation(format!(
                "TimeRange duration must be >= 0 (got {duration})"
            )));
        }
        Ok(Self { start, duration })
    }

    /// Build `[start, end)`; `end` must not precede `start`.
    pub fn from_start_end(start: MediaTime, end: MediaTime) -> MontageResult<Self> {
        if end < start {
            return Err(MontageError::validation(format!(
                "TimeRange end {end} precedes start {start}"
            )));
        }
        Ok(Self {
            start,
            duration: end - start,
        })
    }

    /// Inclusive start.
    pub fn start(self) -> MediaTime {
        self.start
    }

    /// Length of the range.
    pub fn duration(self) -> MediaTime {
        self.duration
    }

    /// Exclusive end.
    pub fn end(self) -> MediaTime {
        self.start + self.duration
    }

    /// `true` for zero-length ranges.
    pub fn is_empty(self) -> bool {
        self.duration.is_zero()
    }

    /// Half-open containment test.
    pub fn contains(self, t: MediaTime) -> bool {
        self.start <= t && t < self.end()
    }

    /// `true` when both ranges share at least one instant. Empty ranges overlap nothing.
    pub fn overlaps(self, other: TimeRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }

    /// Shared sub-range, if any.
    pub fn intersection(self, other: TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        if end <= start {
            return None;
        }
        Some(Self {
            start,
            duration: end - start,
        })
    }

    /// Same start, new end. Fails if `end` precedes the start.
    pub fn with_end(self, end: MediaTime) -> MontageResult<Self> {
        Self::from_start_end(self.start, end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn div_round(n: i128, d: i128) -> i128 {
    // d > 0
    let q = n / d;
    let r = n % d;
    if 2 * r.abs() >= d { q + n.signum() } else { q }
}

fn saturate_i64(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
