//! # Temporal Types — UTC-Only Timestamps and Clocks
//!
//! Defines `Timestamp`, a UTC-only instant truncated to seconds precision,
//! and the `Clock` abstraction the state machine reads "now" from.
//!
//! ## Invariant
//!
//! Publish dates are compared against the clock with `<=` / `>`. Both sides
//! are truncated to whole seconds, so a date picked in the editor and the
//! clock reading taken in the same second compare as equal, which makes the
//! post due (not future).
//!
//! ## Clocks
//!
//! - [`SystemClock`]: wall clock.
//! - [`FixedClock`]: always the same instant.
//! - [`ManualClock`]: shared, movable instant; every clone observes `set()`
//!   and `advance()` calls made through any other clone.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuillError;

/// Epoch seconds of 0001-01-01T00:00:00Z.
const DISTANT_PAST_SECS: i64 = -62_135_596_800;

/// Epoch seconds of 4001-01-01T00:00:00Z.
const DISTANT_FUTURE_SECS: i64 = 64_092_211_200;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: from an RFC 3339 string, rejecting non-UTC offsets.
/// - [`Timestamp::parse_lenient()`]: from an RFC 3339 string with any offset.
///
/// Deserialization goes through [`Timestamp::parse_lenient()`], so
/// sub-second input is truncated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// An instant far enough in the past that every clock reading is after it.
    pub fn distant_past() -> Self {
        Self(DateTime::from_timestamp(DISTANT_PAST_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    /// An instant far enough in the future that every clock reading is before it.
    pub fn distant_future() -> Self {
        Self(
            DateTime::from_timestamp(DISTANT_FUTURE_SECS, 0)
                .map(truncate_to_seconds)
                .unwrap_or_else(|| truncate_to_seconds(DateTime::<Utc>::MAX_UTC)),
        )
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Only the `Z` suffix is accepted. Explicit offsets, even `+00:00`,
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, QuillError> {
        if !s.ends_with('Z') {
            return Err(QuillError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any timezone
    /// offset and converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, QuillError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            QuillError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, QuillError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| QuillError::InvalidTimestamp(format!("unix timestamp out of range: {secs}")))?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Offset this timestamp by `delta`, or `None` on overflow.
    pub fn checked_add(&self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self::from_utc)
    }

    /// Render as RFC 3339 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_rfc3339(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = QuillError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_lenient(&s)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ─── Clocks ──────────────────────────────────────────────────────────

/// Source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock moved explicitly by its owner.
///
/// Clones share the same instant, so a clone handed to a state machine
/// observes every `set()` / `advance()` made through the original.
#[derive(Debug, Clone)]
pub struct ManualClock {
    epoch_secs: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            epoch_secs: Arc::new(AtomicI64::new(start.epoch_secs())),
        }
    }

    /// Move the clock to `at`.
    pub fn set(&self, at: Timestamp) {
        self.epoch_secs.store(at.epoch_secs(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for a negative `by`).
    ///
    /// On overflow the clock pins to [`Timestamp::distant_future()`] or
    /// [`Timestamp::distant_past()`].
    pub fn advance(&self, by: Duration) {
        let current = self.now();
        let next = current.checked_add(by).unwrap_or(if by < Duration::zero() {
            Timestamp::distant_past()
        } else {
            Timestamp::distant_future()
        });
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let secs = self.epoch_secs.load(Ordering::SeqCst);
        // Only valid timestamps are ever stored.
        Timestamp::from_epoch_secs(secs).unwrap_or_else(|_| Timestamp::distant_future())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> Timestamp {
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
    }

    #[test]
    fn test_now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let dt_with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(dt_with_nanos);
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_rfc3339(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_display_matches_rfc3339() {
        let ts = Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap());
        assert_eq!(format!("{ts}"), "2026-06-30T23:59:59Z");
    }

    #[test]
    fn test_distant_bounds() {
        assert_eq!(Timestamp::distant_past().to_rfc3339(), "0001-01-01T00:00:00Z");
        assert_eq!(Timestamp::distant_future().to_rfc3339(), "4001-01-01T00:00:00Z");
        assert!(Timestamp::distant_past() < Timestamp::now());
        assert!(Timestamp::now() < Timestamp::distant_future());
    }

    // ---- parsing ----

    #[test]
    fn test_parse_z_suffix_accepted() {
        assert_eq!(noon().to_rfc3339(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn test_parse_offset_rejected() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
    }

    #[test]
    fn test_parse_subseconds_truncated() {
        let ts = Timestamp::parse("2026-01-15T12:00:00.123456Z").unwrap();
        assert_eq!(ts, noon());
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("2026-01-15").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_parse_lenient_converts_offset() {
        let ts = Timestamp::parse_lenient("2026-01-15T17:00:00+05:00").unwrap();
        assert_eq!(ts, noon());
        let via_from_str: Timestamp = "2026-01-15T17:00:00+05:00".parse().unwrap();
        assert_eq!(via_from_str, noon());
    }

    #[test]
    fn test_epoch_secs_out_of_range() {
        assert!(Timestamp::from_epoch_secs(i64::MAX).is_err());
    }

    #[test]
    fn test_checked_add() {
        let later = noon().checked_add(Duration::hours(2)).unwrap();
        assert_eq!(later.to_rfc3339(), "2026-01-15T14:00:00Z");
        assert!(Timestamp::distant_future().checked_add(Duration::days(1_000_000_000)).is_none());
    }

    #[test]
    fn test_ordering() {
        let earlier = noon();
        let later = Timestamp::parse("2026-01-15T12:00:01Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&noon()).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, noon());
    }

    #[test]
    fn test_deserialize_truncates_subseconds() {
        let parsed: Timestamp = serde_json::from_str("\"2026-01-15T12:00:00.500Z\"").unwrap();
        assert_eq!(parsed, noon());
        assert_eq!(parsed.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_deserialize_converts_offset_and_rejects_garbage() {
        let parsed: Timestamp = serde_json::from_str("\"2026-01-15T17:00:00.999+05:00\"").unwrap();
        assert_eq!(parsed, noon());
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }

    // ---- clocks ----

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(noon());
        assert_eq!(clock.now(), noon());
        assert_eq!((&clock).now(), noon());
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(noon());
        let handle = clock.clone();
        clock.advance(Duration::minutes(90));
        assert_eq!(handle.now().to_rfc3339(), "2026-01-15T13:30:00Z");
        handle.set(Timestamp::distant_past());
        assert_eq!(clock.now(), Timestamp::distant_past());
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let clock = ManualClock::new(Timestamp::distant_future());
        clock.advance(Duration::days(1_000_000_000));
        assert_eq!(clock.now(), Timestamp::distant_future());
    }

    #[test]
    fn test_system_clock_is_recent() {
        let before = Timestamp::now();
        let read = SystemClock.now();
        assert!(read >= before);
    }
}
