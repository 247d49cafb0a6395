//! Clock abstraction for geolocal.
//!
//! Provides a trait for getting the current time, with both real and mock implementations
//! so generated tables can be stamped deterministically in tests.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};

/// Trait for getting the current Unix timestamp.
pub trait Clock: Send + Sync {
    /// Returns the current time as Unix seconds since epoch.
    fn now_unix_sec(&self) -> u64;

    /// Returns the current time formatted by [`format_utc`].
    fn now_utc(&self) -> String {
        format_utc(self.now_unix_sec())
    }
}

/// Real system clock implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_sec(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Mock clock for testing with a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    timestamp: u64,
}

impl MockClock {
    /// Create a mock clock with a fixed timestamp.
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl Clock for MockClock {
    fn now_unix_sec(&self) -> u64 {
        self.timestamp
    }
}

/// Format Unix seconds as `YYYY-MM-DDTHH:MM:SSZ`.
/// Timestamps outside chrono's range fall back to the raw number.
pub fn format_utc(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
