//! UTC instants used for session expiry, review windows and row metadata.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Signed: negative when `other` is later.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.plus(Duration::days(days))
    }

    /// Start of a trailing window such as "reviews from the last 7 days".
    pub fn minus_days(&self, days: i64) -> Self {
        self.plus(Duration::days(-days))
    }

    /// Whole seconds from `now` until this instant; zero once it has passed.
    /// Used for cookie `Max-Age`.
    pub fn seconds_until(&self, now: &Timestamp) -> i64 {
        self.duration_since(now).num_seconds().max(0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
