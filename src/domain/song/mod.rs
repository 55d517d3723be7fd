//! Song catalog domain.
//!
//! Songs carry a denormalized rating aggregate. Catalog edits never touch
//! the aggregate; it is rewritten only by a full recompute from reviews.

mod errors;
mod song;

pub use errors::SongError;
pub use song::{
    NewSong, RatingAggregate, ReviewTally, Song, SongChanges, MAX_FULL_TITLE_LENGTH,
    MAX_TITLE_LENGTH,
};

use serde::{Deserialize, Serialize};

/// Window used by the "top songs" listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Number of days the window spans, or `None` for all time.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::All => None,
        }
    }
}

/// Default and maximum page size for the "top songs" listing.
pub const DEFAULT_TOP_LIMIT: u32 = 10;
pub const MAX_TOP_LIMIT: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_days() {
        assert_eq!(TimeRange::Week.days(), Some(7));
        assert_eq!(TimeRange::Month.days(), Some(30));
        assert_eq!(TimeRange::All.days(), None);
    }

    #[test]
    fn time_range_deserializes_lowercase() {
        let range: TimeRange = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(range, TimeRange::Month);
    }
}
