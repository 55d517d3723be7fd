//! HTTP DTOs for song endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::song::{Song, SongChanges, TimeRange};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSongRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// Partial update of catalog fields. Counters cannot be set here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSongRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub full_title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl From<UpdateSongRequest> for SongChanges {
    fn from(req: UpdateSongRequest) -> Self {
        Self {
            title: req.title,
            full_title: req.full_title,
            image_url: req.image_url,
            release_date: req.release_date,
        }
    }
}

/// Query parameters for `GET /api/songs/top`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopSongsParams {
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongResponse {
    pub id: i64,
    pub title: String,
    pub full_title: String,
    pub image_url: String,
    pub release_date: Option<NaiveDate>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub rating: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Song> for SongResponse {
    fn from(song: Song) -> Self {
        let aggregate = song.aggregate();
        Self {
            id: song.id().value(),
            title: song.title().to_string(),
            full_title: song.full_title().to_string(),
            image_url: song.image_url().to_string(),
            release_date: song.release_date(),
            like_count: aggregate.like_count,
            dislike_count: aggregate.dislike_count,
            rating: aggregate.rating,
            created_at: song.created_at().as_datetime().to_rfc3339(),
            updated_at: song.updated_at().as_datetime().to_rfc3339(),
        }
    }
}
