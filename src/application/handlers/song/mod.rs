//! Song catalog handlers.
//!
//! Catalog commands never write the rating aggregate; only the review
//! handlers trigger a recompute.

mod create_song;
mod delete_song;
mod song_queries;
mod update_song;

pub use create_song::{CreateSongCommand, CreateSongHandler};
pub use delete_song::DeleteSongHandler;
pub use song_queries::{GetSongHandler, ListSongsHandler, TopSongsHandler, TopSongsQuery};
pub use update_song::{UpdateSongCommand, UpdateSongHandler};
