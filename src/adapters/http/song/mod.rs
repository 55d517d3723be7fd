//! HTTP adapter for song catalog endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateSongRequest, SongResponse, TopSongsParams, UpdateSongRequest};
pub use handlers::SongHandlers;
pub use routes::{admin_song_routes, song_routes};
