//! Tunes - music catalog and review backend.
//!
//! Users register, log in with cookie sessions, and review songs with a
//! like or dislike. Each song carries a rating aggregate that is recomputed
//! from its valid reviews whenever a review's verdict or validity changes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
