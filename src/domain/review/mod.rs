//! Review domain module.
//!
//! Reviews are the only input to a song's rating aggregate. Any change to a
//! review's verdict or validity requires the aggregate to be recomputed.

mod errors;
mod review;

pub use errors::ReviewError;
pub use review::{NewReview, Review, ReviewChanges};
