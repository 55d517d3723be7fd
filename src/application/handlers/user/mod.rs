//! Public user queries.

mod top_reviewers;

pub use top_reviewers::{TopReviewersHandler, TopReviewersQuery};
