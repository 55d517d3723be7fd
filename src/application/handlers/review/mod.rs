//! Review command and query handlers.
//!
//! Every command that changes a review's verdict or validity recomputes the
//! song's rating aggregate after the review write commits.

mod create_review;
mod delete_review;
mod get_review;
mod list_reviews;
mod moderate_review;
mod recompute;
mod update_review;

#[cfg(test)]
mod test_support;

pub use create_review::{CreateReviewCommand, CreateReviewHandler, CreateReviewResult};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler};
pub use get_review::GetReviewHandler;
pub use list_reviews::{ListReviewsHandler, ListUserReviewsHandler};
pub use moderate_review::{ModerateReviewCommand, ModerateReviewHandler, ModerateReviewResult};
pub use recompute::ReviewPolicy;
pub use update_review::{UpdateReviewCommand, UpdateReviewHandler, UpdateReviewResult};
