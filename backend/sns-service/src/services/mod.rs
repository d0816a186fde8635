/// Business logic layer for sns-service
///
/// Each service owns a clone of the shared pool and runs every mutating
/// operation inside one transaction, keeping the denormalized post counters
/// in step with the comment and like rows they summarize.
pub mod comments;
pub mod likes;
pub mod posts;

pub use comments::CommentService;
pub use likes::LikeService;
pub use posts::PostService;
