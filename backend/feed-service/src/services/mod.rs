/// Business logic layer.
pub mod feed;
pub mod posts;

pub use feed::FeedService;
pub use posts::PostService;
