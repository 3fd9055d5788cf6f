//! Domain entities - the core business objects.

mod comment;
mod post;

pub use comment::Comment;
pub use post::{Post, PostChanges, distinct_tags};
