//! Domain entities - the core business objects.

mod post;
mod samples;

pub use post::{NewPost, Post, PostChanges};
pub use samples::sample_posts;
