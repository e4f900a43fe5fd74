use super::NewPost;

/// Fixed demo data: three published posts and one draft, in creation order.
pub fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::new(
            "Getting Started with the Blog",
            "Posts have a title, some content and a published flag.",
            true,
        ),
        NewPost::new(
            "Introduction to Testing",
            "Testing is crucial for maintaining code quality and preventing bugs in production.",
            true,
        ),
        NewPost::draft(
            "Draft: Future Features",
            "This post contains ideas for future features that we might implement.",
        ),
        NewPost::new(
            "End-to-End Testing",
            "End-to-end tests drive the whole stack the way a reader would.",
            true,
        ),
    ]
}
