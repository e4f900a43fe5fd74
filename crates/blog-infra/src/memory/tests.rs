//! `PostService` behaviour over the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use blog_core::domain::{NewPost, Post, PostChanges, sample_posts};
use blog_core::error::{RepoError, ValidationError};
use blog_core::ports::{BaseRepository, PostEdit, PostRepository};
use blog_core::{DomainError, PostService};
use uuid::Uuid;

use super::InMemoryPostRepository;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

#[tokio::test]
async fn test_create_blank_title_adds_nothing() {
    let posts = service();

    let err = posts.create(NewPost::new("", "x", true)).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(posts.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_blank_content_fails() {
    let posts = service();

    let err = posts.create(NewPost::new("T", "", true)).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(posts.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_published_post_is_listed_as_published_only() {
    let posts = service();
    let post = posts
        .create(NewPost::new("Title A", "Content A", true))
        .await
        .unwrap();

    assert!(posts.published().await.unwrap().contains(&post));
    assert!(!posts.drafts().await.unwrap().contains(&post));
}

#[tokio::test]
async fn test_draft_post_is_listed_as_draft_only() {
    let posts = service();
    let post = posts
        .create(NewPost::new("Title B", "Content B", false))
        .await
        .unwrap();

    assert!(posts.drafts().await.unwrap().contains(&post));
    assert!(!posts.published().await.unwrap().contains(&post));
}

#[tokio::test]
async fn test_blank_title_update_leaves_post_unchanged() {
    let posts = service();
    let post = posts
        .create(NewPost::new("Original", "Body", true))
        .await
        .unwrap();

    let err = posts
        .update(post.id, PostChanges::default().title(""))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(posts.find(post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let posts = service();
    let post = posts
        .create(NewPost::new("Original", "Body", false))
        .await
        .unwrap();

    let updated = posts
        .update(post.id, PostChanges::default().title("Renamed").published(true))
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.content, "Body");
    assert!(updated.published);
    assert_eq!(posts.find(post.id).await.unwrap(), updated);
    assert!(posts.drafts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let err = service()
        .update(Uuid::new_v4(), PostChanges::default().title("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let err = service().delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_removes_post() {
    let posts = service();
    let post = posts.create(NewPost::new("T", "C", true)).await.unwrap();

    posts.delete(post.id).await.unwrap();

    assert!(matches!(
        posts.find(post.id).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
    assert!(posts.published().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_published_and_drafts_partition_all_posts() {
    let posts = service();
    posts.seed(sample_posts()).await.unwrap();
    posts.create(NewPost::draft("Another", "draft")).await.unwrap();

    let all: HashSet<Uuid> = posts.all().await.unwrap().iter().map(|p| p.id).collect();
    let published = posts.published().await.unwrap();
    let drafts = posts.drafts().await.unwrap();

    assert!(published.iter().all(|p| p.published));
    assert!(drafts.iter().all(|p| !p.published));

    let published_ids: HashSet<Uuid> = published.iter().map(|p| p.id).collect();
    let draft_ids: HashSet<Uuid> = drafts.iter().map(|p| p.id).collect();
    assert!(published_ids.is_disjoint(&draft_ids));
    assert_eq!(&published_ids | &draft_ids, all);
    assert_eq!(published.len(), 3);
    assert_eq!(drafts.len(), 2);
}

#[tokio::test]
async fn test_published_listing_is_repeatable() {
    let posts = service();
    posts.seed(sample_posts()).await.unwrap();

    let first = posts.published().await.unwrap();
    let second = posts.published().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_seed_stops_at_first_invalid_post() {
    let posts = service();
    let batch = vec![
        NewPost::new("Valid", "content", true),
        NewPost::new("", "no title", true),
        NewPost::new("Never created", "content", true),
    ];

    let err = posts.seed(batch).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(posts.count().await.unwrap(), 1);
}

/// Hands control back to the scheduler before every call, so concurrent
/// callers interleave at each repository boundary.
struct Interleaving(InMemoryPostRepository);

#[async_trait]
impl BaseRepository<Post, Uuid> for Interleaving {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        tokio::task::yield_now().await;
        self.0.find_by_id(id).await
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        tokio::task::yield_now().await;
        self.0.insert(post).await
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        tokio::task::yield_now().await;
        self.0.update(post).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        tokio::task::yield_now().await;
        BaseRepository::delete(&self.0, id).await
    }
}

#[async_trait]
impl PostRepository for Interleaving {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.0.find_all().await
    }

    async fn find_by_published(&self, published: bool) -> Result<Vec<Post>, RepoError> {
        self.0.find_by_published(published).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.0.count().await
    }

    async fn update_with(
        &self,
        id: Uuid,
        edit: PostEdit,
    ) -> Result<Result<Post, ValidationError>, RepoError> {
        tokio::task::yield_now().await;
        self.0.update_with(id, edit).await
    }
}

#[tokio::test]
async fn test_concurrent_updates_to_different_fields_both_land() {
    let posts = PostService::new(Arc::new(Interleaving(InMemoryPostRepository::new())));
    let post = posts
        .create(NewPost::new("Old", "Body", false))
        .await
        .unwrap();

    let (renamed, published) = tokio::join!(
        posts.update(post.id, PostChanges::default().title("New")),
        posts.update(post.id, PostChanges::default().published(true)),
    );
    renamed.unwrap();
    published.unwrap();

    let stored = posts.find(post.id).await.unwrap();
    assert_eq!(stored.title, "New");
    assert!(stored.published, "published update lost");
}
