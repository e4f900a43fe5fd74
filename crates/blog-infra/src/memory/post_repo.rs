//! In-memory post repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::{RepoError, ValidationError};
use blog_core::ports::{BaseRepository, PostEdit, PostRepository};

/// Post storage backed by a `Vec` behind an async `RwLock`.
///
/// Every operation holds the lock for its whole duration, so writes are
/// all-or-nothing from the point of view of other callers.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!(
                "post {} already exists",
                post.id
            )));
        }

        tracing::debug!(post_id = %post.id, published = post.published, "Inserting post");
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        tracing::debug!(post_id = %post.id, published = post.published, "Updating post");
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        tracing::debug!(post_id = %id, "Deleting post");
        posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::sorted(posts.clone()))
    }

    async fn find_by_published(&self, published: bool) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let matching = posts
            .iter()
            .filter(|p| p.published == published)
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn update_with(
        &self,
        id: Uuid,
        edit: PostEdit,
    ) -> Result<Result<Post, ValidationError>, RepoError> {
        // one write guard spans the read, the edit and the store
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        let next = match edit(&*slot) {
            Ok(next) => next,
            Err(invalid) => return Ok(Err(invalid)),
        };

        tracing::debug!(post_id = %id, published = next.published, "Updating post");
        *slot = next.clone();
        Ok(Ok(next))
    }
}
