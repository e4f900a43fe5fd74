use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::{RepoError, ValidationError};

/// Builds the next version of a post from the stored one, or rejects it.
pub type PostEdit = Box<dyn FnOnce(&Post) -> Result<Post, ValidationError> + Send>;

/// Generic repository trait defining standard CRUD operations.
///
/// Each call is atomic: a failed write leaves the store unchanged.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace a stored entity. Fails with `RepoError::NotFound` if it is absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Listings are ordered by `created_at`, then `id`, both ascending.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose `published` flag equals `published`.
    async fn find_by_published(&self, published: bool) -> Result<Vec<Post>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// Read, edit and write post `id` as one atomic step.
    ///
    /// No other write to the post can land between the read and the write.
    /// A rejected edit returns `Ok(Err(_))` and stores nothing; a missing
    /// post is `RepoError::NotFound`.
    async fn update_with(
        &self,
        id: Uuid,
        edit: PostEdit,
    ) -> Result<Result<Post, ValidationError>, RepoError>;
}
