//! Post service - validation and visibility rules over a `PostRepository`.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Entry point for every post operation.
///
/// A rejected create or update never writes: creates are validated before the
/// repository is called, updates are validated against the stored post inside
/// the repository's locked read-modify-write.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let post = Post::create(new)?;
        Ok(self.repo.insert(post).await?)
    }

    /// Apply `changes` to post `id`. Unspecified fields keep their stored
    /// values as of the moment the write happens.
    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        let updated = self
            .repo
            .update_with(id, Box::new(move |current: &Post| current.apply(changes)))
            .await
            .map_err(|e| not_found_or(e, id))?;

        Ok(updated?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| not_found_or(e, id))
    }

    pub async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_by_published(true).await?)
    }

    pub async fn drafts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_by_published(false).await?)
    }

    pub async fn all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.repo.count().await?)
    }

    /// Create `posts` in order, stopping at the first invalid entry.
    pub async fn seed(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        let mut created = Vec::with_capacity(posts.len());
        for new in posts {
            created.push(self.create(new).await?);
        }
        Ok(created)
    }
}

fn not_found_or(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::ports::{BaseRepository, PostEdit};
    use async_trait::async_trait;

    /// Repository whose every call fails, for checking error mapping.
    struct Unreachable;

    #[async_trait]
    impl BaseRepository<Post, Uuid> for Unreachable {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn insert(&self, _post: Post) -> Result<Post, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn update(&self, _post: Post) -> Result<Post, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for Unreachable {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Query("boom".to_string()))
        }

        async fn find_by_published(&self, _published: bool) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Query("boom".to_string()))
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(0)
        }

        async fn update_with(
            &self,
            _id: Uuid,
            _edit: PostEdit,
        ) -> Result<Result<Post, ValidationError>, RepoError> {
            Err(RepoError::NotFound)
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(Unreachable))
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let err = service()
            .create(NewPost::new("", "x", true))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_storage_failures_become_internal() {
        let err = service()
            .create(NewPost::new("T", "C", true))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));

        let err = service().published().await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn test_missing_row_on_update_is_not_found() {
        let id = Uuid::new_v4();
        let err = service()
            .update(id, PostChanges::default().title("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: missing, .. } if missing == id));
    }

    #[tokio::test]
    async fn test_missing_row_on_delete_is_not_found() {
        let id = Uuid::new_v4();
        let err = service().delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: missing, .. } if missing == id));
    }
}
