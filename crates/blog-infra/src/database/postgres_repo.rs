//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::{RepoError, ValidationError};
use blog_core::ports::{PostEdit, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_published(&self, published: bool) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(published, "Listing posts by visibility");

        let result = PostEntity::find()
            .filter(post::Column::Published.eq(published))
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn update_with(
        &self,
        id: Uuid,
        edit: PostEdit,
    ) -> Result<Result<Post, ValidationError>, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        // row stays locked until commit or rollback
        let current: Post = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?
            .into();

        let next = match edit(&current) {
            Ok(next) => next,
            Err(invalid) => {
                txn.rollback().await.map_err(query_error)?;
                return Ok(Err(invalid));
            }
        };

        let active_model: post::ActiveModel = next.into();
        let model = active_model.update(&txn).await.map_err(query_error)?;
        txn.commit().await.map_err(query_error)?;

        tracing::debug!(post_id = %id, published = model.published, "Post updated");
        Ok(Ok(model.into()))
    }
}
