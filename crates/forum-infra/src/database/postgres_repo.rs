//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use forum_core::domain::{Comment, Post};
use forum_core::error::RepoError;
use forum_core::ports::{PostFilter, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError> {
        if filter.tags.as_ref().is_some_and(|t| t.is_empty()) {
            return Ok(Vec::new());
        }

        let mut query = PostEntity::find();

        if let Some(author) = filter.author {
            query = query.filter(post::Column::Author.eq(author));
        }
        if let Some(after) = filter.created_after {
            query = query.filter(post::Column::DateCreated.gt(after.fixed_offset()));
        }
        if let Some(before) = filter.created_before {
            query = query.filter(post::Column::DateCreated.lt(before.fixed_offset()));
        }
        if let Some(tags) = filter.tags {
            // jsonb containment per tag, OR-ed together
            let any_tag = tags.into_iter().fold(Condition::any(), |cond, tag| {
                cond.add(Expr::cust_with_values(
                    r#""tags" @> $1"#,
                    [serde_json::json!([tag])],
                ))
            });
            query = query.filter(any_tag);
        }

        let models = query
            .order_by_asc(post::Column::DateCreated)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(count = models.len(), "Loaded posts");

        models.into_iter().map(Post::try_from).collect()
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(post.title.clone()))
            .col_expr(post::Column::Content, Expr::value(post.content.clone()))
            .col_expr(post::Column::Tags, Expr::value(serde_json::json!(post.tags)))
            .filter(post::Column::Id.eq(post.id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Likes, Expr::col(post::Column::Likes).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        tracing::debug!(post_id = %id, "Like added");
        Ok(())
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Post, RepoError> {
        let appended = serde_json::to_value([&comment])
            .map_err(|e| RepoError::Decode(e.to_string()))?;

        let result = PostEntity::update_many()
            .col_expr(
                post::Column::Comments,
                Expr::cust_with_values(r#""comments" || $1"#, [appended]),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        Post::try_from(model)
    }
}
