//! Post entity for SeaORM. Tags and comments live in JSONB columns so each
//! row holds the whole aggregate.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use forum_core::RepoError;
use forum_core::domain::{Comment, Post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub date_created: DateTimeWithTimeZone,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub likes: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_value(model.tags)
            .map_err(|e| RepoError::Decode(format!("tags of post {}: {e}", model.id)))?;
        let comments: Vec<Comment> = serde_json::from_value(model.comments)
            .map_err(|e| RepoError::Decode(format!("comments of post {}: {e}", model.id)))?;
        let likes = u64::try_from(model.likes).map_err(|_| {
            RepoError::Decode(format!("likes of post {}: {}", model.id, model.likes))
        })?;

        Ok(Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            date_created: model.date_created.with_timezone(&Utc),
            tags,
            likes,
            comments,
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            date_created: Set(post.date_created.into()),
            tags: Set(serde_json::json!(post.tags)),
            likes: Set(i64::try_from(post.likes).unwrap_or(i64::MAX)),
            comments: Set(serde_json::json!(post.comments)),
        }
    }
}
