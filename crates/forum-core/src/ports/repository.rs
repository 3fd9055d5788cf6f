use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, returning what was removed.
    async fn delete(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Post repository.
///
/// Every list result is ordered by `date_created` ascending, then by id.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts matching every predicate set on `filter`.
    async fn find_all(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Persist the title, content and tags of an existing post.
    /// Likes and comments are left untouched.
    async fn update(&self, post: &Post) -> Result<(), RepoError>;

    /// Atomically add one like.
    async fn increment_likes(&self, id: Uuid) -> Result<(), RepoError>;

    /// Atomically append a comment and return the post afterwards.
    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Post, RepoError>;
}

/// Predicates for [`PostRepository::find_all`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub author: Option<String>,
    /// Exclusive lower bound on `date_created`.
    pub created_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `date_created`.
    pub created_before: Option<DateTime<Utc>>,
    /// Matches posts sharing at least one tag. An empty list matches nothing.
    pub tags: Option<Vec<String>>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    pub fn created_between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            created_after: Some(from),
            created_before: Some(to),
            ..Self::default()
        }
    }

    /// Evaluate the filter against a single post.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(author) = &self.author {
            if &post.author != author {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if post.date_created <= after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if post.date_created >= before {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !post.has_any_tag(tags) {
                return false;
            }
        }
        true
    }
}
