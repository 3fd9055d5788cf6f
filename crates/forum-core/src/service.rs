//! Post service - orchestrates the repository and maps posts to transfer
//! objects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use forum_shared::{CommentDto, LikeResponse, PostDto};
use uuid::Uuid;

use crate::domain::{Comment, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostFilter, PostRepository};

/// Service for every post operation exposed by the forum API.
///
/// The repository is injected by the caller, so tests and the in-memory
/// fallback can stand in for the database.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post for `author`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if author, title or content is blank
    /// - `DomainError::Persistence` if the store rejects the write or hands
    ///   back a post without an identifier
    pub async fn create_post(
        &self,
        author: &str,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<PostDto, DomainError> {
        let post = Post::new(author.to_string(), title, content, tags)?;
        let saved = self.repo.insert(post).await?;
        if saved.id.is_nil() {
            return Err(DomainError::Persistence(
                "store returned no identifier for the new post".to_string(),
            ));
        }
        Ok(Self::to_dto(saved))
    }

    pub async fn find_post_by_id(&self, id: &str) -> Result<PostDto, DomainError> {
        let post = self.find_post(id).await?;
        Ok(Self::to_dto(post))
    }

    /// Overwrite the supplied fields of a post.
    ///
    /// Empty values count as absent, so an empty tag list keeps the
    /// existing tags. Fails with `DomainError::Validation` before touching
    /// the store when nothing usable was supplied.
    pub async fn update_post(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<PostDto, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::Validation(
                "no updatable fields supplied".to_string(),
            ));
        }

        let mut post = self.find_post(id).await?;
        post.apply(changes);

        self.repo
            .update(&post)
            .await
            .map_err(|e| not_found_or(e, id))?;

        // Re-read so concurrent likes and comments show up in the response.
        let post = self.find_post(id).await?;
        Ok(Self::to_dto(post))
    }

    /// Permanently remove a post and return what it looked like.
    pub async fn delete_post(&self, id: &str) -> Result<PostDto, DomainError> {
        let post_id = parse_id(id)?;
        let post = self
            .repo
            .delete(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        Ok(Self::to_dto(post))
    }

    pub async fn find_all_posts(&self) -> Result<Vec<PostDto>, DomainError> {
        self.find_many(PostFilter::all()).await
    }

    pub async fn find_posts_by_author(&self, author: &str) -> Result<Vec<PostDto>, DomainError> {
        self.find_many(PostFilter::by_author(author)).await
    }

    /// Posts carrying at least one of `tags`. No tags, no posts.
    pub async fn find_posts_by_tags(&self, tags: Vec<String>) -> Result<Vec<PostDto>, DomainError> {
        let tags = crate::domain::distinct_tags(tags);
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        self.find_many(PostFilter::by_tags(tags)).await
    }

    /// Posts created strictly between `from` and `to` (default: now).
    pub async fn find_posts_by_period(
        &self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<PostDto>, DomainError> {
        let to = to.unwrap_or_else(Utc::now);
        if from >= to {
            return Ok(Vec::new());
        }
        self.find_many(PostFilter::created_between(from, to)).await
    }

    /// Append a comment by `user` to the end of the post's comments.
    pub async fn add_comment(
        &self,
        post_id: &str,
        user: &str,
        message: String,
    ) -> Result<PostDto, DomainError> {
        let id = parse_id(post_id)?;
        let post = self
            .repo
            .push_comment(id, Comment::new(user, message))
            .await
            .map_err(|e| not_found_or(e, post_id))?;
        Ok(Self::to_dto(post))
    }

    pub async fn add_like(&self, post_id: &str) -> Result<LikeResponse, DomainError> {
        let id = parse_id(post_id)?;
        self.repo
            .increment_likes(id)
            .await
            .map_err(|e| not_found_or(e, post_id))?;
        Ok(LikeResponse::added())
    }

    async fn find_post(&self, id: &str) -> Result<Post, DomainError> {
        let post_id = parse_id(id)?;
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn find_many(&self, filter: PostFilter) -> Result<Vec<PostDto>, DomainError> {
        let posts = self.repo.find_all(filter).await?;
        Ok(posts.into_iter().map(Self::to_dto).collect())
    }

    /// Map a stored post to its transfer shape.
    pub fn to_dto(post: Post) -> PostDto {
        PostDto {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            author: post.author,
            date_created: post.date_created,
            tags: post.tags,
            likes: post.likes,
            comments: post
                .comments
                .into_iter()
                .map(|c| CommentDto {
                    user: c.user,
                    message: c.message,
                    date_created: c.date_created,
                    likes: c.likes,
                })
                .collect(),
        }
    }
}

/// A malformed id cannot name a stored post.
fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| DomainError::post_not_found(id))
}

fn not_found_or(err: RepoError, id: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}
