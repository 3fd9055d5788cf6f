use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Comment;
use crate::error::DomainError;

/// Post entity - the aggregate root; owns its comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date_created: DateTime<Utc>,
    pub tags: Vec<String>,
    pub likes: u64,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a new post with no likes and no comments.
    ///
    /// Fails with `DomainError::Validation` when `author`, `title` or
    /// `content` is blank.
    pub fn new(
        author: String,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<Self, DomainError> {
        for (field, value) in [("author", &author), ("title", &title), ("content", &content)] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{field} must not be empty")));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            author,
            date_created: Utc::now(),
            tags: distinct_tags(tags),
            likes: 0,
            comments: Vec::new(),
        })
    }

    /// Overwrite the fields carried by `changes`, keeping the rest.
    pub fn apply(&mut self, changes: PostChanges) {
        let PostChanges {
            title,
            content,
            tags,
        } = changes.normalized();

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Partial update of a post's editable fields.
///
/// Empty strings and an empty tag list count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    /// Drop empty values so that only real changes remain.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.trim().is_empty()),
            content: self.content.filter(|c| !c.trim().is_empty()),
            tags: self.tags.map(distinct_tags).filter(|t| !t.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        let normalized = self.clone().normalized();
        normalized.title.is_none() && normalized.content.is_none() && normalized.tags.is_none()
    }
}

/// Collapse duplicate tags, keeping the first occurrence of each.
/// Blank tags are dropped.
pub fn distinct_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !tag.trim().is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
