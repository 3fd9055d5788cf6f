use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment value - embedded in a post, with no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub message: String,
    #[serde(default)]
    pub likes: u64,
    pub date_created: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time and no likes.
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            likes: 0,
            date_created: Utc::now(),
        }
    }
}
