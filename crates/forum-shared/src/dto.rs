//! Data Transfer Objects - request/response types for the forum API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// A comment as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub user: String,
    pub message: String,
    pub date_created: DateTime<Utc>,
    pub likes: u64,
}

/// A post as exposed by the API, comments embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date_created: DateTime<Utc>,
    pub tags: Vec<String>,
    pub likes: u64,
    pub comments: Vec<CommentDto>,
}

/// Body of `POST /forum/post/{author}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `PUT /forum/post/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body of `POST /forum/posts/period`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRequest {
    #[serde(deserialize_with = "deserialize_instant")]
    pub date_from: DateTime<Utc>,
    /// Upper bound; the current time when omitted.
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub date_to: Option<DateTime<Utc>>,
}

/// Parse an RFC 3339 timestamp, or a date-time or bare date read as UTC
/// (a bare date is midnight).
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(Utc.from_utc_datetime(&naive));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

fn deserialize_optional_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_instant(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
        })
        .transpose()
}

/// Body of `PUT /forum/post/{postId}/comment/{user}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    pub message: String,
}

/// Acknowledgment returned by the like operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub result: String,
}

impl LikeResponse {
    pub fn added() -> Self {
        Self {
            result: "Like added +1".to_string(),
        }
    }
}
