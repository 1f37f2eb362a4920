//! Post model and the request payloads that create or change posts.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// Format of the `date` field, minute precision.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single blog post as persisted and as served by `GET /get`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: String,
}

/// Render a timestamp the way the `date` field stores it.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DATE_FORMAT).to_string()
}

/// Current local time in `date` field format.
pub fn now_date() -> String {
    format_date(&Local::now())
}

/// Next free ID: one past the highest ID currently stored, 1 for an empty store.
///
/// `None` when the highest stored ID is `i64::MAX`.
pub fn next_id(posts: &[Post]) -> Option<i64> {
    posts.iter().map(|p| p.id).max().unwrap_or(0).checked_add(1)
}

/// Decode a request id. Integral floats such as `3.0` name post 3; other
/// numbers can never match a post and decode as no id.
fn deserialize_post_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Int(id)) => Some(id),
        Some(RawId::Float(f))
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Some(f as i64)
        }
        _ => None,
    })
}

/// Request body for `POST /save`.
///
/// Any `date` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePostRequest {
    #[serde(default, deserialize_with = "deserialize_post_id")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
}

/// Request body for `POST /delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePostRequest {
    /// A missing or null id matches no post.
    #[serde(default, deserialize_with = "deserialize_post_id")]
    pub id: Option<i64>,
}

/// Validated intent of a save request, handed to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDraft {
    /// No id supplied: always a new post.
    Create { title: String, content: String },
    /// Update the post with `id`, or create a new one if it does not exist.
    UpdateOrCreate {
        id: i64,
        title: String,
        content: String,
    },
}

impl From<SavePostRequest> for PostDraft {
    fn from(request: SavePostRequest) -> Self {
        match request.id {
            Some(id) => PostDraft::UpdateOrCreate {
                id,
                title: request.title,
                content: request.content,
            },
            None => PostDraft::Create {
                title: request.title,
                content: request.content,
            },
        }
    }
}
