use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, EntityId, ImageRef};

/// An article belonging to exactly one column.
///
/// Listing endpoints return posts with an `excerpt` and no `content`;
/// the single-post endpoint fills in `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "super::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "column")]
    pub column_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Content is HTML rather than Markdown.
    #[serde(rename = "isHTML", default, skip_serializing_if = "Option::is_none")]
    pub is_rich_text: Option<bool>,
}

/// Payload of `GET /columns/:id/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub list: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Payload of `DELETE /posts/:id`. The server may return the deleted post,
/// only its id, or nothing identifying at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedPost {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
}
