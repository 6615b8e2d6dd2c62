use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// An uploaded image (column avatar, post cover, user avatar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "super::timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// A post's image as the server returns it: either populated or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Id(EntityId),
    Embedded(Image),
}

impl ImageRef {
    /// The image URL, when the image is populated.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Embedded(image) => image.url.as_deref(),
            Self::Id(_) => None,
        }
    }
}
