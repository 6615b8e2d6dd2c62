// ── Typed request payloads ──
//
// Bodies sent by the mutating actions. Optional fields are omitted from
// the JSON entirely rather than sent as `null`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::model::EntityId;

/// Email + password for `POST /user/login`.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// The wire body. Exposes the password only for the duration of the
    /// serialization borrow.
    pub(crate) fn body(&self) -> LoginBody<'_> {
        LoginBody {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

// ── Posts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Id of a previously uploaded image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EntityId>,
    #[serde(rename = "column")]
    pub column_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EntityId>,
    #[serde(rename = "isHTML", skip_serializing_if = "Option::is_none")]
    pub is_rich_text: Option<bool>,
}

impl CreatePostRequest {
    pub fn new(title: impl Into<String>, column_id: impl Into<EntityId>) -> Self {
        Self {
            title: title.into(),
            content: None,
            excerpt: None,
            image: None,
            column_id: column_id.into(),
            author: None,
            is_rich_text: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EntityId>,
    #[serde(rename = "isHTML", skip_serializing_if = "Option::is_none")]
    pub is_rich_text: Option<bool>,
}

impl UpdatePostRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
