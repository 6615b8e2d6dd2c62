use serde::{Deserialize, Serialize};

use super::{EntityId, Image};

/// Profile of the signed-in user, as returned by `GET /user/current`.
///
/// Every field is optional on the wire; identity fields are always present
/// once the profile has been fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(rename = "nickName", default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// The column this user writes in.
    #[serde(rename = "column", default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
}

impl UserProfile {
    /// Overlay `other` onto `self`: fields present in `other` win,
    /// fields it omits keep their current value.
    pub fn merge(&mut self, other: UserProfile) {
        let UserProfile {
            id,
            nickname,
            column_id,
            email,
            bio,
            avatar,
        } = other;
        if id.is_some() {
            self.id = id;
        }
        if nickname.is_some() {
            self.nickname = nickname;
        }
        if column_id.is_some() {
            self.column_id = column_id;
        }
        if email.is_some() {
            self.email = email;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if avatar.is_some() {
            self.avatar = avatar;
        }
    }

    /// Best human-readable name: nickname, then email, then id.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_ref().map(EntityId::as_str))
            .unwrap_or("anonymous")
    }
}

/// A post's author: either the populated profile or just the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Id(EntityId),
    Profile(UserProfile),
}

impl Author {
    pub fn id(&self) -> Option<&EntityId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Profile(profile) => profile.id.as_ref(),
        }
    }
}
