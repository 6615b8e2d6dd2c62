use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Bearer token issued by `POST /user/login`. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Payload of `POST /user/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: AuthToken,
}

/// Authentication state of the current user.
///
/// A token alone does not make the session logged in; `is_logged_in`
/// only flips after the profile fetch succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_logged_in: bool,
    pub token: Option<AuthToken>,
    pub profile: Option<UserProfile>,
}

impl Session {
    /// A logged-out session carrying nothing.
    pub fn logged_out() -> Self {
        Self::default()
    }
}
