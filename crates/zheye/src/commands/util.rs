//! Shared helpers for command handlers.

use zheye_core::guard::{self, NavigationDecision};
use zheye_core::{NavigationGuard, Store, UserProfile};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

/// Pass the navigation guard for a login-only page, restoring the
/// persisted session if needed, and return the signed-in user.
pub async fn require_login(store: &Store) -> Result<UserProfile, CliError> {
    let decision = NavigationGuard::new(store.clone())
        .before_each(guard::CREATE.meta)
        .await;
    if decision != NavigationDecision::Allow {
        return Err(CliError::NotLoggedIn);
    }
    store
        .snapshot()
        .current_user()
        .cloned()
        .ok_or(CliError::NotLoggedIn)
}
