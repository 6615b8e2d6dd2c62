//! Session command handlers: login, logout, whoami.

use dialoguer::Input;
use secrecy::SecretString;
use zheye_core::{EntityId, LoginCredentials, Store, UserProfile};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output::{self, Detail};

use super::util;

fn detail(user: &UserProfile, color: bool) -> String {
    Detail::new(color)
        .field("ID", user.id.as_ref().map(EntityId::as_str).unwrap_or_default())
        .field("Nickname", user.nickname.as_deref().unwrap_or_default())
        .field("Email", user.email.as_deref().unwrap_or_default())
        .field(
            "Column",
            user.column_id.as_ref().map(EntityId::as_str).unwrap_or_default(),
        )
        .body(user.bio.as_deref())
        .finish()
}

fn print_user(user: &UserProfile, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        user,
        |u| detail(u, color),
        |u| u.id.as_ref().map(ToString::to_string).unwrap_or_default(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn login(store: &Store, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(util::prompt_err)?,
    };
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").map_err(util::prompt_err)?,
    };
    if email.trim().is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "email and password cannot be empty".into(),
        });
    }

    let credentials = LoginCredentials::new(email.trim(), SecretString::from(password));
    let user = store.login_and_fetch_profile(&credentials).await?;
    output::status(
        &format!("Logged in as {}", user.display_name()),
        global.quiet,
    );
    Ok(())
}

pub fn logout(store: &Store, global: &GlobalOpts) {
    store.logout();
    output::status("Logged out", global.quiet);
}

pub async fn whoami(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    if !store.restore_session().await? {
        return Err(CliError::NotLoggedIn);
    }
    let user = store
        .snapshot()
        .current_user()
        .cloned()
        .ok_or(CliError::NotLoggedIn)?;
    print_user(&user, global)
}
