// ── Store actions ──
//
// Async operations that talk to the server and commit the result through
// a mutation. Each one is a thin composition of an endpoint, a typed
// payload, and the orchestration helpers on `Store`. Loading and error
// flags are handled by the client hooks, never here.

use tracing::{debug, info};
use zheye_api::Method;

use crate::error::CoreError;
use crate::model::{
    Column, ColumnPage, DeletedPost, LoginResponse, PageParams, Post, PostList, UserProfile,
};
use crate::requests::{CreatePostRequest, LoginCredentials, UpdatePostRequest};
use crate::state::DataStore;
use crate::store::Store;

impl Store {
    // ── Columns ──────────────────────────────────────────────────

    /// Load a page of columns. `None` params mean the first page.
    pub async fn fetch_columns(
        &self,
        params: Option<PageParams>,
    ) -> Result<ColumnPage, CoreError> {
        let params = params.unwrap_or_default();
        self.fetch_and_apply(
            &format!("columns?{}", params.query()),
            |store: &DataStore, page: ColumnPage| store.fetch_columns(page, params),
        )
        .await
    }

    /// Load the next page of columns for an incremental listing.
    ///
    /// Returns `None` without any I/O when that page (or a later one) has
    /// already been loaded; use [`Store::fetch_columns`] to refresh.
    pub async fn fetch_columns_if_needed(
        &self,
        params: Option<PageParams>,
    ) -> Result<Option<ColumnPage>, CoreError> {
        let params = params.unwrap_or_default();
        if self
            .snapshot()
            .loaded_column_page()
            .is_some_and(|loaded| loaded.current_page >= params.current_page)
        {
            debug!(page = params.current_page, "column page already loaded");
            return Ok(None);
        }
        self.fetch_columns(Some(params)).await.map(Some)
    }

    pub async fn fetch_column(&self, id: &str) -> Result<Column, CoreError> {
        self.fetch_and_apply(&format!("columns/{id}"), DataStore::fetch_column)
            .await
    }

    // ── Posts ────────────────────────────────────────────────────

    /// Load every post of a column, replacing the cached post map.
    pub async fn fetch_posts(&self, column_id: &str) -> Result<PostList, CoreError> {
        self.fetch_and_apply(
            &format!("columns/{column_id}/posts"),
            |store: &DataStore, page: PostList| store.fetch_posts(page.list),
        )
        .await
    }

    /// Load a post with its full content.
    pub async fn fetch_post(&self, id: &str) -> Result<Post, CoreError> {
        self.fetch_and_apply(&format!("posts/{id}"), DataStore::fetch_post)
            .await
    }

    pub async fn create_post(&self, payload: &CreatePostRequest) -> Result<Post, CoreError> {
        self.mutate_and_apply(
            Method::POST,
            "posts",
            Some(payload),
            (),
            |store: &DataStore, post: Post, ()| store.create_post(post),
        )
        .await
    }

    pub async fn update_post(
        &self,
        id: &str,
        payload: &UpdatePostRequest,
    ) -> Result<Post, CoreError> {
        self.mutate_and_apply(
            Method::PATCH,
            &format!("posts/{id}"),
            Some(payload),
            (),
            |store: &DataStore, post: Post, ()| store.update_post(post),
        )
        .await
    }

    /// Delete a post. The cached entry is removed by the id requested,
    /// whatever the server echoes back.
    pub async fn delete_post(&self, id: &str) -> Result<Option<DeletedPost>, CoreError> {
        self.mutate_and_apply::<Option<DeletedPost>, (), _, _>(
            Method::DELETE,
            &format!("posts/{id}"),
            None,
            id.to_owned(),
            |store: &DataStore, _deleted, id: String| store.delete_post(&id),
        )
        .await
    }

    // ── Session ──────────────────────────────────────────────────

    /// Fetch the signed-in user's profile and mark the session logged in.
    pub async fn fetch_current_user(&self) -> Result<UserProfile, CoreError> {
        self.fetch_and_apply("user/current", DataStore::fetch_current_user)
            .await
    }

    /// Exchange credentials for a token, then attach it to the client.
    ///
    /// The session is not logged in until the profile is fetched.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, CoreError> {
        debug!(email = %credentials.email, "logging in");
        let response = self
            .mutate_and_apply(
                Method::POST,
                "user/login",
                Some(&credentials.body()),
                (),
                |store: &DataStore, response: LoginResponse, ()| store.login(response),
            )
            .await?;
        self.client().set_bearer_token(Some(response.token.as_str()));
        Ok(response)
    }

    /// Log in and load the profile. The profile is only requested once the
    /// login succeeded; a failure at either step is returned as is.
    pub async fn login_and_fetch_profile(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserProfile, CoreError> {
        self.login(credentials).await?;
        self.fetch_current_user().await
    }

    /// Drop the session and stop sending the bearer token.
    pub fn logout(&self) {
        self.data().logout();
        self.client().set_bearer_token(None);
        info!("logged out");
    }
}
