// ── Store facade ──
//
// Ties the data store to an API client. Owns the request-orchestration
// helpers every action is built from, and installs the interception hooks
// that drive the loading and error flags.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zheye_api::{ApiClient, Method, RequestHooks};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::state::{DataStore, ErrorState, StoreState};
use crate::storage::DurableStorage;
use crate::stream::StateStream;

/// The entry point for consumers.
///
/// Cheaply cloneable via `Arc<StoreInner>`. Holds the state container and
/// the client it issues requests through; there is no global instance.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: ClientConfig,
    data: Arc<DataStore>,
    client: ApiClient,
}

impl Store {
    /// Create a store, seeding the session from `storage`.
    ///
    /// Does no I/O against the server. A restored token is not attached to
    /// the client until [`restore_session`](Self::restore_session) runs.
    pub fn new(config: ClientConfig, storage: Arc<dyn DurableStorage>) -> Result<Self, CoreError> {
        let data = Arc::new(DataStore::new(storage));
        let hooks = Arc::new(StoreHooks::new(Arc::clone(&data)));
        let client =
            ApiClient::new(config.base_url.clone(), &config.transport())?.with_hooks(hooks);
        debug!(base_url = %config.base_url, "store created");

        Ok(Self {
            inner: Arc::new(StoreInner {
                config,
                data,
                client,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn data(&self) -> &Arc<DataStore> {
        &self.inner.data
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> Arc<StoreState> {
        self.inner.data.snapshot()
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.data.subscribe()
    }

    // ── Request orchestration ────────────────────────────────────

    /// GET `path`, commit the decoded payload through `apply`, return it.
    ///
    /// Failures propagate unchanged and leave the state untouched (apart
    /// from the flags driven by the interception hooks).
    pub async fn fetch_and_apply<T, F>(&self, path: &str, apply: F) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Clone,
        F: FnOnce(&DataStore, T),
    {
        let payload: T = self.inner.client.get(path).await?;
        apply(&self.inner.data, payload.clone());
        Ok(payload)
    }

    /// Send `method` to `path` with an optional JSON body, then commit the
    /// decoded payload and `extra` through `apply`.
    ///
    /// `extra` carries caller context the response does not echo back, such
    /// as the id of a deleted post.
    pub async fn mutate_and_apply<T, B, E, F>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra: E,
        apply: F,
    ) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Clone,
        B: Serialize + ?Sized + Sync,
        F: FnOnce(&DataStore, T, E),
    {
        let payload: T = self.inner.client.request(method, path, body).await?;
        apply(&self.inner.data, payload.clone(), extra);
        Ok(payload)
    }

    // ── Session restore ──────────────────────────────────────────

    /// Re-establish a persisted session.
    ///
    /// When the store is logged out but holds a token, attaches it to the
    /// client and fetches the current user. Returns `true` once the store is
    /// logged in, `false` when there was no token to restore. A failed fetch
    /// logs the session out before the error is returned.
    pub async fn restore_session(&self) -> Result<bool, CoreError> {
        let state = self.snapshot();
        if state.is_logged_in() {
            return Ok(true);
        }
        let Some(token) = state.session().token.clone() else {
            return Ok(false);
        };

        debug!("restoring persisted session");
        self.inner.client.set_bearer_token(Some(token.as_str()));
        match self.fetch_current_user().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(error = %e, "persisted session rejected; logging out");
                self.logout();
                Err(e)
            }
        }
    }
}

// ── Interception hooks ───────────────────────────────────────────

/// Drives the loading and error flags from the client's request lifecycle.
///
/// Loading stays raised while any request is in flight.
struct StoreHooks {
    data: Arc<DataStore>,
    in_flight: Mutex<usize>,
}

impl StoreHooks {
    fn new(data: Arc<DataStore>) -> Self {
        Self {
            data,
            in_flight: Mutex::new(0),
        }
    }

    fn finish(&self) {
        let mut in_flight = self.in_flight.lock().expect("in-flight lock poisoned");
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.data.set_loading(false);
        }
    }
}

impl RequestHooks for StoreHooks {
    fn on_request(&self) {
        let mut in_flight = self.in_flight.lock().expect("in-flight lock poisoned");
        *in_flight += 1;
        self.data.set_error(ErrorState::cleared());
        self.data.set_loading(true);
    }

    fn on_success(&self) {
        self.finish();
    }

    fn on_failure(&self, error: &zheye_api::Error) {
        let message = error
            .server_message()
            .map_or_else(|| error.to_string(), str::to_owned);
        self.data.set_error(ErrorState::raised(message));
        self.finish();
    }
}
