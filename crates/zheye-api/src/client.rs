// HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, envelope unwrapping,
// bearer-token management, and request interception hooks. Endpoint paths
// are supplied by the caller; this module only knows transport mechanics.

use std::sync::{Arc, RwLock};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::hooks::{NoopHooks, RequestHooks};
use crate::models::{Envelope, ErrorBody};
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the `/api/` surface.
///
/// Handles the `{ code, msg, data }` envelope and returns unwrapped `data`
/// payloads. A bearer token, once set, is attached to every subsequent
/// request until cleared.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Pre-built `Authorization` header value, marked sensitive.
    bearer: RwLock<Option<HeaderValue>>,
    hooks: Arc<dyn RequestHooks>,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:8080/api/`. A
    /// trailing slash is added if missing so relative paths join beneath it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            bearer: RwLock::new(None),
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Replace the interception hooks invoked around every request.
    pub fn with_hooks(mut self, hooks: Arc<dyn RequestHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// The API root all endpoint paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer token management ───────────────────────────────────────

    /// Attach (`Some`) or clear (`None`) the default `Authorization` header.
    pub fn set_bearer_token(&self, token: Option<&str>) {
        let value = token.and_then(|token| {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    Some(value)
                }
                Err(_) => {
                    warn!("token is not a valid header value; requests will be anonymous");
                    None
                }
            }
        });
        debug!(attached = value.is_some(), "updating bearer token");
        *self.bearer.write().expect("bearer lock poisoned") = value;
    }

    /// Whether requests currently carry an `Authorization` header.
    pub fn has_bearer_token(&self) -> bool {
        self.bearer.read().expect("bearer lock poisoned").is_some()
    }

    fn bearer_header(&self) -> Option<HeaderValue> {
        self.bearer.read().expect("bearer lock poisoned").clone()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an endpoint path (e.g. `columns/abc/posts`) against the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request and unwrap the envelope's `data`.
    ///
    /// `body`, when present, is sent as JSON. Interception hooks observe
    /// the request whatever its outcome.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.hooks.on_request();
        let result = self.send(method, path, body).await;
        match &result {
            Ok(_) => self.hooks.on_success(),
            Err(e) => self.hooks.on_failure(e),
        }
        result
    }

    /// Send a GET request and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint_url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if let Some(auth) = self.bearer_header() {
            builder = builder.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        parse_envelope(resp).await
    }
}

/// Parse the `{ code, msg, data }` envelope, returning `data` on success.
///
/// Non-2xx responses become `Error::Api` carrying the body's `error`
/// message verbatim; a 2xx envelope with a non-zero `code` becomes
/// `Error::Rejected`.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned()
                } else {
                    preview(&body)
                }
            });
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })?;

    trace!(code = envelope.code, msg = %envelope.msg, "envelope decoded");

    if envelope.code != 0 {
        let message = if envelope.msg.is_empty() {
            format!("code {}", envelope.code)
        } else {
            envelope.msg
        };
        return Err(Error::Rejected {
            code: envelope.code,
            message,
        });
    }

    Ok(envelope.data)
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
