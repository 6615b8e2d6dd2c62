// zheye-api: Async Rust client for the zheye columns/posts HTTP API

pub mod client;
pub mod error;
pub mod hooks;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use hooks::{NoopHooks, RequestHooks};
pub use models::{Envelope, ErrorBody};
pub use reqwest::Method;
pub use transport::{TlsMode, TransportConfig};
