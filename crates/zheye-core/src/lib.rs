// zheye-core: Normalized client-side state between zheye-api and consumers.

pub mod actions;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod normalize;
pub mod requests;
pub mod state;
pub mod storage;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_BASE_URL, TlsVerification};
pub use error::CoreError;
pub use guard::{NavigationDecision, NavigationGuard, Route, RouteMeta};
pub use normalize::{Identified, to_list, to_map};
pub use requests::{CreatePostRequest, LoginCredentials, UpdatePostRequest};
pub use state::{DataStore, EntityCollection, ErrorState, StoreState};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use store::Store;
pub use stream::StateStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AuthToken, Author, Column, ColumnPage, DeletedPost, EntityId, Image, ImageRef, LoginResponse,
    PageParams, Post, PostList, Session, UserProfile,
};
