// ── Domain model ──
//
// Typed entities decoded straight from the wire. Field names follow Rust
// conventions; serde attributes map them to the server's names.

pub mod column;
pub mod entity_id;
pub mod image;
pub mod post;
pub mod session;
pub mod user;

mod timestamp;

pub use column::{Column, ColumnPage, DEFAULT_PAGE_SIZE, PageParams};
pub use entity_id::EntityId;
pub use image::{Image, ImageRef};
pub use post::{DeletedPost, Post, PostList};
pub use session::{AuthToken, LoginResponse, Session};
pub use user::{Author, UserProfile};
