// ── Store state and derivations ──
//
// `StoreState` is the immutable snapshot consumers read. Derivations are
// pure projections over it; they never mutate and never perform I/O.

use std::sync::Arc;

use super::collection::EntityCollection;
use crate::model::{Column, DEFAULT_PAGE_SIZE, EntityId, PageParams, Post, Session, UserProfile};

const FALLBACK_ERROR_MESSAGE: &str = "request failed";

/// Most recent request failure.
///
/// A present error always carries a non-empty message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    message: Option<String>,
}

impl ErrorState {
    /// No error.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// An error with the given message. An empty message is replaced with
    /// a generic one.
    pub fn raised(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_owned()
        } else {
            message
        };
        Self {
            message: Some(message),
        }
    }

    pub fn is_present(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Column collection plus pagination bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsState {
    pub(crate) data: EntityCollection<Column>,
    /// Server-reported total, overwritten by every page fetch.
    pub(crate) total: u64,
    /// Highest page loaded so far; 0 before the first fetch.
    pub(crate) current_page: u32,
    pub(crate) page_size: u32,
}

impl Default for ColumnsState {
    fn default() -> Self {
        Self {
            data: EntityCollection::default(),
            total: 0,
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Full client-side state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub(crate) session: Session,
    pub(crate) loading: bool,
    pub(crate) error: ErrorState,
    pub(crate) columns: ColumnsState,
    pub(crate) posts: EntityCollection<Post>,
}

impl StoreState {
    pub(crate) fn with_session(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    // ── Flags ────────────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> &ErrorState {
        &self.error
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.session.profile.as_ref()
    }

    // ── Columns ──────────────────────────────────────────────────────

    /// All loaded columns, in unspecified order.
    pub fn columns(&self) -> Vec<Arc<Column>> {
        self.columns.data.to_list()
    }

    pub fn column(&self, id: &str) -> Option<Arc<Column>> {
        self.columns.data.get(id)
    }

    pub fn column_collection(&self) -> &EntityCollection<Column> {
        &self.columns.data
    }

    /// Server-reported number of columns.
    pub fn column_total(&self) -> u64 {
        self.columns.total
    }

    /// Highest page loaded and its size; `None` before the first fetch.
    pub fn loaded_column_page(&self) -> Option<PageParams> {
        (self.columns.current_page > 0)
            .then(|| PageParams::new(self.columns.current_page, self.columns.page_size))
    }

    /// Whether the server has columns beyond those already loaded.
    pub fn has_more_columns(&self) -> bool {
        u64::try_from(self.columns.data.len()).is_ok_and(|loaded| loaded < self.columns.total)
    }

    // ── Posts ────────────────────────────────────────────────────────

    pub fn posts_by_column(&self, column_id: &str) -> Vec<Arc<Post>> {
        self.posts
            .iter()
            .filter(|post| post.column_id.as_str() == column_id)
            .cloned()
            .collect()
    }

    pub fn post(&self, id: &str) -> Option<Arc<Post>> {
        self.posts.get(id)
    }

    pub fn post_collection(&self) -> &EntityCollection<Post> {
        &self.posts
    }

    /// Whether `column_id` is the column the signed-in user writes in.
    pub fn owns_column(&self, column_id: &EntityId) -> bool {
        self.current_user()
            .and_then(|user| user.column_id.as_ref())
            .is_some_and(|own| own == column_id)
    }
}
