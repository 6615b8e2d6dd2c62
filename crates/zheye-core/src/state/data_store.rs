// ── Central data store ──
//
// Owns the state snapshot and exposes the mutations: the only legal way
// to change state. Every mutation runs inside a single `send_modify`
// critical section, so mutations never interleave and subscribers only
// ever observe whole transitions.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::snapshot::{ErrorState, StoreState};
use crate::model::{
    AuthToken, Column, ColumnPage, LoginResponse, PageParams, Post, Session, UserProfile,
};
use crate::storage::{DurableStorage, TOKEN_KEY, USER_KEY};
use crate::stream::StateStream;

/// Client-side state container.
///
/// Readers take cheap `Arc` snapshots; writers go through the mutation
/// methods, which are synchronous and cannot fail.
pub struct DataStore {
    state: watch::Sender<Arc<StoreState>>,
    storage: Arc<dyn DurableStorage>,
}

impl DataStore {
    /// Create a store, seeding the session from durable storage.
    ///
    /// A stored token and profile are restored, but the session starts
    /// logged out until the profile is fetched again.
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let session = seed_session(storage.as_ref());
        let (state, _) = watch::channel(Arc::new(StoreState::with_session(session)));
        Self { state, storage }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current state snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<StoreState> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn storage(&self) -> &Arc<dyn DurableStorage> {
        &self.storage
    }

    // ── Flags ────────────────────────────────────────────────────────

    pub fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            if state.loading == loading {
                return false;
            }
            Arc::make_mut(state).loading = loading;
            true
        });
    }

    pub fn set_error(&self, error: ErrorState) {
        self.state.send_if_modified(|state| {
            if state.error == error {
                return false;
            }
            Arc::make_mut(state).error = error;
            true
        });
    }

    // ── Columns ──────────────────────────────────────────────────────

    /// Merge a page of columns into the collection.
    ///
    /// Columns from earlier pages stay; the page's entries win on overlap.
    /// The total is replaced with the page's count, never accumulated.
    pub fn fetch_columns(&self, page: ColumnPage, params: PageParams) {
        let ColumnPage { list, count } = page;
        let received = list.len();
        self.commit(|state| {
            let columns = &mut state.columns;
            columns.data.merge(list);
            columns.total = count;
            columns.current_page = columns.current_page.max(params.current_page);
            columns.page_size = params.page_size;
        });
        debug!(
            received,
            total = count,
            page = params.current_page,
            "columns merged"
        );
    }

    pub fn fetch_column(&self, column: Column) {
        debug!(column_id = %column.id, "column upserted");
        self.commit(|state| {
            state.columns.data.upsert(column);
        });
    }

    // ── Posts ────────────────────────────────────────────────────────

    /// Replace every cached post with `posts`.
    pub fn fetch_posts(&self, posts: Vec<Post>) {
        debug!(count = posts.len(), "posts replaced");
        self.commit(|state| state.posts.replace(posts));
    }

    pub fn fetch_post(&self, post: Post) {
        self.upsert_post(post);
    }

    pub fn create_post(&self, post: Post) {
        debug!(post_id = %post.id, "post created");
        self.commit(|state| {
            state.posts.upsert(post);
        });
    }

    pub fn update_post(&self, post: Post) {
        self.upsert_post(post);
    }

    /// Remove a post. Unknown ids are a no-op.
    pub fn delete_post(&self, id: &str) {
        let removed = self.state.send_if_modified(|state| {
            if !state.posts.contains(id) {
                return false;
            }
            Arc::make_mut(state).posts.remove(id);
            true
        });
        if removed {
            debug!(post_id = id, "post deleted");
        }
    }

    fn upsert_post(&self, post: Post) {
        debug!(post_id = %post.id, "post upserted");
        self.commit(|state| {
            state.posts.upsert(post);
        });
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Record the token issued by a successful login, in memory and on disk.
    ///
    /// Any cached profile belonged to the previous token and is dropped.
    /// Does not mark the session logged in and does not touch the HTTP
    /// client's headers.
    pub fn login(&self, response: LoginResponse) {
        let LoginResponse { token } = response;
        self.commit(|state| {
            self.storage.set(TOKEN_KEY, token.as_str());
            self.storage.remove(USER_KEY);
            state.session.token = Some(token);
            state.session.profile = None;
        });
        info!("session token stored");
    }

    /// Drop the session: token and profile, in memory and on disk.
    pub fn logout(&self) {
        self.commit(|state| {
            self.storage.remove(TOKEN_KEY);
            self.storage.remove(USER_KEY);
            state.session = Session::logged_out();
        });
        info!("session cleared");
    }

    /// Mark the session logged in and store the fetched profile.
    ///
    /// The fetched profile is merged over the cached one only when both
    /// carry the same user id; a profile of any other user is replaced.
    pub fn fetch_current_user(&self, profile: UserProfile) {
        self.commit(|state| {
            let session = &mut state.session;
            session.is_logged_in = true;
            let merged = match session.profile.take() {
                Some(mut existing) if existing.id.is_some() && existing.id == profile.id => {
                    existing.merge(profile);
                    existing
                }
                _ => profile,
            };
            match serde_json::to_string(&merged) {
                Ok(raw) => self.storage.set(USER_KEY, &raw),
                Err(e) => warn!(error = %e, "failed to serialize profile for storage"),
            }
            info!(user = merged.display_name(), "logged in");
            session.profile = Some(merged);
        });
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Apply a mutation atomically and notify subscribers.
    fn commit(&self, mutate: impl FnOnce(&mut StoreState)) {
        self.state.send_modify(|state| mutate(Arc::make_mut(state)));
    }
}

fn seed_session(storage: &dyn DurableStorage) -> Session {
    let token = storage
        .get(TOKEN_KEY)
        .filter(|t| !t.is_empty())
        .map(AuthToken::new);
    let profile = storage
        .get(USER_KEY)
        .and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "ignoring undecodable stored profile");
                None
            }
        });
    debug!(
        has_token = token.is_some(),
        has_profile = profile.is_some(),
        "session seeded from storage"
    );
    Session {
        is_logged_in: false,
        token,
        profile,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityId;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, DataStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = DataStore::new(storage.clone());
        (storage, store)
    }

    fn column(id: &str, title: &str) -> Column {
        Column {
            id: id.into(),
            title: title.into(),
            avatar: None,
            description: String::new(),
        }
    }

    fn post(id: &str, column_id: &str) -> Post {
        Post {
            id: id.into(),
            title: format!("post {id}"),
            excerpt: None,
            content: None,
            image: None,
            created_at: None,
            column_id: column_id.into(),
            author: None,
            is_rich_text: None,
        }
    }

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: Some(id.into()),
            nickname: Some("viking".into()),
            ..UserProfile::default()
        }
    }

    // ── Columns ──────────────────────────────────────────────────────

    #[test]
    fn fetch_columns_merges_data_and_replaces_total() {
        let (_, store) = store();
        store.fetch_columns(
            ColumnPage {
                list: vec![column("a", "a1"), column("b", "b1")],
                count: 40,
            },
            PageParams::new(1, 6),
        );
        store.fetch_columns(
            ColumnPage {
                list: vec![column("b", "b2"), column("c", "c2")],
                count: 13,
            },
            PageParams::new(2, 6),
        );

        let state = store.snapshot();
        let mut ids: Vec<String> = state.columns().iter().map(|c| c.id.to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(state.column("a").unwrap().title, "a1");
        assert_eq!(state.column("b").unwrap().title, "b2");
        assert_eq!(state.column_total(), 13);
        assert_eq!(state.loaded_column_page(), Some(PageParams::new(2, 6)));
    }

    #[test]
    fn fetch_column_upserts() {
        let (_, store) = store();
        store.fetch_column(column("a", "first"));
        store.fetch_column(column("a", "second"));
        let state = store.snapshot();
        assert_eq!(state.columns().len(), 1);
        assert_eq!(state.column("a").unwrap().title, "second");
    }

    // ── Posts ────────────────────────────────────────────────────────

    #[test]
    fn fetch_posts_replaces_whole_map() {
        let (_, store) = store();
        store.create_post(post("old", "c0"));
        store.fetch_posts(vec![post("p1", "c1"), post("p2", "c1")]);

        let state = store.snapshot();
        assert!(state.post("old").is_none());
        assert_eq!(state.posts_by_column("c1").len(), 2);
    }

    #[test]
    fn update_post_replaces_by_id() {
        let (_, store) = store();
        store.create_post(post("p1", "c1"));
        let mut edited = post("p1", "c1");
        edited.title = "edited".into();
        store.update_post(edited);
        assert_eq!(store.snapshot().post("p1").unwrap().title, "edited");
    }

    #[test]
    fn delete_post_is_idempotent() {
        let (_, store) = store();
        store.fetch_posts(vec![post("p1", "c1"), post("p2", "c1")]);

        store.delete_post("p1");
        let once = store.snapshot();
        store.delete_post("p1");
        let twice = store.snapshot();

        assert_eq!(once.post_collection(), twice.post_collection());
        assert!(twice.post("p1").is_none());
        assert!(twice.post("p2").is_some());
    }

    #[test]
    fn delete_of_unknown_post_does_not_notify() {
        let (_, store) = store();
        store.fetch_posts(vec![post("p1", "c1")]);
        let rx = store.state.subscribe();

        store.delete_post("missing");
        assert!(!rx.has_changed().unwrap());

        store.delete_post("p1");
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn posts_by_column_filters() {
        let (_, store) = store();
        store.fetch_posts(vec![post("p1", "c1"), post("p2", "c2"), post("p3", "c1")]);
        let mut ids: Vec<EntityId> = store
            .snapshot()
            .posts_by_column("c1")
            .iter()
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![EntityId::from("p1"), EntityId::from("p3")]);
    }

    // ── Session ──────────────────────────────────────────────────────

    #[test]
    fn login_then_logout_restores_pristine_session() {
        let (storage, store) = store();
        let pristine = store.snapshot().session().clone();

        store.login(LoginResponse {
            token: AuthToken::new("tok"),
        });
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert!(!store.snapshot().is_logged_in());

        store.fetch_current_user(profile("u1"));
        assert!(store.snapshot().is_logged_in());
        assert!(storage.get(USER_KEY).is_some());

        store.logout();
        assert_eq!(store.snapshot().session(), &pristine);
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
    }

    #[test]
    fn fetch_current_user_merges_profile() {
        let (_, store) = store();
        store.fetch_current_user(UserProfile {
            email: Some("a@b.c".into()),
            ..profile("u1")
        });
        store.fetch_current_user(UserProfile {
            nickname: Some("renamed".into()),
            ..profile("u1")
        });

        let state = store.snapshot();
        let user = state.current_user().unwrap();
        assert_eq!(user.nickname.as_deref(), Some("renamed"));
        assert_eq!(user.email.as_deref(), Some("a@b.c"));
        assert_eq!(user.id, Some(EntityId::from("u1")));
    }

    #[test]
    fn fetch_current_user_replaces_another_users_profile() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(
            USER_KEY,
            r#"{"_id":"u1","column":"c-alice","description":"alice bio"}"#,
        );
        let store = DataStore::new(storage.clone());

        store.fetch_current_user(UserProfile {
            id: Some("u2".into()),
            nickname: Some("bob".into()),
            email: Some("bob@x".into()),
            ..UserProfile::default()
        });

        let state = store.snapshot();
        let user = state.current_user().unwrap();
        assert_eq!(user.id, Some(EntityId::from("u2")));
        assert_eq!(user.column_id, None);
        assert_eq!(user.bio, None);
        assert!(!state.owns_column(&EntityId::from("c-alice")));

        let stored: UserProfile = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(&stored, user);
    }

    #[test]
    fn login_drops_cached_profile() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "old");
        storage.set(USER_KEY, r#"{"_id":"u1","column":"c-alice"}"#);
        let store = DataStore::new(storage.clone());

        store.login(LoginResponse {
            token: AuthToken::new("new"),
        });

        let state = store.snapshot();
        assert!(state.current_user().is_none());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("new"));
        assert_eq!(storage.get(USER_KEY), None);
    }

    #[test]
    fn seeds_session_from_storage_without_logging_in() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "persisted");
        storage.set(USER_KEY, r#"{"_id":"u1","nickName":"viking"}"#);

        let store = DataStore::new(storage);
        let state = store.snapshot();
        let session = state.session();
        assert!(!session.is_logged_in);
        assert_eq!(session.token.as_ref().map(AuthToken::as_str), Some("persisted"));
        assert_eq!(session.profile.as_ref().unwrap().nickname.as_deref(), Some("viking"));
    }

    #[test]
    fn undecodable_profile_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "{broken");
        let store = DataStore::new(storage);
        assert!(store.snapshot().session().profile.is_none());
    }

    // ── Flags & snapshots ────────────────────────────────────────────

    #[test]
    fn flags_round_trip() {
        let (_, store) = store();
        store.set_loading(true);
        store.set_error(ErrorState::raised("boom"));
        let state = store.snapshot();
        assert!(state.is_loading());
        assert_eq!(state.error().message(), Some("boom"));

        store.set_loading(false);
        store.set_error(ErrorState::cleared());
        assert!(!store.snapshot().is_loading());
        assert!(!store.snapshot().error().is_present());
    }

    #[test]
    fn old_snapshots_are_unaffected_by_mutations() {
        let (_, store) = store();
        let before = store.snapshot();
        store.create_post(post("p1", "c1"));
        assert!(before.post("p1").is_none());
        assert!(store.snapshot().post("p1").is_some());
    }
}
