#![allow(clippy::unwrap_used)]
// Integration tests for `Store` actions and the navigation guard, against
// a wiremock server.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zheye_core::guard::{self, NavigationDecision};
use zheye_core::storage::{TOKEN_KEY, USER_KEY};
use zheye_core::{
    ClientConfig, CoreError, CreatePostRequest, DurableStorage, LoginCredentials, MemoryStorage,
    NavigationGuard, PageParams, Store, UpdatePostRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<MemoryStorage>, Store) {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let store = store_for(&server, storage.clone());
    (server, storage, store)
}

fn store_for(server: &MockServer, storage: Arc<MemoryStorage>) -> Store {
    let base_url = Url::parse(&format!("{}/api/", server.uri())).unwrap();
    Store::new(ClientConfig::new(base_url), storage).unwrap()
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "msg": "请求成功", "data": data }))
}

fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": message }))
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::new("viking@test.com", SecretString::from(password.to_string()))
}

fn column_json(id: &str, title: &str) -> Value {
    json!({ "_id": id, "title": title, "description": "" })
}

fn profile_json() -> Value {
    json!({
        "_id": "u1",
        "nickName": "viking",
        "email": "viking@test.com",
        "column": "c1",
        "description": "hello"
    })
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ok(json!({ "token": token })))
        .mount(server)
        .await;
}

async fn mount_current_user(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/api/user/current"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ok(profile_json()))
        .mount(server)
        .await;
}

// ── Columns ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_columns_page_two_overwrites_total() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns"))
        .and(query_param("currentPage", "1"))
        .respond_with(ok(json!({
            "list": [column_json("a", "first"), column_json("b", "second")],
            "count": 40
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/columns"))
        .and(query_param("currentPage", "2"))
        .and(query_param("pageSize", "6"))
        .respond_with(ok(json!({
            "list": [column_json("b", "second, renamed"), column_json("c", "third")],
            "count": 13,
            "currentPage": 2,
            "pageSize": 6
        })))
        .mount(&server)
        .await;

    store.fetch_columns(None).await.unwrap();
    let page = store
        .fetch_columns(Some(PageParams::new(2, 6)))
        .await
        .unwrap();
    assert_eq!(page.count, 13);

    let state = store.snapshot();
    assert_eq!(state.column_total(), 13);
    assert_eq!(state.columns().len(), 3);
    assert_eq!(state.column("a").unwrap().title, "first");
    assert_eq!(state.column("b").unwrap().title, "second, renamed");
    assert_eq!(state.loaded_column_page(), Some(PageParams::new(2, 6)));
}

#[tokio::test]
async fn test_fetch_columns_refetch_refreshes_total() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns"))
        .and(query_param("currentPage", "2"))
        .respond_with(ok(json!({ "list": [column_json("a", "first")], "count": 7 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/columns"))
        .and(query_param("currentPage", "2"))
        .respond_with(ok(json!({ "list": [column_json("a", "first")], "count": 13 })))
        .mount(&server)
        .await;

    let params = PageParams::new(2, 6);
    assert_eq!(store.fetch_columns(Some(params)).await.unwrap().count, 7);
    assert_eq!(store.fetch_columns(Some(params)).await.unwrap().count, 13);
    assert_eq!(store.snapshot().column_total(), 13);
}

#[tokio::test]
async fn test_fetch_columns_if_needed_skips_loaded_page() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns"))
        .respond_with(ok(json!({ "list": [column_json("a", "first")], "count": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(store.fetch_columns_if_needed(None).await.unwrap().is_some());
    assert!(store.fetch_columns_if_needed(None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_column_revalidates() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns/c1"))
        .respond_with(ok(column_json("c1", "Rust")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/columns/c1"))
        .respond_with(ok(column_json("c1", "Rust, renamed")))
        .mount(&server)
        .await;

    assert_eq!(store.fetch_column("c1").await.unwrap().title, "Rust");
    assert_eq!(store.fetch_column("c1").await.unwrap().title, "Rust, renamed");
    assert_eq!(store.snapshot().column("c1").unwrap().title, "Rust, renamed");
}

// ── Posts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_post_adds_to_column() {
    let (server, _, store) = setup().await;

    let mut payload = CreatePostRequest::new("Hello", "c1");
    payload.content = Some("body".into());

    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(body_json(json!({ "title": "Hello", "content": "body", "column": "c1" })))
        .respond_with(ok(json!({
            "_id": "p1",
            "title": "Hello",
            "content": "body",
            "column": "c1"
        })))
        .mount(&server)
        .await;

    let post = store.create_post(&payload).await.unwrap();
    assert_eq!(post.id.as_str(), "p1");

    let state = store.snapshot();
    assert!(state.post("p1").is_some());
    let in_column = state.posts_by_column("c1");
    assert_eq!(in_column.len(), 1);
    assert_eq!(in_column[0].id.as_str(), "p1");
}

#[tokio::test]
async fn test_delete_post_removes_by_requested_id() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns/c1/posts"))
        .respond_with(ok(json!({
            "list": [
                { "_id": "p1", "title": "one", "column": "c1" },
                { "_id": "p2", "title": "two", "column": "c1" }
            ],
            "count": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    store.fetch_posts("c1").await.unwrap();
    assert_eq!(store.snapshot().posts_by_column("c1").len(), 2);

    store.delete_post("p1").await.unwrap();
    let state = store.snapshot();
    assert!(state.post("p1").is_none());
    assert!(state.post("p2").is_some());
}

#[tokio::test]
async fn test_fetch_posts_replaces_cached_posts() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns/c1/posts"))
        .respond_with(ok(json!({ "list": [{ "_id": "p1", "title": "one", "column": "c1" }] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/columns/c2/posts"))
        .respond_with(ok(json!({ "list": [{ "_id": "p9", "title": "nine", "column": "c2" }] })))
        .mount(&server)
        .await;

    store.fetch_posts("c1").await.unwrap();
    store.fetch_posts("c2").await.unwrap();

    let state = store.snapshot();
    assert!(state.post("p1").is_none());
    assert!(state.post("p9").is_some());
}

#[tokio::test]
async fn test_fetch_post_loads_full_content() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns/c1/posts"))
        .respond_with(ok(json!({
            "list": [{ "_id": "p1", "title": "one", "excerpt": "short", "column": "c1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/p1"))
        .respond_with(ok(json!({
            "_id": "p1",
            "title": "one",
            "excerpt": "short",
            "content": "the full text",
            "column": "c1"
        })))
        .expect(2)
        .mount(&server)
        .await;

    store.fetch_posts("c1").await.unwrap();
    assert!(store.snapshot().post("p1").unwrap().content.is_none());

    let fetched = store.fetch_post("p1").await.unwrap();
    assert_eq!(fetched.content.as_deref(), Some("the full text"));
    assert_eq!(store.snapshot().post("p1").unwrap().as_ref(), &fetched);

    // Every read goes to the server.
    store.fetch_post("p1").await.unwrap();
}

#[tokio::test]
async fn test_update_post_replaces_entry() {
    let (server, _, store) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/posts/p1"))
        .and(body_json(json!({ "title": "edited" })))
        .respond_with(ok(json!({ "_id": "p1", "title": "edited", "column": "c1" })))
        .mount(&server)
        .await;

    let payload = UpdatePostRequest {
        title: Some("edited".into()),
        ..UpdatePostRequest::default()
    };
    store.update_post("p1", &payload).await.unwrap();
    assert_eq!(store.snapshot().post("p1").unwrap().title, "edited");
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_and_fetch_profile_success() {
    let (server, storage, store) = setup().await;
    mount_login(&server, "tok-1").await;
    mount_current_user(&server, "tok-1").await;

    let profile = store
        .login_and_fetch_profile(&credentials("111111"))
        .await
        .unwrap();
    assert_eq!(profile.nickname.as_deref(), Some("viking"));

    let state = store.snapshot();
    assert!(state.is_logged_in());
    assert_eq!(state.current_user().unwrap().email.as_deref(), Some("viking@test.com"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert!(storage.get(USER_KEY).is_some());
    assert!(store.client().has_bearer_token());
}

#[tokio::test]
async fn test_profile_fetch_failure_after_login_propagates() {
    let (server, storage, store) = setup().await;
    mount_login(&server, "tok-3").await;
    Mock::given(method("GET"))
        .and(path("/api/user/current"))
        .respond_with(failure(500, "用户信息获取失败"))
        .mount(&server)
        .await;

    let err = store
        .login_and_fetch_profile(&credentials("111111"))
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("用户信息获取失败"));

    let state = store.snapshot();
    assert!(!state.is_logged_in());
    assert!(state.current_user().is_none());
    assert_eq!(state.error().message(), Some("用户信息获取失败"));
    assert!(!state.is_loading());
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-3"));
    assert_eq!(storage.get(USER_KEY), None);
}

#[tokio::test]
async fn test_login_as_another_user_replaces_cached_profile() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(
        USER_KEY,
        r#"{"_id":"u0","column":"c-alice","description":"alice bio"}"#,
    );
    let store = store_for(&server, storage.clone());

    mount_login(&server, "tok-bob").await;
    Mock::given(method("GET"))
        .and(path("/api/user/current"))
        .respond_with(ok(json!({ "_id": "u2", "nickName": "bob", "email": "bob@x" })))
        .mount(&server)
        .await;

    store
        .login_and_fetch_profile(&credentials("111111"))
        .await
        .unwrap();

    let state = store.snapshot();
    let user = state.current_user().unwrap();
    assert_eq!(user.nickname.as_deref(), Some("bob"));
    assert_eq!(user.column_id, None);
    assert_eq!(user.bio, None);
    assert!(!state.owns_column(&"c-alice".into()));

    let stored: Value = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, json!({ "_id": "u2", "nickName": "bob", "email": "bob@x" }));
}

#[tokio::test]
async fn test_login_failure_leaves_session_unchanged() {
    let (server, storage, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(failure(401, "该用户不存在"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/current"))
        .respond_with(ok(profile_json()))
        .expect(0)
        .mount(&server)
        .await;

    let before = store.snapshot().session().clone();
    let err = store
        .login_and_fetch_profile(&credentials("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert_eq!(err.server_message(), Some("该用户不存在"));

    let state = store.snapshot();
    assert_eq!(state.session(), &before);
    assert_eq!(state.error().message(), Some("该用户不存在"));
    assert!(!state.is_loading());
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert!(!store.client().has_bearer_token());
}

#[tokio::test]
async fn test_logout_clears_session_and_header() {
    let (server, storage, store) = setup().await;
    mount_login(&server, "tok-2").await;
    mount_current_user(&server, "tok-2").await;

    store
        .login_and_fetch_profile(&credentials("111111"))
        .await
        .unwrap();
    store.logout();

    let state = store.snapshot();
    assert!(!state.is_logged_in());
    assert!(state.session().token.is_none());
    assert!(state.current_user().is_none());
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
    assert!(!store.client().has_bearer_token());
}

// ── Loading & error flags ───────────────────────────────────────────

#[tokio::test]
async fn test_loading_raised_while_request_in_flight() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/columns/c1"))
        .respond_with(ok(column_json("c1", "Rust")).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let mut stream = store.subscribe();
    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch_column("c1").await })
    };

    loop {
        let snap = stream.changed().await.unwrap();
        if snap.is_loading() {
            break;
        }
    }
    task.await.unwrap().unwrap();
    assert!(!store.snapshot().is_loading());
}

#[tokio::test]
async fn test_error_cleared_by_next_request() {
    let (server, _, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/posts/missing"))
        .respond_with(failure(404, "该文章不存在"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/columns/c1"))
        .respond_with(ok(column_json("c1", "Rust")))
        .mount(&server)
        .await;

    let err = store.fetch_post("missing").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(store.snapshot().error().message(), Some("该文章不存在"));

    store.fetch_column("c1").await.unwrap();
    assert!(!store.snapshot().error().is_present());
}

// ── Navigation guard ────────────────────────────────────────────────

#[tokio::test]
async fn test_guard_without_token() {
    let (_server, _, store) = setup().await;
    let guard = NavigationGuard::new(store);

    assert_eq!(
        guard.navigate("/create").await,
        NavigationDecision::Redirect("/login")
    );
    assert_eq!(guard.navigate("/").await, NavigationDecision::Allow);
    assert_eq!(guard.navigate("/login").await, NavigationDecision::Allow);
    assert_eq!(guard.navigate("/column/c1").await, NavigationDecision::Allow);
}

#[tokio::test]
async fn test_guard_restores_persisted_session() {
    let server = MockServer::start().await;
    mount_current_user(&server, "persisted").await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "persisted");
    let store = store_for(&server, storage);
    assert!(!store.snapshot().is_logged_in());

    let guard = NavigationGuard::new(store.clone());
    assert_eq!(
        guard.before_each(guard::LOGIN.meta).await,
        NavigationDecision::Redirect("/")
    );
    assert!(store.snapshot().is_logged_in());
    assert_eq!(guard.navigate("/create").await, NavigationDecision::Allow);
}

#[tokio::test]
async fn test_guard_logs_out_on_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/current"))
        .respond_with(failure(401, "token 已失效"))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "stale");
    let store = store_for(&server, storage.clone());
    let guard = NavigationGuard::new(store.clone());

    assert_eq!(
        guard.navigate("/").await,
        NavigationDecision::Redirect("/login")
    );
    assert!(store.snapshot().session().token.is_none());
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert!(!store.client().has_bearer_token());
}
