// ── Navigation guard ──
//
// Decides whether a route transition may proceed, based on the store's
// session. Routes are plain data; only their auth metadata matters here.

use tracing::{debug, warn};

use crate::store::Store;

/// Auth requirements attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Anonymous visitors are sent to the login route.
    pub requires_login: bool,
    /// Signed-in users are sent home (the login page).
    pub redirect_if_logged_in: bool,
}

/// A named route and its path pattern. `:name` segments match any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub meta: RouteMeta,
}

impl Route {
    const fn new(name: &'static str, path: &'static str, meta: RouteMeta) -> Self {
        Self { name, path, meta }
    }

    /// Whether `path` matches this route's pattern.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut want = self.path.split('/').filter(|s| !s.is_empty());
        let mut got = path.split('/').filter(|s| !s.is_empty());
        loop {
            match (want.next(), got.next()) {
                (None, None) => return true,
                (Some(pattern), Some(segment)) => {
                    if !pattern.starts_with(':') && pattern != segment {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

const OPEN: RouteMeta = RouteMeta {
    requires_login: false,
    redirect_if_logged_in: false,
};

pub const HOME: Route = Route::new("home", "/", OPEN);
pub const LOGIN: Route = Route::new(
    "login",
    "/login",
    RouteMeta {
        requires_login: false,
        redirect_if_logged_in: true,
    },
);
pub const COLUMN: Route = Route::new("column", "/column/:id", OPEN);
pub const CREATE: Route = Route::new(
    "create",
    "/create",
    RouteMeta {
        requires_login: true,
        redirect_if_logged_in: false,
    },
);
pub const SIGNUP: Route = Route::new("signup", "/signup", OPEN);

/// Every route the application knows.
pub const ROUTES: [Route; 5] = [HOME, LOGIN, COLUMN, CREATE, SIGNUP];

/// Look up the route matching `path`.
pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.matches(path))
}

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(&'static str),
}

/// Runs before each navigation.
#[derive(Clone)]
pub struct NavigationGuard {
    store: Store,
}

impl NavigationGuard {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Decide a navigation to a route with the given metadata.
    ///
    /// A logged-out store holding a persisted token first tries to restore
    /// the session; if that fails the session is dropped and the user is
    /// sent to the login page.
    pub async fn before_each(&self, target: RouteMeta) -> NavigationDecision {
        let state = self.store.snapshot();
        if state.is_logged_in() {
            return logged_in_decision(target);
        }
        if state.session().token.is_none() {
            return if target.requires_login {
                debug!("login required; redirecting");
                NavigationDecision::Redirect(LOGIN.path)
            } else {
                NavigationDecision::Allow
            };
        }

        match self.store.restore_session().await {
            Ok(_) => logged_in_decision(target),
            Err(e) => {
                warn!(error = %e, "session restore failed; redirecting to login");
                NavigationDecision::Redirect(LOGIN.path)
            }
        }
    }

    /// Decide a navigation to `path`. Unknown paths carry no requirements.
    pub async fn navigate(&self, path: &str) -> NavigationDecision {
        let meta = resolve(path).map(|route| route.meta).unwrap_or_default();
        self.before_each(meta).await
    }
}

fn logged_in_decision(target: RouteMeta) -> NavigationDecision {
    if target.redirect_if_logged_in {
        NavigationDecision::Redirect(HOME.path)
    } else {
        NavigationDecision::Allow
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_route_table() {
        assert_eq!(resolve("/").unwrap().name, "home");
        assert_eq!(resolve("/login").unwrap().name, "login");
        assert_eq!(resolve("/column/abc123").unwrap().name, "column");
        assert_eq!(resolve("/create?draft=1").unwrap().name, "create");
        assert_eq!(resolve("/signup/").unwrap().name, "signup");
        assert!(resolve("/column").is_none());
        assert!(resolve("/column/a/b").is_none());
        assert!(resolve("/nope").is_none());
    }

    #[test]
    fn logged_in_users_leave_login_page() {
        assert_eq!(
            logged_in_decision(LOGIN.meta),
            NavigationDecision::Redirect("/")
        );
        assert_eq!(logged_in_decision(CREATE.meta), NavigationDecision::Allow);
        assert_eq!(logged_in_decision(HOME.meta), NavigationDecision::Allow);
        assert_eq!(logged_in_decision(SIGNUP.meta), NavigationDecision::Allow);
    }
}
