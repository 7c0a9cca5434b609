//! # Router
//!
//! Static route table with redirects and the auth navigation guard.
//!
//! ## Resolution order
//!
//! 1. Locations that are not local paths are not found
//! 2. Static redirects (`/components`, `/workflows`)
//! 3. Route lookup by exact path; no match is not found
//! 4. Protected route while logged out → `/login?redirect=<location>`
//! 5. `/login` while logged in → the `redirect` target or `/dashboard`

use crate::primitives::{HOME_AFTER_LOGIN, LOGIN_PATH, REDIRECT_PARAM};
use serde::Serialize;
use std::fmt;
use url::{Url, form_urlencoded};

/// Base used only to split locations into path and query.
const LOCAL_ORIGIN: &str = "http://localhost";

/// Page chrome a route renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Landing,
    Auth,
    Default,
    Docs,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Landing => "landing",
            Self::Auth => "auth",
            Self::Default => "default",
            Self::Docs => "docs",
        })
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub layout: Layout,
    /// Catalog key of the page title.
    pub title_key: Option<&'static str>,
    pub requires_auth: bool,
}

impl Route {
    const fn public(path: &'static str, name: &'static str, layout: Layout) -> Self {
        Self {
            path,
            name,
            layout,
            title_key: None,
            requires_auth: false,
        }
    }

    const fn protected(
        path: &'static str,
        name: &'static str,
        layout: Layout,
        title_key: &'static str,
    ) -> Self {
        Self {
            path,
            name,
            layout,
            title_key: Some(title_key),
            requires_auth: true,
        }
    }
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    Render(&'a Route),
    Redirect { to: String },
    NotFound,
}

/// The route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    redirects: Vec<(&'static str, &'static str)>,
}

impl Router {
    /// The application's routes.
    #[must_use]
    pub fn standard() -> Self {
        use Layout::{Auth, Default, Docs, Landing};

        let mut login = Route::public(LOGIN_PATH, "login", Auth);
        login.title_key = Some("nav.login");

        Self {
            routes: vec![
                Route::public("/", "home", Landing),
                login,
                Route::protected("/dashboard", "dashboard", Default, "nav.dashboard"),
                Route::protected("/users", "users", Default, "nav.users"),
                Route::protected("/products", "products", Default, "nav.products"),
                Route::protected("/components/sonner", "component-sonner", Docs, "nav.sonner"),
                Route::protected("/components/popover", "component-popover", Docs, "nav.popover"),
                Route::protected("/components/dialog", "component-dialog", Docs, "nav.dialog"),
                Route::protected(
                    "/components/input-group",
                    "component-input-group",
                    Docs,
                    "nav.input_group",
                ),
                Route::protected(
                    "/form-validation",
                    "form-validation",
                    Docs,
                    "nav.form_validation",
                ),
                Route::protected("/workflows/crud", "workflow-crud", Docs, "nav.workflow_crud"),
                Route::protected(
                    "/workflows/multi-step",
                    "workflow-multi-step",
                    Docs,
                    "nav.workflow_multi_step",
                ),
                Route::protected("/workflows/cart", "workflow-cart", Docs, "nav.workflow_cart"),
            ],
            redirects: vec![
                ("/components", "/components/sonner"),
                ("/workflows", "/workflows/crud"),
            ],
        }
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look a route up by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve `location` (path plus optional query) for a session.
    #[must_use]
    pub fn resolve(&self, location: &str, authenticated: bool) -> Navigation<'_> {
        let Some(url) = parse_local(location) else {
            return Navigation::NotFound;
        };
        let path = normalize(url.path());

        if let Some((_, to)) = self.redirects.iter().find(|(from, _)| *from == path) {
            return Navigation::Redirect { to: (*to).to_string() };
        }

        let Some(route) = self.routes.iter().find(|r| r.path == path) else {
            return Navigation::NotFound;
        };

        if route.requires_auth && !authenticated {
            return Navigation::Redirect {
                to: login_redirect(location),
            };
        }
        if route.path == LOGIN_PATH && authenticated {
            return Navigation::Redirect {
                to: post_login_target(location),
            };
        }
        Navigation::Render(route)
    }
}

/// `/login?redirect=<target>` with the target form-urlencoded.
#[must_use]
pub fn login_redirect(target: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, target)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Where to go after logging in from `location` (normally a `/login?...` URL).
///
/// Only local paths are honoured; anything else, including a redirect back
/// to the login page, lands on the dashboard.
#[must_use]
pub fn post_login_target(location: &str) -> String {
    parse_local(location)
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == REDIRECT_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .filter(|target| {
            parse_local(target).is_some_and(|url| normalize(url.path()) != LOGIN_PATH)
        })
        .unwrap_or_else(|| HOME_AFTER_LOGIN.to_string())
}

/// Parse a location that must be a path on this origin.
fn parse_local(location: &str) -> Option<Url> {
    if !location.starts_with('/') || location.starts_with("//") {
        return None;
    }
    let base = Url::parse(LOCAL_ORIGIN).ok()?;
    let url = base.join(location).ok()?;
    (url.origin() == base.origin()).then_some(url)
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
