//! Login status from the cookie header and the nav link it selects

use serde::Serialize;
use tracing::debug;

/// Cookie whose presence marks a logged-in session
pub const LOGIN_COOKIE: &str = "is_logged_in";

/// Look up a cookie value in a `Cookie` header (`a=1; b=2`).
///
/// The first pair with an exact name match wins. The value is the segment
/// between the first and second `=`; a pair without `=` has no value.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split("; ")
        .find_map(|pair| {
            let mut segments = pair.split('=');
            match segments.next() {
                Some(key) if key == name => Some(segments.next()),
                _ => None,
            }
        })
        .flatten()
}

/// Check if the login cookie is present with a non-empty value
pub fn is_logged_in(header: &str) -> bool {
    cookie_value(header, LOGIN_COOKIE).is_some_and(|value| !value.is_empty())
}

/// The navigation link to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavLink {
    Login,
    Logout,
}

impl NavLink {
    /// Element id of the link in the page
    pub fn element_id(&self) -> &'static str {
        match self {
            NavLink::Login => "loginLink",
            NavLink::Logout => "logoutLink",
        }
    }
}

/// Logged-in users get the logout link, everyone else the login link
pub fn visible_link(logged_in: bool) -> NavLink {
    if logged_in {
        NavLink::Logout
    } else {
        NavLink::Login
    }
}

/// Navigation state computed once when the host page initialises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub logged_in: bool,
    pub visible: NavLink,
}

impl NavState {
    /// Evaluate the cookie header and pick the visible link
    pub fn init(cookie_header: &str) -> Self {
        let logged_in = is_logged_in(cookie_header);
        let visible = visible_link(logged_in);
        debug!("Nav initialised: logged_in={}, visible={:?}", logged_in, visible);
        Self { logged_in, visible }
    }
}
