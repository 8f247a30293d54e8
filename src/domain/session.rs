//! Session state and route guarding.
//!
//! The session is an explicit state container owned by the app, mutated
//! only from user-initiated handlers. Route access goes through
//! [`resolve_route`] so the public/protected redirect rules hold for
//! every navigation.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The authenticated user's profile record, supplied by the identity
/// provider. Opaque to this app beyond the display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        &self.first_name
    }
}

/// Authentication state. Cleared on logout; restored from the store on
/// startup when a persisted identity exists.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub fn clear(&mut self) {
        self.identity = None;
    }
}

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
    NotFound,
}

impl Route {
    /// Pre-authentication routes an authenticated user is bounced away
    /// from.
    pub fn is_public_only(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    /// Routes that require an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// Apply the public/protected route guards to a requested route.
///
/// Authenticated sessions are redirected from login/signup to the
/// dashboard; unauthenticated sessions are redirected from the dashboard
/// to login. Everything else passes through unchanged.
pub fn resolve_route(requested: Route, session: &Session) -> Route {
    if session.is_authenticated() && requested.is_public_only() {
        Route::Dashboard
    } else if !session.is_authenticated() && requested.is_protected() {
        Route::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> Session {
        let mut session = Session::default();
        session.set_identity(Identity {
            id: "user-1".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Morgan".to_string(),
            email: "alex@example.com".to_string(),
        });
        session
    }

    #[test]
    fn authenticated_session_is_redirected_from_login_and_signup() {
        let session = authenticated();
        assert_eq!(resolve_route(Route::Login, &session), Route::Dashboard);
        assert_eq!(resolve_route(Route::Signup, &session), Route::Dashboard);
    }

    #[test]
    fn unauthenticated_session_reaches_login_and_signup_unchanged() {
        let session = Session::default();
        assert_eq!(resolve_route(Route::Login, &session), Route::Login);
        assert_eq!(resolve_route(Route::Signup, &session), Route::Signup);
    }

    #[test]
    fn unauthenticated_session_is_redirected_from_dashboard() {
        let session = Session::default();
        assert_eq!(resolve_route(Route::Dashboard, &session), Route::Login);
    }

    #[test]
    fn authenticated_session_reaches_dashboard() {
        let session = authenticated();
        assert_eq!(resolve_route(Route::Dashboard, &session), Route::Dashboard);
    }

    #[test]
    fn public_routes_pass_through_for_everyone() {
        assert_eq!(resolve_route(Route::Home, &Session::default()), Route::Home);
        assert_eq!(resolve_route(Route::Home, &authenticated()), Route::Home);
    }

    #[test]
    fn clearing_the_session_deauthenticates() {
        let mut session = authenticated();
        assert!(session.is_authenticated());
        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(resolve_route(Route::Dashboard, &session), Route::Login);
    }
}
