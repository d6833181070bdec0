//! Route guard for protected views.

use serde::{Deserialize, Serialize};

use crate::routing::LOGIN_PATH;
use crate::session::SessionState;

/// What a guarded subtree should do for the current session snapshot.
///
/// The decision is pure: callers re-evaluate only when the underlying
/// authentication state changes, never by retry or polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Session state still resolving: neutral placeholder, no redirect,
    /// no protected content.
    Loading,
    /// Unauthenticated: client-side redirect to the login entry point.
    /// History is replaced so back-navigation cannot return to the
    /// guarded page.
    RedirectToLogin {
        target: String,
        replace_history: bool,
    },
    /// Authenticated: render the nested protected content.
    Render,
}

/// Decide the guard outcome for a session snapshot.
pub fn resolve_guard(state: &SessionState) -> GuardOutcome {
    if state.is_loading {
        return GuardOutcome::Loading;
    }
    if !state.is_authenticated {
        return GuardOutcome::RedirectToLogin {
            target: LOGIN_PATH.to_string(),
            replace_history: true,
        };
    }
    GuardOutcome::Render
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(is_authenticated: bool, is_loading: bool) -> SessionState {
        SessionState {
            is_authenticated,
            is_loading,
            expires_at: None,
            account: None,
            session_id: None,
        }
    }

    #[test]
    fn loading_renders_placeholder_without_redirect() {
        assert_eq!(resolve_guard(&state(false, true)), GuardOutcome::Loading);
        // Loading wins even if a stale authenticated flag is around.
        assert_eq!(resolve_guard(&state(true, true)), GuardOutcome::Loading);
    }

    #[test]
    fn unauthenticated_redirects_to_login_replacing_history() {
        match resolve_guard(&state(false, false)) {
            GuardOutcome::RedirectToLogin {
                target,
                replace_history,
            } => {
                assert_eq!(target, LOGIN_PATH);
                assert!(replace_history);
            }
            other => panic!("Expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn authenticated_renders_protected_content() {
        assert_eq!(resolve_guard(&state(true, false)), GuardOutcome::Render);
    }
}
