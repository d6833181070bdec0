//! Terminal view for unmatched routes.

use serde::{Deserialize, Serialize};

use crate::routing::{DASHBOARD_PATH, LOGIN_PATH};
use crate::session::SessionState;

/// The single "return" link offered by the not-found view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLink {
    pub target: String,
    pub label: String,
}

/// Pick the return link for the current session snapshot. Authenticated
/// users go back to the dashboard; everyone else goes to login.
pub fn return_link(state: &SessionState) -> ReturnLink {
    if state.is_authenticated {
        ReturnLink {
            target: DASHBOARD_PATH.to_string(),
            label: "Voltar ao Dashboard".to_string(),
        }
    } else {
        ReturnLink {
            target: LOGIN_PATH.to_string(),
            label: "Ir para Login".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(is_authenticated: bool) -> SessionState {
        SessionState {
            is_authenticated,
            is_loading: false,
            expires_at: None,
            account: None,
            session_id: None,
        }
    }

    #[test]
    fn authenticated_users_return_to_the_dashboard() {
        let link = return_link(&state(true));
        assert_eq!(link.target, DASHBOARD_PATH);
        assert_eq!(link.label, "Voltar ao Dashboard");
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        let link = return_link(&state(false));
        assert_eq!(link.target, LOGIN_PATH);
        assert_eq!(link.label, "Ir para Login");
    }
}
