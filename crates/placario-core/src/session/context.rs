//! Process-wide authentication context.
//!
//! The context is the single writer of session state: login, renewal,
//! logout, and expiry all mutate state here and nowhere else. Readers
//! (route guard, warning flow, views) consume cloned snapshots and act
//! through the exposed operations only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AuthError;
use crate::events::Event;
use crate::session::monitor::{SessionMonitor, SessionPhase};
use crate::session::token_store;
use crate::session::tokens::{self, ApiConfig, SessionTokens};

/// Read-only view of the session, handed to readers as a clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub account: Option<String>,
    pub session_id: Option<Uuid>,
}

impl SessionState {
    fn loading() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            expires_at: None,
            account: None,
            session_id: None,
        }
    }

    fn anonymous() -> Self {
        Self {
            is_loading: false,
            ..Self::loading()
        }
    }
}

/// Single-writer owner of session state and its expiry monitor.
pub struct AuthContext {
    api: ApiConfig,
    warning_threshold_ms: u64,
    state: SessionState,
    tokens: Option<SessionTokens>,
    monitor: Option<SessionMonitor>,
}

impl AuthContext {
    /// Create the context and restore any stored session.
    ///
    /// Starts in the loading state, reads the keyring, and lands either
    /// authenticated (monitor armed against the stored expiry) or
    /// anonymous. Stale tokens are treated as no session rather than
    /// renewed silently, keeping bootstrap synchronous.
    pub fn bootstrap(api: ApiConfig, warning_threshold_ms: u64) -> Self {
        let mut ctx = Self {
            api,
            warning_threshold_ms,
            state: SessionState::loading(),
            tokens: None,
            monitor: None,
        };

        match token_store::load() {
            Ok(Some(stored)) if !tokens::is_expired(&stored) => {
                debug!("restored session from keyring");
                ctx.install_session(stored);
            }
            Ok(Some(_)) => {
                debug!("stored session is stale, starting anonymous");
                ctx.state = SessionState::anonymous();
            }
            Ok(None) => {
                ctx.state = SessionState::anonymous();
            }
            Err(e) => {
                warn!("keyring unavailable, starting anonymous: {e}");
                ctx.state = SessionState::anonymous();
            }
        }
        ctx
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn phase(&self) -> Option<SessionPhase> {
        self.monitor.as_ref().map(SessionMonitor::phase)
    }

    /// Milliseconds until expiry, if an expiry is known.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> Option<u64> {
        self.monitor.as_ref().map(|m| m.remaining_ms(now))
    }

    /// Full state snapshot event, for the CLI JSON surface.
    pub fn snapshot_event(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            is_authenticated: self.state.is_authenticated,
            is_loading: self.state.is_loading,
            expires_at: self.state.expires_at,
            remaining_ms: self.remaining_ms(now),
            at: now,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Authenticate with the API and establish a session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Event, AuthError> {
        let mut fresh = tokens::login(&self.api, username, password).await?;
        fresh.account = Some(username.to_string());
        token_store::store(&fresh)?;
        self.install_session(fresh);
        info!(account = username, "session started");
        Ok(Event::SessionStarted {
            session_id: self.state.session_id.unwrap_or_else(Uuid::new_v4),
            account: self.state.account.clone(),
            expires_at: self.state.expires_at,
            at: Utc::now(),
        })
    }

    /// Renew the session without re-login, extending its expiry.
    ///
    /// On failure the session is left exactly as it was, so renew can be
    /// invoked again after a failed attempt.
    pub async fn renew(&mut self) -> Result<Event, AuthError> {
        // An expired session needs a fresh login, not a refresh.
        if !self.state.is_authenticated {
            return Err(AuthError::NotAuthenticated);
        }
        let current = self.tokens.as_ref().ok_or(AuthError::NotAuthenticated)?;
        let refresh = current
            .refresh_token
            .clone()
            .ok_or(AuthError::SessionExpired)?;
        let account = current.account.clone();

        let mut renewed = tokens::renew(&self.api, &refresh).await?;
        renewed.account = account;
        token_store::store(&renewed)?;

        let expires_at = expiry_of(&renewed);
        self.state.expires_at = expires_at;
        self.tokens = Some(renewed);

        let now = Utc::now();
        match (expires_at, self.monitor.as_mut()) {
            (Some(expires_at), Some(monitor)) => {
                Ok(monitor.renewed(expires_at, now).unwrap_or(Event::SessionRenewed {
                    expires_at: Some(expires_at),
                    at: now,
                }))
            }
            (Some(expires_at), None) => {
                self.monitor = Some(SessionMonitor::new(expires_at, self.warning_threshold_ms));
                Ok(Event::SessionRenewed {
                    expires_at: Some(expires_at),
                    at: now,
                })
            }
            (None, _) => {
                // Endpoint stopped reporting an expiry; nothing to watch.
                self.monitor = None;
                Ok(Event::SessionRenewed {
                    expires_at: None,
                    at: now,
                })
            }
        }
    }

    /// End the session and drop stored credentials.
    pub fn logout(&mut self) -> Result<Event, AuthError> {
        token_store::clear()?;
        self.tokens = None;
        self.monitor = None;
        self.state = SessionState::anonymous();
        info!("session ended");
        Ok(Event::SessionEnded { at: Utc::now() })
    }

    /// Drive the expiry monitor. On expiry the authentication state is
    /// cleared; protected views react via the route guard on their next
    /// snapshot.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let event = self.monitor.as_mut()?.tick(now)?;
        if let Event::SessionExpired { .. } = event {
            self.state.is_authenticated = false;
            self.state.expires_at = None;
            self.state.session_id = None;
        }
        Some(event)
    }

    /// Dismiss a shown warning without renewing.
    pub fn dismiss(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.monitor.as_mut()?.dismiss(now)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn install_session(&mut self, tokens: SessionTokens) {
        let expires_at = expiry_of(&tokens);
        self.monitor =
            expires_at.map(|exp| SessionMonitor::new(exp, self.warning_threshold_ms));
        self.state = SessionState {
            is_authenticated: true,
            is_loading: false,
            expires_at,
            account: tokens.account.clone(),
            session_id: Some(Uuid::new_v4()),
        };
        self.tokens = Some(tokens);
    }
}

fn expiry_of(tokens: &SessionTokens) -> Option<DateTime<Utc>> {
    tokens
        .expires_at
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn api() -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:9".to_string(),
            login_path: "/auth/login".to_string(),
            renew_path: "/auth/refresh".to_string(),
            timeout_secs: 1,
        }
    }

    fn authenticated_context(expires_in_secs: i64) -> AuthContext {
        let mut ctx = AuthContext {
            api: api(),
            warning_threshold_ms: 120_000,
            state: SessionState::loading(),
            tokens: None,
            monitor: None,
        };
        ctx.install_session(SessionTokens {
            access_token: "acc".into(),
            refresh_token: Some("ref".into()),
            expires_at: Some(chrono::Utc::now().timestamp() + expires_in_secs),
            token_type: "Bearer".into(),
            scope: None,
            account: Some("alice".into()),
        });
        ctx
    }

    #[test]
    fn installed_session_is_authenticated_with_monitor_armed() {
        let ctx = authenticated_context(600);
        let state = ctx.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.account.as_deref(), Some("alice"));
        assert!(state.expires_at.is_some());
        assert_eq!(ctx.phase(), Some(SessionPhase::Active));
    }

    #[test]
    fn expiry_clears_authentication_state() {
        let mut ctx = authenticated_context(600);
        let past = Utc::now() + Duration::seconds(601);
        match ctx.tick(past) {
            Some(Event::SessionExpired { .. }) => {}
            other => panic!("Expected SessionExpired, got {other:?}"),
        }
        let state = ctx.snapshot();
        assert!(!state.is_authenticated);
        assert!(state.expires_at.is_none());
        assert_eq!(ctx.phase(), Some(SessionPhase::Expired));
    }

    #[test]
    fn warning_then_dismiss_flows_through_context() {
        let mut ctx = authenticated_context(600);
        let near = Utc::now() + Duration::seconds(500);
        assert!(matches!(ctx.tick(near), Some(Event::WarningShown { .. })));
        assert!(matches!(
            ctx.dismiss(near),
            Some(Event::WarningDismissed { .. })
        ));
        // Session stays authenticated after a dismiss.
        assert!(ctx.is_authenticated());
    }

    #[tokio::test]
    async fn renew_without_session_is_rejected_and_reinvocable() {
        let mut ctx = AuthContext {
            api: api(),
            warning_threshold_ms: 120_000,
            state: SessionState::anonymous(),
            tokens: None,
            monitor: None,
        };
        assert!(matches!(
            ctx.renew().await,
            Err(AuthError::NotAuthenticated)
        ));
        // A failed attempt leaves the context usable for another try.
        assert!(matches!(
            ctx.renew().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn snapshot_event_carries_phase_and_remaining() {
        let ctx = authenticated_context(600);
        let now = Utc::now();
        match ctx.snapshot_event(now) {
            Event::StateSnapshot {
                phase,
                is_authenticated,
                remaining_ms,
                ..
            } => {
                assert_eq!(phase, Some(SessionPhase::Active));
                assert!(is_authenticated);
                assert!(remaining_ms.unwrap() > 0);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
