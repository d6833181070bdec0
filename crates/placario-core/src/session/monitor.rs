//! Session expiry monitor.
//!
//! The monitor is a wall-clock-based state machine over a session's expiry
//! timestamp. It does not use internal threads -- the caller is responsible
//! for calling `tick()` periodically with the current time.
//!
//! ## State Transitions
//!
//! ```text
//! Active -> WarningShown -> Active   (dismiss, or renewal)
//! Active | WarningShown -> Expired   (expiry passes)
//! ```
//!
//! Dismissing latches the warning off for the remainder of the current
//! expiry window; only a renewal installs a new window and clears the
//! latch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::Event;

/// Phase of the monitored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    WarningShown,
    Expired,
}

/// Watches a session's expiry and raises a pre-expiry warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMonitor {
    phase: SessionPhase,
    expires_at: DateTime<Utc>,
    /// Remaining time below which the warning fires.
    warning_threshold_ms: u64,
    /// Latched by dismiss; cleared by renewal.
    warning_suppressed: bool,
}

impl SessionMonitor {
    pub fn new(expires_at: DateTime<Utc>, warning_threshold_ms: u64) -> Self {
        Self {
            phase: SessionPhase::Active,
            expires_at,
            warning_threshold_ms,
            warning_suppressed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Milliseconds until expiry, zero once past.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_milliseconds().max(0) as u64
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Call periodically. Returns the transition event, if any.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            SessionPhase::Active => {
                if now >= self.expires_at {
                    return Some(self.expire(now));
                }
                let remaining_ms = self.remaining_ms(now);
                if !self.warning_suppressed && remaining_ms <= self.warning_threshold_ms {
                    self.phase = SessionPhase::WarningShown;
                    debug!(remaining_ms, "session warning threshold crossed");
                    return Some(Event::WarningShown { remaining_ms, at: now });
                }
                None
            }
            SessionPhase::WarningShown => {
                if now >= self.expires_at {
                    return Some(self.expire(now));
                }
                None
            }
            SessionPhase::Expired => None,
        }
    }

    /// Dismiss the warning without renewing. The expiry is untouched and
    /// the warning cannot re-fire within this expiry window.
    pub fn dismiss(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            SessionPhase::WarningShown => {
                self.phase = SessionPhase::Active;
                self.warning_suppressed = true;
                debug!("session warning dismissed");
                Some(Event::WarningDismissed { at: now })
            }
            _ => None,
        }
    }

    /// Install a new expiry after a successful renewal. Re-arms the
    /// warning against the new window. No-op once expired -- an expired
    /// session requires a fresh login, not a renewal.
    pub fn renewed(&mut self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            SessionPhase::Active | SessionPhase::WarningShown => {
                self.phase = SessionPhase::Active;
                self.expires_at = expires_at;
                self.warning_suppressed = false;
                info!(%expires_at, "session renewed");
                Some(Event::SessionRenewed {
                    expires_at: Some(expires_at),
                    at: now,
                })
            }
            SessionPhase::Expired => None,
        }
    }

    fn expire(&mut self, now: DateTime<Utc>) -> Event {
        self.phase = SessionPhase::Expired;
        info!("session expired");
        Event::SessionExpired { at: now }
    }
}
