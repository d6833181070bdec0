use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::SessionPhase;

/// Every session lifecycle change produces an Event.
/// Front-ends poll for events; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A session was established via login or restored at bootstrap.
    SessionStarted {
        session_id: Uuid,
        account: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    /// Remaining time-to-expiry crossed the warning threshold.
    WarningShown {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// User dismissed the warning without renewing. Expiry keeps ticking.
    WarningDismissed {
        at: DateTime<Utc>,
    },
    /// Renewal succeeded; expiry extended and the warning re-armed.
    SessionRenewed {
        expires_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    /// Expiry timestamp passed with no renewal.
    SessionExpired {
        at: DateTime<Utc>,
    },
    /// User logged out.
    SessionEnded {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Option<SessionPhase>,
        is_authenticated: bool,
        is_loading: bool,
        expires_at: Option<DateTime<Utc>>,
        remaining_ms: Option<u64>,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_with_type_tag() {
        let event = Event::WarningShown {
            remaining_ms: 90_000,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"WarningShown\""));
        let decoded: Event = serde_json::from_str(&json).unwrap();
        match decoded {
            Event::WarningShown { remaining_ms, .. } => assert_eq!(remaining_ms, 90_000),
            _ => panic!("Expected WarningShown"),
        }
    }
}
