//! Session lifecycle: expiry monitoring, renewal, and the warning flow.

pub mod context;
pub mod monitor;
pub mod prompt;
pub mod tokens;

pub use context::{AuthContext, SessionState};
pub use monitor::{SessionMonitor, SessionPhase};
pub use prompt::WarningPrompt;
pub use tokens::{ApiConfig, SessionTokens};

/// Thin wrapper around the OS keyring for session token storage.
pub mod token_store {
    use crate::error::AuthError;
    use crate::session::tokens::SessionTokens;

    const SERVICE: &str = "placario";
    const TOKENS_KEY: &str = "session_tokens";

    pub fn load() -> Result<Option<SessionTokens>, AuthError> {
        let entry = keyring::Entry::new(SERVICE, TOKENS_KEY)?;
        match entry.get_password() {
            Ok(json) => Ok(serde_json::from_str(&json).ok()),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn store(tokens: &SessionTokens) -> Result<(), AuthError> {
        let json = serde_json::to_string(tokens)?;
        let entry = keyring::Entry::new(SERVICE, TOKENS_KEY)?;
        entry.set_password(&json)?;
        Ok(())
    }

    pub fn clear() -> Result<(), AuthError> {
        let entry = keyring::Entry::new(SERVICE, TOKENS_KEY)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
