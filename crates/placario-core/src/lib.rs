//! # Placário Core Library
//!
//! This library provides the core business logic for Placário, a placas
//! rental management product. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary, with visual
//! front-ends being thin layers over the same core library.
//!
//! ## Architecture
//!
//! - **Session Lifecycle**: a wall-clock-based expiry monitor that requires
//!   the caller to periodically invoke `tick()`, plus a single-writer
//!   authentication context for login/renewal/logout
//! - **Period Taxonomy**: the closed set of rental period tags with their
//!   label and duration tables
//! - **Debounce**: a trailing-edge debounce state machine for
//!   search-as-you-type values
//! - **Routing**: pure auth-gated route guard and not-found decisions
//! - **Storage**: TOML-based configuration, OS-keyring token storage
//!
//! ## Key Components
//!
//! - [`AuthContext`]: single-writer session state owner
//! - [`SessionMonitor`]: expiry/warning state machine
//! - [`PeriodKind`]: rental period taxonomy
//! - [`Debouncer`]: debounced value holder
//! - [`Config`]: application configuration management

pub mod debounce;
pub mod error;
pub mod events;
pub mod period;
pub mod routing;
pub mod session;
pub mod storage;

pub use debounce::{DebounceState, Debouncer};
pub use error::{AuthError, ConfigError, CoreError};
pub use events::Event;
pub use period::{is_valid_period_kind, PeriodKind};
pub use routing::{resolve_guard, return_link, GuardOutcome, ReturnLink};
pub use session::{
    ApiConfig, AuthContext, SessionMonitor, SessionPhase, SessionState, SessionTokens,
    WarningPrompt,
};
pub use storage::Config;
