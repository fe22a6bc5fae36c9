//! Access gate consulted once before any statistics are produced.
//!
//! [`AuthGate`] is the check itself. [`CredentialTable`] implements it from a
//! JSON file of username/password pairs. This is a flat comparison, not a
//! hardened security boundary.

mod config;

pub use config::CredentialTable;

use tracing::{info, warn};

/// Username and password supplied by the operator.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub trait AuthGate {
    fn is_authorized(&self, credentials: &Credentials) -> bool;
}

/// Outcome of a login attempt, owned by the caller for the duration of a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No credentials submitted yet.
    #[default]
    Pending,
    Authorized { user: String },
    Rejected,
}

impl AuthState {
    /// Submits `credentials` to `gate` and returns the resulting state.
    pub fn evaluate<G: AuthGate + ?Sized>(gate: &G, credentials: &Credentials) -> Self {
        if gate.is_authorized(credentials) {
            let user = credentials.username.trim().to_string();
            info!(user = %user, "Authentication succeeded");
            AuthState::Authorized { user }
        } else {
            warn!(user = %credentials.username.trim(), "Authentication failed");
            AuthState::Rejected
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthState::Authorized { .. })
    }
}
