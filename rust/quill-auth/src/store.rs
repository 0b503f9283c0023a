//! Async seams over the persistence collaborators.
//!
//! The gate and the engine never talk to a database directly; they call
//! these traits. Each call awaits I/O for the request at hand only; other
//! in-flight requests are unaffected, and a failure surfaces as a server
//! error rather than an allow or a deny.

use async_trait::async_trait;
use quill_session::Account;

/// A transient infrastructure failure from a backing store.
///
/// Never retried by the authorization core; retry policy, if any, belongs
/// to the caller of the whole request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying lookup failed (connection loss, timeout, driver
    /// error).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to global application settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Whether guest access is globally enabled.
    async fn guest_access_enabled(&self) -> Result<bool, StoreError>;
}

/// Read access to persisted user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolve a credential's subject identifier to an account, or `None`
    /// when no such account exists (e.g. a valid token for a deleted
    /// account).
    async fn find_account(&self, id: &str) -> Result<Option<Account>, StoreError>;
}
