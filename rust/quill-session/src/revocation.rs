//! Logout blacklist for otherwise-valid credentials.

use crate::unix_now;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A store of credentials that must no longer be honored even though they
/// have not yet expired.
///
/// The registry is consulted before any signature or expiry trust is
/// extended to a presented credential: revocation beats validity. Once a
/// credential is revoked it stays revoked until its natural expiry, after
/// which the entry is irrelevant (the expiry check rejects it anyway) and
/// may be discarded.
///
/// The trait is an explicit, injected dependency so that the in-memory
/// backing below can be swapped for a shared store (one that multiple
/// server processes consult) without touching the authentication gate.
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Record `credential` as revoked until `expiry` (Unix seconds, the
    /// credential's own expiry claim).
    async fn insert(&self, credential: &str, expiry: u64);

    /// Whether exactly this credential string has been revoked.
    ///
    /// Must observe writes made by [`RevocationRegistry::insert`] in the
    /// same process immediately: a logout is visible to the very next
    /// request presenting that credential.
    async fn contains(&self, credential: &str) -> bool;
}

/// Single-process, in-memory revocation backing.
///
/// Sufficient only for a single-instance deployment: revocations recorded
/// here are invisible to other server processes. Multi-instance deployments
/// need a shared-store implementation of [`RevocationRegistry`].
#[derive(Debug, Default)]
pub struct MemoryRevocationRegistry {
    entries: RwLock<HashMap<String, u64>>,
}

impl MemoryRevocationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (test and diagnostics helper).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl RevocationRegistry for MemoryRevocationRegistry {
    async fn insert(&self, credential: &str, expiry: u64) {
        let now = unix_now();
        let mut entries = self.entries.write();
        // Naturally expired entries are dead weight; drop them while we
        // already hold the write lock.
        entries.retain(|_, entry_expiry| *entry_expiry > now);
        entries.insert(credential.to_string(), expiry);
    }

    async fn contains(&self, credential: &str) -> bool {
        self.entries.read().contains_key(credential)
    }
}
