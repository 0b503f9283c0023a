use quill_policy::Role;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Prefix marking a synthesized guest identifier as ephemeral.
pub const GUEST_ID_PREFIX: &str = "guest-";

/// Display-only profile fields carried by a persisted account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Public handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A persisted user record, as resolved from the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Globally unique account identifier (the credential's subject).
    pub id: String,
    /// The single role this account acts under.
    pub role: Role,
    /// Display-only profile fields.
    #[serde(default)]
    pub profile: Profile,
}

/// An ephemeral pseudo-user synthesized when no credential is presented and
/// guest access is enabled. Never persisted, never an owner of anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSession {
    /// Freshly generated identifier, prefixed with [`GUEST_ID_PREFIX`].
    pub id: String,
}

/// The identity attached to a request once the authentication gate has run.
///
/// The two trust tiers are distinct variants rather than a flag on a shared
/// record: code that needs an ownership-capable account must match on
/// [`Principal::Authenticated`] and cannot accidentally accept a guest.
///
/// A principal is created fresh for every request, attached to the request
/// context, and discarded when the request completes. It is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A verified credential resolved to a persisted account.
    Authenticated(Account),
    /// A synthesized ephemeral visitor.
    Guest(GuestSession),
}

impl Principal {
    /// Synthesize a fresh guest principal.
    ///
    /// Every call produces a distinct identifier; two requests never share a
    /// guest identity.
    #[must_use]
    pub fn synthesize_guest() -> Self {
        Self::Guest(GuestSession {
            id: format!("{GUEST_ID_PREFIX}{}", Ulid::new()),
        })
    }

    /// The principal's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Authenticated(account) => &account.id,
            Self::Guest(guest) => &guest.id,
        }
    }

    /// The role this principal acts under. Guests are always [`Role::Guest`].
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Authenticated(account) => account.role,
            Self::Guest(_) => Role::Guest,
        }
    }

    /// Whether this principal is a synthesized guest.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}
