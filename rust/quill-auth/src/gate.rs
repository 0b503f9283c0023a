//! The authentication gate.
//!
//! Every protected request passes through here first. The gate unifies the
//! anonymous-guest and authenticated-user trust tiers (the third tier,
//! resource owner, is decided later by the engine) behind a single procedure
//! that produces exactly one outcome per request: an authenticated principal, a
//! synthesized guest principal, or a rejection. Every error path fails
//! closed; access is never granted because a lookup failed.

use crate::{AuthError, SettingsStore, UserStore};
use quill_session::{Principal, RevocationRegistry, TokenCodec, TokenError};

/// The standard bearer scheme prefix in an `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the credential from an `Authorization` header value.
///
/// Only the standard bearer scheme is inspected; a header carrying any
/// other scheme counts as no credential at all (cookie-based extraction is
/// out of scope).
#[must_use]
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization?.strip_prefix(BEARER_PREFIX)
}

/// Orchestrates token verification, revocation lookup, guest synthesis, and
/// account resolution into one authentication decision per request.
///
/// The gate holds no per-request state; a single instance serves all
/// concurrent requests. Its only shared mutable collaborator is the
/// revocation registry.
#[derive(Debug)]
pub struct AuthenticationGate<S, U, R> {
    codec: TokenCodec,
    settings: S,
    users: U,
    revocations: R,
}

impl<S, U, R> AuthenticationGate<S, U, R>
where
    S: SettingsStore,
    U: UserStore,
    R: RevocationRegistry,
{
    /// Assemble a gate from its collaborators.
    pub fn new(codec: TokenCodec, settings: S, users: U, revocations: R) -> Self {
        Self {
            codec,
            settings,
            users,
            revocations,
        }
    }

    /// Produce the principal for a request, or a rejection.
    ///
    /// `authorization` is the raw `Authorization` header value, if the
    /// request carried one.
    ///
    /// Outcomes:
    /// - a non-guest [`Principal`] when a valid, unrevoked credential
    ///   resolves to a persisted account;
    /// - a guest [`Principal`] when no credential is present and guest
    ///   access is globally enabled;
    /// - an [`AuthError`] otherwise, including when a settings or user
    ///   lookup fails (fail closed, never silently grant).
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let Some(token) = bearer_token(authorization) else {
            return self.guest_fallback().await;
        };

        // Revocation beats signature validity and remaining lifetime.
        if self.revocations.contains(token).await {
            return Err(AuthError::TokenRevoked);
        }

        let claims = self.codec.verify(token).map_err(|error| match error {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;

        match self.users.find_account(&claims.sub).await? {
            Some(account) => Ok(Principal::Authenticated(account)),
            // A valid token for a deleted account.
            None => Err(AuthError::UserNotFound),
        }
    }

    /// Invalidate a credential ahead of its natural expiry (logout).
    ///
    /// The credential is verified first so the registry entry can carry its
    /// expiry claim. Revoking an already-expired or invalid credential is a
    /// no-op success: there is nothing left to revoke.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        match self.codec.verify(token) {
            Ok(claims) => {
                self.revocations.insert(token, claims.exp).await;
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }

    async fn guest_fallback(&self) -> Result<Principal, AuthError> {
        if self.settings.guest_access_enabled().await? {
            Ok(Principal::synthesize_guest())
        } else {
            Err(AuthError::NotAuthorized)
        }
    }
}
