//! Error taxonomy and the HTTP status/response contract.
//!
//! Every rejection the gate or the decision engine can produce is a variant
//! of [`AuthError`]. HTTP handlers convert one into a [`Rejection`], a
//! serializable payload carrying the status, a machine-readable
//! [`ErrorCode`], and the caller-facing message. Nothing propagates past
//! this module as an unhandled fault.

use crate::StoreError;
use quill_policy::{AccessLevel, Feature, Role};
use serde::Serialize;

/// A rejection produced by the authentication gate or the decision engine.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No credential was presented and guest access is disabled.
    #[error("Not authorized. Please log in.")]
    NotAuthorized,

    /// The presented credential is in the revocation registry.
    #[error("Token invalidated.")]
    TokenRevoked,

    /// The credential is malformed or its signature does not verify.
    #[error("Invalid token.")]
    TokenInvalid,

    /// The credential is authentic but past its expiry claim. Distinguished
    /// from [`AuthError::TokenInvalid`] so clients can prompt a
    /// re-authentication instead of a full re-login.
    #[error("Token expired.")]
    TokenExpired,

    /// The credential's subject no longer resolves to a persisted account.
    #[error("User not found.")]
    UserNotFound,

    /// The feature is globally switched off, independent of role.
    #[error("Feature '{0}' is disabled.")]
    FeatureDisabled(Feature),

    /// The policy table grants the role no access to the feature.
    #[error("Role '{role}' has no access to feature '{feature}'.")]
    NoAccess {
        /// The principal's role.
        role: Role,
        /// The requested feature.
        feature: Feature,
    },

    /// The role's granted level does not satisfy the route's requirement.
    #[error("Insufficient access level: held '{held}', required '{required}'.")]
    InsufficientLevel {
        /// The level the role holds for the feature.
        held: AccessLevel,
        /// The level the route requires.
        required: AccessLevel,
    },

    /// Guests can never own persisted resources.
    #[error("Guests cannot own resources.")]
    GuestCannotOwn,

    /// The resource's owner reference does not match the principal.
    #[error("Does not own resource.")]
    NotOwner,

    /// An ownership check was requested without a resource identifier in
    /// the request path.
    #[error("Resource id missing.")]
    ResourceIdMissing,

    /// The resource named by the request does not exist. A deny, not a
    /// crash.
    #[error("Resource not found.")]
    ResourceNotFound,

    /// An ownership check reached a feature with no registered resolver:
    /// a server misconfiguration, failed closed.
    #[error("No ownership resolver registered for feature '{0}'.")]
    FeatureNotRegistered(Feature),

    /// A settings, user, or resource lookup failed. Surfaced as a server
    /// error and not retried here, never silently treated as allow or deny.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Machine-readable classification of a rejection.
///
/// Each code maps to an HTTP status via [`ErrorCode::status_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 401 Unauthorized - authentication failures
    /// No credential and guest access disabled.
    NotAuthorized,
    /// Credential revoked via logout.
    TokenRevoked,
    /// Credential malformed or signature invalid.
    TokenInvalid,
    /// Credential expired.
    TokenExpired,
    /// Subject's account record missing.
    UserNotFound,

    // 403 Forbidden - authorization failures
    /// Feature globally disabled.
    FeatureDisabled,
    /// Role lacks any access to the feature.
    NoAccess,
    /// Held level below the required level.
    InsufficientLevel,
    /// Guest principal against an ownership requirement.
    GuestCannotOwn,
    /// Owner reference mismatch.
    NotOwner,

    // 400 Bad Request
    /// Ownership check without a resource identifier.
    ResourceIdMissing,

    // 404 Not Found
    /// Named resource does not exist.
    ResourceNotFound,

    // 500 Internal Server Error
    /// Ownable feature without a registered resolver.
    FeatureNotRegistered,
    /// Backing store failure.
    StoreUnavailable,
}

impl ErrorCode {
    /// The HTTP status this code surfaces as.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotAuthorized
            | Self::TokenRevoked
            | Self::TokenInvalid
            | Self::TokenExpired
            | Self::UserNotFound => 401,

            Self::FeatureDisabled
            | Self::NoAccess
            | Self::InsufficientLevel
            | Self::GuestCannotOwn
            | Self::NotOwner => 403,

            Self::ResourceIdMissing => 400,

            Self::ResourceNotFound => 404,

            Self::FeatureNotRegistered | Self::StoreUnavailable => 500,
        }
    }
}

impl AuthError {
    /// The machine-readable code for this rejection.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotAuthorized => ErrorCode::NotAuthorized,
            Self::TokenRevoked => ErrorCode::TokenRevoked,
            Self::TokenInvalid => ErrorCode::TokenInvalid,
            Self::TokenExpired => ErrorCode::TokenExpired,
            Self::UserNotFound => ErrorCode::UserNotFound,
            Self::FeatureDisabled(_) => ErrorCode::FeatureDisabled,
            Self::NoAccess { .. } => ErrorCode::NoAccess,
            Self::InsufficientLevel { .. } => ErrorCode::InsufficientLevel,
            Self::GuestCannotOwn => ErrorCode::GuestCannotOwn,
            Self::NotOwner => ErrorCode::NotOwner,
            Self::ResourceIdMissing => ErrorCode::ResourceIdMissing,
            Self::ResourceNotFound => ErrorCode::ResourceNotFound,
            Self::FeatureNotRegistered(_) => ErrorCode::FeatureNotRegistered,
            Self::Store(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// The HTTP status this rejection surfaces as.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }
}

/// The caller-facing shape of a rejection, ready to serialize into an HTTP
/// response body.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable message for client display.
    pub message: String,
}

impl From<AuthError> for Rejection {
    fn from(error: AuthError) -> Self {
        Self {
            status: error.status_code(),
            code: error.code(),
            message: error.to_string(),
        }
    }
}
