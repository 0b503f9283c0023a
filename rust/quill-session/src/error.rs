/// Errors that can occur while verifying or issuing a bearer credential.
///
/// Expiry is its own variant, distinguished from the other rejections so
/// that callers can prompt a re-authentication rather than a full re-login.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The credential is structurally invalid (wrong segment count, bad
    /// base64, unparseable claims, unsupported algorithm).
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// The signature does not verify against the server secret.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The credential is well-formed and correctly signed, but its expiry
    /// claim is in the past.
    #[error("Token expired")]
    Expired,

    /// Claims could not be serialized while issuing a credential.
    #[error("Failed to serialize claims: {0}")]
    Serialization(String),
}
