//! Compact bearer credential codec.
//!
//! Credentials are three base64url segments, `header.claims.signature`,
//! signed with HMAC-SHA256 over the first two segments. Verification order
//! matters: the signature is checked before the claims are even parsed, so
//! nothing in an untrusted token influences control flow beyond its raw
//! bytes.

use crate::TokenError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm this codec produces or accepts.
const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// The claims embedded in a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier: the account id the credential was issued to.
    pub sub: String,
    /// Unix seconds at which the credential was issued.
    pub iat: u64,
    /// Unix seconds past which the credential must be rejected.
    pub exp: u64,
}

/// Issues and verifies bearer credentials against the server secret.
///
/// The codec is independent of persistence: it answers only whether a
/// credential is authentic and unexpired. Revocation and subject resolution
/// are the authentication gate's concern.
///
/// # Example
///
/// ```
/// use quill_session::TokenCodec;
/// use std::time::Duration;
///
/// let codec = TokenCodec::new(b"server-secret".to_vec());
/// let token = codec.issue("u1", Duration::from_secs(3600)).unwrap();
/// let claims = codec.verify(&token).unwrap();
/// assert_eq!(claims.sub, "u1");
/// ```
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    /// Create a codec over the server secret.
    #[must_use]
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Issue a credential for `subject`, valid for `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, unix_now())
    }

    /// Issue a credential with an explicit issuance time (injected for
    /// deterministic tests).
    pub fn issue_at(&self, subject: &str, ttl: Duration, now: u64) -> Result<String, TokenError> {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl.as_secs(),
        };

        let header = encode_segment(&header)?;
        let claims = encode_segment(&claims)?;
        let payload = format!("{header}.{claims}");
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));

        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a credential against the server secret and the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, unix_now())
    }

    /// Verify a credential at an explicit point in time.
    ///
    /// Checks run in order: structure, signature, claims shape, expiry. Each
    /// failure maps to its own [`TokenError`] kind; expiry in particular is
    /// distinguishable from every other rejection.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(claims), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|error| TokenError::Malformed(format!("signature segment: {error}")))?;

        let payload = format!("{header}.{claims}");
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        // Signature holds; the segments are now trusted input.
        let header: Header = decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }

        let claims: Claims = decode_segment(claims)?;
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret through Debug output.
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json =
        serde_json::to_vec(value).map_err(|error| TokenError::Serialization(error.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|error| TokenError::Malformed(format!("base64 segment: {error}")))?;
    serde_json::from_slice(&bytes).map_err(|error| TokenError::Malformed(error.to_string()))
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
