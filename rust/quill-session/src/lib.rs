//! Session-trust primitives.
//!
//! This crate provides the pieces of the authorization core that deal with
//! *who* is making a request:
//!
//! - [`Principal`]: the identity attached to a request after
//!   authentication, a tagged `Authenticated | Guest` variant so downstream
//!   code cannot mistake an ephemeral guest for an ownership-capable
//!   account.
//! - [`TokenCodec`]: issues and verifies the compact bearer credentials
//!   presented in `Authorization: Bearer <token>` headers. Verification
//!   yields a tagged [`TokenError`] kind for every rejection, so callers get
//!   exhaustive, type-checked handling of "malformed" vs "bad signature" vs
//!   "expired" instead of sniffing exception types.
//! - [`RevocationRegistry`]: the injected logout blacklist consulted before
//!   any other trust is extended to a credential, with an in-memory
//!   single-process backing ([`MemoryRevocationRegistry`]).
//!
//! # Trust model
//!
//! A credential is either well-formed, unexpired, and unrevoked, in which
//! case it is trusted entirely, or it is rejected outright. There is no
//! partial trust, and nothing in this crate retries: a rejection here is a
//! definitive answer for the request that presented the credential.

mod error;
pub use error::*;

mod principal;
pub use principal::*;

mod revocation;
pub use revocation::*;

mod token;
pub use token::*;
