//! Authentication gate and authorization decision engine.
//!
//! This crate is the trust core of the application: every protected request
//! is authenticated here first, then authorized against the policy table
//! for the specific feature and access level its route declares. It is a
//! library invoked by route handlers: no wire format or framework binding
//! is defined here, only the decision procedure and its HTTP status/response
//! contract.
//!
//! # Control flow
//!
//! ```text
//! request ──► AuthenticationGate::authenticate
//!               │  bearer header?  ──no──► guest access enabled?
//!               │                            ├─ yes ► Guest principal
//!               │                            └─ no  ► 401 rejection
//!               │  revoked? ── yes ────────► 401 "Token invalidated."
//!               │  verify signature/expiry ► 401 invalid / expired
//!               │  resolve account ────────► 401 "User not found."
//!               ▼
//!            Principal ──► DecisionEngine::decide(requirement)
//!               │  feature flag ───────────► 403 "feature disabled"
//!               │  role grant ─────────────► 403 no access
//!               │  level satisfaction ─────► 403 insufficient level
//!               │  ownership (OWN only) ───► 403 / 404 / 400
//!               ▼
//!            handler runs
//! ```
//!
//! Every rejection is an [`AuthError`], convertible into a serializable
//! [`Rejection`] carrying the HTTP status and client message. Every error
//! path fails closed: a failed settings, user, or resource lookup is a 500,
//! never a silent grant.
//!
//! # Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use quill_auth::{
//!     AuthenticationGate, DecisionEngine, OwnerResolver, OwnershipRegistry, SettingsStore,
//!     StoreError, UserStore,
//! };
//! use quill_policy::{AccessLevel, PolicyTable, Role};
//! use quill_session::{Account, MemoryRevocationRegistry, TokenCodec};
//! use std::sync::Arc;
//!
//! struct Settings;
//!
//! #[async_trait]
//! impl SettingsStore for Settings {
//!     async fn guest_access_enabled(&self) -> Result<bool, StoreError> {
//!         Ok(true) // normally a database read
//!     }
//! }
//!
//! struct Users;
//!
//! #[async_trait]
//! impl UserStore for Users {
//!     async fn find_account(&self, id: &str) -> Result<Option<Account>, StoreError> {
//!         Ok(None) // normally a database read
//!     }
//! }
//!
//! struct ArticleOwners;
//!
//! #[async_trait]
//! impl OwnerResolver for ArticleOwners {
//!     async fn owner_of(&self, resource_id: &str) -> Result<Option<String>, StoreError> {
//!         Ok(None) // normally fetches the article's `author` field
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Assembled once at process start.
//! let policy = Arc::new(
//!     PolicyTable::builder()
//!         .grant(Role::Admin, "articles", AccessLevel::Full)
//!         .grant(Role::User, "articles", AccessLevel::Own)
//!         .build(),
//! );
//! let ownership = OwnershipRegistry::new().register("articles", Arc::new(ArticleOwners));
//!
//! let gate = AuthenticationGate::new(
//!     TokenCodec::new(b"server-secret".to_vec()),
//!     Settings,
//!     Users,
//!     MemoryRevocationRegistry::new(),
//! );
//! let engine = DecisionEngine::new(policy, ownership);
//!
//! // Declared when the route is registered; misconfiguration fails here.
//! let edit_article = engine.requirement("articles", AccessLevel::Own)?;
//!
//! // Per request:
//! let principal = gate.authenticate(Some("Bearer abc.def.ghi")).await?;
//! engine.decide(&principal, &edit_article, Some("article-42")).await?;
//! # Ok(())
//! # }
//! ```

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod gate;
pub use gate::*;

mod ownership;
pub use ownership::*;

mod store;
pub use store::*;
