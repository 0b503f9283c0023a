//! Role and feature access policy table.
//!
//! This crate provides the static permission matrix consulted by the
//! authorization decision engine: a mapping from ([`Role`], [`Feature`])
//! pairs to an [`AccessLevel`], plus a set of global feature flags that can
//! switch a feature off independently of any role.
//!
//! # Model
//!
//! ```text
//! PolicyTable
//!   ├── grants: Role → Feature → AccessLevel   (absent pairs ⇒ None)
//!   └── flags:  Feature → bool                 (absent flags ⇒ enabled)
//! ```
//!
//! A [`PolicyTable`] is configuration: it is built once at process start
//! (from a [`PolicyTableBuilder`] or deserialized from a config document)
//! and never mutated afterwards. Changing it requires a redeploy.
//!
//! # Example
//!
//! ```
//! use quill_policy::{AccessLevel, Feature, PolicyTable, Role};
//!
//! let policy = PolicyTable::builder()
//!     .grant(Role::Admin, "articles", AccessLevel::Full)
//!     .grant(Role::User, "articles", AccessLevel::Own)
//!     .grant(Role::Guest, "articles", AccessLevel::Read)
//!     .set_feature_enabled("analytics", false)
//!     .build();
//!
//! let articles = Feature::from("articles");
//! assert_eq!(policy.level(Role::User, &articles), AccessLevel::Own);
//! // Unlisted pairs default to no access at all.
//! assert_eq!(policy.level(Role::Guest, &Feature::from("tasks")), AccessLevel::None);
//! // Flags default to enabled when absent.
//! assert!(policy.feature_enabled(&articles));
//! assert!(!policy.feature_enabled(&Feature::from("analytics")));
//! ```

mod feature;
pub use feature::*;

mod level;
pub use level::*;

mod role;
pub use role::*;

mod table;
pub use table::*;
