use crate::{AccessLevel, Feature, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The static {role × feature} → access level matrix, plus feature flags.
///
/// Built once at process start and immutable thereafter; lookups never
/// require locking. Every (role, feature) pair not explicitly listed
/// defaults to [`AccessLevel::None`], and every feature without an explicit
/// flag entry is enabled.
///
/// Tables can be assembled in code through [`PolicyTable::builder`] or
/// deserialized from a config document:
///
/// ```
/// use quill_policy::{AccessLevel, Feature, PolicyTable, Role};
///
/// let policy: PolicyTable = serde_json::from_str(
///     r#"{
///         "grants": {
///             "admin": { "articles": "full" },
///             "user":  { "articles": "own", "comments": "create_edit" }
///         },
///         "flags": { "analytics": false }
///     }"#,
/// ).unwrap();
///
/// assert_eq!(policy.level(Role::User, &Feature::from("comments")), AccessLevel::CreateEdit);
/// assert!(!policy.feature_enabled(&Feature::from("analytics")));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyTable {
    /// Explicit access grants per role.
    #[serde(default)]
    grants: BTreeMap<Role, BTreeMap<Feature, AccessLevel>>,

    /// Global on/off switches per feature, consulted independently of role.
    #[serde(default)]
    flags: BTreeMap<Feature, bool>,
}

impl PolicyTable {
    /// Start building a policy table.
    #[must_use]
    pub fn builder() -> PolicyTableBuilder {
        PolicyTableBuilder::default()
    }

    /// The access level `role` holds for `feature`.
    ///
    /// Absent pairs are [`AccessLevel::None`]: a role can never gain access
    /// by omission.
    #[must_use]
    pub fn level(&self, role: Role, feature: &Feature) -> AccessLevel {
        self.grants
            .get(&role)
            .and_then(|features| features.get(feature))
            .copied()
            .unwrap_or(AccessLevel::None)
    }

    /// Whether `feature` is globally enabled.
    ///
    /// Flags default to enabled when absent; only an explicit `false` entry
    /// switches a feature off.
    #[must_use]
    pub fn feature_enabled(&self, feature: &Feature) -> bool {
        self.flags.get(feature).copied().unwrap_or(true)
    }
}

/// Builder for [`PolicyTable`].
#[derive(Debug, Default)]
pub struct PolicyTableBuilder {
    grants: BTreeMap<Role, BTreeMap<Feature, AccessLevel>>,
    flags: BTreeMap<Feature, bool>,
}

impl PolicyTableBuilder {
    /// Grant `role` the given access level for `feature`.
    ///
    /// Granting [`AccessLevel::None`] explicitly is permitted and equivalent
    /// to leaving the pair unlisted.
    #[must_use]
    pub fn grant(mut self, role: Role, feature: impl Into<Feature>, level: AccessLevel) -> Self {
        self.grants
            .entry(role)
            .or_default()
            .insert(feature.into(), level);
        self
    }

    /// Set the global flag for `feature`.
    #[must_use]
    pub fn set_feature_enabled(mut self, feature: impl Into<Feature>, enabled: bool) -> Self {
        self.flags.insert(feature.into(), enabled);
        self
    }

    /// Finalize the table.
    #[must_use]
    pub fn build(self) -> PolicyTable {
        PolicyTable {
            grants: self.grants,
            flags: self.flags,
        }
    }
}
