//! Statically registered ownership resolvers.
//!
//! Ownership checks need to know which data model owns a feature's
//! resources. Rather than dispatching on feature names at request time,
//! every ownable feature registers a resolver here at startup; the
//! decision engine only ever consults the finished registry. An ownable
//! feature missing from the registry is caught when routes declare their
//! requirements, not when a request arrives.

use crate::StoreError;
use async_trait::async_trait;
use quill_policy::Feature;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fetches the owner reference of a single resource.
///
/// Implementations fetch only the owner-reference field of the resource;
/// whether the underlying model stores it as `author` or `user` is the
/// implementation's concern. Ownership is single-owner, set at resource
/// creation, and immutable as far as this core is concerned.
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    /// The owner's principal identifier, or `None` when the resource does
    /// not exist.
    async fn owner_of(&self, resource_id: &str) -> Result<Option<String>, StoreError>;
}

/// The feature → resolver table, assembled once at process start.
#[derive(Clone, Default)]
pub struct OwnershipRegistry {
    resolvers: BTreeMap<Feature, Arc<dyn OwnerResolver>>,
}

impl OwnershipRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resolver for an ownable feature.
    #[must_use]
    pub fn register(
        mut self,
        feature: impl Into<Feature>,
        resolver: Arc<dyn OwnerResolver>,
    ) -> Self {
        self.resolvers.insert(feature.into(), resolver);
        self
    }

    /// The resolver registered for `feature`, if any.
    #[must_use]
    pub fn resolver(&self, feature: &Feature) -> Option<&Arc<dyn OwnerResolver>> {
        self.resolvers.get(feature)
    }

    /// Whether `feature` has a registered resolver.
    #[must_use]
    pub fn is_registered(&self, feature: &Feature) -> bool {
        self.resolvers.contains_key(feature)
    }
}

impl std::fmt::Debug for OwnershipRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipRegistry")
            .field("features", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}
