//! The authorization decision engine.
//!
//! Given the principal the gate attached to the request and the (feature,
//! required level) pair the route declared, the engine produces a definitive
//! allow or deny. The checks run in strict order (feature flag, then role
//! grant, then level satisfaction, then ownership) and the first failing
//! check wins.
//! The pipeline is pure and idempotent: each request is evaluated
//! independently over current data, with no carried state.

use crate::{AuthError, OwnershipRegistry};
use quill_policy::{AccessLevel, Feature, PolicyTable};
use quill_session::Principal;
use std::sync::Arc;

/// A route's declared (feature, required level) pair.
///
/// Requirements are only constructed through
/// [`DecisionEngine::requirement`], which validates them when routes are
/// registered: an unsatisfiable level or an ownable feature without a
/// registered resolver is a startup error, never a request-time surprise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    feature: Feature,
    level: AccessLevel,
}

impl Requirement {
    /// The feature this requirement guards.
    #[must_use]
    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// The access level this requirement demands.
    #[must_use]
    pub fn level(&self) -> AccessLevel {
        self.level
    }
}

/// A requirement that can never be satisfied or checked, rejected when the
/// route declaring it is registered.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Requiring [`AccessLevel::None`] is meaningless; the reference
    /// behavior of letting unrecognized requirements through is inverted
    /// here to deny-by-default at registration.
    #[error("Requirement level '{0}' can never be satisfied")]
    UnsatisfiableLevel(AccessLevel),

    /// An ownership-scoped requirement names a feature with no registered
    /// owner resolver.
    #[error("Feature '{0}' requires ownership checks but has no registered resolver")]
    MissingResolver(Feature),
}

/// Evaluates requirements against the policy table and, for ownership
/// checks, the resource's owner reference.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    policy: Arc<PolicyTable>,
    ownership: OwnershipRegistry,
}

impl DecisionEngine {
    /// Build an engine over the immutable policy table and the ownership
    /// registry assembled at startup.
    pub fn new(policy: Arc<PolicyTable>, ownership: OwnershipRegistry) -> Self {
        Self { policy, ownership }
    }

    /// Declare a route requirement, validating it at registration time.
    ///
    /// # Errors
    ///
    /// Rejects [`AccessLevel::None`] outright, and [`AccessLevel::Own`]
    /// requirements for features without a registered [`crate::OwnerResolver`].
    pub fn requirement(
        &self,
        feature: impl Into<Feature>,
        level: AccessLevel,
    ) -> Result<Requirement, RegistrationError> {
        let feature = feature.into();

        if level == AccessLevel::None {
            return Err(RegistrationError::UnsatisfiableLevel(level));
        }

        if level == AccessLevel::Own && !self.ownership.is_registered(&feature) {
            return Err(RegistrationError::MissingResolver(feature));
        }

        Ok(Requirement { feature, level })
    }

    /// Decide whether `principal` may exercise `requirement`.
    ///
    /// `resource_id` is the request's path parameter naming the resource,
    /// consulted only for exact-`Own` checks.
    ///
    /// Checks, in order (first failure wins):
    /// 1. feature flag: an explicitly disabled feature denies everyone,
    ///    including Admin/Full;
    /// 2. role grant: an absent or `None` grant denies;
    /// 3. non-ownership requirements use the level satisfaction relation;
    /// 4. ownership requirements deny guests unconditionally, allow broad
    ///    grants (`Full`/`CreateEdit`) immediately, and resolve the
    ///    resource's owner reference for exact-`Own` grants.
    pub async fn decide(
        &self,
        principal: &Principal,
        requirement: &Requirement,
        resource_id: Option<&str>,
    ) -> Result<(), AuthError> {
        let feature = &requirement.feature;

        if !self.policy.feature_enabled(feature) {
            return Err(AuthError::FeatureDisabled(feature.clone()));
        }

        let role = principal.role();
        let held = self.policy.level(role, feature);
        if held == AccessLevel::None {
            return Err(AuthError::NoAccess {
                role,
                feature: feature.clone(),
            });
        }

        match requirement.level {
            AccessLevel::Read | AccessLevel::CreateEdit | AccessLevel::Full => {
                if held.satisfies(requirement.level) {
                    Ok(())
                } else {
                    Err(AuthError::InsufficientLevel {
                        held,
                        required: requirement.level,
                    })
                }
            }
            AccessLevel::Own => self.check_ownership(principal, feature, held, resource_id).await,
            // Construction through `requirement` rejects None; deny if one
            // is ever assembled out-of-band.
            AccessLevel::None => Err(AuthError::InsufficientLevel {
                held,
                required: AccessLevel::None,
            }),
        }
    }

    async fn check_ownership(
        &self,
        principal: &Principal,
        feature: &Feature,
        held: AccessLevel,
        resource_id: Option<&str>,
    ) -> Result<(), AuthError> {
        // Guests can never own persisted resources, whatever the table says.
        if principal.is_guest() {
            return Err(AuthError::GuestCannotOwn);
        }

        match held {
            // Broader grants subsume ownership; no resource fetch needed.
            AccessLevel::Full | AccessLevel::CreateEdit => Ok(()),

            AccessLevel::Own => {
                let resource_id = resource_id.ok_or(AuthError::ResourceIdMissing)?;

                let Some(resolver) = self.ownership.resolver(feature) else {
                    tracing::error!(
                        feature = %feature,
                        "ownership check against a feature with no registered resolver",
                    );
                    return Err(AuthError::FeatureNotRegistered(feature.clone()));
                };

                match resolver.owner_of(resource_id).await? {
                    None => Err(AuthError::ResourceNotFound),
                    Some(owner) if owner == principal.id() => Ok(()),
                    Some(_) => Err(AuthError::NotOwner),
                }
            }

            AccessLevel::Read | AccessLevel::None => Err(AuthError::InsufficientLevel {
                held,
                required: AccessLevel::Own,
            }),
        }
    }
}
