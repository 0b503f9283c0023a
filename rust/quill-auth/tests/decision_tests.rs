//! Integration tests for the authorization decision engine.
//!
//! Each scenario builds a policy table and ownership registry the way a
//! process would at startup, then evaluates principals against declared
//! requirements and asserts the decision and its HTTP contract.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use quill_auth::{
    AuthError, DecisionEngine, OwnerResolver, OwnershipRegistry, RegistrationError, StoreError,
};
use quill_policy::{AccessLevel, PolicyTable, Role};
use quill_session::{Account, Principal, Profile};
use std::collections::HashMap;
use std::sync::Arc;

/// Owner resolver over a fixed resource → owner map.
struct MapOwners(HashMap<String, String>);

impl MapOwners {
    fn with(entries: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self(
            entries
                .iter()
                .map(|(resource, owner)| (resource.to_string(), owner.to_string()))
                .collect(),
        ))
    }
}

#[async_trait]
impl OwnerResolver for MapOwners {
    async fn owner_of(&self, resource_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(resource_id).cloned())
    }
}

/// Owner resolver whose fetch always fails.
struct BrokenOwners;

#[async_trait]
impl OwnerResolver for BrokenOwners {
    async fn owner_of(&self, _resource_id: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("resource read failed".to_string()))
    }
}

/// Owner resolver that must never be consulted.
struct UntouchableOwners;

#[async_trait]
impl OwnerResolver for UntouchableOwners {
    async fn owner_of(&self, resource_id: &str) -> Result<Option<String>, StoreError> {
        panic!("resolver consulted for {resource_id} when the grant already subsumed ownership");
    }
}

fn user(id: &str, role: Role) -> Principal {
    Principal::Authenticated(Account {
        id: id.to_string(),
        role,
        profile: Profile::default(),
    })
}

fn policy() -> Arc<PolicyTable> {
    Arc::new(
        PolicyTable::builder()
            .grant(Role::Admin, "tasks", AccessLevel::Full)
            .grant(Role::Admin, "analytics", AccessLevel::Full)
            .grant(Role::User, "tasks", AccessLevel::Own)
            .grant(Role::User, "articles", AccessLevel::Read)
            .grant(Role::Guest, "tasks", AccessLevel::Own)
            .grant(Role::User, "comments", AccessLevel::CreateEdit)
            .build(),
    )
}

fn engine_with_tasks(owners: Arc<dyn OwnerResolver>) -> DecisionEngine {
    DecisionEngine::new(
        policy(),
        OwnershipRegistry::new().register("tasks", owners),
    )
}

#[test_log::test(tokio::test)]
async fn an_absent_role_feature_pair_denies() -> anyhow::Result<()> {
    let engine = engine_with_tasks(MapOwners::with(&[]));
    let requirement = engine.requirement("articles", AccessLevel::Read)?;

    // Guests have no grant for "articles" at all.
    let error = engine
        .decide(&Principal::synthesize_guest(), &requirement, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::NoAccess { .. }));
    assert_eq!(error.status_code(), 403);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn full_satisfies_every_requirement_without_a_resource_fetch() -> anyhow::Result<()> {
    let engine = engine_with_tasks(Arc::new(UntouchableOwners));
    let admin = user("a1", Role::Admin);

    for level in [
        AccessLevel::Read,
        AccessLevel::Own,
        AccessLevel::CreateEdit,
        AccessLevel::Full,
    ] {
        let requirement = engine.requirement("tasks", level)?;
        engine.decide(&admin, &requirement, Some("t1")).await?;
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn owners_may_touch_their_own_resources_only() -> anyhow::Result<()> {
    let engine = engine_with_tasks(MapOwners::with(&[("t1", "u1"), ("t2", "u2")]));
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;
    let u1 = user("u1", Role::User);

    // {_id: "t1", author: "u1"} and the principal is u1.
    engine.decide(&u1, &requirement, Some("t1")).await?;

    // {_id: "t2", author: "u2"} is someone else's task.
    let error = engine.decide(&u1, &requirement, Some("t2")).await.unwrap_err();
    assert!(matches!(error, AuthError::NotOwner));
    assert_eq!(error.status_code(), 403);
    assert_eq!(error.to_string(), "Does not own resource.");
    Ok(())
}

#[test_log::test(tokio::test)]
async fn a_missing_resource_is_a_not_found_deny_not_a_crash() -> anyhow::Result<()> {
    let engine = engine_with_tasks(MapOwners::with(&[]));
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;

    let error = engine
        .decide(&user("u1", Role::User), &requirement, Some("t-missing"))
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::ResourceNotFound));
    assert_eq!(error.status_code(), 404);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn guests_are_denied_every_ownership_requirement() -> anyhow::Result<()> {
    // Even with an explicit Own grant for guests and a resource whose owner
    // field happens to match, the guest tier is rejected before any fetch.
    let guest = Principal::synthesize_guest();
    let owners = MapOwners::with(&[("t1", guest.id())]);
    let engine = engine_with_tasks(owners);
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;

    let error = engine.decide(&guest, &requirement, Some("t1")).await.unwrap_err();
    assert!(matches!(error, AuthError::GuestCannotOwn));
    assert_eq!(error.status_code(), 403);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn a_disabled_feature_beats_even_a_full_grant() -> anyhow::Result<()> {
    let policy = Arc::new(
        PolicyTable::builder()
            .grant(Role::Admin, "analytics", AccessLevel::Full)
            .set_feature_enabled("analytics", false)
            .build(),
    );
    let engine = DecisionEngine::new(policy, OwnershipRegistry::new());
    let requirement = engine.requirement("analytics", AccessLevel::Read)?;

    let error = engine
        .decide(&user("a1", Role::Admin), &requirement, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::FeatureDisabled(_)));
    assert_eq!(error.status_code(), 403);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn an_insufficient_level_names_both_sides() -> anyhow::Result<()> {
    let engine = engine_with_tasks(MapOwners::with(&[]));
    let requirement = engine.requirement("articles", AccessLevel::CreateEdit)?;

    // Users hold Read on articles.
    let error = engine
        .decide(&user("u1", Role::User), &requirement, None)
        .await
        .unwrap_err();
    let AuthError::InsufficientLevel { held, required } = error else {
        panic!("expected InsufficientLevel, got {error:?}");
    };
    assert_eq!(held, AccessLevel::Read);
    assert_eq!(required, AccessLevel::CreateEdit);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn a_read_grant_never_satisfies_ownership() -> anyhow::Result<()> {
    let policy = Arc::new(
        PolicyTable::builder()
            .grant(Role::User, "tasks", AccessLevel::Read)
            .build(),
    );
    let engine = DecisionEngine::new(
        policy,
        OwnershipRegistry::new().register("tasks", MapOwners::with(&[("t1", "u1")])),
    );
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;

    let error = engine
        .decide(&user("u1", Role::User), &requirement, Some("t1"))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        AuthError::InsufficientLevel {
            held: AccessLevel::Read,
            required: AccessLevel::Own,
        }
    ));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn a_create_edit_grant_subsumes_ownership_without_a_fetch() -> anyhow::Result<()> {
    let policy = Arc::new(
        PolicyTable::builder()
            .grant(Role::User, "comments", AccessLevel::CreateEdit)
            .build(),
    );
    let engine = DecisionEngine::new(
        policy,
        OwnershipRegistry::new().register("comments", Arc::new(UntouchableOwners)),
    );
    let requirement = engine.requirement("comments", AccessLevel::Own)?;

    engine
        .decide(&user("u1", Role::User), &requirement, Some("c1"))
        .await?;
    Ok(())
}

#[test_log::test(tokio::test)]
async fn an_ownership_check_without_a_resource_id_is_a_client_error() -> anyhow::Result<()> {
    let engine = engine_with_tasks(MapOwners::with(&[("t1", "u1")]));
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;

    let error = engine
        .decide(&user("u1", Role::User), &requirement, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::ResourceIdMissing));
    assert_eq!(error.status_code(), 400);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn a_resource_fetch_failure_is_a_server_error_not_a_decision() -> anyhow::Result<()> {
    let engine = engine_with_tasks(Arc::new(BrokenOwners));
    let requirement = engine.requirement("tasks", AccessLevel::Own)?;

    let error = engine
        .decide(&user("u1", Role::User), &requirement, Some("t1"))
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::Store(_)));
    assert_eq!(error.status_code(), 500);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn misconfigured_requirements_are_rejected_at_registration() {
    let engine = engine_with_tasks(MapOwners::with(&[]));

    // Requiring no access at all can never be satisfied.
    let error = engine
        .requirement("tasks", AccessLevel::None)
        .unwrap_err();
    assert!(matches!(error, RegistrationError::UnsatisfiableLevel(_)));

    // An Own requirement for a feature nobody registered a resolver for.
    let error = engine
        .requirement("wiki-pages", AccessLevel::Own)
        .unwrap_err();
    assert!(matches!(error, RegistrationError::MissingResolver(_)));

    // The same feature is fine for requirements that never touch ownership.
    assert!(engine.requirement("wiki-pages", AccessLevel::Read).is_ok());
}
