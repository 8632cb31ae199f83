use orgac::platform::Builder;
use orgcore::{
    decision::{
        Decision,
        Denial,
        Requirement,
    },
    error::BackendError,
    organization::{
        Hierarchy,
        Organization,
    },
    role::{
        OWNER,
        VIEWER,
    },
    scope::Scope,
    user::{
        User,
        UserOrganization,
    },
};
use orgac::error::Error;

use test_org::ac::MockDirectory;

fn user(id: i64, organization_id: Option<i64>) -> User {
    User {
        id,
        name: format!("user{id}"),
        email: format!("user{id}@example.com"),
        organization_id,
        created_ts: 1234567890,
    }
}

fn organization(id: i64, parent_id: Option<i64>) -> Organization {
    Organization {
        id,
        name: format!("org{id}"),
        description: None,
        parent_id,
        created_ts: 1234567890,
    }
}

fn user_organization(id: i64, organization_id: i64) -> UserOrganization {
    UserOrganization {
        user: user(id, Some(organization_id)),
        organization: Some(organization(organization_id, None)),
    }
}

fn failing_roles(directory: &mut MockDirectory) {
    directory.expect_get_user_with_roles()
        .returning(|_| Err(BackendError::Unknown));
}

#[async_std::test]
async fn roles_fail_closed() -> anyhow::Result<()> {
    let mut directory = MockDirectory::new();
    failing_roles(&mut directory);
    let platform = Builder::new()
        .directory(directory)
        .build()?;

    assert!(platform.get_user_permissions(1).await.is_empty());
    assert!(!platform.has_permission(1, "read_task").await);
    assert!(!platform.has_any_role(1, &[OWNER, VIEWER]).await);
    assert_eq!(
        platform.authorize(1, &Requirement::new().roles([VIEWER])).await,
        Decision::Deny(Denial::MissingRole(vec![VIEWER.to_string()])),
    );
    assert_eq!(
        platform.authorize(1, &Requirement::new().permissions(["read_task"])).await,
        Decision::Deny(Denial::MissingPermission(vec!["read_task".to_string()])),
    );
    // the directory is never consulted for unrestricted actions
    assert_eq!(platform.authorize(1, &Requirement::new()).await, Decision::Allow);
    Ok(())
}

#[async_std::test]
async fn user_load_fails_closed() -> anyhow::Result<()> {
    let mut directory = MockDirectory::new();
    failing_roles(&mut directory);
    directory.expect_get_user_with_organization()
        .returning(|_| Err(BackendError::Unknown));
    directory.expect_get_user_with_org_and_parent_and_children()
        .returning(|_| Err(BackendError::Unknown));
    let platform = Builder::new()
        .directory(directory)
        .build()?;

    for scope in [Scope::Own, Scope::Sub, Scope::All, Scope::Unknown] {
        assert!(platform.get_accessible_user_ids(1, scope).await.is_empty());
        assert!(!platform.can_access_organization(1, 1, scope).await);
    }
    assert_eq!(platform.get_organization_hierarchy(1).await, Hierarchy::default());
    assert!(!platform.can_manage_user(1, 1).await);
    assert!(platform.get_assignable_users(1).await?.is_empty());
    Ok(())
}

#[async_std::test]
async fn resolution_fails_closed() -> anyhow::Result<()> {
    let mut directory = MockDirectory::new();
    directory.expect_get_user_with_organization()
        .returning(|id| Ok(Some(user_organization(id, 1))));
    directory.expect_find_users_by_organization_ids()
        .returning(|_| Err(BackendError::Unknown));
    directory.expect_find_organizations_by_parent_id()
        .returning(|_| Ok(vec![organization(2, Some(1))]));
    directory.expect_find_organization_by_id()
        .returning(|_, _| Err(BackendError::Unknown));
    let platform = Builder::new()
        .directory(directory)
        .build()?;

    assert!(platform.get_accessible_user_ids(1, Scope::Own).await.is_empty());
    assert!(platform.get_accessible_user_ids(1, Scope::Sub).await.is_empty());
    assert!(platform.can_access_organization(1, 1, Scope::Own).await);
    assert!(!platform.can_access_organization(1, 2, Scope::Sub).await);
    assert!(matches!(
        platform.check_organization_depth(2).await,
        Err(Error::Backend(BackendError::Unknown)),
    ));
    Ok(())
}

#[async_std::test]
async fn assignable_record_failure_propagates() -> anyhow::Result<()> {
    let mut directory = MockDirectory::new();
    directory.expect_get_user_with_roles()
        .returning(|_| Ok(None));
    directory.expect_get_user_with_organization()
        .returning(|id| Ok(Some(user_organization(id, 1))));
    directory.expect_find_users_by_organization_ids()
        .returning(|_| Ok(vec![user(1, Some(1)), user(2, Some(1))]));
    directory.expect_find_users_with_organization_by_ids()
        .times(1)
        .returning(|_| Err(BackendError::Unknown));
    let platform = Builder::new()
        .directory(directory)
        .build()?;

    assert_eq!(
        platform.get_accessible_user_ids(1, Scope::Own).await,
        [1, 2].into(),
    );
    assert!(matches!(
        platform.get_assignable_users(1).await,
        Err(Error::Backend(BackendError::Unknown)),
    ));
    Ok(())
}

#[async_std::test]
async fn sub_does_not_descend() -> anyhow::Result<()> {
    // an organization with both a parent and a child, which the sqlite
    // backend would have refused to create
    let mut directory = MockDirectory::new();
    directory.expect_get_user_with_organization()
        .returning(|id| Ok(Some(UserOrganization {
            user: user(id, Some(2)),
            organization: Some(organization(2, Some(1))),
        })));
    directory.expect_find_organizations_by_parent_id()
        .returning(|id| Ok(match id {
            2 => vec![organization(3, Some(2))],
            3 => vec![organization(4, Some(3))],
            _ => vec![],
        }));
    directory.expect_find_users_by_organization_ids()
        .returning(|ids| Ok(ids.iter()
            .map(|id| user(id * 10, Some(*id)))
            .collect()));
    directory.expect_find_organization_by_id()
        .returning(|id, _| Ok(Some((
            organization(id, Some(1)),
            Some(organization(1, None)),
        ))));
    let platform = Builder::new()
        .directory(directory)
        .build()?;

    assert_eq!(
        platform.get_accessible_user_ids(20, Scope::Sub).await,
        [20, 30].into(),
    );
    assert!(matches!(
        platform.check_organization_depth(2).await,
        Err(Error::Value(_)),
    ));
    Ok(())
}
