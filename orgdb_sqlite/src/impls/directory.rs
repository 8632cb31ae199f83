use async_trait::async_trait;
use itertools::Itertools;
use orgcore::{
    error::BackendError,
    organization::{
        Organization,
        OrganizationTree,
    },
    permission::Permission,
    role::{
        Role,
        RolePermissions,
    },
    traits::DirectoryBackend,
    user::{
        User,
        UserHierarchy,
        UserOrganization,
        UserRoles,
    },
};
use sqlx::{
    sqlite::SqliteRow,
    FromRow,
    QueryBuilder,
    Sqlite,
};
use std::collections::HashMap;

use crate::SqliteBackend;

const USER_COLUMNS: &str = "SELECT id, name, email, organization_id, created_ts FROM 'user'";
const ORGANIZATION_COLUMNS: &str = "SELECT id, name, description, parent_id, created_ts FROM organization";
// SQLite caps host parameters per statement; id lists are bound in chunks.
const BIND_CHUNK: usize = 500;

async fn get_user_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<User>, BackendError> {
    let rec = sqlx::query_as::<_, User>(
        r#"
SELECT
    id,
    name,
    email,
    organization_id,
    created_ts
FROM
    'user'
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

pub(super) async fn get_organization_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Organization>, BackendError> {
    let rec = sqlx::query_as::<_, Organization>(
        r#"
SELECT
    id,
    name,
    description,
    parent_id,
    created_ts
FROM
    organization
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn get_parent_organization_sqlite(
    backend: &SqliteBackend,
    organization: &Organization,
) -> Result<Option<Organization>, BackendError> {
    match organization.parent_id {
        Some(parent_id) => get_organization_sqlite(backend, parent_id).await,
        None => Ok(None),
    }
}

async fn get_user_with_roles_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Option<UserRoles>, BackendError> {
    let Some(user) = get_user_sqlite(backend, user_id).await? else {
        return Ok(None);
    };
    let roles = sqlx::query_as::<_, Role>(
        r#"
SELECT
    role.id,
    role.name,
    role.description
FROM
    role
JOIN
    user_role ON user_role.role_id = role.id
WHERE
    user_role.user_id = ?1
ORDER BY role.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&*backend.pool)
    .await?;
    let mut permissions = sqlx::query_as::<_, (i64, i64, String, Option<String>)>(
        r#"
SELECT
    role_permission.role_id,
    permission.id,
    permission.name,
    permission.description
FROM
    permission
JOIN
    role_permission ON role_permission.permission_id = permission.id
JOIN
    user_role ON user_role.role_id = role_permission.role_id
WHERE
    user_role.user_id = ?1
ORDER BY permission.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&*backend.pool)
    .await?
    .into_iter()
    .map(|(role_id, id, name, description)| (
        role_id,
        Permission { id, name, description },
    ))
    .into_group_map();
    let roles = roles.into_iter()
        .map(|role| RolePermissions {
            permissions: permissions.remove(&role.id).unwrap_or_default(),
            role,
        })
        .collect();
    Ok(Some(UserRoles { user, roles }))
}

async fn get_user_with_organization_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Option<UserOrganization>, BackendError> {
    let Some(user) = get_user_sqlite(backend, user_id).await? else {
        return Ok(None);
    };
    let organization = match user.organization_id {
        Some(id) => get_organization_sqlite(backend, id).await?,
        None => None,
    };
    Ok(Some(UserOrganization { user, organization }))
}

async fn find_by_ids_sqlite<T>(
    backend: &SqliteBackend,
    select: &str,
    column: &str,
    ids: &[i64],
) -> Result<Vec<T>, BackendError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut recs = Vec::new();
    for chunk in ids.chunks(BIND_CHUNK) {
        let mut query = QueryBuilder::<Sqlite>::new(select);
        query.push(" WHERE ");
        query.push(column);
        query.push(" IN (");
        let mut separated = query.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
        recs.extend(query.build_query_as::<T>()
            .fetch_all(&*backend.pool)
            .await?);
    }
    Ok(recs)
}

async fn find_users_by_organization_ids_sqlite(
    backend: &SqliteBackend,
    organization_ids: &[i64],
) -> Result<Vec<User>, BackendError> {
    let mut recs = find_by_ids_sqlite::<User>(
        backend,
        USER_COLUMNS,
        "organization_id",
        organization_ids,
    ).await?;
    recs.sort_by_key(|user| user.id);
    Ok(recs)
}

async fn find_users_by_ids_sqlite(
    backend: &SqliteBackend,
    user_ids: &[i64],
) -> Result<Vec<User>, BackendError> {
    let mut recs = find_by_ids_sqlite::<User>(backend, USER_COLUMNS, "id", user_ids).await?;
    recs.sort_by_key(|user| user.id);
    recs.dedup_by_key(|user| user.id);
    Ok(recs)
}

async fn find_organizations_by_ids_sqlite(
    backend: &SqliteBackend,
    organization_ids: &[i64],
) -> Result<Vec<Organization>, BackendError> {
    find_by_ids_sqlite::<Organization>(backend, ORGANIZATION_COLUMNS, "id", organization_ids).await
}

async fn find_organizations_by_parent_id_sqlite(
    backend: &SqliteBackend,
    parent_id: i64,
) -> Result<Vec<Organization>, BackendError> {
    let recs = sqlx::query_as::<_, Organization>(
        r#"
SELECT
    id,
    name,
    description,
    parent_id,
    created_ts
FROM
    organization
WHERE
    parent_id = ?1
ORDER BY id
        "#,
    )
    .bind(parent_id)
    .fetch_all(&*backend.pool)
    .await?;
    Ok(recs)
}

async fn find_organization_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
    with_parent: bool,
) -> Result<Option<(Organization, Option<Organization>)>, BackendError> {
    let Some(organization) = get_organization_sqlite(backend, id).await? else {
        return Ok(None);
    };
    let parent = if with_parent {
        get_parent_organization_sqlite(backend, &organization).await?
    } else {
        None
    };
    Ok(Some((organization, parent)))
}

async fn find_all_user_ids_sqlite(
    backend: &SqliteBackend,
) -> Result<Vec<i64>, BackendError> {
    let recs = sqlx::query_scalar::<_, i64>(
        r#"
SELECT
    id
FROM
    'user'
ORDER BY id
        "#,
    )
    .fetch_all(&*backend.pool)
    .await?;
    Ok(recs)
}

async fn get_user_with_org_and_parent_and_children_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Option<UserHierarchy>, BackendError> {
    let Some(UserOrganization { user, organization }) =
        get_user_with_organization_sqlite(backend, user_id).await?
    else {
        return Ok(None);
    };
    let organization = match organization {
        Some(organization) => {
            let parent = get_parent_organization_sqlite(backend, &organization).await?;
            let children = find_organizations_by_parent_id_sqlite(backend, organization.id).await?;
            Some(OrganizationTree { organization, parent, children })
        }
        None => None,
    };
    Ok(Some(UserHierarchy { user, organization }))
}

async fn find_users_with_organization_by_ids_sqlite(
    backend: &SqliteBackend,
    user_ids: &[i64],
) -> Result<Vec<UserOrganization>, BackendError> {
    let users = find_users_by_ids_sqlite(backend, user_ids).await?;
    let organization_ids = users.iter()
        .filter_map(|user| user.organization_id)
        .unique()
        .collect::<Vec<_>>();
    let organizations = find_organizations_by_ids_sqlite(backend, &organization_ids)
        .await?
        .into_iter()
        .map(|organization| (organization.id, organization))
        .collect::<HashMap<_, _>>();
    Ok(users.into_iter()
        .map(|user| UserOrganization {
            organization: user.organization_id
                .and_then(|id| organizations.get(&id).cloned()),
            user,
        })
        .collect())
}

#[async_trait]
impl DirectoryBackend for SqliteBackend {
    async fn get_user_with_roles(
        &self,
        user_id: i64,
    ) -> Result<Option<UserRoles>, BackendError> {
        get_user_with_roles_sqlite(self, user_id).await
    }

    async fn get_user_with_organization(
        &self,
        user_id: i64,
    ) -> Result<Option<UserOrganization>, BackendError> {
        get_user_with_organization_sqlite(self, user_id).await
    }

    async fn find_users_by_organization_ids(
        &self,
        organization_ids: &[i64],
    ) -> Result<Vec<User>, BackendError> {
        find_users_by_organization_ids_sqlite(self, organization_ids).await
    }

    async fn find_organizations_by_parent_id(
        &self,
        parent_id: i64,
    ) -> Result<Vec<Organization>, BackendError> {
        find_organizations_by_parent_id_sqlite(self, parent_id).await
    }

    async fn find_organization_by_id(
        &self,
        id: i64,
        with_parent: bool,
    ) -> Result<Option<(Organization, Option<Organization>)>, BackendError> {
        find_organization_by_id_sqlite(self, id, with_parent).await
    }

    async fn find_all_user_ids(
        &self,
    ) -> Result<Vec<i64>, BackendError> {
        find_all_user_ids_sqlite(self).await
    }

    async fn get_user_with_org_and_parent_and_children(
        &self,
        user_id: i64,
    ) -> Result<Option<UserHierarchy>, BackendError> {
        get_user_with_org_and_parent_and_children_sqlite(self, user_id).await
    }

    async fn find_users_with_organization_by_ids(
        &self,
        user_ids: &[i64],
    ) -> Result<Vec<UserOrganization>, BackendError> {
        find_users_with_organization_by_ids_sqlite(self, user_ids).await
    }
}
