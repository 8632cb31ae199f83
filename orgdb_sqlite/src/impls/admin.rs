use async_trait::async_trait;
use orgcore::{
    error::BackendError,
    permission::Permission,
    role::Role,
    traits::DirectoryAdminBackend,
    user::User,
};

use crate::{
    SqliteBackend,
    chrono::Utc,
};
use super::directory::get_organization_sqlite;

async fn add_organization_sqlite(
    backend: &SqliteBackend,
    name: &str,
    description: Option<&str>,
    parent_id: Option<i64>,
) -> Result<i64, BackendError> {
    if let Some(parent_id) = parent_id {
        match get_organization_sqlite(backend, parent_id).await? {
            None => return Err(BackendError::AppInvariantViolation(format!(
                "parent organization {parent_id} does not exist"
            ))),
            Some(parent) if parent.parent_id.is_some() => return Err(
                BackendError::AppInvariantViolation(format!(
                    "organization {parent_id} is a sub-organization and may not have children"
                ))
            ),
            Some(_) => (),
        }
    }
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO organization (
    name,
    description,
    parent_id,
    created_ts
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(parent_id)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn add_user_sqlite(
    backend: &SqliteBackend,
    name: &str,
    email: &str,
    organization_id: Option<i64>,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let id = sqlx::query(
        r#"
INSERT INTO 'user' (
    name,
    email,
    organization_id,
    created_ts
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(organization_id)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn set_user_organization_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    organization_id: Option<i64>,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
UPDATE 'user'
SET organization_id = ?2
WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .bind(organization_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn get_user_by_email_sqlite(
    backend: &SqliteBackend,
    email: &str,
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
    email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn add_role_sqlite(
    backend: &SqliteBackend,
    name: &str,
    description: Option<&str>,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO role (
    name,
    description
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(name)
    .bind(description)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_role_by_name_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<Option<Role>, BackendError> {
    let rec = sqlx::query_as::<_, Role>(
        r#"
SELECT
    id,
    name,
    description
FROM
    role
WHERE
    name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn add_permission_sqlite(
    backend: &SqliteBackend,
    name: &str,
    description: Option<&str>,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO permission (
    name,
    description
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(name)
    .bind(description)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_permission_by_name_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<Option<Permission>, BackendError> {
    let rec = sqlx::query_as::<_, Permission>(
        r#"
SELECT
    id,
    name,
    description
FROM
    permission
WHERE
    name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn grant_permission_to_role_sqlite(
    backend: &SqliteBackend,
    role_id: i64,
    permission_id: i64,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
INSERT OR IGNORE INTO role_permission (
    role_id,
    permission_id
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(role_id)
    .bind(permission_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn revoke_permission_from_role_sqlite(
    backend: &SqliteBackend,
    role_id: i64,
    permission_id: i64,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
DELETE FROM
    role_permission
WHERE
    role_id = ?1 AND
    permission_id = ?2
        "#,
    )
    .bind(role_id)
    .bind(permission_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn grant_role_to_user_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    role_id: i64,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
INSERT OR IGNORE INTO user_role (
    user_id,
    role_id
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn revoke_role_from_user_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    role_id: i64,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
DELETE FROM
    user_role
WHERE
    user_id = ?1 AND
    role_id = ?2
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

#[async_trait]
impl DirectoryAdminBackend for SqliteBackend {
    async fn add_organization(
        &self,
        name: &str,
        description: Option<&str>,
        parent_id: Option<i64>,
    ) -> Result<i64, BackendError> {
        add_organization_sqlite(self, name, description, parent_id).await
    }

    async fn add_user(
        &self,
        name: &str,
        email: &str,
        organization_id: Option<i64>,
    ) -> Result<i64, BackendError> {
        add_user_sqlite(self, name, email, organization_id).await
    }

    async fn set_user_organization(
        &self,
        user_id: i64,
        organization_id: Option<i64>,
    ) -> Result<bool, BackendError> {
        set_user_organization_sqlite(self, user_id, organization_id).await
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_email_sqlite(self, email).await
    }

    async fn add_role(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError> {
        add_role_sqlite(self, name, description).await
    }

    async fn get_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Role>, BackendError> {
        get_role_by_name_sqlite(self, name).await
    }

    async fn add_permission(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError> {
        add_permission_sqlite(self, name, description).await
    }

    async fn get_permission_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Permission>, BackendError> {
        get_permission_by_name_sqlite(self, name).await
    }

    async fn grant_permission_to_role(
        &self,
        role_id: i64,
        permission_id: i64,
    ) -> Result<bool, BackendError> {
        grant_permission_to_role_sqlite(self, role_id, permission_id).await
    }

    async fn revoke_permission_from_role(
        &self,
        role_id: i64,
        permission_id: i64,
    ) -> Result<bool, BackendError> {
        revoke_permission_from_role_sqlite(self, role_id, permission_id).await
    }

    async fn grant_role_to_user(
        &self,
        user_id: i64,
        role_id: i64,
    ) -> Result<bool, BackendError> {
        grant_role_to_user_sqlite(self, user_id, role_id).await
    }

    async fn revoke_role_from_user(
        &self,
        user_id: i64,
        role_id: i64,
    ) -> Result<bool, BackendError> {
        revoke_role_from_user_sqlite(self, user_id, role_id).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use orgcore::{
        error::BackendError,
        permission::Permission,
        role::Role,
        traits::{
            DirectoryAdminBackend,
            DirectoryBackend,
        },
        user::User,
    };
    use crate::SqliteBackend;
    use test_org::chrono::set_timestamp;

    pub(crate) async fn backend() -> anyhow::Result<SqliteBackend> {
        Ok(SqliteBackend::connect("sqlite::memory:".into())
            .await?
            .migrate()
            .await?)
    }

    #[async_std::test]
    async fn test_user() -> anyhow::Result<()> {
        let backend = backend().await?;
        let org_id = backend.add_organization("Acme", None, None).await?;
        set_timestamp(1234567899);
        let user_id = backend.add_user("Alice", "alice@example.com", Some(org_id)).await?;
        assert_eq!(
            backend.get_user_by_email("alice@example.com").await?,
            Some(User {
                id: user_id,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                organization_id: Some(org_id),
                created_ts: 1234567899,
            }),
        );
        assert_eq!(backend.get_user_by_email("bob@example.com").await?, None);

        // email is unique
        assert!(backend.add_user("Alice", "alice@example.com", None).await.is_err());

        assert!(backend.set_user_organization(user_id, None).await?);
        assert!(!backend.set_user_organization(user_id + 1, None).await?);
        let user = backend.get_user_by_email("alice@example.com").await?
            .expect("user is missing?");
        assert_eq!(user.organization_id, None);
        Ok(())
    }

    #[async_std::test]
    async fn test_organization_depth() -> anyhow::Result<()> {
        let backend = backend().await?;
        let root_id = backend.add_organization("Acme", Some("root"), None).await?;
        let sub_id = backend.add_organization("Engineering", None, Some(root_id)).await?;
        assert!(matches!(
            backend.add_organization("Platform", None, Some(sub_id)).await,
            Err(BackendError::AppInvariantViolation(_)),
        ));
        assert!(matches!(
            backend.add_organization("Nowhere", None, Some(sub_id + 10)).await,
            Err(BackendError::AppInvariantViolation(_)),
        ));
        assert_eq!(backend.find_organizations_by_parent_id(root_id).await?.len(), 1);
        Ok(())
    }

    #[async_std::test]
    async fn test_grants() -> anyhow::Result<()> {
        let backend = backend().await?;
        let role_id = backend.add_role("editor", Some("Edits things")).await?;
        let permission_id = backend.add_permission("edit", None).await?;
        assert_eq!(
            backend.get_role_by_name("editor").await?,
            Some(Role {
                id: role_id,
                name: "editor".to_string(),
                description: Some("Edits things".to_string()),
            }),
        );
        assert_eq!(
            backend.get_permission_by_name("edit").await?,
            Some(Permission {
                id: permission_id,
                name: "edit".to_string(),
                description: None,
            }),
        );
        assert_eq!(backend.get_role_by_name("nobody").await?, None);
        assert!(backend.add_role("editor", None).await.is_err());

        assert!(backend.grant_permission_to_role(role_id, permission_id).await?);
        assert!(!backend.grant_permission_to_role(role_id, permission_id).await?);

        let user_id = backend.add_user("Alice", "alice@example.com", None).await?;
        assert!(backend.grant_role_to_user(user_id, role_id).await?);
        assert!(!backend.grant_role_to_user(user_id, role_id).await?);

        let user_roles = backend.get_user_with_roles(user_id).await?
            .expect("user is missing?");
        assert_eq!(user_roles.roles.len(), 1);
        assert_eq!(user_roles.roles[0].permissions.len(), 1);

        assert!(backend.revoke_permission_from_role(role_id, permission_id).await?);
        assert!(!backend.revoke_permission_from_role(role_id, permission_id).await?);
        let user_roles = backend.get_user_with_roles(user_id).await?
            .expect("user is missing?");
        assert_eq!(user_roles.roles[0].permissions, vec![]);

        assert!(backend.revoke_role_from_user(user_id, role_id).await?);
        assert!(!backend.revoke_role_from_user(user_id, role_id).await?);
        let user_roles = backend.get_user_with_roles(user_id).await?
            .expect("user is missing?");
        assert_eq!(user_roles.roles, vec![]);
        Ok(())
    }
}
