use async_trait::async_trait;
use mockall::mock;
use orgac::{
    platform::Builder,
    seed::{
        seed_directory,
        Seeded,
    },
    Platform,
};
use orgcore::{
    error::BackendError,
    organization::Organization,
    platform::{
        DefaultDirectoryPlatform,
        PlatformUrl,
    },
    traits::DirectoryBackend,
    user::{
        User,
        UserHierarchy,
        UserOrganization,
        UserRoles,
    },
};
use orgdb_sqlite::SqliteBackend;

pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::connect("sqlite::memory:".into())
        .await?
        .migrate()
        .await?)
}

/// A platform over an empty directory, along with the backend for
/// provisioning it.
pub async fn create_sqlite_platform() -> anyhow::Result<(Platform, SqliteBackend)> {
    let backend = create_sqlite_backend().await?;
    let platform = Builder::new()
        .directory(backend.clone())
        .build()?;
    Ok((platform, backend))
}

/// A platform over the seeded Acme directory.
pub async fn create_acme_platform() -> anyhow::Result<(Platform, SqliteBackend, Seeded)> {
    let (platform, backend) = create_sqlite_platform().await?;
    let seeded = seed_directory(&backend).await?;
    Ok((platform, backend, seeded))
}

mock! {
    pub Directory {}

    #[async_trait]
    impl DirectoryBackend for Directory {
        async fn get_user_with_roles(
            &self,
            user_id: i64,
        ) -> Result<Option<UserRoles>, BackendError>;
        async fn get_user_with_organization(
            &self,
            user_id: i64,
        ) -> Result<Option<UserOrganization>, BackendError>;
        async fn find_users_by_organization_ids(
            &self,
            organization_ids: &[i64],
        ) -> Result<Vec<User>, BackendError>;
        async fn find_organizations_by_parent_id(
            &self,
            parent_id: i64,
        ) -> Result<Vec<Organization>, BackendError>;
        async fn find_organization_by_id(
            &self,
            id: i64,
            with_parent: bool,
        ) -> Result<Option<(Organization, Option<Organization>)>, BackendError>;
        async fn find_all_user_ids(
            &self,
        ) -> Result<Vec<i64>, BackendError>;
        async fn get_user_with_org_and_parent_and_children(
            &self,
            user_id: i64,
        ) -> Result<Option<UserHierarchy>, BackendError>;
        async fn find_users_with_organization_by_ids(
            &self,
            user_ids: &[i64],
        ) -> Result<Vec<UserOrganization>, BackendError>;
    }
}

impl PlatformUrl for MockDirectory {
    fn url(&self) -> &str {
        "mock://directory"
    }
}

impl DefaultDirectoryPlatform for MockDirectory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn smoke_test_create_platform() -> anyhow::Result<()> {
        let (platform, _, seeded) = create_acme_platform().await?;
        assert_eq!(platform.directory().url(), "sqlite::memory:");
        assert_eq!(
            platform.directory().find_all_user_ids().await?,
            vec![seeded.owner, seeded.admin, seeded.viewer],
        );
        Ok(())
    }

    #[async_std::test]
    async fn smoke_test_mock() -> anyhow::Result<()> {
        let mut directory = MockDirectory::new();
        directory.expect_find_all_user_ids()
            .times(1)
            .returning(|| Ok(vec![1, 2]));
        let platform = Builder::new()
            .directory(directory)
            .build()?;
        assert_eq!(platform.directory().url(), "mock://directory");
        assert_eq!(platform.directory().find_all_user_ids().await?, vec![1, 2]);
        Ok(())
    }
}
