use async_trait::async_trait;
use crate::{
    error::BackendError,
    organization::Organization,
    permission::Permission,
    role::Role,
    user::{
        User,
        UserHierarchy,
        UserOrganization,
        UserRoles,
    },
};

/// The read-only queries the authorization engine issues against the
/// directory of users, roles, permissions and organizations.
///
/// Not-found conditions are reported as `None` or empty collections;
/// errors are reserved for failures of the directory itself.
#[async_trait]
pub trait DirectoryBackend {
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
    /// The parent is only looked up if `with_parent` is set.
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

/// Provisioning of the directory.  The engine never makes use of this;
/// it exists for the processes that populate the directory.
#[async_trait]
pub trait DirectoryAdminBackend {
    async fn add_organization(
        &self,
        name: &str,
        description: Option<&str>,
        parent_id: Option<i64>,
    ) -> Result<i64, BackendError>;
    async fn add_user(
        &self,
        name: &str,
        email: &str,
        organization_id: Option<i64>,
    ) -> Result<i64, BackendError>;
    async fn set_user_organization(
        &self,
        user_id: i64,
        organization_id: Option<i64>,
    ) -> Result<bool, BackendError>;
    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, BackendError>;
    async fn add_role(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError>;
    async fn get_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Role>, BackendError>;
    async fn add_permission(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError>;
    async fn get_permission_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Permission>, BackendError>;
    async fn grant_permission_to_role(
        &self,
        role_id: i64,
        permission_id: i64,
    ) -> Result<bool, BackendError>;
    async fn revoke_permission_from_role(
        &self,
        role_id: i64,
        permission_id: i64,
    ) -> Result<bool, BackendError>;
    async fn grant_role_to_user(
        &self,
        user_id: i64,
        role_id: i64,
    ) -> Result<bool, BackendError>;
    async fn revoke_role_from_user(
        &self,
        user_id: i64,
        role_id: i64,
    ) -> Result<bool, BackendError>;
}
