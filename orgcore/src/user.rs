use serde::{Deserialize, Serialize};
use crate::{
    organization::{
        Organization,
        OrganizationTree,
    },
    role::RolePermissions,
};

#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub organization_id: Option<i64>,
    pub created_ts: i64,
}

/// A user loaded together with every role assigned, with each role
/// carrying its permissions.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserRoles {
    pub user: User,
    pub roles: Vec<RolePermissions>,
}

/// A user loaded together with the organization it belongs to.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserOrganization {
    pub user: User,
    pub organization: Option<Organization>,
}

/// A user loaded together with its organization, the parent and the
/// children of that organization.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserHierarchy {
    pub user: User,
    pub organization: Option<OrganizationTree>,
}

/// The projection of a user that may be assigned work by some other
/// user.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AssignableUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub organization: OrganizationSummary,
}

/// Id and name of an organization; the id is absent for the
/// placeholder used for users without an organization.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrganizationSummary {
    pub id: Option<i64>,
    pub name: String,
}

mod impls;
pub use impls::NO_ORGANIZATION;
