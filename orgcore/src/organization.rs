use serde::{Deserialize, Serialize};

/// An organization is either a root (no parent) or a sub-organization
/// of exactly one root.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub created_ts: i64,
}

/// An organization with its immediate relatives.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrganizationTree {
    pub organization: Organization,
    pub parent: Option<Organization>,
    pub children: Vec<Organization>,
}

/// The position of a user within the organization hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Hierarchy {
    pub own_org: Option<Organization>,
    pub sub_orgs: Vec<Organization>,
    pub parent_org: Option<Organization>,
}

mod impls;
