use serde::{Deserialize, Serialize};
use crate::permission::Permission;

/// Role names given special meaning by the default policy and the
/// directory seed.  Any other name is equally valid as a role.
pub const OWNER: &str = "owner";
pub const ADMIN: &str = "admin";
pub const VIEWER: &str = "viewer";

#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}
