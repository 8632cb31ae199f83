use std::collections::BTreeSet;

use crate::organization::Organization;
use super::*;

/// The label used in place of an organization name for users that do
/// not belong to any organization.
pub const NO_ORGANIZATION: &str = "No Organization";

impl UserRoles {
    pub fn role_names(&self) -> BTreeSet<String> {
        self.roles.iter()
            .map(|rp| rp.role.name.clone())
            .collect()
    }

    pub fn permission_names(&self) -> BTreeSet<String> {
        self.roles.iter()
            .flat_map(|rp| rp.permissions.iter())
            .map(|permission| permission.name.clone())
            .collect()
    }
}

impl From<Option<&Organization>> for OrganizationSummary {
    fn from(organization: Option<&Organization>) -> Self {
        match organization {
            Some(Organization { id, name, .. }) => Self {
                id: Some(*id),
                name: name.clone(),
            },
            None => Self {
                id: None,
                name: NO_ORGANIZATION.to_string(),
            },
        }
    }
}

impl From<UserOrganization> for AssignableUser {
    fn from(value: UserOrganization) -> Self {
        let organization = value.organization.as_ref().into();
        let User { id, name, email, .. } = value.user;
        Self {
            id,
            name,
            email,
            organization,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        permission::Permission,
        role::{
            Role,
            RolePermissions,
        },
    };
    use super::*;

    fn permission(id: i64, name: &str) -> Permission {
        Permission { id, name: name.to_string(), description: None }
    }

    fn user() -> User {
        User {
            id: 3,
            name: "Bob Viewer".to_string(),
            email: "viewer@example.com".to_string(),
            organization_id: None,
            created_ts: 1234567890,
        }
    }

    #[test]
    fn permission_union() {
        let user_roles = UserRoles {
            user: user(),
            roles: vec![
                RolePermissions {
                    role: Role { id: 1, name: "admin".to_string(), description: None },
                    permissions: vec![
                        permission(1, "create_task"),
                        permission(2, "read_task"),
                    ],
                },
                RolePermissions {
                    role: Role { id: 2, name: "viewer".to_string(), description: None },
                    permissions: vec![
                        permission(2, "read_task"),
                    ],
                },
                RolePermissions {
                    role: Role { id: 3, name: "empty".to_string(), description: None },
                    permissions: vec![],
                },
            ],
        };
        assert_eq!(
            user_roles.permission_names(),
            BTreeSet::from(["create_task".to_string(), "read_task".to_string()]),
        );
        assert_eq!(user_roles.role_names().len(), 3);

        let no_roles = UserRoles { user: user(), roles: vec![] };
        assert!(no_roles.permission_names().is_empty());
        assert!(no_roles.role_names().is_empty());
    }

    #[test]
    fn assignable_sentinel() {
        let assignable: AssignableUser = UserOrganization {
            user: user(),
            organization: None,
        }.into();
        assert_eq!(assignable.organization, OrganizationSummary {
            id: None,
            name: NO_ORGANIZATION.to_string(),
        });

        let assignable: AssignableUser = UserOrganization {
            user: user(),
            organization: Some(Organization {
                id: 2,
                name: "Engineering Team".to_string(),
                description: None,
                parent_id: Some(1),
                created_ts: 1234567890,
            }),
        }.into();
        assert_eq!(assignable.id, 3);
        assert_eq!(assignable.email, "viewer@example.com");
        assert_eq!(assignable.organization, OrganizationSummary {
            id: Some(2),
            name: "Engineering Team".to_string(),
        });
    }
}
