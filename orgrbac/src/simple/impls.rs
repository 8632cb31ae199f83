use orgcore::{
    decision::{
        Decision,
        Denial,
        Requirement,
    },
    user::UserRoles,
};

use super::*;

impl From<&UserRoles> for RequirementEnforcer {
    fn from(user_roles: &UserRoles) -> Self {
        Self {
            roles: user_roles.role_names(),
            permissions: user_roles.permission_names(),
        }
    }
}

impl From<Option<UserRoles>> for RequirementEnforcer {
    fn from(user_roles: Option<UserRoles>) -> Self {
        user_roles.as_ref()
            .map(Self::from)
            .unwrap_or_default()
    }
}

impl RequirementEnforcer {
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    pub fn into_permissions(self) -> BTreeSet<String> {
        self.permissions
    }

    /// True iff at least one of the roles is held; no roles yields
    /// false.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.roles.contains(role.as_ref()))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Any one of the required roles, and every required permission.
    pub fn enforce(&self, requirement: &Requirement) -> Decision {
        if requirement.is_unrestricted() {
            return Decision::Allow;
        }
        if !requirement.roles.is_empty() && !self.has_any_role(requirement.roles.as_slice()) {
            return Denial::MissingRole(requirement.roles.clone()).into();
        }
        if !requirement.permissions.iter().all(|p| self.has_permission(p)) {
            return Denial::MissingPermission(requirement.permissions.clone()).into();
        }
        Decision::Allow
    }
}
