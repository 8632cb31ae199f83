use orgcore::{
    agent::Agent,
    decision::{
        Decision,
        Requirement,
    },
    organization::Hierarchy,
    scope::Scope,
    user::{
        self,
        AssignableUser,
    },
};
use std::collections::BTreeSet;

use crate::{
    Platform,
    error::Error,
};
use super::User;

impl User {
    pub(crate) fn new(
        platform: Platform,
        user: user::User,
    ) -> Self {
        Self {
            platform,
            user,
        }
    }

    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn name(&self) -> &str {
        self.user.name.as_ref()
    }

    pub fn email(&self) -> &str {
        self.user.email.as_ref()
    }

    pub fn organization_id(&self) -> Option<i64> {
        self.user.organization_id
    }

    pub fn into_inner(self) -> user::User {
        self.user
    }

    pub async fn permissions(&self) -> BTreeSet<String> {
        self.platform.get_user_permissions(self.user.id).await
    }

    pub async fn has_permission(&self, permission: &str) -> bool {
        self.platform.has_permission(self.user.id, permission).await
    }

    pub async fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        self.platform.has_any_role(self.user.id, roles).await
    }

    pub async fn can_access_organization(
        &self,
        organization_id: i64,
        scope: Scope,
    ) -> bool {
        self.platform.can_access_organization(self.user.id, organization_id, scope).await
    }

    pub async fn accessible_user_ids(&self, scope: Scope) -> BTreeSet<i64> {
        self.platform.get_accessible_user_ids(self.user.id, scope).await
    }

    pub async fn hierarchy(&self) -> Hierarchy {
        self.platform.get_organization_hierarchy(self.user.id).await
    }

    pub async fn can_manage(&self, target_user_id: i64) -> bool {
        self.platform.can_manage_user(self.user.id, target_user_id).await
    }

    pub async fn assignable_users(&self) -> Result<Vec<AssignableUser>, Error> {
        self.platform.get_assignable_users(self.user.id).await
    }

    pub async fn authorize(&self, requirement: &Requirement) -> Decision {
        self.platform.authorize(self, requirement).await
    }
}

impl From<&User> for Agent {
    fn from(user: &User) -> Self {
        Agent::User(user.user.id)
    }
}

impl From<User> for user::User {
    fn from(user: User) -> Self {
        user.user
    }
}
