use orgcore::{
    agent::Agent,
    decision::{
        Decision,
        Denial,
        Requirement,
    },
    platform::DirectoryPlatform,
};
use orgrbac::{
    simple::RequirementEnforcer,
    Policy,
};
use std::{
    collections::BTreeSet,
    sync::Arc,
};

use crate::{
    error::Error,
    user::User,
};

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, val: impl DirectoryPlatform + 'static) -> Self {
        self.directory = Some(Box::new(val));
        self
    }

    pub fn boxed_directory(mut self, val: Box<dyn DirectoryPlatform>) -> Self {
        self.directory = Some(val);
        self
    }

    pub fn policy(mut self, val: Policy) -> Self {
        self.policy = val;
        self
    }

    pub fn build(self) -> Result<Platform, Error> {
        Ok(Platform(Arc::new(PlatformInner {
            directory: self.directory
                .ok_or(Error::DirectoryRequired)?,
            policy: self.policy,
        })))
    }
}

impl Platform {
    pub fn directory(&self) -> &dyn DirectoryPlatform {
        self.0.directory.as_ref()
    }

    pub fn policy(&self) -> &Policy {
        &self.0.policy
    }

    pub async fn get_user(
        &self,
        user_id: i64,
    ) -> Result<Option<User>, Error> {
        let user = self.0.directory.get_user_with_organization(user_id).await?
            .map(|user_organization| User::new(self.clone(), user_organization.user));
        Ok(user)
    }

    /// The grants held by the user at this moment.  An unknown user
    /// holds nothing, and so does any user while the directory fails.
    pub(crate) async fn load_grants(
        &self,
        user_id: i64,
    ) -> RequirementEnforcer {
        match self.0.directory.get_user_with_roles(user_id).await {
            Ok(user_roles) => user_roles.into(),
            Err(e) => {
                log::warn!("failed to load roles for user {user_id}: {e}");
                RequirementEnforcer::default()
            }
        }
    }
}

// Permission and role resolution

impl Platform {
    pub async fn get_user_permissions(
        &self,
        user_id: i64,
    ) -> BTreeSet<String> {
        self.load_grants(user_id).await.into_permissions()
    }

    pub async fn has_permission(
        &self,
        user_id: i64,
        permission: &str,
    ) -> bool {
        self.load_grants(user_id).await.has_permission(permission)
    }

    pub async fn has_any_role<S: AsRef<str>>(
        &self,
        user_id: i64,
        roles: &[S],
    ) -> bool {
        if roles.is_empty() {
            return false;
        }
        self.load_grants(user_id).await.has_any_role(roles)
    }
}

// Enforcement

impl Platform {
    pub async fn authorize(
        &self,
        agent: impl Into<Agent>,
        requirement: &Requirement,
    ) -> Decision {
        if requirement.is_unrestricted() {
            return Decision::Allow;
        }
        let agent = agent.into();
        let decision = match agent {
            Agent::Anonymous => Denial::Unauthenticated.into(),
            Agent::User(user_id) => self.load_grants(user_id).await
                .enforce(requirement),
        };
        log::debug!("authorize {agent}: {decision}");
        decision
    }
}
