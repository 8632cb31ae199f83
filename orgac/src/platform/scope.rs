use orgcore::{
    error::{
        BackendError,
        ValueError,
    },
    organization::{
        Hierarchy,
        Organization,
        OrganizationTree,
    },
    scope::Scope,
    user::{
        UserHierarchy,
        UserOrganization,
    },
};
use std::collections::BTreeSet;

use crate::error::Error;
use super::Platform;

// Organization scope resolution

impl Platform {
    async fn holds_cross_org_role(&self, user_id: i64) -> bool {
        self.has_any_role(user_id, self.0.policy.cross_org_roles()).await
    }

    /// Users within the organization.
    async fn resolve_own(
        &self,
        organization: &Organization,
    ) -> Result<BTreeSet<i64>, BackendError> {
        Ok(self.0.directory
            .find_users_by_organization_ids(&[organization.id])
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect())
    }

    /// Users within the organization and its direct children; the
    /// children are not descended into.
    async fn resolve_sub(
        &self,
        organization: &Organization,
    ) -> Result<BTreeSet<i64>, BackendError> {
        let children = self.0.directory
            .find_organizations_by_parent_id(organization.id)
            .await?;
        if organization.is_sub_organization() && !children.is_empty() {
            log::warn!(
                "organization {} has both a parent and children; \
                only its direct children are resolved",
                organization.id,
            );
        }
        let mut result = self.resolve_own(organization).await?;
        if !children.is_empty() {
            let child_ids = children.iter()
                .map(|child| child.id)
                .collect::<Vec<_>>();
            result.extend(
                self.0.directory
                    .find_users_by_organization_ids(&child_ids)
                    .await?
                    .into_iter()
                    .map(|user| user.id)
            );
        }
        Ok(result)
    }

    async fn resolve_all(&self) -> Result<BTreeSet<i64>, BackendError> {
        Ok(self.0.directory
            .find_all_user_ids()
            .await?
            .into_iter()
            .collect())
    }

    pub async fn can_access_organization(
        &self,
        user_id: i64,
        organization_id: i64,
        scope: Scope,
    ) -> bool {
        let own_id = match scope {
            Scope::All => return self.holds_cross_org_role(user_id).await,
            Scope::Unknown => return false,
            Scope::Own | Scope::Sub => match self.0.directory
                .get_user_with_organization(user_id)
                .await
            {
                Ok(Some(UserOrganization { organization: Some(organization), .. })) =>
                    organization.id,
                Ok(_) => return false,
                Err(e) => {
                    log::warn!("failed to load organization of user {user_id}: {e}");
                    return false;
                }
            },
        };
        if scope == Scope::Own {
            return own_id == organization_id;
        }
        match self.0.directory
            .find_organization_by_id(organization_id, false)
            .await
        {
            Ok(Some((target, _))) => target.parent_id == Some(own_id),
            Ok(None) => false,
            Err(e) => {
                log::warn!("failed to load organization {organization_id}: {e}");
                false
            }
        }
    }

    /// The ids of the users whose resources are accessible by the user
    /// under the scope.  The user is always included, unless the
    /// directory could not be read.
    pub async fn get_accessible_user_ids(
        &self,
        user_id: i64,
        scope: Scope,
    ) -> BTreeSet<i64> {
        let organization = match self.0.directory
            .get_user_with_organization(user_id)
            .await
        {
            Ok(Some(UserOrganization { organization: Some(organization), .. })) =>
                organization,
            Ok(_) => return BTreeSet::from([user_id]),
            Err(e) => {
                log::warn!("failed to load organization of user {user_id}: {e}");
                return BTreeSet::new();
            }
        };
        let result = match scope {
            Scope::Own => self.resolve_own(&organization).await,
            Scope::Sub => self.resolve_sub(&organization).await,
            Scope::All => if self.holds_cross_org_role(user_id).await {
                self.resolve_all().await
            } else {
                log::trace!("user {user_id} lacks a cross organization role; resolving own");
                self.resolve_own(&organization).await
            },
            Scope::Unknown => return BTreeSet::from([user_id]),
        };
        match result {
            Ok(ids) => {
                log::trace!("user {user_id} scope {scope}: {} user(s)", ids.len());
                ids
            }
            Err(e) => {
                log::warn!("failed to resolve scope {scope} for user {user_id}: {e}");
                BTreeSet::new()
            }
        }
    }

    pub async fn get_organization_hierarchy(
        &self,
        user_id: i64,
    ) -> Hierarchy {
        match self.0.directory
            .get_user_with_org_and_parent_and_children(user_id)
            .await
        {
            Ok(Some(UserHierarchy { organization: Some(tree), .. })) => {
                if let Err(e) = tree.check_depth() {
                    log::warn!("{e}");
                }
                tree.into()
            }
            Ok(_) => Hierarchy::default(),
            Err(e) => {
                log::warn!("failed to load organization hierarchy of user {user_id}: {e}");
                Hierarchy::default()
            }
        }
    }

    /// Verifies the organization sits within a hierarchy of at most two
    /// levels.  An unknown organization passes.
    pub async fn check_organization_depth(
        &self,
        organization_id: i64,
    ) -> Result<(), Error> {
        let Some((organization, parent)) = self.0.directory
            .find_organization_by_id(organization_id, true)
            .await?
        else {
            return Ok(());
        };
        if parent.as_ref().is_some_and(Organization::is_sub_organization) {
            return Err(ValueError::HierarchyDepth { organization_id }.into());
        }
        let children = self.0.directory
            .find_organizations_by_parent_id(organization_id)
            .await?;
        OrganizationTree { organization, parent, children }.check_depth()?;
        Ok(())
    }
}
