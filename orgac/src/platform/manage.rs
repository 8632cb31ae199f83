use futures::future;
use orgcore::user::AssignableUser;
use orgrbac::policy::Reach;

use crate::error::Error;
use super::Platform;

// Management authorization

impl Platform {
    /// Whether the acting user may administratively manage the target
    /// user.
    pub async fn can_manage_user(
        &self,
        acting_user_id: i64,
        target_user_id: i64,
    ) -> bool {
        let (acting, target) = future::join(
            self.0.directory.get_user_with_roles(acting_user_id),
            self.0.directory.get_user_with_organization(target_user_id),
        ).await;
        let (acting, _) = match (acting, target) {
            (Ok(Some(acting)), Ok(Some(target))) => (acting, target),
            (Ok(_), Ok(_)) => return false,
            (Err(e), _) | (_, Err(e)) => {
                log::warn!(
                    "failed to load users {acting_user_id} and {target_user_id} \
                    for management check: {e}"
                );
                return false;
            }
        };
        let result = match self.0.policy.manage_reach(acting.role_names()) {
            Some(Reach::Everyone) => true,
            Some(Reach::Scope(scope)) => self
                .get_accessible_user_ids(acting_user_id, scope)
                .await
                .contains(&target_user_id),
            None => acting_user_id == target_user_id,
        };
        log::debug!("user {acting_user_id} manage user {target_user_id}: {result}");
        result
    }

    /// The users the user may assign work to, under the scope the
    /// policy derives from the roles of the user.
    ///
    /// Unlike the other resolutions, failure to fetch the records of
    /// the accessible users is returned as an error.
    pub async fn get_assignable_users(
        &self,
        user_id: i64,
    ) -> Result<Vec<AssignableUser>, Error> {
        let grants = self.load_grants(user_id).await;
        let scope = self.0.policy.effective_scope(grants.roles());
        log::trace!("user {user_id} assigns within scope {scope}");
        let ids = self.get_accessible_user_ids(user_id, scope).await
            .into_iter()
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.0.directory
            .find_users_with_organization_by_ids(&ids)
            .await?
            .into_iter()
            .map(AssignableUser::from)
            .collect())
    }
}
