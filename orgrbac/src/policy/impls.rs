use std::{
    fmt,
    str::FromStr,
};
use orgcore::error::ValueError;

use crate::builder::Builder;
use super::*;

impl Default for Policy {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl Policy {
    /// The scope granted by the first scope rule matching any of the
    /// roles, or the fallback scope.
    pub fn effective_scope<I, S>(&self, roles: I) -> Scope
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = roles.into_iter().collect::<Vec<_>>();
        self.scope_rules.iter()
            .find(|rule| roles.iter().any(|role| role.as_ref() == rule.role))
            .map(|rule| rule.scope)
            .unwrap_or(self.fallback_scope)
    }

    /// The reach of the first manage rule matching any of the roles;
    /// `None` means the user may only manage themselves.
    pub fn manage_reach<I, S>(&self, roles: I) -> Option<Reach>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = roles.into_iter().collect::<Vec<_>>();
        self.manage_rules.iter()
            .find(|rule| roles.iter().any(|role| role.as_ref() == rule.role))
            .map(|rule| rule.reach)
    }

    /// Roles that unlock the `all` scope.
    pub fn cross_org_roles(&self) -> &[String] {
        &self.cross_org_roles
    }

    pub fn scope_rules(&self) -> &[ScopeRule] {
        &self.scope_rules
    }

    pub fn fallback_scope(&self) -> Scope {
        self.fallback_scope
    }

    pub fn manage_rules(&self) -> &[ManageRule] {
        &self.manage_rules
    }
}

impl FromStr for Reach {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "everyone" => Ok(Reach::Everyone),
            s => Ok(Reach::Scope(Scope::from_str(s)?)),
        }
    }
}

impl fmt::Display for Reach {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reach::Everyone => f.write_str("everyone"),
            Reach::Scope(scope) => scope.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use orgcore::role::{ADMIN, OWNER, VIEWER};
    use super::*;

    #[test]
    fn default_policy() {
        let policy = Policy::default();
        assert_eq!(policy.effective_scope([OWNER]), Scope::All);
        assert_eq!(policy.effective_scope([ADMIN]), Scope::Sub);
        assert_eq!(policy.effective_scope([VIEWER]), Scope::Own);
        assert_eq!(policy.effective_scope(Vec::<String>::new()), Scope::Own);
        // owner rule is listed first and so wins regardless of the order
        // the roles are held in.
        assert_eq!(policy.effective_scope([VIEWER, ADMIN, OWNER]), Scope::All);

        assert_eq!(policy.manage_reach([OWNER]), Some(Reach::Everyone));
        assert_eq!(policy.manage_reach([ADMIN]), Some(Reach::Scope(Scope::Sub)));
        assert_eq!(policy.manage_reach([ADMIN, OWNER]), Some(Reach::Everyone));
        assert_eq!(policy.manage_reach([VIEWER]), None);

        assert_eq!(policy.cross_org_roles(), &[OWNER.to_string(), ADMIN.to_string()]);
    }

    #[test]
    fn reach() -> anyhow::Result<()> {
        assert_eq!(Reach::from_str("everyone")?, Reach::Everyone);
        assert_eq!(Reach::from_str("Sub")?, Reach::Scope(Scope::Sub));
        assert!(Reach::from_str("nobody").is_err());
        assert_eq!(Reach::Everyone.to_string(), "everyone");
        assert_eq!(Reach::Scope(Scope::Own).to_string(), "own");
        Ok(())
    }
}
