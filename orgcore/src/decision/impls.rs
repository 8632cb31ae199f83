use itertools::Itertools;
use std::fmt::{
    Display,
    Formatter,
    Result,
};

use super::*;

impl Requirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Decision::Allow => None,
            Decision::Deny(denial) => Some(denial),
        }
    }
}

impl From<Denial> for Decision {
    fn from(denial: Denial) -> Self {
        Decision::Deny(denial)
    }
}

impl Display for Denial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Denial::Unauthenticated => f.write_str("unauthenticated"),
            Denial::MissingRole(roles) => write!(
                f,
                "missing required role: {}",
                roles.iter().join(", "),
            ),
            Denial::MissingPermission(permissions) => write!(
                f,
                "missing required permission: {}",
                permissions.iter().join(", "),
            ),
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Decision::Allow => f.write_str("allowed"),
            Decision::Deny(denial) => write!(f, "denied: {denial}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn requirement() {
        assert!(Requirement::new().is_unrestricted());
        let requirement = Requirement::new()
            .roles(["owner", "admin"])
            .permissions(["read_task"]);
        assert!(!requirement.is_unrestricted());
        assert_eq!(requirement.roles, vec!["owner", "admin"]);
        assert_eq!(requirement.permissions, vec!["read_task"]);
        assert!(!Requirement::new().permissions(["read_task"]).is_unrestricted());
    }

    #[test]
    fn reasons() {
        assert_eq!(Denial::Unauthenticated.to_string(), "unauthenticated");
        assert_eq!(
            Denial::MissingRole(vec!["owner".into(), "admin".into()]).to_string(),
            "missing required role: owner, admin",
        );
        assert_eq!(
            Denial::MissingPermission(vec!["create_task".into(), "read_task".into()]).to_string(),
            "missing required permission: create_task, read_task",
        );
        let decision: Decision = Denial::Unauthenticated.into();
        assert!(!decision.is_allowed());
        assert_eq!(decision.denial(), Some(&Denial::Unauthenticated));
        assert_eq!(decision.to_string(), "denied: unauthenticated");
        assert!(Decision::Allow.is_allowed());
        assert_eq!(Decision::Allow.denial(), None);
    }
}
