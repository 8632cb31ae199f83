use serde::{Deserialize, Serialize};

/// What a protected action demands of the acting user.
///
/// Roles are alternatives (holding any one of them suffices) while
/// every listed permission must be held.  An empty requirement leaves
/// the action unrestricted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Requirement {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Denial {
    Unauthenticated,
    MissingRole(Vec<String>),
    MissingPermission(Vec<String>),
}

mod impls;
