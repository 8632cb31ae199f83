use orgcore::scope::Scope;

/// Grants the scope to users holding the role.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeRule {
    pub role: String,
    pub scope: Scope,
}

/// The users that may be managed by the holder of some role.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reach {
    Everyone,
    Scope(Scope),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManageRule {
    pub role: String,
    pub reach: Reach,
}

/// The business policy that maps roles onto the organization
/// hierarchy.
///
/// The rule lists are ordered; the first rule with a role held by the
/// user applies.  Use [`crate::Builder`] to construct one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    pub(crate) scope_rules: Vec<ScopeRule>,
    pub(crate) fallback_scope: Scope,
    pub(crate) cross_org_roles: Vec<String>,
    pub(crate) manage_rules: Vec<ManageRule>,
}

mod impls;
