use std::collections::BTreeSet;

/// A simplified enforcer that checks a requirement directly against the
/// roles and permissions held by a single user.  It assumes the grants
/// it was built from are the complete snapshot of what the user holds;
/// an unknown user holds nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequirementEnforcer {
    roles: BTreeSet<String>,
    permissions: BTreeSet<String>,
}

mod impls;
