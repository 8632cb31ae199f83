use serde::{Deserialize, Serialize};

/// The reach of a data access request within the organization
/// hierarchy.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    // catch-all for whenever infallable conversion is needed; resolves
    // to the acting user alone.
    #[default]
    Unknown,
    /// The organization of the user.
    Own,
    /// The organization of the user and its direct sub-organizations.
    Sub,
    /// Every organization, gated by role.
    All,
}

mod impls;
