use serde::{Deserialize, Serialize};

/// The principal on whose behalf an action is requested.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Agent {
    /// No principal could be resolved upstream.
    #[default]
    Anonymous,
    User(i64),
}

mod impls;
