use orgcore::user;

use crate::Platform;

/// A user of the directory, as seen through the platform.
#[derive(Clone)]
pub struct User {
    platform: Platform,
    user: user::User,
}

mod impls;
