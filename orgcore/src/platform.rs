use async_trait::async_trait;
use std::error::Error;

use crate::traits::DirectoryBackend;

mod connector;
pub use connector::{ConnectorOption, PlatformConnector};

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// DirectoryPlatform - the directory as seen by the authorization
/// engine.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait.
pub trait DirectoryPlatform: DirectoryBackend
    + PlatformUrl

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn DirectoryPlatform;
}

pub trait DefaultDirectoryPlatform: DirectoryPlatform {}

impl<P: DirectoryBackend
    + PlatformUrl

    + DefaultDirectoryPlatform

    + Send
    + Sync
> DirectoryPlatform for P {
    fn as_dyn(&self) -> &(dyn DirectoryPlatform) {
        self
    }
}
