use orgcore::platform::DirectoryPlatform;
use orgrbac::Policy;
use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    directory: Option<Box<dyn DirectoryPlatform>>,
    policy: Policy,
}

/// The authorization engine.
///
/// Every operation re-reads the directory; nothing is cached between
/// calls.  Cloning is cheap as the platform is reference counted.
#[derive(Clone)]
pub struct Platform(Arc<PlatformInner>);

struct PlatformInner {
    directory: Box<dyn DirectoryPlatform>,
    policy: Policy,
}

mod impls;
mod manage;
mod scope;
