use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] orgcore::error::BackendError),
    #[error(transparent)]
    Value(#[from] orgcore::error::ValueError),
    #[error("missing required argument directory")]
    DirectoryRequired,
}
