use std::path::PathBuf;

use thiserror::Error;

/// Fatal conversion failures. A missing image during the optional copy step
/// is not one of these: it is logged and skipped (see assets.rs).
#[derive(Debug, Error)]
pub(crate) enum ConvertError {
    #[error("file {0:?} does not exist")]
    NotFound(PathBuf),

    #[error("post must have a title in its attribute block")]
    MissingTitle,
}
