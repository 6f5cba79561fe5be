use std::io;

use data_error::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't find a data directory, pass --data-dir")]
    DataDirNotFound,

    #[error("Couldn't create data directory: {0}")]
    DataDirCreationError(String),

    #[error("Unknown house '{0}'")]
    UnknownHouse(String),

    #[error("Could not save preferences: {0}")]
    PreferencesError(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    CatalogError(#[from] CatalogError),
}
