use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use data_error::{CatalogError, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::base_storage::BaseStorage;
use crate::utils::{decode, encode, temp_and_move};

/// Persists one JSON value in a file.
pub struct FileStorage<T> {
    label: String,
    path: PathBuf,
    version: i32,
    _marker: PhantomData<T>,
}

impl<T> FileStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new file storage with a diagnostic label, file path and
    /// the format version written into the file.
    pub fn new(label: String, path: &Path, version: i32) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
            version,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> BaseStorage<T> for FileStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn read_fs(&mut self) -> Result<Option<T>> {
        if !self.path.exists() {
            log::debug!("{}: nothing stored at {:?}", self.label, self.path);
            return Ok(None);
        }

        let blob = fs::read_to_string(&self.path).map_err(|err| {
            CatalogError::Storage(self.label.clone(), err.to_string())
        })?;
        decode(&self.label, &blob, self.version).map(Some)
    }

    fn write_fs(&mut self, value: &T) -> Result<()> {
        let blob = encode(value, self.version)?;
        temp_and_move(blob.as_bytes(), &self.path)?;

        log::info!(
            "{}: {} bytes have been written to {:?}",
            self.label,
            blob.len(),
            self.path
        );
        Ok(())
    }

    fn erase(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|err| {
            CatalogError::Storage(self.label.clone(), err.to_string())
        })
    }
}
