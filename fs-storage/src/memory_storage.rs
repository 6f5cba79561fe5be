use std::marker::PhantomData;

use data_error::Result;
use serde::{de::DeserializeOwned, Serialize};

use crate::base_storage::BaseStorage;
use crate::utils::{decode, encode};

/// Keeps the encoded blob in memory, for ephemeral sessions and tests.
///
/// The blob goes through the same encoding as [`crate::FileStorage`].
pub struct MemoryStorage<T> {
    label: String,
    version: i32,
    blob: Option<String>,
    _marker: PhantomData<T>,
}

impl<T> MemoryStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(label: String, version: i32) -> Self {
        Self {
            label,
            version,
            blob: None,
            _marker: PhantomData,
        }
    }

    /// Start from an already encoded blob, which may be invalid.
    pub fn with_blob(label: String, version: i32, blob: String) -> Self {
        Self {
            blob: Some(blob),
            ..Self::new(label, version)
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl<T> BaseStorage<T> for MemoryStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn read_fs(&mut self) -> Result<Option<T>> {
        match &self.blob {
            Some(blob) => decode(&self.label, blob, self.version).map(Some),
            None => Ok(None),
        }
    }

    fn write_fs(&mut self, value: &T) -> Result<()> {
        self.blob = Some(encode(value, self.version)?);
        Ok(())
    }

    fn erase(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }
}
