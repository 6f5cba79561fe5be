use std::fs;
use std::path::Path;

use data_error::{CatalogError, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Envelope written around every persisted value.
///
/// ```text
/// {"state": {...}, "version": 0}
/// ```
#[derive(Serialize, Deserialize)]
pub(crate) struct StorageData<T> {
    pub state: T,
    pub version: i32,
}

pub(crate) fn encode<T: Serialize>(value: &T, version: i32) -> Result<String> {
    let data = StorageData {
        state: value,
        version,
    };
    Ok(serde_json::to_string(&data)?)
}

pub(crate) fn decode<T: DeserializeOwned>(
    label: &str,
    blob: &str,
    version: i32,
) -> Result<T> {
    let data: StorageData<T> = serde_json::from_str(blob)
        .map_err(|err| CatalogError::Storage(label.to_owned(), err.to_string()))?;

    if data.version != version {
        return Err(CatalogError::Storage(
            label.to_owned(),
            format!(
                "Storage version mismatch: expected {}, got {}",
                version, data.version
            ),
        ));
    }
    Ok(data.state)
}

/// Write data to a temporary file next to the destination and move it
/// over the destination, so readers never observe a partial file.
pub(crate) fn temp_and_move(data: &[u8], dest: &Path) -> Result<()> {
    let parent = dest.parent().ok_or_else(|| {
        CatalogError::Path(format!("{} has no parent directory", dest.display()))
    })?;
    fs::create_dir_all(parent)?;

    let file_name = dest
        .file_name()
        .ok_or_else(|| {
            CatalogError::Path(format!("{} has no file name", dest.display()))
        })?
        .to_string_lossy();
    let temp = parent.join(format!(".{}.tmp", file_name));

    fs::write(&temp, data)?;
    fs::rename(&temp, dest)?;
    Ok(())
}
