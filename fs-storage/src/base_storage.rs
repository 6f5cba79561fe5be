use data_error::Result;

/// A single versioned value persisted somewhere.
pub trait BaseStorage<T> {
    /// Label used in logs and errors.
    fn label(&self) -> &str;

    /// Load the persisted value.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet and an error
    /// when the persisted data is unreadable or of another version.
    fn read_fs(&mut self) -> Result<Option<T>>;

    /// Replace the persisted value.
    fn write_fs(&mut self, value: &T) -> Result<()>;

    /// Remove all persisted data.
    fn erase(&mut self) -> Result<()>;
}
