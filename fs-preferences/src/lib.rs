use std::path::Path;

use data_error::Result;
use fs_storage::{BaseStorage, FileStorage, MemoryStorage, BLOB_EXTENSION};
use serde::{Deserialize, Serialize};

/// Fixed key the preferences are stored under.
pub const STORAGE_KEY: &str = "harry-potter-user-storage";

/// Format version written next to the preferences.
pub const PREFERENCES_VERSION: i32 = 0;

/// User preferences persisted across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub selected_house: Option<String>,
    #[serde(default)]
    pub favorite_character_ids: Vec<String>,
}

/// Holds the [`Preferences`] and writes them to storage after every
/// change.
pub struct PreferenceStore<S> {
    storage: S,
    state: Preferences,
}

impl PreferenceStore<FileStorage<Preferences>> {
    /// Open the store kept in `<data_dir>/harry-potter-user-storage.json`.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(format!("{}.{}", STORAGE_KEY, BLOB_EXTENSION));
        Self::load(FileStorage::new(
            STORAGE_KEY.to_owned(),
            &path,
            PREFERENCES_VERSION,
        ))
    }
}

impl PreferenceStore<MemoryStorage<Preferences>> {
    /// A store that forgets everything when dropped.
    pub fn ephemeral() -> Self {
        Self::load(MemoryStorage::new(
            STORAGE_KEY.to_owned(),
            PREFERENCES_VERSION,
        ))
    }
}

impl<S> PreferenceStore<S>
where
    S: BaseStorage<Preferences>,
{
    /// Load the preferences from `storage`.
    ///
    /// Missing or unreadable data is not an error, the store then starts
    /// from the default empty preferences.
    pub fn load(mut storage: S) -> Self {
        let state = match storage.read_fs() {
            Ok(Some(state)) => state,
            Ok(None) => Preferences::default(),
            Err(err) => {
                log::warn!(
                    "{}: resetting preferences to defaults: {}",
                    storage.label(),
                    err
                );
                Preferences::default()
            }
        };
        Self { storage, state }
    }

    pub fn state(&self) -> &Preferences {
        &self.state
    }

    pub fn selected_house(&self) -> Option<&str> {
        self.state.selected_house.as_deref()
    }

    pub fn favorite_ids(&self) -> &[String] {
        &self.state.favorite_character_ids
    }

    /// Replace the selected house, an empty name clears it.
    pub fn set_selected_house(&mut self, house: Option<String>) -> Result<()> {
        self.state.selected_house = house.filter(|h| !h.is_empty());
        self.persist()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state
            .favorite_character_ids
            .iter()
            .any(|f| f == id)
    }

    /// Flip the membership of `id` among the favorites and return whether
    /// it is a favorite afterwards.
    ///
    /// Removing drops every occurrence, adding appends at the end.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let favorite = if self.is_favorite(id) {
            self.state
                .favorite_character_ids
                .retain(|f| f != id);
            false
        } else {
            self.state
                .favorite_character_ids
                .push(id.to_owned());
            true
        };
        self.persist()?;
        Ok(favorite)
    }

    /// Forget every preference, including the persisted copy.
    pub fn reset(&mut self) -> Result<()> {
        self.state = Preferences::default();
        self.storage.erase()
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.write_fs(&self.state)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
