use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use data_cache::QueryCache;
use data_character::HttpCharacterClient;
use fs_preferences::{PreferenceStore, Preferences};
use fs_storage::FileStorage;

use crate::cli::Cli;
use crate::AppError;

const DATA_FOLDER: &str = "hp-catalog";

pub type UserPreferences = PreferenceStore<FileStorage<Preferences>>;

/// Everything a command needs: the query cache over the HTTP API, the
/// persisted preferences and the output mode.
pub struct Context {
    pub cache: QueryCache<HttpCharacterClient>,
    pub preferences: UserPreferences,
    pub json: bool,
}

impl Context {
    pub fn new(args: &Cli) -> Result<Self, AppError> {
        let client = HttpCharacterClient::new(&args.api_url)?;
        log::debug!("using API at {}", client.base_url());

        let data_dir = provide_data_dir(&args.data_dir)?;
        log::debug!("using data directory {}", data_dir.display());

        Ok(Self {
            cache: QueryCache::new(client),
            preferences: PreferenceStore::open(&data_dir),
            json: args.json,
        })
    }
}

/// Resolve the data directory, creating it when needed.
pub fn provide_data_dir(data_dir: &Option<PathBuf>) -> Result<PathBuf, AppError> {
    let dir = match data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .ok_or(AppError::DataDirNotFound)?
            .join(DATA_FOLDER),
    };
    ensure_dir(&dir)?;
    Ok(dir)
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    if !dir.exists() {
        create_dir_all(dir).map_err(|err| {
            AppError::DataDirCreationError(format!("{}: {}", dir.display(), err))
        })?;
    }
    Ok(())
}
