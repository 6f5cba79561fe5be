use std::sync::Arc;

use data_character::{Character, CharacterDetail, CharacterSource};
use data_error::{CatalogError, Result};

use crate::cache::QueryCache;
use crate::key::Subset;

/// Where a loader sends the caller when it has nothing to show.
pub const HOME_PATH: &str = "/";

/// Pages of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Characters,
    Students,
    Staff,
    Favorites,
    /// `/character/{id}`, the id may be missing.
    CharacterDetail(Option<String>),
}

impl Route {
    /// Match a request path, ignoring its query string and a trailing
    /// slash. Returns `None` for unknown pages.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let route = match segments.next() {
            None => Route::Home,
            Some("characters") => Route::Characters,
            Some("students") => Route::Students,
            Some("staff") => Route::Staff,
            Some("favorites") => Route::Favorites,
            Some("character") => {
                Route::CharacterDetail(segments.next().map(str::to_owned))
            }
            Some(_) => return None,
        };

        match segments.next() {
            Some(_) => None,
            None => Some(route),
        }
    }
}

/// Data a page needs before it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderOutcome {
    Characters(Arc<Vec<Character>>),
    Detail(Arc<CharacterDetail>),
    Redirect(&'static str),
}

impl LoaderOutcome {
    /// The character list of a list page. Any other outcome is a
    /// `Cache` error naming what was loaded instead.
    pub fn into_characters(self) -> Result<Arc<Vec<Character>>> {
        match self {
            LoaderOutcome::Characters(list) => Ok(list),
            other => Err(CatalogError::Cache(format!(
                "expected a character list, loaded {}",
                other.kind()
            ))),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            LoaderOutcome::Characters(_) => "a character list",
            LoaderOutcome::Detail(_) => "a character detail",
            LoaderOutcome::Redirect(_) => "a redirect",
        }
    }
}

impl<S> QueryCache<S>
where
    S: CharacterSource,
{
    /// Make sure the data of `route` is cached and return it.
    ///
    /// Home, characters and favorites pages share the full list, which
    /// also seeds the students and staff entries. A detail page without
    /// an id, or whose record does not exist, redirects home.
    pub async fn load(&self, route: &Route) -> Result<LoaderOutcome> {
        let subset = match route {
            Route::Home | Route::Characters | Route::Favorites => Subset::All,
            Route::Students => Subset::Students,
            Route::Staff => Subset::Staff,
            Route::CharacterDetail(id) => {
                return self.load_detail(id.as_deref()).await;
            }
        };
        self.characters(subset)
            .await
            .map(LoaderOutcome::Characters)
    }

    async fn load_detail(&self, id: Option<&str>) -> Result<LoaderOutcome> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                log::debug!("loader: no character id, redirecting home");
                return Ok(LoaderOutcome::Redirect(HOME_PATH));
            }
        };

        Ok(match self.detail(id).await? {
            Some(detail) => LoaderOutcome::Detail(detail),
            None => {
                log::debug!("loader: character {} not found", id);
                LoaderOutcome::Redirect(HOME_PATH)
            }
        })
    }
}
