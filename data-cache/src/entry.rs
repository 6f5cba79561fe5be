use std::sync::Arc;

use data_character::{Character, CharacterDetail};
use data_error::{CatalogError, Result};
use futures::future::{BoxFuture, Shared};

/// Outcome of a fetch, shared by every caller that joined it.
pub(crate) type SharedFetch = Shared<BoxFuture<'static, Result<QueryValue>>>;

/// A cached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Characters(Arc<Vec<Character>>),
    /// `None` when the upstream has no record with the requested id.
    Detail(Option<Arc<CharacterDetail>>),
}

impl QueryValue {
    pub fn characters(list: Vec<Character>) -> Self {
        QueryValue::Characters(Arc::new(list))
    }

    pub fn detail(detail: Option<CharacterDetail>) -> Self {
        QueryValue::Detail(detail.map(Arc::new))
    }
}

/// State of one cache key.
///
/// ```text
/// Empty | Failed --ensure--> Pending --ok--> Resolved
///                                    --err-> Failed
/// ```
#[derive(Default)]
pub(crate) enum CacheEntry {
    #[default]
    Empty,
    Pending { fetch_id: u64, fetch: SharedFetch },
    Resolved(QueryValue),
    Failed(CatalogError),
}

impl CacheEntry {
    pub(crate) fn state(&self) -> EntryState {
        match self {
            CacheEntry::Empty => EntryState::Empty,
            CacheEntry::Pending { .. } => EntryState::Pending,
            CacheEntry::Resolved(_) => EntryState::Resolved,
            CacheEntry::Failed(err) => EntryState::Failed(err.to_string()),
        }
    }

    pub(crate) fn is_pending(&self, id: u64) -> bool {
        matches!(self, CacheEntry::Pending { fetch_id, .. } if *fetch_id == id)
    }
}

/// Snapshot of a cache entry, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Empty,
    Pending,
    Resolved,
    Failed(String),
}
