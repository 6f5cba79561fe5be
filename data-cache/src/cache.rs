use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use data_character::{Character, CharacterDetail, CharacterSource};
use data_error::{CatalogError, Result};
use futures::FutureExt;

use crate::entry::{CacheEntry, EntryState, QueryValue, SharedFetch};
use crate::key::{QueryKey, Subset};

type Entries = Mutex<HashMap<QueryKey, CacheEntry>>;

/// Keyed cache over a [`CharacterSource`].
///
/// Concurrent requests for the same key share a single fetch. Entries
/// never expire, they are dropped only by [`QueryCache::invalidate`] or
/// [`QueryCache::clear`]. Resolving the `characters/all` key also fills
/// the students and staff entries.
///
/// Fetches run as detached tokio tasks: a caller that stops waiting does
/// not cancel the fetch and the result is still cached.
pub struct QueryCache<S> {
    source: Arc<S>,
    entries: Arc<Entries>,
    next_fetch: AtomicU64,
}

impl<S> QueryCache<S>
where
    S: CharacterSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_fetch: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the cached value of `key`, fetching it when it is missing
    /// or its last fetch failed.
    pub async fn ensure(&self, key: &QueryKey) -> Result<QueryValue> {
        let fetch = {
            let mut entries = lock(&self.entries);
            let entry = entries.entry(key.clone()).or_default();
            match entry {
                CacheEntry::Resolved(value) => {
                    log::debug!("cache/{}: hit", key);
                    return Ok(value.clone());
                }
                CacheEntry::Pending { fetch_id, fetch } => {
                    log::debug!("cache/{}: joining fetch {}", key, fetch_id);
                    fetch.clone()
                }
                CacheEntry::Empty | CacheEntry::Failed(_) => {
                    let (fetch_id, fetch) = self.start_fetch(key);
                    *entry = CacheEntry::Pending {
                        fetch_id,
                        fetch: fetch.clone(),
                    };
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Character list of `subset`.
    pub async fn characters(
        &self,
        subset: Subset,
    ) -> Result<Arc<Vec<Character>>> {
        let key = QueryKey::Characters(subset);
        match self.ensure(&key).await? {
            QueryValue::Characters(list) => Ok(list),
            QueryValue::Detail(_) => Err(unexpected_value(&key)),
        }
    }

    /// Detail record of `id`, `None` when the upstream does not know it.
    pub async fn detail(
        &self,
        id: &str,
    ) -> Result<Option<Arc<CharacterDetail>>> {
        let key = QueryKey::detail(id);
        match self.ensure(&key).await? {
            QueryValue::Detail(detail) => Ok(detail),
            QueryValue::Characters(_) => Err(unexpected_value(&key)),
        }
    }

    /// Resolved value of `key`, without fetching.
    pub fn get(&self, key: &QueryKey) -> Option<QueryValue> {
        match lock(&self.entries).get(key) {
            Some(CacheEntry::Resolved(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Store `value` under `key`, replacing whatever the entry holds.
    pub fn set(&self, key: QueryKey, value: QueryValue) {
        let mut entries = lock(&self.entries);
        store(&mut entries, key, value);
    }

    pub fn state(&self, key: &QueryKey) -> EntryState {
        lock(&self.entries)
            .get(key)
            .map(CacheEntry::state)
            .unwrap_or(EntryState::Empty)
    }

    /// Drop the entry of `key`. A fetch still running for it will not be
    /// cached.
    pub fn invalidate(&self, key: &QueryKey) {
        if lock(&self.entries).remove(key).is_some() {
            log::debug!("cache/{}: invalidated", key);
        }
    }

    pub fn clear(&self) {
        let mut entries = lock(&self.entries);
        log::debug!("cache: clearing {} entries", entries.len());
        entries.clear();
    }

    fn start_fetch(&self, key: &QueryKey) -> (u64, SharedFetch) {
        let fetch_id = self.next_fetch.fetch_add(1, Ordering::Relaxed);
        log::debug!("cache/{}: starting fetch {}", key, fetch_id);

        let source = Arc::clone(&self.source);
        let entries = Arc::clone(&self.entries);
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let outcome = fetch_value(source.as_ref(), &task_key).await;
            settle(&entries, &task_key, fetch_id, &outcome);
            outcome
        });

        let entries = Arc::clone(&self.entries);
        let key = key.clone();
        let fetch = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    let outcome = Err(CatalogError::Cache(format!(
                        "fetch of {} did not complete: {}",
                        key, err
                    )));
                    settle(&entries, &key, fetch_id, &outcome);
                    outcome
                }
            }
        };

        (fetch_id, fetch.boxed().shared())
    }
}

async fn fetch_value<S: CharacterSource>(
    source: &S,
    key: &QueryKey,
) -> Result<QueryValue> {
    match key {
        QueryKey::Characters(Subset::All) => {
            source.all_characters().await.map(QueryValue::characters)
        }
        QueryKey::Characters(Subset::Students) => {
            source.students().await.map(QueryValue::characters)
        }
        QueryKey::Characters(Subset::Staff) => {
            source.staff().await.map(QueryValue::characters)
        }
        QueryKey::Detail(id) => {
            source.character_by_id(id).await.map(QueryValue::detail)
        }
    }
}

/// Commit the outcome of fetch `fetch_id`, unless the entry was
/// invalidated or replaced while the fetch was running.
fn settle(
    entries: &Entries,
    key: &QueryKey,
    fetch_id: u64,
    outcome: &Result<QueryValue>,
) {
    let mut entries = lock(entries);
    if !entries
        .get(key)
        .is_some_and(|entry| entry.is_pending(fetch_id))
    {
        log::debug!(
            "cache/{}: entry changed during fetch {}, result dropped",
            key,
            fetch_id
        );
        return;
    }

    match outcome {
        Ok(value) => store(&mut entries, key.clone(), value.clone()),
        Err(err) => {
            log::warn!("cache/{}: fetch {} failed: {}", key, fetch_id, err);
            entries.insert(key.clone(), CacheEntry::Failed(err.clone()));
        }
    }
}

fn store(
    entries: &mut HashMap<QueryKey, CacheEntry>,
    key: QueryKey,
    value: QueryValue,
) {
    if let (QueryKey::Characters(Subset::All), QueryValue::Characters(all)) =
        (&key, &value)
    {
        seed_subsets(entries, all);
    }
    log::debug!("cache/{}: resolved", key);
    entries.insert(key, CacheEntry::Resolved(value));
}

/// Fill the students and staff entries from the full list, keeping the
/// order of the full list.
fn seed_subsets(
    entries: &mut HashMap<QueryKey, CacheEntry>,
    all: &[Character],
) {
    let (students, staff): (Vec<_>, Vec<_>) = (
        all.iter()
            .filter(|c| c.hogwarts_student)
            .cloned()
            .collect(),
        all.iter()
            .filter(|c| c.hogwarts_staff)
            .cloned()
            .collect(),
    );
    log::debug!(
        "cache: seeding {} students and {} staff",
        students.len(),
        staff.len()
    );

    entries.insert(
        QueryKey::students(),
        CacheEntry::Resolved(QueryValue::characters(students)),
    );
    entries.insert(
        QueryKey::staff(),
        CacheEntry::Resolved(QueryValue::characters(staff)),
    );
}

fn unexpected_value(key: &QueryKey) -> CatalogError {
    CatalogError::Cache(format!("unexpected value cached under {}", key))
}

// The map stays consistent across a panic: every update is a single insert.
fn lock(entries: &Entries) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}
