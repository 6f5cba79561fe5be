mod cache;
mod entry;
mod key;
mod loader;
#[cfg(test)]
mod testing;

pub use cache::QueryCache;
pub use entry::{EntryState, QueryValue};
pub use key::{QueryKey, Subset, CHARACTERS_DOMAIN};
pub use loader::{LoaderOutcome, Route, HOME_PATH};
