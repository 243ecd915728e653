//! Watchlist domain — the user's set of watched coins, persisted through a
//! [`KeyValueStore`].

pub mod storage;

use crate::error::{StorageError, WatchlistError};
use crate::shared::CoinId;
use std::fmt;
use std::sync::Arc;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key holding the JSON array of watched identifiers.
pub const WATCHLIST_STORAGE_KEY: &str = "crypto-watchlist";

/// Ordered set of watched coin identifiers.
///
/// The app owns one instance per session and passes it to whatever needs it.
/// A new container is empty and not loaded; [`Watchlist::load`] reads the
/// persisted value exactly once. Until then every mutation is refused, so a
/// transient empty default can never overwrite the stored list.
///
/// Each effective mutation rewrites the whole stored array. Storage failures
/// are logged and otherwise ignored: the in-memory set stays authoritative for
/// the session.
pub struct Watchlist {
    ids: Vec<CoinId>,
    loaded: bool,
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Watchlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watchlist")
            .field("ids", &self.ids)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl Watchlist {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            ids: Vec::new(),
            loaded: false,
            store,
        }
    }

    /// Create and load in one step; the returned value is ready to use.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut watchlist = Self::new(store);
        watchlist.load();
        watchlist
    }

    /// Read the persisted set. Returns `false` if it was already loaded.
    ///
    /// A missing value yields an empty set. An unreadable or unparsable value
    /// is logged and also yields an empty set.
    pub fn load(&mut self) -> bool {
        if self.loaded {
            return false;
        }

        let stored: Vec<CoinId> = match self.store.get(WATCHLIST_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored watchlist is not a JSON array of ids; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read watchlist from storage; starting empty");
                Vec::new()
            }
        };

        self.ids.clear();
        for id in stored {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self.loaded = true;
        tracing::debug!(count = self.ids.len(), "Watchlist loaded");
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn ids(&self) -> &[CoinId] {
        &self.ids
    }

    pub fn contains(&self, id: &CoinId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Insert `id` if absent. Returns whether the set changed.
    pub fn add(&mut self, id: impl Into<CoinId>) -> Result<bool, WatchlistError> {
        self.ensure_loaded()?;
        let id = id.into();
        if self.ids.contains(&id) {
            return Ok(false);
        }
        self.ids.push(id);
        self.persist();
        Ok(true)
    }

    /// Remove `id` if present. Returns whether the set changed.
    pub fn remove(&mut self, id: &CoinId) -> Result<bool, WatchlistError> {
        self.ensure_loaded()?;
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() == before {
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    /// Flip membership of `id`. Returns whether it is watched afterwards.
    pub fn toggle(&mut self, id: impl Into<CoinId>) -> Result<bool, WatchlistError> {
        let id = id.into();
        if self.contains(&id) {
            self.remove(&id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    fn ensure_loaded(&self) -> Result<(), WatchlistError> {
        if self.loaded {
            Ok(())
        } else {
            Err(WatchlistError::NotLoaded)
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.ids)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set(WATCHLIST_STORAGE_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist watchlist; keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &Watchlist) -> Vec<&str> {
        list.ids().iter().map(CoinId::as_str).collect()
    }

    fn stored(store: &MemoryStore) -> Option<String> {
        store.get(WATCHLIST_STORAGE_KEY).unwrap()
    }

    /// A store whose every call fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_new_is_not_loaded_and_refuses_mutations() {
        let store = Arc::new(MemoryStore::with_entry(WATCHLIST_STORAGE_KEY, r#"["bitcoin"]"#));
        let mut list = Watchlist::new(store.clone());
        assert!(!list.is_loaded());
        assert!(list.is_empty());
        assert!(matches!(list.add("ethereum"), Err(WatchlistError::NotLoaded)));
        assert!(matches!(
            list.remove(&CoinId::from("bitcoin")),
            Err(WatchlistError::NotLoaded)
        ));
        assert_eq!(stored(&store).as_deref(), Some(r#"["bitcoin"]"#));
    }

    #[test]
    fn test_load_reads_once() {
        let store = Arc::new(MemoryStore::with_entry(
            WATCHLIST_STORAGE_KEY,
            r#"["bitcoin","ethereum"]"#,
        ));
        let mut list = Watchlist::new(store.clone());
        assert!(list.load());
        assert!(list.is_loaded());
        assert_eq!(ids(&list), ["bitcoin", "ethereum"]);

        store.set(WATCHLIST_STORAGE_KEY, r#"["solana"]"#).unwrap();
        assert!(!list.load());
        assert_eq!(ids(&list), ["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_missing_or_invalid_storage_defaults_to_empty() {
        let list = Watchlist::open(Arc::new(MemoryStore::new()));
        assert!(list.is_loaded());
        assert!(list.is_empty());

        let list = Watchlist::open(Arc::new(MemoryStore::with_entry(
            WATCHLIST_STORAGE_KEY,
            "{not json",
        )));
        assert!(list.is_loaded());
        assert!(list.is_empty());

        let list = Watchlist::open(Arc::new(MemoryStore::with_entry(
            WATCHLIST_STORAGE_KEY,
            r#"{"bitcoin": true}"#,
        )));
        assert!(list.is_empty());
    }

    #[test]
    fn test_duplicates_in_storage_are_collapsed() {
        let list = Watchlist::open(Arc::new(MemoryStore::with_entry(
            WATCHLIST_STORAGE_KEY,
            r#"["bitcoin","ethereum","bitcoin"]"#,
        )));
        assert_eq!(ids(&list), ["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let mut once = Watchlist::open(store.clone());
        assert!(once.add("bitcoin").unwrap());
        let after_once = ids(&once).join(",");

        assert!(!once.add("bitcoin").unwrap());
        assert_eq!(ids(&once).join(","), after_once);
        assert_eq!(stored(&store).as_deref(), Some(r#"["bitcoin"]"#));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = Arc::new(MemoryStore::with_entry(WATCHLIST_STORAGE_KEY, r#"["bitcoin"]"#));
        let mut list = Watchlist::open(store.clone());
        assert!(!list.remove(&CoinId::from("dogecoin")).unwrap());
        assert_eq!(ids(&list), ["bitcoin"]);

        assert!(list.remove(&CoinId::from("bitcoin")).unwrap());
        assert!(list.is_empty());
        assert_eq!(stored(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_every_mutation_rewrites_full_array_in_insertion_order() {
        let store = Arc::new(MemoryStore::new());
        let mut list = Watchlist::open(store.clone());
        list.add("solana").unwrap();
        list.add("bitcoin").unwrap();
        list.add("ethereum").unwrap();
        assert_eq!(
            stored(&store).as_deref(),
            Some(r#"["solana","bitcoin","ethereum"]"#)
        );

        list.remove(&CoinId::from("bitcoin")).unwrap();
        assert_eq!(stored(&store).as_deref(), Some(r#"["solana","ethereum"]"#));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let store = Arc::new(MemoryStore::new());
        let mut first = Watchlist::open(store.clone());
        for id in ["cardano", "bitcoin", "polkadot"] {
            first.add(id).unwrap();
        }

        let second = Watchlist::open(store.clone());
        assert_eq!(second.ids(), first.ids());
    }

    #[test]
    fn test_toggle() {
        let mut list = Watchlist::open(Arc::new(MemoryStore::new()));
        assert!(list.toggle("bitcoin").unwrap());
        assert!(list.contains(&CoinId::from("bitcoin")));
        assert!(!list.toggle("bitcoin").unwrap());
        assert!(list.is_empty());
    }

    #[test]
    fn test_storage_failures_keep_memory_authoritative() {
        let mut list = Watchlist::open(Arc::new(BrokenStore));
        assert!(list.is_loaded());
        assert!(list.add("bitcoin").unwrap());
        assert!(list.add("ethereum").unwrap());
        assert_eq!(ids(&list), ["bitcoin", "ethereum"]);
    }
}
