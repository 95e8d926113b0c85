//! Active store selection persisted in the Key-Value store.

use crate::{cache_key, Cache, CacheError};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "backoffice";

const ID_KEY: &str = "selectedStoreId";
const NAME_KEY: &str = "selectedStoreName";
const LOGO_KEY: &str = "selectedStoreLogo";

/// The store the operator is currently working on.
///
/// An `id` of zero (or below) means no store is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStoreSelection {
    /// Server-side store id.
    pub id: i64,
    /// Display name of the store.
    pub name: String,
    /// Logo reference as returned by the server.
    pub logo: Option<String>,
}

impl ActiveStoreSelection {
    /// Create a selection for a known store.
    pub fn new(id: i64, name: impl Into<String>, logo: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo,
        }
    }

    /// The "nothing selected" value.
    pub fn unselected() -> Self {
        Self::default()
    }

    /// Whether a store is selected.
    pub fn is_selected(&self) -> bool {
        self.id > 0
    }

    /// The selected store id, if any.
    pub fn store_id(&self) -> Option<i64> {
        self.is_selected().then_some(self.id)
    }
}

#[derive(Debug, Clone)]
struct SelectionKeys {
    id: String,
    name: String,
    logo: String,
}

impl SelectionKeys {
    fn new(namespace: &str) -> Self {
        Self {
            id: cache_key!(namespace, ID_KEY),
            name: cache_key!(namespace, NAME_KEY),
            logo: cache_key!(namespace, LOGO_KEY),
        }
    }
}

/// Durable holder of the [`ActiveStoreSelection`].
///
/// The store is the only writer of the selection. Readers get a snapshot from
/// [`SelectionStore::get`]; a reader never sees a selection whose fields come
/// from two different writes.
///
/// # Example
///
/// ```rust,ignore
/// use backoffice_cache::{ActiveStoreSelection, Cache, SelectionStore};
///
/// let store = SelectionStore::open(Cache::open(".backoffice/state.json")?, "backoffice")?;
/// store.set(ActiveStoreSelection::new(3, "Acme", None))?;
///
/// assert_eq!(store.store_id(), Some(3));
/// ```
#[derive(Debug)]
pub struct SelectionStore {
    cache: Cache,
    keys: SelectionKeys,
    current: RwLock<ActiveStoreSelection>,
}

impl SelectionStore {
    /// Open the selection stored under `namespace`, falling back to the
    /// unselected value for every missing entry.
    pub fn open(cache: Cache, namespace: &str) -> Result<Self, CacheError> {
        let keys = SelectionKeys::new(namespace);
        let defaults = ActiveStoreSelection::unselected();

        let current = ActiveStoreSelection {
            id: cache.get::<i64>(&keys.id)?.unwrap_or(defaults.id),
            name: cache.get::<String>(&keys.name)?.unwrap_or(defaults.name),
            logo: cache.get::<Option<String>>(&keys.logo)?.flatten(),
        };

        tracing::debug!(
            namespace,
            store_id = current.id,
            "loaded active store selection"
        );

        Ok(Self {
            cache,
            keys,
            current: RwLock::new(current),
        })
    }

    /// Open the selection under [`DEFAULT_NAMESPACE`].
    pub fn open_default(cache: Cache) -> Result<Self, CacheError> {
        Self::open(cache, DEFAULT_NAMESPACE)
    }

    /// Snapshot of the current selection.
    pub fn get(&self) -> ActiveStoreSelection {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The selected store id, or `None` when nothing is selected.
    pub fn store_id(&self) -> Option<i64> {
        match self.current.read() {
            Ok(current) => current.store_id(),
            Err(poisoned) => poisoned.into_inner().store_id(),
        }
    }

    /// Replace the selection and persist it.
    ///
    /// All three entries are written as one batch before the in-memory value
    /// changes, so a failed write leaves both the durable and the in-memory
    /// selection untouched.
    pub fn set(&self, selection: ActiveStoreSelection) -> Result<(), CacheError> {
        let mut current = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        self.cache.set_all(vec![
            (self.keys.id.clone(), serde_json::to_value(selection.id)?),
            (self.keys.name.clone(), serde_json::to_value(&selection.name)?),
            (self.keys.logo.clone(), serde_json::to_value(&selection.logo)?),
        ])?;

        tracing::info!(
            store_id = selection.id,
            store_name = %selection.name,
            "active store selection changed"
        );

        *current = selection;
        Ok(())
    }

    /// Reset to the unselected value.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.set(ActiveStoreSelection::unselected())
    }
}
