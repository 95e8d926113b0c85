//! The operator's working session.

use std::sync::Arc;

use anyhow::{Context, Result};
use backoffice_cache::{ActiveStoreSelection, Cache, CacheError, SelectionStore};
use backoffice_commerce::catalog::Category;
use backoffice_commerce::{
    resolve_logo_url, CategoryService, CommerceError, ProductService, Store, StoreService,
};
use backoffice_data::{FetchClient, HttpTransport, Transport};

use crate::config::DashboardConfig;

/// Data shown when the dashboard opens.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stores: Vec<Store>,
    pub categories: Vec<Category>,
}

/// Selection, dispatcher and service facades wired from one configuration.
///
/// # Example
///
/// ```rust,ignore
/// let session = AdminSession::connect(DashboardConfig::load("backoffice.toml")?)?;
///
/// let stores = session.stores().get_stores().await?;
/// if let Some(store) = session.active_store(&stores) {
///     session.switch_store(store)?;
/// }
///
/// // Scoped to the store selected above
/// let categories = session.categories().get_categories().await?;
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    config: DashboardConfig,
    selection: Arc<SelectionStore>,
    client: Arc<FetchClient>,
    stores: StoreService,
    categories: CategoryService,
    products: ProductService,
}

impl AdminSession {
    /// Open the configured storage and talk to the API over HTTP.
    pub fn connect(config: DashboardConfig) -> Result<Self> {
        let cache = match &config.storage.path {
            Some(path) => Cache::open(path)
                .with_context(|| format!("Failed to open selection storage: {}", path.display()))?,
            None => Cache::in_memory(),
        };
        Self::with_transport(config, cache, Arc::new(HttpTransport::new()))
    }

    /// Build a session over an existing cache and transport.
    pub fn with_transport(
        config: DashboardConfig,
        cache: Cache,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let selection = SelectionStore::open(cache, &config.storage.namespace)
            .context("Failed to load the active store selection")?;
        let selection = Arc::new(selection);

        let client = FetchClient::new(config.api.base_url.clone(), selection.clone(), transport)
            .with_store_header(config.api.store_header.clone());
        let client = Arc::new(client);

        tracing::info!(
            base_url = %config.api.base_url,
            store_id = ?selection.store_id(),
            "admin session ready"
        );

        Ok(Self {
            stores: StoreService::new(client.clone()),
            categories: CategoryService::new(client.clone()),
            products: ProductService::new(client.clone()),
            config,
            selection,
            client,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<FetchClient> {
        &self.client
    }

    pub fn stores(&self) -> &StoreService {
        &self.stores
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }

    /// The persisted selection.
    pub fn selection(&self) -> ActiveStoreSelection {
        self.selection.get()
    }

    /// Make `store` the active store. Requests dispatched from now on carry
    /// its id; requests already in flight keep theirs.
    pub fn switch_store(&self, store: &Store) -> Result<(), CacheError> {
        self.selection.set(ActiveStoreSelection::new(
            store.id.get(),
            store.name.clone(),
            store.logo.clone(),
        ))
    }

    pub fn clear_selection(&self) -> Result<(), CacheError> {
        self.selection.clear()
    }

    /// The store matching the selected id, else the first store.
    pub fn active_store<'a>(&self, stores: &'a [Store]) -> Option<&'a Store> {
        let selected = self.selection.get().id;
        stores
            .iter()
            .find(|s| s.id.get() == selected)
            .or_else(|| stores.first())
    }

    /// Resolve a logo reference against the configured public asset root.
    pub fn logo_url(&self, logo: Option<&str>) -> Option<String> {
        resolve_logo_url(logo, &self.config.api.public_url)
    }

    /// Fetch stores and categories concurrently.
    pub async fn load_dashboard(&self) -> Result<Dashboard, CommerceError> {
        let (stores, categories) = futures::try_join!(
            self.stores.get_stores(),
            self.categories.get_categories()
        )?;
        tracing::debug!(
            stores = stores.len(),
            categories = categories.len(),
            "dashboard loaded"
        );
        Ok(Dashboard { stores, categories })
    }
}
