use crate::cache::{CatalogCache, CatalogSource, SourceKey};
use crate::loader::find_catalog;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use symptomatch_core::{Catalog, Error, Result};
use tracing::{debug, info, warn};

/// Summary of the active catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub source: String,
    pub diseases: usize,
    pub loaded_at: DateTime<Utc>,
    /// Number of diseases per category label
    pub categories: BTreeMap<String, usize>,
}

impl CatalogInfo {
    fn describe(source: &CatalogSource, catalog: &Catalog) -> Self {
        Self {
            source: source.label(),
            diseases: catalog.len(),
            loaded_at: Utc::now(),
            categories: catalog
                .category_counts()
                .into_iter()
                .map(|(category, count)| (category.label().to_string(), count))
                .collect(),
        }
    }
}

/// The catalog currently served, with where it came from
#[derive(Debug, Clone)]
pub struct ActiveCatalog {
    pub source: CatalogSource,
    pub key: SourceKey,
    pub catalog: Arc<Catalog>,
    pub info: CatalogInfo,
}

/// Owns the catalog cache and the active catalog snapshot
///
/// Readers clone the active `Arc` and query it without holding the lock.
/// Activating or reloading builds a complete new snapshot first and then
/// swaps the reference; a failed load leaves the previous snapshot active.
/// An upload that stops being active is evicted from the cache, so only
/// file-backed catalogs accumulate.
#[derive(Default)]
pub struct CatalogManager {
    cache: CatalogCache,
    active: RwLock<Option<Arc<ActiveCatalog>>>,
}

impl CatalogManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with `source` already active
    pub fn with_source(source: CatalogSource) -> Result<Self> {
        let manager = Self::new();
        manager.activate(source)?;
        Ok(manager)
    }

    /// Activate the first existing file among `candidates`
    ///
    /// When none exists the manager starts empty and waits for a catalog to
    /// be activated later. A file that exists but fails to load is an error.
    pub fn from_search(candidates: &[PathBuf]) -> Result<Self> {
        match find_catalog(candidates) {
            Ok(path) => Self::with_source(CatalogSource::Path(path)),
            Err(Error::CatalogUnavailable(reason)) => {
                warn!("{}; starting without a catalog", reason);
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Load (or fetch from cache) `source` and make it the active catalog
    pub fn activate(&self, source: CatalogSource) -> Result<CatalogInfo> {
        let (key, catalog) = self.cache.get_or_load_keyed(&source)?;
        Ok(self.swap(source, key, catalog))
    }

    /// Re-read the active source and swap in the fresh snapshot
    pub fn reload(&self) -> Result<CatalogInfo> {
        let current = self.current().ok_or_else(|| {
            Error::CatalogUnavailable("no catalog is active".to_string())
        })?;
        let (key, catalog) = self.cache.reload_keyed(&current.source)?;
        Ok(self.swap(current.source.clone(), key, catalog))
    }

    fn swap(&self, source: CatalogSource, key: SourceKey, catalog: Arc<Catalog>) -> CatalogInfo {
        let info = CatalogInfo::describe(&source, &catalog);
        info!("Active catalog: {} ({} diseases)", info.source, info.diseases);
        let previous = self.active.write().replace(Arc::new(ActiveCatalog {
            source,
            key: key.clone(),
            catalog,
            info: info.clone(),
        }));

        if let Some(previous) = previous {
            let superseded =
                matches!(previous.key, SourceKey::ContentHash(_)) && previous.key != key;
            if superseded && self.cache.invalidate(&previous.key) {
                debug!("Evicted superseded upload {}", previous.info.source);
            }
        }
        info
    }

    pub fn current(&self) -> Option<Arc<ActiveCatalog>> {
        self.active.read().clone()
    }

    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.current().map(|active| active.catalog.clone())
    }

    pub fn info(&self) -> Option<CatalogInfo> {
        self.current().map(|active| active.info.clone())
    }
}
