//! Source-keyed catalog cache
//!
//! Parsing a catalog and deriving its normalized fields happens once per
//! source. Files are keyed by canonical path, uploads by the SHA-256 of
//! their content, so re-uploading identical bytes hits the cache. Entries
//! are only replaced or dropped by an explicit [`CatalogCache::reload`] or
//! [`CatalogCache::invalidate`].

use crate::loader::{load_catalog_file, parse_catalog_bytes};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use symptomatch_core::{Catalog, Result};
use tracing::{debug, info};

/// Where a catalog comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A CSV file on disk
    Path(PathBuf),
    /// An uploaded CSV file
    Upload { name: String, bytes: Arc<[u8]> },
}

/// Identity of a catalog source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Path(PathBuf),
    ContentHash(String),
}

impl CatalogSource {
    pub fn upload(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        CatalogSource::Upload {
            name: name.into(),
            bytes: Arc::from(bytes),
        }
    }

    /// Cache key; resolving a path key fails if the file is missing
    pub fn key(&self) -> Result<SourceKey> {
        match self {
            CatalogSource::Path(path) => Ok(SourceKey::Path(path.canonicalize()?)),
            CatalogSource::Upload { bytes, .. } => {
                Ok(SourceKey::ContentHash(format!("{:x}", Sha256::digest(bytes))))
            }
        }
    }

    /// Human-readable description
    pub fn label(&self) -> String {
        match self {
            CatalogSource::Path(path) => path.display().to_string(),
            CatalogSource::Upload { name, .. } => format!("upload:{}", name),
        }
    }

    fn load(&self) -> Result<Catalog> {
        match self {
            CatalogSource::Path(path) => load_catalog_file(path),
            CatalogSource::Upload { name, bytes } => {
                let catalog = parse_catalog_bytes(bytes)?;
                info!("Loaded uploaded catalog {}: {} diseases", name, catalog.len());
                Ok(catalog)
            }
        }
    }
}

/// Parsed catalogs keyed by source identity
#[derive(Default)]
pub struct CatalogCache {
    entries: RwLock<HashMap<SourceKey, Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `source`, loading it on first use
    pub fn get_or_load(&self, source: &CatalogSource) -> Result<Arc<Catalog>> {
        self.get_or_load_keyed(source).map(|(_, catalog)| catalog)
    }

    pub(crate) fn get_or_load_keyed(
        &self,
        source: &CatalogSource,
    ) -> Result<(SourceKey, Arc<Catalog>)> {
        let key = source.key()?;
        if let Some(catalog) = self.entries.read().get(&key) {
            debug!("Catalog cache hit for {}", source.label());
            return Ok((key, catalog.clone()));
        }

        let catalog = Arc::new(source.load()?);
        let mut entries = self.entries.write();
        let catalog = entries.entry(key.clone()).or_insert(catalog).clone();
        Ok((key, catalog))
    }

    /// Load `source` again and replace its cache entry
    ///
    /// On failure the previous entry, if any, is left in place.
    pub fn reload(&self, source: &CatalogSource) -> Result<Arc<Catalog>> {
        self.reload_keyed(source).map(|(_, catalog)| catalog)
    }

    pub(crate) fn reload_keyed(&self, source: &CatalogSource) -> Result<(SourceKey, Arc<Catalog>)> {
        let key = source.key()?;
        let catalog = Arc::new(source.load()?);
        self.entries.write().insert(key.clone(), catalog.clone());
        info!("Reloaded catalog {}", source.label());
        Ok((key, catalog))
    }

    /// Drop the entry for `key`; returns whether one existed
    pub fn invalidate(&self, key: &SourceKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    pub fn contains(&self, key: &SourceKey) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
