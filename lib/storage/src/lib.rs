pub mod cache;
pub mod loader;
pub mod manager;

pub use cache::{CatalogCache, CatalogSource, SourceKey};
pub use loader::{
    default_catalog_paths, find_catalog, load_catalog_file, parse_catalog_bytes,
    parse_catalog_bytes_with_limit, parse_records,
    resolve_catalog_path, write_records, DEFAULT_CATALOG_PATHS, MAX_DECOMPRESSED_BYTES,
    REQUIRED_COLUMNS,
};
pub use manager::{ActiveCatalog, CatalogInfo, CatalogManager};
